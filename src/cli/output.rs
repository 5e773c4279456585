use colored::Colorize;
use std::fmt;

/// Prints a success line with a green check marker.
pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[✓]".green().bold(), message);
}

pub fn info(message: impl fmt::Display) {
    println!("{} {}", "[i]".cyan(), message);
}

pub fn warn(message: impl fmt::Display) {
    eprintln!("{} {}", "[!]".yellow().bold(), message);
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn section(title: impl fmt::Display) {
    println!("=== {} ===", title.to_string().trim());
}

/// Renders a fixed-width textual progress bar, clamped to `[0, 100]`.
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Formats an amount with the symbol for the configured currency code.
pub fn format_amount(value: f64, currency: &str) -> String {
    match currency {
        "USD" => format!("${:.2}", value),
        "EUR" => format!("€{:.2}", value),
        "GBP" => format!("£{:.2}", value),
        other => format!("{} {:.2}", other, value),
    }
}
