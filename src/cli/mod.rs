//! Command-driven CLI front end for the savings-goal ledger.
//!
//! Plays the role of the UI layer: it parses a single command, runs exactly
//! one ledger operation to completion, and renders the result. Validation
//! failures surface as messages and a non-zero exit code, never a panic.

pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use dialoguer::Confirm;
use uuid::Uuid;

use crate::{
    app::SavingsApp,
    config::{Config, ConfigManager},
    errors::{CliError, LedgerError},
    ledger::{Goal, GoalDraft, GoalLedger, GoalUpdate},
    storage::JsonStorage,
};

const BAR_WIDTH: usize = 24;

#[derive(Debug, Default)]
struct ParsedArgs {
    command: Option<String>,
    positionals: Vec<String>,
    data_dir: Option<PathBuf>,
    image_url: Option<String>,
    category: Option<String>,
    deadline: Option<String>,
    assume_yes: bool,
}

impl ParsedArgs {
    fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--data-dir" => {
                    parsed.data_dir = Some(PathBuf::from(expect_value(&mut iter, "--data-dir")?));
                }
                "--image" => parsed.image_url = Some(expect_value(&mut iter, "--image")?),
                "--category" => parsed.category = Some(expect_value(&mut iter, "--category")?),
                "--deadline" => parsed.deadline = Some(expect_value(&mut iter, "--deadline")?),
                "--yes" | "-y" => parsed.assume_yes = true,
                flag if flag.starts_with("--") => {
                    return Err(CliError::Input(format!("unknown flag `{flag}`")));
                }
                _ => {
                    if parsed.command.is_none() {
                        parsed.command = Some(arg);
                    } else {
                        parsed.positionals.push(arg);
                    }
                }
            }
        }
        Ok(parsed)
    }
}

fn expect_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, CliError> {
    iter.next()
        .ok_or_else(|| CliError::Input(format!("{flag} requires a value")))
}

pub fn run<I>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = String>,
{
    let parsed = ParsedArgs::parse(args)?;
    let Some(command) = parsed.command.clone() else {
        print_usage();
        return Ok(());
    };
    if command == "help" {
        print_usage();
        return Ok(());
    }

    let config = load_config();
    let storage = JsonStorage::new(parsed.data_dir.clone(), None)?;

    match command.as_str() {
        "backups" => {
            let backups = storage.list_backups()?;
            if backups.is_empty() {
                output::info("no backups yet");
            } else {
                output::section("Backups (newest first)");
                for name in backups {
                    println!("{name}");
                }
            }
            Ok(())
        }
        "restore" => {
            let name = positional(&parsed, 0, "backup name")?.to_string();
            if !confirm("Overwrite the current goals with this backup?", parsed.assume_yes)? {
                output::info("aborted");
                return Ok(());
            }
            let ledger = storage.restore(&name)?;
            output::success(format!(
                "restored `{}` ({} goals)",
                name,
                ledger.goals().len()
            ));
            Ok(())
        }
        _ => {
            let mut app = SavingsApp::bootstrap(Box::new(storage));
            dispatch(&command, &parsed, &config, &mut app)
        }
    }
}

fn dispatch(
    command: &str,
    parsed: &ParsedArgs,
    config: &Config,
    app: &mut SavingsApp,
) -> Result<(), CliError> {
    let currency = config.currency.as_str();
    match command {
        "list" => {
            let ledger = app.ledger();
            if ledger.goals().is_empty() {
                output::info("no goals yet; create one with `focusfund add <name> <target>`");
                return Ok(());
            }
            output::section("Savings goals");
            for goal in ledger.goals() {
                print_goal_line(goal, currency);
            }
            println!();
            output::info(format!(
                "total savings: {}",
                output::format_amount(ledger.total_balance(), currency)
            ));
            Ok(())
        }
        "show" => {
            let id = resolve_goal(app.ledger(), positional(parsed, 0, "goal")?)?;
            let goal = app
                .ledger()
                .goal(id)
                .ok_or(LedgerError::GoalNotFound(id))?;
            print_goal_detail(goal, currency);
            Ok(())
        }
        "add" => {
            let name = positional(parsed, 0, "goal name")?.to_string();
            let target = parse_amount(positional(parsed, 1, "target amount")?, "target amount")?;
            let deadline = parsed
                .deadline
                .as_deref()
                .map(parse_deadline)
                .transpose()?;
            let id = app.create_goal(GoalDraft {
                name: name.clone(),
                target_amount: target,
                image_url: parsed.image_url.clone(),
                category: parsed.category.clone(),
                deadline,
            })?;
            output::success(format!("created goal `{name}` ({id})"));
            Ok(())
        }
        "deposit" => {
            let id = resolve_goal(app.ledger(), positional(parsed, 0, "goal")?)?;
            let amount = parse_amount(positional(parsed, 1, "amount")?, "amount")?;
            let name = app
                .ledger()
                .goal(id)
                .map(|goal| goal.name.clone())
                .unwrap_or_default();
            let receipt = app.deposit(id, amount)?;
            output::success(format!(
                "deposited {} into `{}` (now {})",
                output::format_amount(amount, currency),
                name,
                output::format_amount(receipt.new_amount, currency)
            ));
            if receipt.completed_goal {
                output::success(format!("`{name}` is fully funded, goal complete! 🎉"));
            }
            Ok(())
        }
        "withdraw" => {
            let id = resolve_goal(app.ledger(), positional(parsed, 0, "goal")?)?;
            let amount = parse_amount(positional(parsed, 1, "amount")?, "amount")?;
            app.withdraw(id, amount)?;
            let remaining = app
                .ledger()
                .goal(id)
                .map(|goal| goal.current_amount)
                .unwrap_or_default();
            output::success(format!(
                "withdrew {} ({} remaining)",
                output::format_amount(amount, currency),
                output::format_amount(remaining, currency)
            ));
            Ok(())
        }
        "edit" => {
            let id = resolve_goal(app.ledger(), positional(parsed, 0, "goal")?)?;
            let new_name = positional(parsed, 1, "new name")?.to_string();
            let new_target = parse_amount(positional(parsed, 2, "new target")?, "new target")?;
            let deadline = parsed
                .deadline
                .as_deref()
                .map(parse_deadline)
                .transpose()?;
            let existing = app
                .ledger()
                .goal(id)
                .ok_or(LedgerError::GoalNotFound(id))?
                .clone();
            app.edit_goal(
                id,
                GoalUpdate {
                    name: new_name.clone(),
                    target_amount: new_target,
                    image_url: parsed.image_url.clone().or(existing.image_url),
                    category: parsed.category.clone().or(existing.category),
                    deadline: deadline.or(existing.deadline),
                },
            )?;
            output::success(format!("updated goal `{new_name}`"));
            Ok(())
        }
        "delete" => {
            let id = resolve_goal(app.ledger(), positional(parsed, 0, "goal")?)?;
            let goal = app
                .ledger()
                .goal(id)
                .ok_or(LedgerError::GoalNotFound(id))?;
            let name = goal.name.clone();
            let completed = goal.is_completed();
            if !confirm(&format!("Delete goal `{name}`?"), parsed.assume_yes)? {
                output::info("aborted");
                return Ok(());
            }
            app.delete_goal(id);
            if completed {
                output::success(format!("deleted `{name}` (counted as completed)"));
            } else {
                output::success(format!("deleted `{name}`"));
            }
            Ok(())
        }
        "stats" => {
            let stats = app.ledger().stats();
            output::section("Lifetime stats");
            println!("goals created:    {}", stats.total_goals_created);
            println!("goals completed:  {}", stats.total_goals_completed);
            println!("deposits:         {}", stats.total_deposits);
            println!("withdrawals:      {}", stats.total_withdrawals);
            println!(
                "net saved:        {}",
                output::format_amount(stats.total_saved, currency)
            );
            println!(
                "current balance:  {}",
                output::format_amount(app.ledger().total_balance(), currency)
            );
            Ok(())
        }
        "reset-stats" => {
            if !confirm("Reset all lifetime stats to zero?", parsed.assume_yes)? {
                output::info("aborted");
                return Ok(());
            }
            app.reset_stats();
            output::success("lifetime stats reset");
            Ok(())
        }
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

fn print_goal_line(goal: &Goal, currency: &str) {
    let status = if goal.is_completed() {
        "complete"
    } else {
        "active"
    };
    println!(
        "{:<20} {:>12} / {:<12} {} {:>5.1}%  {}",
        goal.name,
        output::format_amount(goal.current_amount, currency),
        output::format_amount(goal.target_amount, currency),
        output::progress_bar(goal.progress_percentage(), BAR_WIDTH),
        goal.progress_percentage(),
        status,
    );
}

fn print_goal_detail(goal: &Goal, currency: &str) {
    output::section(&goal.name);
    println!("id:        {}", goal.id);
    println!(
        "saved:     {} of {}",
        output::format_amount(goal.current_amount, currency),
        output::format_amount(goal.target_amount, currency)
    );
    println!(
        "progress:  {} {:.1}%",
        output::progress_bar(goal.progress_percentage(), BAR_WIDTH),
        goal.progress_percentage()
    );
    let clarity = goal.clarity();
    println!(
        "clarity:   blur {:.1}px, grayscale {:.0}%",
        clarity.blur, clarity.grayscale
    );
    println!(
        "status:    {}",
        if goal.is_completed() { "complete" } else { "active" }
    );
    if let Some(category) = &goal.category {
        println!("category:  {category}");
    }
    if let Some(deadline) = goal.deadline {
        println!("deadline:  {deadline}");
    }
    if let Some(image) = &goal.image_url {
        println!("image:     {image}");
    }
    println!("created:   {}", goal.created_at.format("%Y-%m-%d %H:%M"));
    println!("updated:   {}", goal.updated_at.format("%Y-%m-%d %H:%M"));
}

/// Resolves a goal selector that is either a full UUID or a goal name
/// (case-insensitive). Ambiguous names must fall back to the id.
fn resolve_goal(ledger: &GoalLedger, selector: &str) -> Result<Uuid, CliError> {
    if let Ok(id) = Uuid::parse_str(selector) {
        if ledger.goal(id).is_some() {
            return Ok(id);
        }
        return Err(CliError::Ledger(LedgerError::GoalNotFound(id)));
    }
    let matches: Vec<&Goal> = ledger
        .goals()
        .iter()
        .filter(|goal| goal.name.eq_ignore_ascii_case(selector))
        .collect();
    match matches.as_slice() {
        [] => Err(CliError::Input(format!("no goal named `{selector}`"))),
        [goal] => Ok(goal.id),
        many => Err(CliError::Input(format!(
            "`{selector}` matches {} goals; use the id instead",
            many.len()
        ))),
    }
}

fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|err| CliError::Input(format!("confirmation unavailable ({err}); pass --yes")))
}

fn positional<'a>(parsed: &'a ParsedArgs, index: usize, label: &str) -> Result<&'a str, CliError> {
    parsed
        .positionals
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| CliError::Input(format!("missing {label}")))
}

fn parse_amount(raw: &str, label: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CliError::Input(format!("{label} must be a number, got `{raw}`")))
}

fn parse_deadline(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("deadline must be YYYY-MM-DD, got `{raw}`")))
}

fn load_config() -> Config {
    match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to load configuration, using defaults: {err}");
            Config::default()
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage: focusfund <command> [options]\n\
         Commands:\n  \
         list\n  \
         show <goal>\n  \
         add <name> <target> [--category C] [--image URL] [--deadline YYYY-MM-DD]\n  \
         deposit <goal> <amount>\n  \
         withdraw <goal> <amount>\n  \
         edit <goal> <new-name> <new-target> [--category C] [--image URL] [--deadline YYYY-MM-DD]\n  \
         delete <goal> [--yes]\n  \
         stats\n  \
         reset-stats [--yes]\n  \
         backups\n  \
         restore <backup-file> [--yes]\n\
         Options:\n  \
         --data-dir <path>   store state under <path> instead of the platform data dir\n  \
         --yes, -y           skip confirmation prompts\n\
         <goal> is a goal name (case-insensitive) or a goal id."
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::GoalDraft;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_splits_flags_and_positionals() {
        let parsed = ParsedArgs::parse(args(&[
            "add",
            "Bike",
            "300",
            "--category",
            "Sport",
            "--yes",
        ]))
        .expect("parse");
        assert_eq!(parsed.command.as_deref(), Some("add"));
        assert_eq!(parsed.positionals, vec!["Bike", "300"]);
        assert_eq!(parsed.category.as_deref(), Some("Sport"));
        assert!(parsed.assume_yes);
    }

    #[test]
    fn parse_rejects_unknown_flags() {
        let err = ParsedArgs::parse(args(&["list", "--frobnicate"])).unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
    }

    #[test]
    fn parse_rejects_flag_without_value() {
        let err = ParsedArgs::parse(args(&["add", "Bike", "--category"])).unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
    }

    #[test]
    fn resolve_goal_matches_name_case_insensitively() {
        let mut ledger = GoalLedger::new();
        let id = ledger
            .create_goal(GoalDraft {
                name: "Bike".into(),
                target_amount: 300.0,
                ..GoalDraft::default()
            })
            .expect("create");
        assert_eq!(resolve_goal(&ledger, "bike").expect("resolve"), id);
        assert_eq!(resolve_goal(&ledger, &id.to_string()).expect("by id"), id);
        assert!(resolve_goal(&ledger, "boat").is_err());
    }

    #[test]
    fn resolve_goal_rejects_ambiguous_names() {
        let mut ledger = GoalLedger::new();
        for _ in 0..2 {
            ledger
                .create_goal(GoalDraft {
                    name: "Trip".into(),
                    target_amount: 100.0,
                    ..GoalDraft::default()
                })
                .expect("create");
        }
        let err = resolve_goal(&ledger, "trip").unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
    }
}
