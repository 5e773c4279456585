use std::{
    fs,
    path::{Path, PathBuf},
    sync::Once,
};

use crate::errors::Result;

const APP_DIR_NAME: &str = "focusfund";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("focusfund=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Creates the directory (and any missing parents) when absent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Resolves application directories, honoring an explicit override.
pub struct PathResolver;

impl PathResolver {
    pub fn resolve_base(override_dir: Option<PathBuf>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir;
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    pub fn state_file_in(base: &Path) -> PathBuf {
        base.join("goals.json")
    }

    pub fn backup_dir_in(base: &Path) -> PathBuf {
        base.join("backups")
    }

    pub fn config_base() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join("config.json")
    }
}
