use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::{LedgerError, Result},
    utils::{ensure_dir, PathResolver},
};

const TMP_SUFFIX: &str = "tmp";

/// User preferences persisted separately from the goal ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            last_data_dir: None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::config_base())
    }

    pub fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Loads the saved configuration, falling back to defaults when no file
    /// exists yet.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_defaults_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::from_base(temp.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load");
        assert_eq!(config.currency, "USD");
        assert!(config.last_data_dir.is_none());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::from_base(temp.path().to_path_buf()).expect("manager");
        let mut config = Config::default();
        config.currency = "EUR".into();
        config.last_data_dir = Some(temp.path().join("data"));
        manager.save(&config).expect("save");
        let loaded = manager.load().expect("load");
        assert_eq!(loaded.currency, "EUR");
        assert_eq!(loaded.last_data_dir, Some(temp.path().join("data")));
    }

    #[test]
    fn corrupt_file_surfaces_config_error() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::from_base(temp.path().to_path_buf()).expect("manager");
        fs::write(manager.path(), "{ not json").expect("write corrupt file");
        let err = manager.load().unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }
}
