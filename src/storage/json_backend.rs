use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::LedgerError,
    ledger::{GoalLedger, SCHEMA_VERSION},
    utils::{ensure_dir, PathResolver},
};

use super::{Result, StateStore};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// File-backed store keeping the ledger snapshot as pretty JSON, with
/// timestamped backups of the previous snapshot before each overwrite.
#[derive(Clone)]
pub struct JsonStorage {
    base: PathBuf,
    state_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        ensure_dir(&base)?;
        let backups_dir = PathResolver::backup_dir_in(&base);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            state_file: PathResolver::state_file_in(&base),
            base,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn state_path(&self) -> &Path {
        &self.state_file
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let file_name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            entries.push(file_name);
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }

    /// Copies the named backup over the live state file and reloads it.
    pub fn restore(&self, backup_name: &str) -> Result<GoalLedger> {
        let backup_path = self.backups_dir.join(backup_name);
        if !backup_path.exists() {
            return Err(LedgerError::Storage(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        fs::copy(&backup_path, &self.state_file)?;
        match self.load()? {
            Some(ledger) => Ok(ledger),
            None => Err(LedgerError::Storage(format!(
                "backup `{}` restored to an empty state file",
                backup_name
            ))),
        }
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.state_file.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!("goals_{}.{}", timestamp, BACKUP_EXTENSION);
        fs::copy(&self.state_file, self.backups_dir.join(backup_name))?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for name in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backups_dir.join(name));
        }
        Ok(())
    }
}

impl StateStore for JsonStorage {
    fn load(&self) -> Result<Option<GoalLedger>> {
        if !self.state_file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.state_file)?;
        let ledger: GoalLedger = serde_json::from_str(&data)?;
        if ledger.schema_version > SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "state file `{}` is from a newer schema version ({} > {})",
                self.state_file.display(),
                ledger.schema_version,
                SCHEMA_VERSION
            )));
        }
        Ok(Some(ledger))
    }

    fn save(&self, ledger: &GoalLedger) -> Result<()> {
        self.backup_existing_file()?;
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&self.state_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.state_file)?;
        Ok(())
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

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let raw = trimmed.strip_prefix("goals_")?;
    NaiveDateTime::parse_from_str(raw, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}
