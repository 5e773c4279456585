use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for ledger, storage, and configuration layers.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Goal not found: {0}")]
    GoalNotFound(Uuid),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Insufficient funds: requested {requested:.2} but only {available:.2} is saved")]
    InsufficientFunds { requested: f64, available: f64 },
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
