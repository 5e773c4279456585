pub mod json_backend;

use crate::{errors::LedgerError, ledger::GoalLedger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing ledger snapshots.
///
/// The application layer calls `load` once at startup and `save` after every
/// mutating operation; saves are fire-and-forget from the caller's point of
/// view and never roll back in-memory state.
pub trait StateStore: Send + Sync {
    /// Returns the persisted snapshot, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<GoalLedger>>;
    fn save(&self, ledger: &GoalLedger) -> Result<()>;
}

pub use json_backend::JsonStorage;
