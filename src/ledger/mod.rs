//! Savings-goal domain models and the ledger that mutates them.

pub mod goal;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod stats;

pub use goal::{ClarityEffect, Goal, GoalDraft, GoalUpdate};
pub use ledger::{DepositReceipt, GoalLedger, SCHEMA_VERSION};
pub use stats::LifetimeStats;
