use serde::{Deserialize, Serialize};

/// Counters that accumulate across goal creation and deletion, independent of
/// any single goal's lifetime. Completion is credited at deletion time, not
/// when the saved amount first crosses the target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifetimeStats {
    #[serde(default)]
    pub total_goals_created: u64,
    #[serde(default)]
    pub total_goals_completed: u64,
    #[serde(default)]
    pub total_deposits: u64,
    #[serde(default)]
    pub total_withdrawals: u64,
    /// Net amount saved: deposits add, withdrawals subtract.
    #[serde(default)]
    pub total_saved: f64,
}

impl LifetimeStats {
    /// Zeroes every counter. Idempotent.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
