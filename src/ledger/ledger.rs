use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

use super::{Goal, GoalDraft, GoalUpdate, LifetimeStats};

pub const SCHEMA_VERSION: u8 = 1;

/// Demo goals seeded when no saved state exists yet.
static DEMO_SEEDS: Lazy<Vec<(&str, f64, f64, &str)>> = Lazy::new(|| {
    vec![
        ("Vacation Fund", 2000.0, 1500.0, "Travel"),
        ("Emergency Fund", 5000.0, 5000.0, "Emergency"),
        ("New Laptop", 1200.0, 800.0, "Tech"),
    ]
});

/// The in-memory collection of goals plus lifetime statistics, and the
/// operations that mutate them.
///
/// Every operation validates before touching any state: a failed precondition
/// is a no-op that returns an error, never a partial update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalLedger {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default, rename = "lifetime_stats")]
    pub stats: LifetimeStats,
    #[serde(default = "GoalLedger::schema_version_default")]
    pub schema_version: u8,
}

/// Outcome of a successful deposit.
#[derive(Debug, Clone, Copy)]
pub struct DepositReceipt {
    pub new_amount: f64,
    /// True only when this deposit moved the goal from below its target to at
    /// or above it. Further deposits on an already complete goal leave this
    /// false, so each crossing fires at most once.
    pub completed_goal: bool,
}

impl Default for GoalLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalLedger {
    pub fn new() -> Self {
        Self {
            goals: Vec::new(),
            stats: LifetimeStats::default(),
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Builds the demo ledger shown on first launch. Stats start zeroed; the
    /// seeded amounts do not count toward any lifetime counter.
    pub fn demo() -> Self {
        let mut ledger = Self::new();
        for (name, target, current, category) in DEMO_SEEDS.iter() {
            let mut goal = Goal::new(GoalDraft {
                name: (*name).into(),
                target_amount: *target,
                category: Some((*category).into()),
                ..GoalDraft::default()
            });
            goal.current_amount = *current;
            ledger.goals.push(goal);
        }
        ledger.stats = LifetimeStats::default();
        ledger
    }

    /// Appends a new goal with a zero balance and credits `total_goals_created`.
    pub fn create_goal(&mut self, draft: GoalDraft) -> Result<Uuid> {
        let name = validated_name(&draft.name)?;
        let target = validated_target(draft.target_amount)?;
        let goal = Goal::new(GoalDraft {
            name,
            target_amount: target,
            ..draft
        });
        let id = goal.id;
        self.goals.push(goal);
        self.stats.total_goals_created += 1;
        Ok(id)
    }

    /// Adds `amount` to the goal's balance. Over-funding past the target is
    /// permitted; there is no upper bound.
    pub fn deposit(&mut self, id: Uuid, amount: f64) -> Result<DepositReceipt> {
        let amount = validated_flow(amount)?;
        let goal = self.goal_mut(id)?;
        let was_complete = goal.is_completed();
        goal.current_amount += amount;
        goal.touch();
        let receipt = DepositReceipt {
            new_amount: goal.current_amount,
            completed_goal: !was_complete && goal.is_completed(),
        };
        self.stats.total_deposits += 1;
        self.stats.total_saved += amount;
        Ok(receipt)
    }

    /// Removes `amount` from the goal's balance. Withdrawing more than is
    /// saved is rejected outright rather than clamped to zero.
    pub fn withdraw(&mut self, id: Uuid, amount: f64) -> Result<()> {
        let amount = validated_flow(amount)?;
        let goal = self.goal_mut(id)?;
        if amount > goal.current_amount {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: goal.current_amount,
            });
        }
        goal.current_amount -= amount;
        goal.touch();
        self.stats.total_withdrawals += 1;
        self.stats.total_saved -= amount;
        Ok(())
    }

    /// Replaces the goal's name, target, and display metadata. The balance is
    /// untouched and never re-validated against the new target.
    pub fn edit_goal(&mut self, id: Uuid, update: GoalUpdate) -> Result<()> {
        let name = validated_name(&update.name)?;
        let target = validated_target(update.target_amount)?;
        let goal = self.goal_mut(id)?;
        goal.name = name;
        goal.target_amount = target;
        goal.image_url = update.image_url;
        goal.category = update.category;
        goal.deadline = update.deadline;
        goal.touch();
        Ok(())
    }

    /// Removes the goal, crediting `total_goals_completed` when the balance
    /// met the target at the moment of deletion. Unknown ids are a no-op
    /// returning `false`.
    pub fn delete_goal(&mut self, id: Uuid) -> bool {
        let Some(index) = self.goals.iter().position(|goal| goal.id == id) else {
            return false;
        };
        let goal = self.goals.remove(index);
        if goal.is_completed() {
            self.stats.total_goals_completed += 1;
        }
        true
    }

    /// Zeroes the lifetime counters without touching the goal collection.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn goal(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn stats(&self) -> &LifetimeStats {
        &self.stats
    }

    /// Sum of every goal's saved balance, the headline "total savings" figure.
    pub fn total_balance(&self) -> f64 {
        self.goals.iter().map(|goal| goal.current_amount).sum()
    }

    fn goal_mut(&mut self, id: Uuid) -> Result<&mut Goal> {
        self.goals
            .iter_mut()
            .find(|goal| goal.id == id)
            .ok_or(LedgerError::GoalNotFound(id))
    }

    pub fn schema_version_default() -> u8 {
        SCHEMA_VERSION
    }
}

fn validated_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation("goal name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validated_target(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::Validation(format!(
            "target amount must be a positive number, got {amount}"
        )));
    }
    Ok(amount)
}

fn validated_flow(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::Validation(format!(
            "amount must be a positive number, got {amount}"
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_blank_name_without_side_effects() {
        let mut ledger = GoalLedger::new();
        let err = ledger
            .create_goal(GoalDraft {
                name: "   ".into(),
                target_amount: 100.0,
                ..GoalDraft::default()
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(ledger.goals().is_empty());
        assert_eq!(ledger.stats().total_goals_created, 0);
    }

    #[test]
    fn create_rejects_non_finite_target() {
        let mut ledger = GoalLedger::new();
        for bad in [f64::NAN, f64::INFINITY, 0.0, -5.0] {
            let result = ledger.create_goal(GoalDraft {
                name: "Bike".into(),
                target_amount: bad,
                ..GoalDraft::default()
            });
            assert!(result.is_err(), "target {bad} should be rejected");
        }
    }

    #[test]
    fn demo_ledger_has_seed_goals_and_zeroed_stats() {
        let ledger = GoalLedger::demo();
        assert_eq!(ledger.goals().len(), 3);
        assert_eq!(ledger.stats(), &LifetimeStats::default());
        assert_eq!(ledger.total_balance(), 7300.0);
    }
}
