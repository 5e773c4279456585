//! Application layer tying the goal ledger to an injected storage backend.
//!
//! Every mutating operation persists fire-and-forget after the in-memory
//! change: a failed save is logged and swallowed, and the in-memory ledger
//! stays authoritative for the rest of the session.

use uuid::Uuid;

use crate::{
    errors::Result,
    ledger::{DepositReceipt, GoalDraft, GoalLedger, GoalUpdate},
    storage::StateStore,
};

pub struct SavingsApp {
    ledger: GoalLedger,
    store: Box<dyn StateStore>,
}

impl SavingsApp {
    /// Loads the persisted snapshot, seeding the demo ledger when nothing was
    /// saved yet or the saved state cannot be read.
    pub fn bootstrap(store: Box<dyn StateStore>) -> Self {
        let ledger = match store.load() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => {
                tracing::info!("no saved state found, seeding demo goals");
                GoalLedger::demo()
            }
            Err(err) => {
                tracing::warn!("failed to load saved state, seeding demo goals: {err}");
                GoalLedger::demo()
            }
        };
        Self { ledger, store }
    }

    /// Starts from an explicit ledger snapshot, e.g. after a backup restore.
    pub fn with_ledger(ledger: GoalLedger, store: Box<dyn StateStore>) -> Self {
        Self { ledger, store }
    }

    pub fn create_goal(&mut self, draft: GoalDraft) -> Result<Uuid> {
        let id = self.ledger.create_goal(draft)?;
        self.persist();
        Ok(id)
    }

    pub fn deposit(&mut self, id: Uuid, amount: f64) -> Result<DepositReceipt> {
        let receipt = self.ledger.deposit(id, amount)?;
        self.persist();
        Ok(receipt)
    }

    pub fn withdraw(&mut self, id: Uuid, amount: f64) -> Result<()> {
        self.ledger.withdraw(id, amount)?;
        self.persist();
        Ok(())
    }

    pub fn edit_goal(&mut self, id: Uuid, update: GoalUpdate) -> Result<()> {
        self.ledger.edit_goal(id, update)?;
        self.persist();
        Ok(())
    }

    pub fn delete_goal(&mut self, id: Uuid) -> bool {
        let removed = self.ledger.delete_goal(id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn reset_stats(&mut self) {
        self.ledger.reset_stats();
        self.persist();
    }

    pub fn ledger(&self) -> &GoalLedger {
        &self.ledger
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.ledger) {
            tracing::warn!("failed to persist ledger state: {err}");
        }
    }
}
