use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named savings target with a current and target amount.
///
/// Completion is derived, never stored: a goal is complete whenever
/// `current_amount >= target_amount`, and a later withdrawal can silently
/// return it to the active state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new goal. `current_amount` always starts at zero.
#[derive(Debug, Clone, Default)]
pub struct GoalDraft {
    pub name: String,
    pub target_amount: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub deadline: Option<NaiveDate>,
}

/// Replacement fields applied by an edit. `current_amount` is never touched,
/// and the new target is not re-checked against it, so lowering the target
/// below the saved amount simply leaves the goal over-funded.
#[derive(Debug, Clone)]
pub struct GoalUpdate {
    pub name: String,
    pub target_amount: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub deadline: Option<NaiveDate>,
}

impl Goal {
    pub fn new(draft: GoalDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            target_amount: draft.target_amount,
            current_amount: 0.0,
            image_url: draft.image_url,
            category: draft.category,
            deadline: draft.deadline,
            created_at: now,
            updated_at: now,
        }
    }

    /// Progress toward the target, clamped to `[0, 100]` even when over-funded.
    pub fn progress_percentage(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).min(100.0)
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn clarity(&self) -> ClarityEffect {
        ClarityEffect::from_progress(self.current_amount, self.target_amount)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Cosmetic blur/grayscale pair derived from a goal's progress ratio.
///
/// Obscurity decreases monotonically with progress and reaches zero exactly
/// at completion; over-funding never pushes either value negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClarityEffect {
    pub blur: f64,
    pub grayscale: f64,
}

impl ClarityEffect {
    pub fn from_progress(current: f64, target: f64) -> Self {
        let ratio = if target > 0.0 {
            (current / target).min(1.0)
        } else {
            1.0
        };
        Self {
            blur: 10.0 * (1.0 - ratio),
            grayscale: 100.0 * (1.0 - ratio),
        }
    }

    pub fn fully_clear(&self) -> bool {
        self.blur == 0.0 && self.grayscale == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal_with(current: f64, target: f64) -> Goal {
        let mut goal = Goal::new(GoalDraft {
            name: "Bike".into(),
            target_amount: target,
            ..GoalDraft::default()
        });
        goal.current_amount = current;
        goal
    }

    #[test]
    fn progress_is_clamped_when_over_funded() {
        let goal = goal_with(450.0, 300.0);
        assert_eq!(goal.progress_percentage(), 100.0);
        assert!(goal.is_completed());
    }

    #[test]
    fn clarity_reaches_zero_exactly_at_completion() {
        let halfway = goal_with(150.0, 300.0).clarity();
        assert_eq!(halfway.blur, 5.0);
        assert_eq!(halfway.grayscale, 50.0);

        let done = goal_with(300.0, 300.0).clarity();
        assert!(done.fully_clear());

        let over = goal_with(400.0, 300.0).clarity();
        assert!(over.fully_clear());
    }

    #[test]
    fn serde_roundtrip_preserves_optional_metadata() {
        let mut goal = goal_with(10.0, 100.0);
        goal.category = Some("Travel".into());
        let json = serde_json::to_string(&goal).expect("serialize");
        let back: Goal = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.category.as_deref(), Some("Travel"));
        assert_eq!(back.deadline, None);
    }
}
