use focusfund::{
    errors::LedgerError,
    ledger::{GoalDraft, GoalLedger, GoalUpdate, LifetimeStats},
};
use uuid::Uuid;

fn draft(name: &str, target: f64) -> GoalDraft {
    GoalDraft {
        name: name.into(),
        target_amount: target,
        ..GoalDraft::default()
    }
}

#[test]
fn bike_scenario_end_to_end() {
    let mut ledger = GoalLedger::new();
    let id = ledger.create_goal(draft("Bike", 300.0)).expect("create");
    assert_eq!(ledger.goal(id).unwrap().current_amount, 0.0);
    assert_eq!(ledger.stats().total_goals_created, 1);

    let receipt = ledger.deposit(id, 150.0).expect("first deposit");
    assert!(!receipt.completed_goal);
    assert_eq!(ledger.goal(id).unwrap().current_amount, 150.0);
    assert_eq!(ledger.goal(id).unwrap().progress_percentage(), 50.0);

    let receipt = ledger.deposit(id, 150.0).expect("second deposit");
    assert!(receipt.completed_goal, "crossing the target fires the signal");
    assert!(ledger.goal(id).unwrap().is_completed());

    let before = ledger.goal(id).unwrap().current_amount;
    let err = ledger.withdraw(id, 400.0).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
    assert_eq!(
        ledger.goal(id).unwrap().current_amount,
        before,
        "rejected withdrawal must not change state"
    );
    assert_eq!(ledger.stats().total_withdrawals, 0);
}

#[test]
fn completion_signal_fires_once_per_crossing() {
    let mut ledger = GoalLedger::new();
    let id = ledger.create_goal(draft("Trip", 100.0)).expect("create");

    assert!(ledger.deposit(id, 100.0).unwrap().completed_goal);
    assert!(
        !ledger.deposit(id, 10.0).unwrap().completed_goal,
        "already complete, no re-fire"
    );

    // Withdrawing back below the target silently reverts the derived state;
    // a later crossing fires again.
    ledger.withdraw(id, 60.0).expect("withdraw");
    assert!(!ledger.goal(id).unwrap().is_completed());
    assert!(ledger.deposit(id, 60.0).unwrap().completed_goal);
}

#[test]
fn deposit_then_withdraw_round_trips_balance() {
    let mut ledger = GoalLedger::new();
    let id = ledger.create_goal(draft("Camera", 800.0)).expect("create");
    ledger.deposit(id, 125.5).expect("seed");
    let before = ledger.goal(id).unwrap().current_amount;

    ledger.deposit(id, 42.25).expect("deposit");
    ledger.withdraw(id, 42.25).expect("withdraw");
    assert_eq!(ledger.goal(id).unwrap().current_amount, before);
}

#[test]
fn balance_never_goes_negative() {
    let mut ledger = GoalLedger::new();
    let id = ledger.create_goal(draft("Camera", 800.0)).expect("create");
    ledger.deposit(id, 50.0).expect("deposit");
    ledger.withdraw(id, 30.0).expect("withdraw");
    assert!(ledger.withdraw(id, 30.0).is_err());
    assert!(ledger.goal(id).unwrap().current_amount >= 0.0);
    assert_eq!(ledger.goal(id).unwrap().current_amount, 20.0);
}

#[test]
fn over_funding_is_allowed_but_progress_is_clamped() {
    let mut ledger = GoalLedger::new();
    let id = ledger.create_goal(draft("Desk", 200.0)).expect("create");
    ledger.deposit(id, 500.0).expect("deposit");
    let goal = ledger.goal(id).unwrap();
    assert_eq!(goal.current_amount, 500.0);
    assert_eq!(goal.progress_percentage(), 100.0);
    assert!(goal.clarity().fully_clear());
}

#[test]
fn deleting_funded_goal_credits_completion() {
    let mut ledger = GoalLedger::new();
    let funded = ledger.create_goal(draft("Funded", 100.0)).expect("create");
    let unfunded = ledger.create_goal(draft("Unfunded", 100.0)).expect("create");
    ledger.deposit(funded, 100.0).expect("fund");

    assert!(ledger.delete_goal(funded));
    assert_eq!(ledger.stats().total_goals_completed, 1);

    assert!(ledger.delete_goal(unfunded));
    assert_eq!(ledger.stats().total_goals_completed, 1);
    assert!(ledger.goals().is_empty());
}

#[test]
fn deleting_unknown_goal_is_a_noop() {
    let mut ledger = GoalLedger::new();
    ledger.create_goal(draft("Bike", 300.0)).expect("create");
    let before = ledger.clone();
    assert!(!ledger.delete_goal(Uuid::new_v4()));
    assert_eq!(ledger.goals().len(), before.goals().len());
    assert_eq!(ledger.stats(), before.stats());
}

#[test]
fn edit_replaces_name_and_target_only() {
    let mut ledger = GoalLedger::new();
    let id = ledger.create_goal(draft("Bike", 300.0)).expect("create");
    ledger.deposit(id, 250.0).expect("deposit");

    // Lowering the target below the saved amount is allowed and leaves the
    // goal over-funded.
    ledger
        .edit_goal(
            id,
            GoalUpdate {
                name: "City Bike".into(),
                target_amount: 200.0,
                image_url: None,
                category: Some("Transport".into()),
                deadline: None,
            },
        )
        .expect("edit");

    let goal = ledger.goal(id).unwrap();
    assert_eq!(goal.name, "City Bike");
    assert_eq!(goal.target_amount, 200.0);
    assert_eq!(goal.current_amount, 250.0);
    assert!(goal.is_completed());
}

#[test]
fn edit_rejects_invalid_input_without_changes() {
    let mut ledger = GoalLedger::new();
    let id = ledger.create_goal(draft("Bike", 300.0)).expect("create");

    let err = ledger
        .edit_goal(
            id,
            GoalUpdate {
                name: "  ".into(),
                target_amount: 100.0,
                image_url: None,
                category: None,
                deadline: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let err = ledger
        .edit_goal(
            id,
            GoalUpdate {
                name: "Bike".into(),
                target_amount: f64::NAN,
                image_url: None,
                category: None,
                deadline: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let goal = ledger.goal(id).unwrap();
    assert_eq!(goal.name, "Bike");
    assert_eq!(goal.target_amount, 300.0);
}

#[test]
fn operations_on_unknown_goal_leave_stats_untouched() {
    let mut ledger = GoalLedger::new();
    let ghost = Uuid::new_v4();
    assert!(matches!(
        ledger.deposit(ghost, 10.0).unwrap_err(),
        LedgerError::GoalNotFound(_)
    ));
    assert!(matches!(
        ledger.withdraw(ghost, 10.0).unwrap_err(),
        LedgerError::GoalNotFound(_)
    ));
    assert_eq!(ledger.stats(), &LifetimeStats::default());
}

#[test]
fn total_saved_tracks_net_flow() {
    let mut ledger = GoalLedger::new();
    let a = ledger.create_goal(draft("A", 100.0)).expect("create");
    let b = ledger.create_goal(draft("B", 100.0)).expect("create");

    ledger.deposit(a, 80.0).expect("deposit a");
    ledger.deposit(b, 40.0).expect("deposit b");
    ledger.withdraw(a, 30.0).expect("withdraw a");

    let stats = ledger.stats();
    assert_eq!(stats.total_deposits, 2);
    assert_eq!(stats.total_withdrawals, 1);
    assert_eq!(stats.total_saved, 90.0);
    assert_eq!(ledger.total_balance(), 90.0);
}

#[test]
fn reset_stats_preserves_goals() {
    let mut ledger = GoalLedger::new();
    let id = ledger.create_goal(draft("Bike", 300.0)).expect("create");
    ledger.deposit(id, 100.0).expect("deposit");

    ledger.reset_stats();
    assert_eq!(ledger.stats(), &LifetimeStats::default());
    assert_eq!(ledger.goal(id).unwrap().current_amount, 100.0);

    ledger.reset_stats();
    assert_eq!(ledger.stats(), &LifetimeStats::default());
}

#[test]
fn stats_survive_goal_deletion() {
    let mut ledger = GoalLedger::new();
    let id = ledger.create_goal(draft("Bike", 300.0)).expect("create");
    ledger.deposit(id, 300.0).expect("deposit");
    ledger.delete_goal(id);

    let stats = ledger.stats();
    assert_eq!(stats.total_goals_created, 1);
    assert_eq!(stats.total_goals_completed, 1);
    assert_eq!(stats.total_deposits, 1);
    assert_eq!(stats.total_saved, 300.0);
}
