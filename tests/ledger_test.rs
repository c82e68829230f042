// ABOUTME: Integration tests for the persistent ledger and the date-rollover watcher
// ABOUTME: State survives reopening on both backends; rollover completes the previous day once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_test_ledger, meal, reopen_ledger, standard_budgets, test_clock, time, today};
use macro_ledger::clock::Clock;
use macro_ledger::config::LedgerConfig;
use macro_ledger::intelligence::TimelineEntry;
use macro_ledger::ledger::Ledger;
use macro_ledger::lifecycle::RolloverWatcher;
use macro_ledger::planner::AssignOutcome;
use macro_ledger::storage::InMemoryStore;
use macro_ledger::ErrorCode;
use macro_ledger_core::models::{DayType, MacroBudgets, MacroSet, MealIntake};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// ============================================================================
// Onboarding and Persistence
// ============================================================================

#[test]
fn test_fresh_ledger_is_not_onboarded() {
    let store = InMemoryStore::new();

    let ledger = reopen_ledger(test_clock(), &store);

    assert!(!ledger.is_onboarded());
    assert_eq!(ledger.budgets(), &MacroBudgets::default());
    assert!(ledger.store().is_empty());
}

#[test]
fn test_budgets_persist() {
    let store = InMemoryStore::new();
    let ledger = create_test_ledger(test_clock(), &store);
    assert!(ledger.is_onboarded());

    let reopened = reopen_ledger(test_clock(), &store);

    assert_eq!(reopened.budgets(), &standard_budgets());
}

#[test]
fn test_days_and_meals_survive_reopen() {
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(test_clock(), &store);
    ledger.assign(today(), DayType::Rest).unwrap();
    ledger
        .track_meal(today(), "breakfast", MealIntake::from(MacroSet::new(300, 20, 30, 10)))
        .unwrap();
    ledger.rename_meal(today(), "dinner", "Ramen").unwrap();

    let mut reopened = reopen_ledger(test_clock(), &store);
    let meals = reopened.materialize_meals(today()).unwrap();

    assert_eq!(meal(&meals, "breakfast").consumed, Some(MacroSet::new(300, 20, 30, 10)));
    assert_eq!(meal(&meals, "dinner").name, "Ramen");
    assert_eq!(
        reopened.store().remaining_macros(today()).unwrap(),
        MacroSet::new(1700, 130, 170, 60)
    );
}

#[test]
fn test_first_view_persists_generated_meals() {
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(test_clock(), &store);
    ledger.assign(today(), DayType::Training).unwrap();
    assert!(reopen_ledger(test_clock(), &store).store().get(today()).unwrap().meals.is_none());

    ledger.materialize_meals(today()).unwrap();

    let reopened = reopen_ledger(test_clock(), &store);
    assert_eq!(reopened.store().get(today()).unwrap().meals.as_ref().unwrap().len(), 5);
}

#[test]
fn test_file_backed_ledger_round_trip() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let config = LedgerConfig::default().with_data_dir(dir.path());
    let clock: Arc<dyn Clock> = test_clock();

    let mut ledger = Ledger::open(&config, clock.clone()).unwrap();
    ledger.set_budgets(standard_budgets()).unwrap();
    ledger.assign(today(), DayType::Training).unwrap();
    ledger.set_training_time(today(), time(6, 30)).unwrap();
    drop(ledger);

    let reopened = Ledger::open(&config, clock).unwrap();
    assert_eq!(reopened.budgets(), &standard_budgets());
    assert_eq!(
        reopened.store().get(today()).unwrap().training_time,
        Some(time(6, 30))
    );
    assert!(dir.path().join("plannedDays.json").exists());
}

// ============================================================================
// Pending Type Changes
// ============================================================================

#[test]
fn test_pending_change_survives_reopen() {
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(test_clock(), &store);
    ledger.assign(today(), DayType::Rest).unwrap();
    let outcome = ledger.assign(today(), DayType::Training).unwrap();
    let AssignOutcome::ConfirmationRequired(pending) = outcome else {
        panic!("expected a confirmation request");
    };

    let mut reopened = reopen_ledger(test_clock(), &store);
    assert_eq!(reopened.pending_type_change(), Some(&pending));

    let day = reopened.confirm_type_change().unwrap();
    assert_eq!(day.day_type, DayType::Training);
    assert!(store.raw("pendingTypeChange").unwrap().is_none());

    let after = reopen_ledger(test_clock(), &store);
    assert_eq!(after.store().get(today()).unwrap().day_type, DayType::Training);
    assert_eq!(after.history(today()).unwrap().len(), 1);
}

#[test]
fn test_cancel_clears_persisted_pending() {
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(test_clock(), &store);
    ledger.assign(today(), DayType::Rest).unwrap();
    ledger.assign(today(), DayType::Fasting).unwrap();
    assert!(store.raw("pendingTypeChange").unwrap().is_some());

    ledger.cancel_type_change().unwrap();

    assert!(store.raw("pendingTypeChange").unwrap().is_none());
    assert_eq!(
        reopen_ledger(test_clock(), &store).store().get(today()).unwrap().day_type,
        DayType::Rest
    );
}

#[test]
fn test_stale_pending_is_discarded_on_confirm() {
    let clock = test_clock();
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(clock.clone(), &store);
    ledger.assign(today(), DayType::Rest).unwrap();
    ledger.assign(today(), DayType::Training).unwrap();

    clock.advance_days(1);
    let err = ledger.confirm_type_change().unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceLocked);
    assert!(store.raw("pendingTypeChange").unwrap().is_none());
}

// ============================================================================
// Day View
// ============================================================================

#[test]
fn test_day_view_reports_budget_progress() {
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(test_clock(), &store);
    ledger.assign(today(), DayType::Training).unwrap();
    ledger
        .track_meal(today(), "breakfast", MealIntake::from(MacroSet::new(500, 35, 60, 10)))
        .unwrap();

    let view = ledger.day_view(today()).unwrap();

    assert_eq!(view.planned, standard_budgets().training);
    assert_eq!(view.consumed, MacroSet::new(500, 35, 60, 10));
    assert_eq!(view.remaining, MacroSet::new(2000, 145, 190, 70));
    assert_eq!(view.timeline.len(), 6);
    assert!(view
        .timeline
        .iter()
        .any(|entry| *entry == TimelineEntry::Training { time: time(18, 30) }));
}

#[test]
fn test_day_view_of_unplanned_date() {
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(test_clock(), &store);

    assert_eq!(ledger.day_view(today()).unwrap_err().code, ErrorCode::ResourceNotFound);
}

#[test]
fn test_budget_edit_resets_saved_plans() {
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(test_clock(), &store);
    ledger.assign(today(), DayType::Rest).unwrap();
    ledger.materialize_meals(today()).unwrap();

    let mut budgets = standard_budgets();
    budgets.rest = MacroSet::new(2200, 160, 220, 75);
    assert_eq!(ledger.set_budgets(budgets).unwrap(), 1);

    let reopened = reopen_ledger(test_clock(), &store);
    assert!(reopened.store().get(today()).unwrap().meals.is_none());
    assert_eq!(reopened.budgets().rest, MacroSet::new(2200, 160, 220, 75));
}

// ============================================================================
// Rollover
// ============================================================================

#[test]
fn test_rollover_completes_previous_day_once() {
    let clock = test_clock();
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(clock.clone(), &store);
    ledger.assign(today(), DayType::Rest).unwrap();
    let mut watcher = RolloverWatcher::from_secs(60);

    assert_eq!(watcher.poll_once(&mut ledger).unwrap(), None);
    assert_eq!(watcher.rollovers(), 1);
    assert_eq!(watcher.poll_once(&mut ledger).unwrap(), None);
    assert_eq!(watcher.rollovers(), 1);

    clock.advance_days(1);
    assert_eq!(watcher.poll_once(&mut ledger).unwrap(), Some(today()));
    assert_eq!(watcher.poll_once(&mut ledger).unwrap(), None);
    assert_eq!(watcher.rollovers(), 2);
    assert_eq!(watcher.last_seen(), Some(clock.today()));

    let reopened = reopen_ledger(clock, &store);
    let day = reopened.store().get(today()).unwrap();
    assert!(day.completed);
    assert_eq!(day.original_macros, Some(standard_budgets().rest));
}

#[test]
fn test_rollover_skips_unplanned_previous_day() {
    let clock = test_clock();
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(clock.clone(), &store);
    let mut watcher = RolloverWatcher::from_secs(60);
    watcher.poll_once(&mut ledger).unwrap();

    clock.advance_days(1);

    assert_eq!(watcher.poll_once(&mut ledger).unwrap(), None);
    assert_eq!(watcher.rollovers(), 2);
}

#[tokio::test]
async fn test_watcher_run_stops_on_shutdown() {
    let clock = test_clock();
    let store = InMemoryStore::new();
    let mut ledger = create_test_ledger(clock.clone(), &store);

    let watcher = RolloverWatcher::new(Duration::from_millis(10))
        .run(&mut ledger, tokio::time::sleep(Duration::from_millis(50)))
        .await;

    assert_eq!(watcher.last_seen(), Some(today()));
    assert_eq!(watcher.rollovers(), 1);
}
