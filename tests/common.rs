// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Quiet logging, a fixed clock, standard budgets and ready-made stores and ledgers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `macro_ledger`

use chrono::{NaiveDate, NaiveTime};
use macro_ledger::clock::{Clock, FixedClock};
use macro_ledger::config::{LedgerConfig, MealPlanConfig};
use macro_ledger::ledger::Ledger;
use macro_ledger::planner::DayPlanStore;
use macro_ledger::storage::{InMemoryStore, Storage};
use macro_ledger_core::models::{MacroBudgets, MacroSet, Meal};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Time shorthand
pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// "Today" in every test: Wednesday 5 March 2025
pub fn today() -> NaiveDate {
    date(2025, 3, 5)
}

/// Clock frozen at noon of [`today`]
pub fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at_date(today()))
}

/// Training 2500/180/250/80, rest 2000/150/200/70, fasting zeros
pub fn standard_budgets() -> MacroBudgets {
    MacroBudgets::new(
        1800,
        MacroSet::new(2500, 180, 250, 80),
        MacroSet::new(2000, 150, 200, 70),
    )
}

/// Store over [`standard_budgets`] with default slot tables
pub fn create_test_store(clock: Arc<FixedClock>) -> DayPlanStore {
    init_test_logging();
    let clock: Arc<dyn Clock> = clock;
    DayPlanStore::new(standard_budgets(), clock).with_meal_plan(MealPlanConfig::default())
}

/// Onboarded ledger over an in-memory store shared with the caller
pub fn create_test_ledger(clock: Arc<FixedClock>, store: &InMemoryStore) -> Ledger {
    init_test_logging();
    let clock: Arc<dyn Clock> = clock;
    let mut ledger = Ledger::load(
        Storage::from(store.clone()),
        &LedgerConfig::in_memory(),
        clock,
        MealPlanConfig::default(),
    )
    .unwrap();
    ledger.set_budgets(standard_budgets()).unwrap();
    ledger
}

/// Re-open a ledger over the same in-memory store
pub fn reopen_ledger(clock: Arc<FixedClock>, store: &InMemoryStore) -> Ledger {
    let clock: Arc<dyn Clock> = clock;
    Ledger::load(
        Storage::from(store.clone()),
        &LedgerConfig::in_memory(),
        clock,
        MealPlanConfig::default(),
    )
    .unwrap()
}

/// Per-field sum of planned macros
pub fn planned_sum(meals: &[Meal]) -> MacroSet {
    meals.iter().map(|meal| meal.planned).sum()
}

/// Look a meal up by slot id
pub fn meal<'a>(meals: &'a [Meal], id: &str) -> &'a Meal {
    meals
        .iter()
        .find(|meal| meal.id == id)
        .unwrap_or_else(|| panic!("meal {id} missing"))
}

/// Assert `actual` is within `tolerance` of `expected` on every field
pub fn assert_close(actual: MacroSet, expected: MacroSet, tolerance: u32) {
    for (name, a, e) in [
        ("calories", actual.calories, expected.calories),
        ("protein", actual.protein, expected.protein),
        ("carbs", actual.carbs, expected.carbs),
        ("fat", actual.fat, expected.fat),
    ] {
        assert!(
            a.abs_diff(e) <= tolerance,
            "{name}: {a} differs from {e} by more than {tolerance}"
        );
    }
}
