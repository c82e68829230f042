// ABOUTME: Meal commands for macro-ledger
// ABOUTME: track, untrack, skip, unskip and rename meals of a planned day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use chrono::NaiveDate;
use macro_ledger::ledger::Ledger;
use macro_ledger::AppResult;
use macro_ledger_core::models::MealIntake;

use crate::helpers::display::print_json;

/// Record intake for a meal
pub fn track(
    ledger: &mut Ledger,
    date: NaiveDate,
    meal_id: &str,
    intake: MealIntake,
) -> AppResult<()> {
    print_json(&ledger.track_meal(date, meal_id, intake)?)
}

/// Clear the intake of a meal
pub fn untrack(ledger: &mut Ledger, date: NaiveDate, meal_id: &str) -> AppResult<()> {
    print_json(&ledger.untrack_meal(date, meal_id)?)
}

/// Skip a meal
pub fn skip(ledger: &mut Ledger, date: NaiveDate, meal_id: &str) -> AppResult<()> {
    print_json(&ledger.skip_meal(date, meal_id)?)
}

/// Bring a skipped meal back
pub fn unskip(ledger: &mut Ledger, date: NaiveDate, meal_id: &str) -> AppResult<()> {
    print_json(&ledger.unskip_meal(date, meal_id)?)
}

/// Rename a meal
pub fn rename(ledger: &mut Ledger, date: NaiveDate, meal_id: &str, name: &str) -> AppResult<()> {
    print_json(&ledger.rename_meal(date, meal_id, name)?)
}
