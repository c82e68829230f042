// ABOUTME: Day planning commands for macro-ledger
// ABOUTME: assign, confirm, cancel, complete, unlock, show, history, week and training-time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use chrono::{NaiveDate, NaiveTime};
use macro_ledger::ledger::Ledger;
use macro_ledger::planner::AssignOutcome;
use macro_ledger::AppResult;
use macro_ledger_core::models::DayType;
use serde_json::json;
use tracing::info;

use crate::helpers::display::print_json;

/// Assign a type to a day
pub fn assign(ledger: &mut Ledger, date: NaiveDate, day_type: DayType) -> AppResult<()> {
    match ledger.assign(date, day_type)? {
        AssignOutcome::Created(day) => print_json(&json!({ "status": "created", "day": day })),
        AssignOutcome::Unchanged => print_json(&json!({ "status": "unchanged", "date": date })),
        AssignOutcome::ConfirmationRequired(pending) => {
            info!("Run `macro-ledger confirm` to apply or `macro-ledger cancel` to discard");
            print_json(&json!({ "status": "confirmation_required", "pending": pending }))
        }
    }
}

/// Apply the pending type change
pub fn confirm(ledger: &mut Ledger) -> AppResult<()> {
    let day = ledger.confirm_type_change()?;
    print_json(&json!({ "status": "changed", "day": day }))
}

/// Discard the pending type change
pub fn cancel(ledger: &mut Ledger) -> AppResult<()> {
    let pending = ledger.cancel_type_change()?;
    print_json(&json!({ "status": "cancelled", "discarded": pending }))
}

/// Lock a day
pub fn complete(ledger: &mut Ledger, date: NaiveDate) -> AppResult<()> {
    print_json(&ledger.complete(date)?)
}

/// Reopen a day
pub fn unlock(ledger: &mut Ledger, date: NaiveDate) -> AppResult<()> {
    print_json(&ledger.unlock(date)?)
}

/// Show a day with its meals, timeline and remaining budget
pub fn show(ledger: &mut Ledger, date: NaiveDate) -> AppResult<()> {
    print_json(&ledger.day_view(date)?)
}

/// Show the type history of a day
pub fn history(ledger: &Ledger, date: NaiveDate) -> AppResult<()> {
    print_json(ledger.history(date)?)
}

/// Show the week containing a day
pub fn week(ledger: &Ledger, date: NaiveDate) -> AppResult<()> {
    print_json(&ledger.week_of(date))
}

/// Move the training session of a training day
pub fn training_time(ledger: &mut Ledger, date: NaiveDate, time: NaiveTime) -> AppResult<()> {
    print_json(&ledger.set_training_time(date, time)?)
}
