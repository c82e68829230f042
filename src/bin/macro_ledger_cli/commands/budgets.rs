// ABOUTME: Budget commands for macro-ledger
// ABOUTME: Shows the stored budgets or replaces some of them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use macro_ledger::ledger::Ledger;
use macro_ledger::AppResult;
use macro_ledger_core::models::MacroSet;
use serde_json::json;
use tracing::warn;

use crate::helpers::display::print_json;

/// Budget fields to replace; `None` keeps the stored value
pub struct BudgetUpdate {
    /// Basal metabolic rate
    pub bmr: Option<u32>,
    /// Training-day budget
    pub training: Option<MacroSet>,
    /// Rest-day budget
    pub rest: Option<MacroSet>,
    /// Fasting-day budget
    pub fasting: Option<MacroSet>,
}

/// Print the stored budgets
pub fn show(ledger: &Ledger) -> AppResult<()> {
    if !ledger.is_onboarded() {
        warn!("Budgets are not set yet; use `macro-ledger budgets set`");
    }
    print_json(ledger.budgets())
}

/// Replace some budgets and report how many planned days were reset
pub fn set(ledger: &mut Ledger, update: BudgetUpdate) -> AppResult<()> {
    let mut budgets = *ledger.budgets();
    if let Some(bmr) = update.bmr {
        budgets.bmr = bmr;
    }
    if let Some(training) = update.training {
        budgets.training = training;
    }
    if let Some(rest) = update.rest {
        budgets.rest = rest;
    }
    if let Some(fasting) = update.fasting {
        budgets.fasting = fasting;
    }
    let reset = ledger.set_budgets(budgets)?;
    print_json(&json!({ "budgets": ledger.budgets(), "daysReset": reset }))
}
