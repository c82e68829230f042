// ABOUTME: Re-balances the remaining day budget across meals not yet eaten
// ABOUTME: Proportional per-field split with an equal-split fallback; tracked meals stay fixed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Macro Redistribution Engine
//!
//! Invoked after every track, untrack, skip and unskip. The remaining budget is
//! `max(0, planned - consumed)` per field; it is spread over the *pool*, the
//! meals that are neither tracked nor skipped, in proportion to what each pool
//! meal currently plans for that field. When the pool plans nothing for a field
//! the remainder is split equally.
//!
//! Each value is rounded on its own, so a field may drift from the remainder by
//! up to one unit per pool meal. No reconciliation pass is made.

use macro_ledger_core::models::{round_to_u32, MacroField, MacroSet, Meal};
use tracing::debug;

/// Sum of consumed macros over tracked meals
#[must_use]
pub fn consumed_macros(meals: &[Meal]) -> MacroSet {
    meals.iter().filter_map(|meal| meal.consumed).sum()
}

/// Per-field `max(0, planned - consumed)`
#[must_use]
pub fn remaining_macros(planned: &MacroSet, meals: &[Meal]) -> MacroSet {
    planned.saturating_sub(&consumed_macros(meals))
}

/// True when a meal takes part in redistribution
#[must_use]
pub const fn in_pool(meal: &Meal) -> bool {
    !meal.is_tracked() && !meal.skipped
}

/// Spread the remaining budget over the pool
///
/// Tracked meals are returned untouched and skipped meals keep a zero
/// allocation. An empty pool leaves every meal as it was.
#[must_use]
pub fn redistribute(meals: &[Meal], planned: &MacroSet) -> Vec<Meal> {
    let remaining = remaining_macros(planned, meals);
    let pool: Vec<usize> = meals
        .iter()
        .enumerate()
        .filter(|(_, meal)| in_pool(meal))
        .map(|(index, _)| index)
        .collect();

    let mut result = meals.to_vec();
    for meal in result.iter_mut().filter(|meal| meal.skipped && !meal.is_tracked()) {
        meal.planned = MacroSet::zero();
    }
    if pool.is_empty() {
        debug!("Redistribution skipped: no open meals");
        return result;
    }

    let pool_size = pool.len() as f64;
    for field in MacroField::ALL {
        let pool_total: u64 = pool
            .iter()
            .map(|&index| u64::from(meals[index].planned.get(field)))
            .sum();
        let left = f64::from(remaining.get(field));
        for &index in &pool {
            let proportion = if pool_total == 0 {
                1.0 / pool_size
            } else {
                f64::from(meals[index].planned.get(field)) / pool_total as f64
            };
            result[index].planned.set(field, round_to_u32(left * proportion));
        }
    }

    debug!(
        pool = pool.len(),
        remaining_calories = remaining.calories,
        "Redistributed remaining macros"
    );
    result
}
