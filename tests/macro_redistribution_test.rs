// ABOUTME: Integration tests for remaining-budget redistribution across open meals
// ABOUTME: Conservation, proportionality, equal split and over-consumption floors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{assert_close, planned_sum, time};
use macro_ledger::intelligence::{consumed_macros, redistribute, remaining_macros};
use macro_ledger_core::models::{MacroSet, Meal, MealKind, MealStatus};

fn open_meal(id: &str, hour: u32, planned: MacroSet) -> Meal {
    Meal::new(id, id, time(hour, 0), MealKind::Regular, planned)
}

fn tracked_meal(id: &str, hour: u32, planned: MacroSet, consumed: MacroSet) -> Meal {
    let mut meal = open_meal(id, hour, planned);
    meal.consumed = Some(consumed);
    meal.status = MealStatus::Completed;
    meal
}

fn open_total(meals: &[Meal]) -> MacroSet {
    meals
        .iter()
        .filter(|meal| !meal.is_tracked())
        .map(|meal| meal.planned)
        .sum()
}

// ============================================================================
// Remaining Budget
// ============================================================================

#[test]
fn test_remaining_is_planned_minus_consumed() {
    let meals = vec![
        tracked_meal(
            "breakfast",
            8,
            MacroSet::new(500, 40, 50, 15),
            MacroSet::new(300, 20, 30, 10),
        ),
        open_meal("dinner", 19, MacroSet::new(500, 40, 40, 20)),
    ];
    assert_eq!(consumed_macros(&meals), MacroSet::new(300, 20, 30, 10));
    assert_eq!(
        remaining_macros(&MacroSet::new(2000, 150, 200, 70), &meals),
        MacroSet::new(1700, 130, 170, 60)
    );
}

#[test]
fn test_remaining_floors_at_zero_on_overconsumption() {
    let meals = vec![tracked_meal(
        "lunch",
        12,
        MacroSet::new(700, 50, 80, 20),
        MacroSet::new(2600, 100, 320, 90),
    )];
    assert_eq!(
        remaining_macros(&MacroSet::new(2000, 150, 200, 70), &meals),
        MacroSet::new(0, 50, 0, 0)
    );
}

// ============================================================================
// Redistribution
// ============================================================================

#[test]
fn test_open_meals_absorb_remaining_budget() {
    common::init_test_logging();
    let planned = MacroSet::new(2000, 150, 200, 70);
    let meals = vec![
        tracked_meal(
            "breakfast",
            8,
            MacroSet::new(500, 45, 10, 15),
            MacroSet::new(300, 20, 30, 10),
        ),
        open_meal("lunch", 13, MacroSet::new(700, 53, 20, 25)),
        open_meal("afternoon", 16, MacroSet::new(300, 30, 40, 14)),
        open_meal("dinner", 19, MacroSet::new(500, 22, 15, 16)),
    ];

    let result = redistribute(&meals, &planned);

    assert_eq!(result[0], meals[0]);
    assert_close(open_total(&result), MacroSet::new(1700, 130, 170, 60), 3);
}

#[test]
fn test_untracked_breakfast_rejoins_pool() {
    let planned = MacroSet::new(2000, 150, 200, 70);
    let meals = vec![
        open_meal("breakfast", 8, MacroSet::new(500, 45, 10, 15)),
        open_meal("dinner", 19, MacroSet::new(500, 40, 40, 20)),
    ];

    let result = redistribute(&meals, &planned);

    assert_close(planned_sum(&result), planned, 1);
    assert_eq!(result[0].planned.calories, 1000);
    assert_eq!(result[1].planned.calories, 1000);
    // 45:40 protein split of 150
    assert_eq!(result[0].planned.protein, 79);
    assert_eq!(result[1].planned.protein, 71);
}

#[test]
fn test_split_is_proportional_to_current_plan() {
    let planned = MacroSet::new(3000, 300, 300, 90);
    let meals = vec![
        open_meal("a", 8, MacroSet::new(100, 10, 10, 3)),
        open_meal("b", 12, MacroSet::new(200, 20, 20, 6)),
    ];

    let result = redistribute(&meals, &planned);

    assert_eq!(result[0].planned, MacroSet::new(1000, 100, 100, 30));
    assert_eq!(result[1].planned, MacroSet::new(2000, 200, 200, 60));
}

#[test]
fn test_zero_field_pool_splits_equally() {
    let planned = MacroSet::new(900, 90, 90, 30);
    let meals = vec![
        open_meal("a", 8, MacroSet::zero()),
        open_meal("b", 12, MacroSet::zero()),
        open_meal("c", 18, MacroSet::zero()),
    ];

    let result = redistribute(&meals, &planned);

    for meal in &result {
        assert_eq!(meal.planned, MacroSet::new(300, 30, 30, 10));
    }
}

#[test]
fn test_overconsumption_leaves_open_meals_at_zero() {
    let planned = MacroSet::new(2000, 150, 200, 70);
    let meals = vec![
        tracked_meal(
            "lunch",
            12,
            MacroSet::new(700, 50, 80, 20),
            MacroSet::new(2500, 160, 260, 90),
        ),
        open_meal("dinner", 19, MacroSet::new(500, 40, 40, 20)),
    ];

    let result = redistribute(&meals, &planned);

    assert!(result[1].planned.is_zero());
}

#[test]
fn test_all_meals_tracked_changes_nothing() {
    let planned = MacroSet::new(2000, 150, 200, 70);
    let meals = vec![
        tracked_meal("lunch", 12, MacroSet::new(700, 50, 80, 20), MacroSet::new(650, 45, 70, 22)),
        tracked_meal("dinner", 19, MacroSet::new(500, 40, 40, 20), MacroSet::new(900, 60, 90, 30)),
    ];

    assert_eq!(redistribute(&meals, &planned), meals);
}

#[test]
fn test_skipped_meal_stays_out_of_pool() {
    let planned = MacroSet::new(2000, 150, 200, 70);
    let mut skipped = open_meal("afternoon", 16, MacroSet::new(300, 30, 40, 14));
    skipped.skipped = true;
    let meals = vec![
        open_meal("lunch", 13, MacroSet::new(700, 53, 20, 25)),
        skipped,
        open_meal("dinner", 19, MacroSet::new(700, 53, 20, 25)),
    ];

    let result = redistribute(&meals, &planned);

    assert!(result[1].planned.is_zero());
    assert_eq!(result[0].planned, MacroSet::new(1000, 75, 100, 35));
    assert_eq!(result[2].planned, MacroSet::new(1000, 75, 100, 35));
}
