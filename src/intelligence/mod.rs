// ABOUTME: Planning algorithms: meal-plan generation, macro redistribution and timelines
// ABOUTME: Pure functions over core models; no storage or clock access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Planning algorithms

/// Budget-to-meals generation from slot tables
pub mod meal_plan_generator;

/// Remaining-budget redistribution across open meals
pub mod macro_redistribution;

/// Chronological meal and training view
pub mod meal_timeline;

pub use macro_redistribution::{consumed_macros, redistribute, remaining_macros};
pub use meal_plan_generator::{Generation, MealPlanGenerator, NotPlannableReason};
pub use meal_timeline::{build_timeline, TimelineEntry};
