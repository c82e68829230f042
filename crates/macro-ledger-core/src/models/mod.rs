// ABOUTME: Core data models for the Macro Ledger planner
// ABOUTME: Re-exports MacroSet, budgets, planned days, meals and time helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! # Data Models
//!
//! Plain data shared by the engine, storage and CLI. All models serialize to the
//! JSON blobs kept in the key-value store.
//!
//! ## Core Models
//!
//! - `MacroSet`: calories, protein, carbs and fat as non-negative integers
//! - `MacroBudgets`: the three per-day-type budgets produced by onboarding
//! - `PlannedDay`: one calendar date with its type, snapshot, meals and history
//! - `Meal`: one slot of a generated plan with planned and consumed macros

mod day;
mod macros;
mod meal;
pub mod time_format;

pub use day::{DayHistoryEntry, DayType, MealPlanSummary, PlannedDay};
pub use macros::{round_to_u32, MacroBudgets, MacroField, MacroSet};
pub use meal::{Meal, MealIntake, MealKind, MealStatus};
