// ABOUTME: Day planning: the planned-day store, meal lifecycle and type-change confirmation
// ABOUTME: Synchronous single-writer engine over core models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Day planning

/// Track, untrack, skip and unskip on the store
pub mod meal_tracking;

/// Planned-day store
pub mod store;

/// Confirmation workflow for day-type changes
pub mod type_change;

pub use store::{AssignOutcome, DayPlanStore, PlannerPolicy, WeekDay};
pub use type_change::{PendingTypeChange, TypeChangeWorkflow};
