// ABOUTME: Configuration module for the ledger engine
// ABOUTME: Environment settings, meal-plan slot tables and their error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Configuration management
//!
//! - [`environment`]: runtime settings read from `MACRO_LEDGER_*` variables
//! - [`meal_plan`]: the slot tables the meal-plan generator divides budgets with
//! - [`error`]: [`ConfigError`](error::ConfigError)

/// Configuration error types
pub mod error;

/// Environment-based runtime configuration
pub mod environment;

/// Meal-plan slot tables
pub mod meal_plan;

pub use environment::{LedgerConfig, StorageBackend};
pub use error::ConfigError;
pub use meal_plan::MealPlanConfig;
