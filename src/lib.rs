// ABOUTME: Main library entry point for the Macro Ledger planning engine
// ABOUTME: Day-type budgets, generated meal plans, intake tracking and persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

#![deny(unsafe_code)]

//! # Macro Ledger
//!
//! A personal nutrition planner. Every calendar day gets a type (training,
//! rest or fasting); the type selects a macro budget and a generated meal
//! schedule, and tracked meals re-balance what is left over the meals not yet
//! eaten.
//!
//! ## Architecture
//!
//! - **`macro_ledger_core`**: errors, models and constants shared by everything
//! - **Intelligence**: meal-plan generation, redistribution and timelines
//! - **Planner**: the planned-day store, meal lifecycle and type-change confirmation
//! - **Storage**: key-value persistence (in-memory, JSON files)
//! - **Ledger**: the store wired to storage, saving after every mutation
//! - **Lifecycle**: the date-rollover watcher
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use macro_ledger::clock::SystemClock;
//! use macro_ledger::config::LedgerConfig;
//! use macro_ledger::ledger::Ledger;
//! use macro_ledger_core::errors::AppResult;
//! use macro_ledger_core::models::DayType;
//! use std::sync::Arc;
//!
//! fn main() -> AppResult<()> {
//!     let config = LedgerConfig::in_memory();
//!     let mut ledger = Ledger::open(&config, Arc::new(SystemClock))?;
//!     let today = chrono::Local::now().date_naive();
//!     ledger.assign(today, DayType::Rest)?;
//!     let view = ledger.day_view(today)?;
//!     println!("{} meals planned", view.day.meals().len());
//!     Ok(())
//! }
//! ```

/// Time source abstraction
pub mod clock;

/// Configuration management
pub mod config;

/// Planning algorithms
pub mod intelligence;

/// Persistent facade over the store
pub mod ledger;

/// Background lifecycle tasks
pub mod lifecycle;

/// Structured logging setup
pub mod logging;

/// Day planning
pub mod planner;

/// Key-value persistence
pub mod storage;

pub use macro_ledger_core::errors::{AppError, AppResult, ErrorCode};
