// ABOUTME: Core types and constants for the Macro Ledger nutrition planner
// ABOUTME: Foundation crate with error handling, domain models, and storage constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

#![deny(unsafe_code)]

//! # Macro Ledger Core
//!
//! Foundation crate providing shared types for the Macro Ledger planner. It holds
//! the data that flows between the engine, the storage backends and the CLI, and
//! is designed to change infrequently.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **models**: `MacroSet`, `DayType`, `PlannedDay`, `Meal` and friends
//! - **constants**: Storage keys, nutrition constants and schema versions

/// Unified error handling system with standard error codes
pub mod errors;

/// Domain models for days, meals and macro budgets
pub mod models;

/// Application constants organized by domain
pub mod constants;
