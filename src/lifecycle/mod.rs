// ABOUTME: Background lifecycle tasks of the ledger
// ABOUTME: Currently the date-rollover watcher that auto-completes the previous day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

/// Date rollover watcher
pub mod rollover;

pub use rollover::RolloverWatcher;
