// ABOUTME: Re-exports command modules for macro-ledger
// ABOUTME: Day planning, meal tracking, budget and watcher commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

pub mod budgets;
pub mod day;
pub mod meal;
pub mod watch;
