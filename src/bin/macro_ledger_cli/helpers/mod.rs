// ABOUTME: Re-exports helper modules for macro-ledger
// ABOUTME: Argument parsing and output formatting utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

pub mod args;
pub mod display;
