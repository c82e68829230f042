// ABOUTME: Output formatting helpers for macro-ledger
// ABOUTME: Pretty JSON on stdout so results can be piped into other tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use macro_ledger::AppResult;
use serde::Serialize;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
