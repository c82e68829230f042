// ABOUTME: Value parsers for macro-ledger arguments
// ABOUTME: Relative dates, HH:MM times and kcal,protein,carbs,fat budget tuples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use chrono::{Days, NaiveDate, NaiveTime};
use macro_ledger_core::models::{time_format, MacroSet};

/// Date argument: `today`, `tomorrow`, `yesterday` or `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateArg {
    /// Relative to the clock's today, in days
    Relative(i64),
    /// Calendar date
    Absolute(NaiveDate),
}

impl DateArg {
    /// Resolve against `today`
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Absolute(date) => date,
            Self::Relative(offset) if offset >= 0 => today
                .checked_add_days(Days::new(offset.unsigned_abs()))
                .unwrap_or(today),
            Self::Relative(offset) => today
                .checked_sub_days(Days::new(offset.unsigned_abs()))
                .unwrap_or(today),
        }
    }
}

impl Default for DateArg {
    fn default() -> Self {
        Self::Relative(0)
    }
}

/// clap parser for [`DateArg`]
pub fn parse_date(raw: &str) -> Result<DateArg, String> {
    match raw.trim().to_lowercase().as_str() {
        "today" => Ok(DateArg::Relative(0)),
        "tomorrow" => Ok(DateArg::Relative(1)),
        "yesterday" => Ok(DateArg::Relative(-1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map(DateArg::Absolute)
            .map_err(|_| format!("'{raw}' is not a date (YYYY-MM-DD, today, tomorrow, yesterday)")),
    }
}

/// clap parser for `HH:MM`
pub fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    time_format::parse_hhmm(raw).map_err(|e| e.message)
}

/// clap parser for `kcal,protein,carbs,fat`
pub fn parse_macro_set(raw: &str) -> Result<MacroSet, String> {
    let values: Vec<u32> = raw
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("'{raw}': {e}"))?;
    match values.as_slice() {
        [calories, protein, carbs, fat] => Ok(MacroSet::new(*calories, *protein, *carbs, *fat)),
        _ => Err(format!("'{raw}' must be kcal,protein,carbs,fat")),
    }
}
