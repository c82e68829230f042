// ABOUTME: Serde helpers for HH:MM time-of-day values
// ABOUTME: Used by meal times, training times and eating windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! `HH:MM` (de)serialization for [`NaiveTime`].

use crate::constants::schedule::{MINUTES_PER_DAY, TIME_FORMAT};
use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

/// Parse an `HH:MM` string
///
/// # Errors
///
/// Returns `InvalidFormat` if the string is not a valid 24h time
pub fn parse_hhmm(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|e| {
            AppError::invalid_format(format!("'{value}' is not a HH:MM time")).with_source(e)
        })
}

/// Render a time as `HH:MM`
#[must_use]
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Shift a time by a signed number of minutes, wrapping around midnight
#[must_use]
pub fn add_minutes(time: NaiveTime, minutes: i64) -> NaiveTime {
    let current = i64::from(time.hour()) * 60 + i64::from(time.minute());
    let shifted = (current + minutes).rem_euclid(MINUTES_PER_DAY);
    // Safe: rem_euclid keeps the value inside a single day
    let hour = (shifted / 60) as u32;
    let minute = (shifted % 60) as u32;
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(time)
}

/// Minutes since midnight, used for ordering timelines
#[must_use]
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Serialize a required time as `HH:MM`
///
/// # Errors
///
/// Propagates serializer errors
pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_hhmm(*time))
}

/// Deserialize a required `HH:MM` time
///
/// # Errors
///
/// Fails when the value is not a valid `HH:MM` string
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_hhmm(&raw).map_err(serde::de::Error::custom)
}

/// `HH:MM` helpers for `Option<NaiveTime>`
pub mod option {
    use super::{format_hhmm, parse_hhmm};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize an optional time as `HH:MM` or `null`
    ///
    /// # Errors
    ///
    /// Propagates serializer errors
    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_some(&format_hhmm(*time)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional `HH:MM` time
    ///
    /// # Errors
    ///
    /// Fails when a present value is not a valid `HH:MM` string
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_hhmm(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
