// ABOUTME: Chronological view of a day's meals with the training session slotted in
// ABOUTME: Orders meals and the training marker by minutes since midnight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Meal timeline for display

use chrono::NaiveTime;
use macro_ledger_core::models::{time_format, DayType, Meal, PlannedDay};
use serde::Serialize;

/// One row of the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEntry {
    /// A meal of the plan
    Meal {
        /// 1-based position among the meals of the day
        number: usize,
        /// The meal
        meal: Meal,
    },
    /// The training session
    Training {
        /// Session start
        #[serde(with = "time_format")]
        time: NaiveTime,
    },
}

impl TimelineEntry {
    /// Time the entry is sorted by
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        match self {
            Self::Meal { meal, .. } => meal.time,
            Self::Training { time } => *time,
        }
    }
}

/// Meals and training of `day` in chronological order
///
/// The training marker only appears on training days with a training time.
/// Entries at the same minute keep meals before training.
#[must_use]
pub fn build_timeline(day: &PlannedDay, meals: &[Meal]) -> Vec<TimelineEntry> {
    let mut sorted: Vec<&Meal> = meals.iter().collect();
    sorted.sort_by_key(|meal| time_format::minutes_of_day(meal.time));

    let mut entries: Vec<TimelineEntry> = sorted
        .into_iter()
        .enumerate()
        .map(|(index, meal)| TimelineEntry::Meal {
            number: index + 1,
            meal: meal.clone(),
        })
        .collect();

    if let (DayType::Training, Some(time)) = (day.day_type, day.training_time) {
        entries.push(TimelineEntry::Training { time });
    }

    // Stable sort: ties keep meals ahead of the training marker
    entries.sort_by_key(|entry| time_format::minutes_of_day(entry.time()));
    entries
}
