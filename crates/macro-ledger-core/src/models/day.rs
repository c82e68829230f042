// ABOUTME: Planned day model with frozen macro snapshot and append-only history
// ABOUTME: DayType, PlannedDay, DayHistoryEntry and MealPlanSummary definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use super::macros::{MacroBudgets, MacroSet};
use super::meal::Meal;
use super::time_format;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of day, selecting the budget and the meal-generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    /// Training day: five meals arranged around the session
    Training,
    /// Rest day: four fixed meals
    Rest,
    /// Fasting day: one break-fast meal
    Fasting,
}

impl DayType {
    /// All day types
    pub const ALL: [Self; 3] = [Self::Training, Self::Rest, Self::Fasting];

    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Rest => "rest",
            Self::Fasting => "fasting",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "training" | "train" => Ok(Self::Training),
            "rest" => Ok(Self::Rest),
            "fasting" | "fast" => Ok(Self::Fasting),
            other => Err(format!("unknown day type '{other}'")),
        }
    }
}

/// Informational summary of a generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanSummary {
    /// Time of the first meal
    #[serde(with = "time_format")]
    pub eating_window_start: NaiveTime,
    /// Time of the last meal
    #[serde(with = "time_format")]
    pub eating_window_end: NaiveTime,
    /// Number of meals in the plan
    pub meal_count: usize,
    /// Training time the plan was built around
    #[serde(
        default,
        with = "time_format::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub training_time: Option<NaiveTime>,
    /// When the plan was generated
    pub last_updated: DateTime<Utc>,
}

/// Snapshot of a day's state taken just before its type was overwritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHistoryEntry {
    /// Type the day had
    #[serde(rename = "type")]
    pub day_type: DayType,
    /// When the type was replaced
    pub timestamp: DateTime<Utc>,
    /// Completion flag at that moment
    pub completed: bool,
    /// Training time at that moment
    #[serde(
        default,
        with = "time_format::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub training_time: Option<NaiveTime>,
    /// Frozen snapshot at that moment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_macros: Option<MacroSet>,
}

/// One calendar date of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedDay {
    /// Calendar date (unique key)
    pub date: NaiveDate,
    /// Day type
    #[serde(rename = "type")]
    pub day_type: DayType,
    /// Locked by the user or by rollover
    #[serde(default)]
    pub completed: bool,
    /// Training start, only meaningful on training days
    #[serde(
        default,
        with = "time_format::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub training_time: Option<NaiveTime>,
    /// Budget frozen at first completion; never recomputed from live budgets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_macros: Option<MacroSet>,
    /// Materialized meals, absent until first viewed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals: Option<Vec<Meal>>,
    /// Summary of the materialized plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<MealPlanSummary>,
    /// Append-only record of overwritten states
    #[serde(default)]
    pub history: Vec<DayHistoryEntry>,
}

impl PlannedDay {
    /// Create a fresh, incomplete day without meals
    #[must_use]
    pub const fn new(date: NaiveDate, day_type: DayType, training_time: Option<NaiveTime>) -> Self {
        Self {
            date,
            day_type,
            completed: false,
            training_time,
            original_macros: None,
            meals: None,
            meal_plan: None,
            history: Vec::new(),
        }
    }

    /// Budget that applies to this day
    ///
    /// Completed days with a snapshot always use it; everything else follows the
    /// live budget for the day's type.
    #[must_use]
    pub const fn planned_macros(&self, budgets: &MacroBudgets) -> MacroSet {
        match (self.completed, self.original_macros) {
            (true, Some(snapshot)) => snapshot,
            _ => budgets.for_type(self.day_type),
        }
    }

    /// Snapshot of the current state for the history log
    #[must_use]
    pub const fn history_entry(&self, timestamp: DateTime<Utc>) -> DayHistoryEntry {
        DayHistoryEntry {
            day_type: self.day_type,
            timestamp,
            completed: self.completed,
            training_time: self.training_time,
            original_macros: self.original_macros,
        }
    }

    /// Meals as a slice, empty when not yet materialized
    #[must_use]
    pub fn meals(&self) -> &[Meal] {
        self.meals.as_deref().unwrap_or_default()
    }

    /// True when at least one meal has consumed macros recorded
    #[must_use]
    pub fn has_tracked_meals(&self) -> bool {
        self.meals().iter().any(Meal::is_tracked)
    }

    /// Drop the cached plan so the next view regenerates it
    pub fn clear_meal_plan(&mut self) {
        self.meals = None;
        self.meal_plan = None;
    }
}
