// ABOUTME: Meal slot model with planned and consumed macros
// ABOUTME: MealKind, MealStatus and MealIntake definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use super::macros::MacroSet;
use super::time_format;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Role of a meal within the day, relative to training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealKind {
    /// Larger meal several hours before training
    PreLong,
    /// Small meal shortly before training
    PreShort,
    /// Meal right after training
    Post,
    /// Recovery meal later after training
    Recovery,
    /// Ordinary meal
    Regular,
    /// The single meal that ends a fast
    BreakFast,
}

/// Tracking state of a meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealStatus {
    /// Not eaten yet
    #[default]
    Open,
    /// Eaten and tracked
    Completed,
    /// Tracked and sealed by completing the day
    Locked,
}

/// One slot of a day's meal plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Slot id, stable across regeneration (e.g. `pre-workout`)
    pub id: String,
    /// Display name, user-editable
    pub name: String,
    /// Planned time of day
    #[serde(with = "time_format")]
    pub time: NaiveTime,
    /// Role of the meal
    pub meal_type: MealKind,
    /// Planned allocation, rewritten by redistribution
    #[serde(flatten)]
    pub planned: MacroSet,
    /// What was actually eaten; `None` until tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed: Option<MacroSet>,
    /// Tracking state
    #[serde(default)]
    pub status: MealStatus,
    /// Skipped meals keep a zero allocation until unskipped
    #[serde(default)]
    pub skipped: bool,
}

impl Meal {
    /// Create an open, untracked meal
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        time: NaiveTime,
        meal_type: MealKind,
        planned: MacroSet,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            time,
            meal_type,
            planned,
            consumed: None,
            status: MealStatus::Open,
            skipped: false,
        }
    }

    /// True once the meal has consumed macros recorded
    #[must_use]
    pub const fn is_tracked(&self) -> bool {
        self.consumed.is_some()
    }

    /// Macros the meal contributes to the day: consumed if tracked, zero if skipped,
    /// planned otherwise
    #[must_use]
    pub fn effective(&self) -> MacroSet {
        match (self.consumed, self.skipped) {
            (Some(consumed), _) => consumed,
            (None, true) => MacroSet::zero(),
            (None, false) => self.planned,
        }
    }
}

/// Macros entered when tracking a meal
///
/// Calories may be omitted, in which case they are derived from the grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealIntake {
    /// Energy (kcal), derived from grams when absent
    #[serde(default)]
    pub calories: Option<u32>,
    /// Protein (g)
    pub protein: u32,
    /// Carbohydrates (g)
    pub carbs: u32,
    /// Fat (g)
    pub fat: u32,
}

impl MealIntake {
    /// Resolve the intake into a full macro set
    #[must_use]
    pub fn into_macros(self) -> MacroSet {
        let derived = MacroSet::from_macros(self.protein, self.carbs, self.fat);
        MacroSet {
            calories: self.calories.unwrap_or(derived.calories),
            ..derived
        }
    }
}

impl From<MacroSet> for MealIntake {
    fn from(set: MacroSet) -> Self {
        Self {
            calories: Some(set.calories),
            protein: set.protein,
            carbs: set.carbs,
            fat: set.fat,
        }
    }
}
