// ABOUTME: Meal-plan generation dividing a day budget into timed meal slots
// ABOUTME: Share-and-clamp allocation per field with residual slots, training-relative timing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Meal Plan Generator
//!
//! Turns a day's budget into an ordered list of meals using the slot tables of
//! [`MealPlanConfig`]. Generation is deterministic for a given budget and
//! training time; the clock only feeds the summary's `last_updated` stamp.
//!
//! Per field, every share slot receives `round(total * pct / 100)` clamped to its
//! band. A residual slot then receives whatever is left of the total, floored at
//! zero, so the field sums exactly to the budget unless the other slots already
//! overshoot it.

use crate::config::meal_plan::{Allocation, DayTemplate, MealPlanConfig, SlotTemplate, SlotTiming};
use chrono::{DateTime, NaiveTime, Utc};
use macro_ledger_core::models::{
    time_format, MacroField, MacroSet, Meal, MealPlanSummary, PlannedDay,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Why a day cannot be given a meal plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotPlannableReason {
    /// Slots are anchored to a training time the day does not have
    MissingTrainingTime,
}

impl fmt::Display for NotPlannableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTrainingTime => write!(f, "training day has no training time"),
        }
    }
}

/// Result of generating a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Meals in slot order and the plan summary
    Planned {
        /// Generated meals
        meals: Vec<Meal>,
        /// Eating window and bookkeeping
        summary: MealPlanSummary,
    },
    /// The day lacks a prerequisite
    NotPlannable(NotPlannableReason),
}

impl Generation {
    /// Generated meals, empty when the day is not plannable
    #[must_use]
    pub fn into_meals(self) -> Vec<Meal> {
        match self {
            Self::Planned { meals, .. } => meals,
            Self::NotPlannable(_) => Vec::new(),
        }
    }

    /// True when meals were produced
    #[must_use]
    pub const fn is_planned(&self) -> bool {
        matches!(self, Self::Planned { .. })
    }
}

/// Generates meal plans from slot tables
#[derive(Debug, Clone, Copy)]
pub struct MealPlanGenerator<'a> {
    config: &'a MealPlanConfig,
}

impl<'a> MealPlanGenerator<'a> {
    /// Generator over explicit slot tables
    #[must_use]
    pub const fn new(config: &'a MealPlanConfig) -> Self {
        Self { config }
    }

    /// Build the meal plan of `day` for `budget`
    ///
    /// Training templates need `day.training_time`; without it the result is
    /// [`Generation::NotPlannable`].
    #[must_use]
    pub fn generate(&self, day: &PlannedDay, budget: &MacroSet, now: DateTime<Utc>) -> Generation {
        let template = self.config.template(day.day_type);
        let training_time = day.training_time;
        if template.requires_training_time() && training_time.is_none() {
            debug!(date = %day.date, "Skipping meal generation: no training time");
            return Generation::NotPlannable(NotPlannableReason::MissingTrainingTime);
        }

        let allocations = allocate(template, budget);
        let meals: Vec<Meal> = template
            .slots
            .iter()
            .zip(allocations)
            .map(|(slot, planned)| {
                Meal::new(
                    slot.id.clone(),
                    slot.name.clone(),
                    slot_time(slot, training_time),
                    slot.kind,
                    planned,
                )
            })
            .collect();

        let (Some(first), Some(last)) = (meals.first(), meals.last()) else {
            return Generation::Planned {
                meals,
                summary: empty_summary(now),
            };
        };
        let summary = MealPlanSummary {
            eating_window_start: first.time,
            eating_window_end: last.time,
            meal_count: meals.len(),
            training_time: training_time.filter(|_| template.requires_training_time()),
            last_updated: now,
        };

        debug!(
            date = %day.date,
            day_type = %day.day_type,
            meal_count = summary.meal_count,
            "Generated meal plan"
        );
        Generation::Planned { meals, summary }
    }
}

/// Allocation of every slot of `template`, in slot order
fn allocate(template: &DayTemplate, budget: &MacroSet) -> Vec<MacroSet> {
    let mut planned = vec![MacroSet::zero(); template.slots.len()];
    for field in MacroField::ALL {
        let total = budget.get(field);
        let mut residual_slot = None;
        let mut allocated: u32 = 0;
        for (index, slot) in template.slots.iter().enumerate() {
            match slot.allocation(field) {
                Allocation::Share { pct, min, max } => {
                    let value = clamp(share_of(total, pct), min, max);
                    planned[index].set(field, value);
                    allocated = allocated.saturating_add(value);
                }
                Allocation::Residual => residual_slot = Some(index),
            }
        }
        if let Some(index) = residual_slot {
            planned[index].set(field, total.saturating_sub(allocated));
        }
    }
    planned
}

/// `round(total * pct / 100)` with halves rounded up
fn share_of(total: u32, pct: u8) -> u32 {
    let scaled = (u64::from(total) * u64::from(pct) + 50) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

fn clamp(value: u32, min: Option<u32>, max: Option<u32>) -> u32 {
    let floored = min.map_or(value, |min| value.max(min));
    max.map_or(floored, |max| floored.min(max))
}

fn slot_time(slot: &SlotTemplate, training_time: Option<NaiveTime>) -> NaiveTime {
    match slot.timing {
        SlotTiming::Fixed { at } => at,
        SlotTiming::Training { offset_minutes } => training_time
            .map_or(NaiveTime::MIN, |time| time_format::add_minutes(time, offset_minutes)),
    }
}

fn empty_summary(now: DateTime<Utc>) -> MealPlanSummary {
    MealPlanSummary {
        eating_window_start: NaiveTime::MIN,
        eating_window_end: NaiveTime::MIN,
        meal_count: 0,
        training_time: None,
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_rounds_half_up() {
        assert_eq!(share_of(250, 25), 63);
        assert_eq!(share_of(80, 5), 4);
        assert_eq!(share_of(0, 100), 0);
    }

    #[test]
    fn test_clamp_applies_both_bounds() {
        assert_eq!(clamp(45, Some(30), Some(35)), 35);
        assert_eq!(clamp(9, Some(40), None), 40);
        assert_eq!(clamp(12, None, Some(10)), 10);
    }
}
