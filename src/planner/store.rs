// ABOUTME: Owner of the planned-day map and the live budgets
// ABOUTME: Day-type assignment, completion snapshots, budget edits, plan materialization and views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! DayPlan Store
//!
//! Single writer over every [`PlannedDay`]. Mutations replace whole records in
//! the map; persistence happens one level up in [`crate::ledger::Ledger`].
//!
//! Rules worth knowing before changing anything here:
//!
//! - Past days never change type. Today and future days up to the planning
//!   horizon may.
//! - `original_macros` is frozen the first time a day is completed and is never
//!   recomputed from live budgets afterwards.
//! - Editing budgets drops the cached meals of every incomplete day; completed
//!   days keep theirs.

use super::type_change::{PendingTypeChange, TypeChangeWorkflow};
use crate::clock::Clock;
use crate::config::environment::LedgerConfig;
use crate::config::meal_plan::MealPlanConfig;
use crate::intelligence::macro_redistribution::{consumed_macros, remaining_macros};
use crate::intelligence::meal_plan_generator::{Generation, MealPlanGenerator};
use crate::intelligence::meal_timeline::{build_timeline, TimelineEntry};
use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use macro_ledger_core::errors::{AppError, AppResult};
use macro_ledger_core::models::{
    DayHistoryEntry, DayType, MacroBudgets, MacroSet, Meal, MealStatus, PlannedDay,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Planner policy taken from [`LedgerConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerPolicy {
    /// Furthest future date, in days from today, that may be assigned
    pub planning_horizon_days: u32,
    /// Training time for training days created without one
    pub default_training_time: NaiveTime,
}

impl From<&LedgerConfig> for PlannerPolicy {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            planning_horizon_days: config.planning_horizon_days,
            default_training_time: config.default_training_time,
        }
    }
}

impl Default for PlannerPolicy {
    fn default() -> Self {
        Self::from(&LedgerConfig::default())
    }
}

/// Result of [`DayPlanStore::assign`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// The date had no plan; a new day was created
    Created(PlannedDay),
    /// The day already has the requested type
    Unchanged,
    /// The day has a different type; the change awaits confirmation
    ConfirmationRequired(PendingTypeChange),
}

/// One row of a weekly view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Planned type, if the date is planned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_type: Option<DayType>,
    /// Completion flag
    pub completed: bool,
    /// Budget that applies to the day, if planned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned: Option<MacroSet>,
}

/// Owner of planned days and budgets
pub struct DayPlanStore {
    pub(super) days: BTreeMap<NaiveDate, PlannedDay>,
    pub(super) budgets: MacroBudgets,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) meal_plan: MealPlanConfig,
    pub(super) policy: PlannerPolicy,
    pub(super) workflow: TypeChangeWorkflow,
}

impl DayPlanStore {
    /// Empty store over `budgets`
    pub fn new(budgets: MacroBudgets, clock: Arc<dyn Clock>) -> Self {
        Self {
            days: BTreeMap::new(),
            budgets,
            clock,
            meal_plan: MealPlanConfig::global().clone(),
            policy: PlannerPolicy::default(),
            workflow: TypeChangeWorkflow::Idle,
        }
    }

    /// Replace the slot tables
    #[must_use]
    pub fn with_meal_plan(mut self, meal_plan: MealPlanConfig) -> Self {
        self.meal_plan = meal_plan;
        self
    }

    /// Replace the planner policy
    #[must_use]
    pub const fn with_policy(mut self, policy: PlannerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load persisted days, keyed by date (later duplicates win)
    #[must_use]
    pub fn with_days(mut self, days: impl IntoIterator<Item = PlannedDay>) -> Self {
        self.days = days.into_iter().map(|day| (day.date, day)).collect();
        self
    }

    /// Restore a persisted pending change
    #[must_use]
    pub fn with_pending(mut self, pending: Option<PendingTypeChange>) -> Self {
        self.workflow = TypeChangeWorkflow::from_pending(pending);
        self
    }

    /// Live budgets
    #[must_use]
    pub const fn budgets(&self) -> &MacroBudgets {
        &self.budgets
    }

    /// Clock used for "today"
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Day planned on `date`
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&PlannedDay> {
        self.days.get(&date)
    }

    /// Every planned day in date order
    pub fn days(&self) -> impl Iterator<Item = &PlannedDay> {
        self.days.values()
    }

    /// Number of planned days
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True when nothing is planned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Day planned on `date`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn planned_day(&self, date: NaiveDate) -> AppResult<&PlannedDay> {
        self.day(date)
    }

    pub(super) fn day(&self, date: NaiveDate) -> AppResult<&PlannedDay> {
        self.days
            .get(&date)
            .ok_or_else(|| {
                AppError::not_found(format!("Planned day {date}"))
                    .with_resource_id(date.to_string())
            })
    }

    pub(super) fn day_mut(&mut self, date: NaiveDate) -> AppResult<&mut PlannedDay> {
        self.days
            .get_mut(&date)
            .ok_or_else(|| {
                AppError::not_found(format!("Planned day {date}"))
                    .with_resource_id(date.to_string())
            })
    }

    /// Reject dates before today
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` for past dates
    pub fn ensure_editable(&self, date: NaiveDate) -> AppResult<()> {
        let today = self.clock.today();
        if date < today {
            return Err(AppError::resource_locked(format!(
                "{date} is in the past and can no longer be changed"
            ))
            .with_resource_id(date.to_string()));
        }
        Ok(())
    }

    fn ensure_within_horizon(&self, date: NaiveDate) -> AppResult<()> {
        let today = self.clock.today();
        let horizon = today
            .checked_add_days(Days::new(u64::from(self.policy.planning_horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        if date > horizon {
            return Err(AppError::value_out_of_range(format!(
                "{date} is more than {} days ahead",
                self.policy.planning_horizon_days
            ))
            .with_resource_id(date.to_string()));
        }
        Ok(())
    }

    /// Assign a day type to `date`
    ///
    /// A new date is created immediately. Reassigning a planned day to a
    /// different type only records a pending change; see
    /// [`DayPlanStore::confirm_type_change`].
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` for past dates and `ValueOutOfRange` for dates
    /// beyond the planning horizon
    pub fn assign(&mut self, date: NaiveDate, day_type: DayType) -> AppResult<AssignOutcome> {
        if let Err(e) = self.ensure_editable(date) {
            warn!(%date, %day_type, "Rejected assignment to a past day");
            return Err(e);
        }
        self.ensure_within_horizon(date)?;

        let Some(existing) = self.days.get(&date) else {
            let training_time = (day_type == DayType::Training)
                .then_some(self.policy.default_training_time);
            let day = PlannedDay::new(date, day_type, training_time);
            self.days.insert(date, day.clone());
            info!(%date, %day_type, "Planned new day");
            return Ok(AssignOutcome::Created(day));
        };

        if existing.day_type == day_type {
            debug!(%date, %day_type, "Assignment unchanged");
            return Ok(AssignOutcome::Unchanged);
        }

        let pending = PendingTypeChange {
            date,
            current: existing.day_type,
            proposed: day_type,
            requested_at: self.clock.now(),
        };
        if let Some(replaced) = self.workflow.request(pending.clone()) {
            debug!(date = %replaced.date, "Replaced earlier pending type change");
        }
        info!(
            %date,
            from = %pending.current,
            to = %pending.proposed,
            "Type change awaits confirmation"
        );
        Ok(AssignOutcome::ConfirmationRequired(pending))
    }

    /// Overwrite the type of a planned day, recording its previous state
    ///
    /// Completion, training time and the frozen snapshot carry over. The meal
    /// plan is dropped.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn apply_type_change(
        &mut self,
        date: NaiveDate,
        day_type: DayType,
    ) -> AppResult<PlannedDay> {
        let now = self.clock.now();
        let default_training_time = self.policy.default_training_time;
        let day = self.day_mut(date)?;
        if day.day_type == day_type {
            return Ok(day.clone());
        }

        let entry = day.history_entry(now);
        day.history.push(entry);
        day.day_type = day_type;
        if day_type == DayType::Training && day.training_time.is_none() {
            day.training_time = Some(default_training_time);
        }
        day.clear_meal_plan();

        info!(%date, %day_type, history = day.history.len(), "Applied day-type change");
        Ok(day.clone())
    }

    /// Lock a day and freeze its budget
    ///
    /// Idempotent: a completed day is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn complete(&mut self, date: NaiveDate) -> AppResult<PlannedDay> {
        self.complete_day(date)?;
        self.day(date).cloned()
    }

    fn complete_day(&mut self, date: NaiveDate) -> AppResult<bool> {
        let budgets = self.budgets;
        let day = self.day_mut(date)?;
        if day.completed {
            return Ok(false);
        }
        day.completed = true;
        if day.original_macros.is_none() {
            day.original_macros = Some(budgets.for_type(day.day_type));
        }
        if let Some(meals) = day.meals.as_mut() {
            for meal in meals.iter_mut().filter(|m| m.status == MealStatus::Completed) {
                meal.status = MealStatus::Locked;
            }
        }
        info!(%date, day_type = %day.day_type, "Completed day");
        Ok(true)
    }

    /// Reopen a completed day; the frozen snapshot is kept
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn unlock(&mut self, date: NaiveDate) -> AppResult<PlannedDay> {
        let day = self.day_mut(date)?;
        day.completed = false;
        if let Some(meals) = day.meals.as_mut() {
            for meal in meals.iter_mut().filter(|m| m.status == MealStatus::Locked) {
                meal.status = MealStatus::Completed;
            }
        }
        info!(%date, "Unlocked day");
        Ok(day.clone())
    }

    /// Complete yesterday if it is planned and still open
    ///
    /// Returns the date that was completed.
    pub fn auto_complete_previous(&mut self) -> Option<NaiveDate> {
        let yesterday = self.clock.today().pred_opt()?;
        match self.complete_day(yesterday) {
            Ok(true) => {
                info!(date = %yesterday, "Auto-completed previous day");
                Some(yesterday)
            }
            Ok(false) | Err(_) => None,
        }
    }

    /// Replace the live budgets
    ///
    /// Incomplete days drop their cached meals so the next view regenerates
    /// them. Returns how many days were reset.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the budgets fail validation
    pub fn edit_budgets(&mut self, budgets: MacroBudgets) -> AppResult<usize> {
        budgets.validate()?;
        self.budgets = budgets;
        let mut reset = 0;
        for day in self.days.values_mut().filter(|day| !day.completed) {
            if day.meals.is_some() || day.meal_plan.is_some() {
                day.clear_meal_plan();
                reset += 1;
            }
        }
        info!(reset, "Edited macro budgets");
        Ok(reset)
    }

    /// Budget that applies to `date`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn planned_macros(&self, date: NaiveDate) -> AppResult<MacroSet> {
        Ok(self.day(date)?.planned_macros(&self.budgets))
    }

    /// Sum of tracked intake on `date`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn consumed_macros(&self, date: NaiveDate) -> AppResult<MacroSet> {
        Ok(consumed_macros(self.day(date)?.meals()))
    }

    /// Budget left on `date`, floored at zero per field
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn remaining_macros(&self, date: NaiveDate) -> AppResult<MacroSet> {
        let day = self.day(date)?;
        Ok(remaining_macros(&day.planned_macros(&self.budgets), day.meals()))
    }

    /// Generate the plan of `day` without storing it
    pub(super) fn generate(&self, day: &PlannedDay) -> Generation {
        let budget = day.planned_macros(&self.budgets);
        MealPlanGenerator::new(&self.meal_plan).generate(day, &budget, self.clock.now())
    }

    /// Meals of `date`, generating and caching them on first use
    ///
    /// A day that cannot be planned (training without a time) yields no meals
    /// and caches nothing.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn materialize_meals(&mut self, date: NaiveDate) -> AppResult<Vec<Meal>> {
        let day = self.day(date)?;
        if let Some(meals) = &day.meals {
            return Ok(meals.clone());
        }
        match self.generate(day) {
            Generation::Planned { meals, summary } => {
                let day = self.day_mut(date)?;
                day.meals = Some(meals.clone());
                day.meal_plan = Some(summary);
                Ok(meals)
            }
            Generation::NotPlannable(reason) => {
                debug!(%date, %reason, "Day has no meal plan");
                Ok(Vec::new())
            }
        }
    }

    /// Move the training session of a training day
    ///
    /// Without tracked meals the cached plan is dropped and regenerated around
    /// the new time on next view. With tracked meals the allocations stay and
    /// only meal times follow the new session.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned, `ResourceLocked` for
    /// past days and `InvalidInput` when the day is not a training day
    pub fn set_training_time(&mut self, date: NaiveDate, time: NaiveTime) -> AppResult<PlannedDay> {
        self.ensure_editable(date)?;
        let day = self.day(date)?;
        if day.day_type != DayType::Training {
            return Err(AppError::invalid_input(format!(
                "{date} is a {} day; only training days have a training time",
                day.day_type
            ))
            .with_resource_id(date.to_string()));
        }

        let mut updated = day.clone();
        updated.training_time = Some(time);
        if updated.has_tracked_meals() {
            if let Generation::Planned { meals: fresh, summary } = self.generate(&updated) {
                if let Some(meals) = updated.meals.as_mut() {
                    for meal in meals.iter_mut() {
                        if let Some(slot) = fresh.iter().find(|f| f.id == meal.id) {
                            meal.time = slot.time;
                        }
                    }
                }
                updated.meal_plan = Some(summary);
            }
        } else {
            updated.clear_meal_plan();
        }

        info!(%date, training_time = %time.format("%H:%M"), "Updated training time");
        self.days.insert(date, updated.clone());
        Ok(updated)
    }

    /// Give a meal a new display name
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for blank names, `ResourceNotFound` when the day or
    /// meal does not exist
    pub fn rename_meal(&mut self, date: NaiveDate, meal_id: &str, name: &str) -> AppResult<Meal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(
                AppError::invalid_input("meal name cannot be empty").with_resource_id(meal_id)
            );
        }
        let meals = self.meals_mut(date)?;
        let meal = find_meal(meals, date, meal_id)?;
        meal.name = name.to_owned();
        debug!(%date, meal_id, name, "Renamed meal");
        Ok(meal.clone())
    }

    /// Previous states of `date`, oldest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn history(&self, date: NaiveDate) -> AppResult<&[DayHistoryEntry]> {
        Ok(&self.day(date)?.history)
    }

    /// Monday-to-Sunday view of the week containing `date`
    #[must_use]
    pub fn week_of(&self, date: NaiveDate) -> Vec<WeekDay> {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let monday = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
        monday
            .iter_days()
            .take(7)
            .map(|date| match self.days.get(&date) {
                Some(day) => WeekDay {
                    date,
                    day_type: Some(day.day_type),
                    completed: day.completed,
                    planned: Some(day.planned_macros(&self.budgets)),
                },
                None => WeekDay {
                    date,
                    day_type: None,
                    completed: false,
                    planned: None,
                },
            })
            .collect()
    }

    /// Chronological meals and training marker of `date`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn timeline(&mut self, date: NaiveDate) -> AppResult<Vec<TimelineEntry>> {
        let meals = self.materialize_meals(date)?;
        Ok(build_timeline(self.day(date)?, &meals))
    }

    /// Materialized meals of `date` for in-place edits
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned and `InvalidInput`
    /// when the day cannot be planned yet
    pub(super) fn meals_mut(&mut self, date: NaiveDate) -> AppResult<&mut Vec<Meal>> {
        self.materialize_meals(date)?;
        let day = self.day_mut(date)?;
        let day_type = day.day_type;
        day.meals.as_mut().ok_or_else(|| {
            AppError::invalid_input(format!("{date} ({day_type}) has no meal plan"))
                .with_resource_id(date.to_string())
        })
    }
}

pub(super) fn find_meal<'m>(
    meals: &'m mut [Meal],
    date: NaiveDate,
    meal_id: &str,
) -> AppResult<&'m mut Meal> {
    meals
        .iter_mut()
        .find(|meal| meal.id == meal_id)
        .ok_or_else(|| {
            AppError::not_found(format!("Meal '{meal_id}' on {date}")).with_resource_id(meal_id)
        })
}
