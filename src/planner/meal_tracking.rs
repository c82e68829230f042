// ABOUTME: Meal lifecycle on a planned day: track, untrack, skip and unskip
// ABOUTME: Every change re-balances the remaining budget over the open meals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use super::store::{find_meal, DayPlanStore};
use crate::intelligence::macro_redistribution::redistribute;
use crate::intelligence::meal_plan_generator::Generation;
use chrono::NaiveDate;
use macro_ledger_core::errors::{AppError, AppResult};
use macro_ledger_core::models::{MacroSet, Meal, MealIntake, MealStatus};
use tracing::{debug, info};

impl DayPlanStore {
    /// Record what was eaten for a meal
    ///
    /// Tracking a skipped meal un-skips it. Calories omitted from the intake are
    /// derived from the grams. On a completed day the meal is sealed right away.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown day or meal, `InvalidInput` when
    /// the day has no plan and `ResourceLocked` for meals sealed by completing
    /// the day
    pub fn track_meal(
        &mut self,
        date: NaiveDate,
        meal_id: &str,
        intake: MealIntake,
    ) -> AppResult<Vec<Meal>> {
        let sealed = self.get(date).is_some_and(|day| day.completed);
        let meals = self.meals_mut(date)?;
        let meal = find_meal(meals, date, meal_id)?;
        ensure_not_locked(meal, date)?;

        let consumed = intake.into_macros();
        meal.consumed = Some(consumed);
        meal.status = if sealed { MealStatus::Locked } else { MealStatus::Completed };
        meal.skipped = false;
        info!(%date, meal_id, calories = consumed.calories, "Tracked meal");

        self.rebalance(date)
    }

    /// Forget what was recorded for a meal
    ///
    /// The day's plan is regenerated: tracked meals keep their data, the other
    /// meals take their generated allocation back (names and skip flags are
    /// kept), then the remainder is redistributed.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown day or meal, `InvalidInput` when
    /// the meal is not tracked and `ResourceLocked` for sealed meals
    pub fn untrack_meal(&mut self, date: NaiveDate, meal_id: &str) -> AppResult<Vec<Meal>> {
        let meals = self.meals_mut(date)?;
        let meal = find_meal(meals, date, meal_id)?;
        ensure_not_locked(meal, date)?;
        if !meal.is_tracked() {
            return Err(AppError::invalid_input(format!("meal '{meal_id}' is not tracked"))
                .with_resource_id(meal_id));
        }
        meal.consumed = None;
        meal.status = MealStatus::Open;
        info!(%date, meal_id, "Untracked meal");

        if let Some(fresh) = self.regenerate(date)? {
            let meals = self.meals_mut(date)?;
            for meal in meals.iter_mut().filter(|meal| !meal.is_tracked()) {
                if let Some(slot) = fresh.iter().find(|slot| slot.id == meal.id) {
                    meal.planned = slot.planned;
                }
            }
        }
        self.rebalance(date)
    }

    /// Skip a meal: its allocation drops to zero and moves to the open meals
    ///
    /// Skipping an already skipped meal changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` for past days, `ResourceNotFound` for an unknown
    /// day or meal and `InvalidInput` for tracked meals
    pub fn skip_meal(&mut self, date: NaiveDate, meal_id: &str) -> AppResult<Vec<Meal>> {
        self.ensure_editable(date)?;
        let meals = self.meals_mut(date)?;
        let meal = find_meal(meals, date, meal_id)?;
        if meal.is_tracked() {
            return Err(AppError::invalid_input(format!(
                "meal '{meal_id}' is already tracked; untrack it before skipping"
            ))
            .with_resource_id(meal_id));
        }
        if meal.skipped {
            return Ok(meals.clone());
        }
        meal.skipped = true;
        meal.planned = MacroSet::zero();
        info!(%date, meal_id, "Skipped meal");

        self.rebalance(date)
    }

    /// Bring a skipped meal back with its generated allocation
    ///
    /// Unskipping a meal that is not skipped changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` for past days and `ResourceNotFound` for an
    /// unknown day or meal
    pub fn unskip_meal(&mut self, date: NaiveDate, meal_id: &str) -> AppResult<Vec<Meal>> {
        self.ensure_editable(date)?;
        let fresh = self.regenerate(date)?;
        let meals = self.meals_mut(date)?;
        let meal = find_meal(meals, date, meal_id)?;
        if !meal.skipped {
            return Ok(meals.clone());
        }
        meal.skipped = false;
        if let Some(slot) = fresh.iter().flatten().find(|slot| slot.id == meal_id) {
            meal.planned = slot.planned;
        }
        info!(%date, meal_id, "Unskipped meal");

        self.rebalance(date)
    }

    /// Fresh plan of `date` ignoring cached meals, or `None` when not plannable
    fn regenerate(&self, date: NaiveDate) -> AppResult<Option<Vec<Meal>>> {
        match self.generate(self.day(date)?) {
            Generation::Planned { meals, .. } => Ok(Some(meals)),
            Generation::NotPlannable(reason) => {
                debug!(%date, %reason, "Keeping current allocations");
                Ok(None)
            }
        }
    }

    /// Redistribute the remaining budget of `date` and store the result
    fn rebalance(&mut self, date: NaiveDate) -> AppResult<Vec<Meal>> {
        let planned = self.planned_macros(date)?;
        let day = self.day_mut(date)?;
        let balanced = redistribute(day.meals(), &planned);
        day.meals = Some(balanced.clone());
        Ok(balanced)
    }
}

fn ensure_not_locked(meal: &Meal, date: NaiveDate) -> AppResult<()> {
    if meal.status == MealStatus::Locked {
        return Err(AppError::resource_locked(format!(
            "meal '{}' on {date} is sealed; unlock the day first",
            meal.id
        ))
        .with_resource_id(meal.id.clone()));
    }
    Ok(())
}
