// ABOUTME: Persistent facade over the day-plan store
// ABOUTME: Loads budgets, days and the pending change from storage and saves after every mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Ledger facade
//!
//! [`DayPlanStore`] is pure bookkeeping. The [`Ledger`] wraps it with the
//! key-value store: state is loaded once at open and every successful mutation
//! is written back as whole values.

use crate::clock::Clock;
use crate::config::environment::LedgerConfig;
use crate::config::meal_plan::MealPlanConfig;
use crate::intelligence::meal_timeline::TimelineEntry;
use crate::planner::{AssignOutcome, DayPlanStore, PendingTypeChange, PlannerPolicy, WeekDay};
use crate::storage::schema::{load_planned_days, save_planned_days};
use crate::storage::{KeyValueStore, Storage};
use chrono::{NaiveDate, NaiveTime};
use macro_ledger_core::constants::storage_keys::{PENDING_TYPE_CHANGE, USER_MACROS};
use macro_ledger_core::errors::AppResult;
use macro_ledger_core::models::{
    DayHistoryEntry, DayType, MacroBudgets, MacroSet, Meal, MealIntake, PlannedDay,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything shown for one day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    /// The day record, meals included
    pub day: PlannedDay,
    /// Budget that applies to the day
    pub planned: MacroSet,
    /// Tracked intake
    pub consumed: MacroSet,
    /// Budget left, floored at zero
    pub remaining: MacroSet,
    /// Meals and training in time order
    pub timeline: Vec<TimelineEntry>,
}

/// Persistent ledger
pub struct Ledger {
    store: DayPlanStore,
    storage: Storage,
}

impl Ledger {
    /// Open the backend named by `config` and load its state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be opened or stored values do not
    /// decode
    pub fn open(config: &LedgerConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let storage = Storage::from_config(config)?;
        Self::load(storage, config, clock, MealPlanConfig::global().clone())
    }

    /// Load state from an already opened backend
    ///
    /// # Errors
    ///
    /// Returns an error if stored values do not decode
    pub fn load(
        storage: Storage,
        config: &LedgerConfig,
        clock: Arc<dyn Clock>,
        meal_plan: MealPlanConfig,
    ) -> AppResult<Self> {
        let budgets: Option<MacroBudgets> = storage.load(USER_MACROS)?;
        if budgets.is_none() {
            warn!("No macro budgets stored yet; set them before planning");
        }
        let days = load_planned_days(&storage)?;
        let pending: Option<PendingTypeChange> = storage.load(PENDING_TYPE_CHANGE)?;
        info!(
            backend = %storage.backend(),
            days = days.len(),
            pending = pending.is_some(),
            "Loaded ledger"
        );

        let store = DayPlanStore::new(budgets.unwrap_or_default(), clock)
            .with_meal_plan(meal_plan)
            .with_policy(PlannerPolicy::from(config))
            .with_days(days)
            .with_pending(pending);
        Ok(Self { store, storage })
    }

    /// Read access to the underlying store
    #[must_use]
    pub const fn store(&self) -> &DayPlanStore {
        &self.store
    }

    /// Backend the ledger writes to
    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Live budgets
    #[must_use]
    pub const fn budgets(&self) -> &MacroBudgets {
        self.store.budgets()
    }

    /// True once valid budgets have been stored
    #[must_use]
    pub fn is_onboarded(&self) -> bool {
        self.store.budgets().validate().is_ok()
    }

    /// Change awaiting confirmation, if any
    #[must_use]
    pub const fn pending_type_change(&self) -> Option<&PendingTypeChange> {
        self.store.pending_type_change()
    }

    fn persist_days(&self) -> AppResult<()> {
        save_planned_days(&self.storage, self.store.days().cloned().collect())
    }

    fn persist_pending(&self) -> AppResult<()> {
        match self.store.pending_type_change() {
            Some(pending) => self.storage.save(PENDING_TYPE_CHANGE, pending),
            None => self.storage.remove(PENDING_TYPE_CHANGE),
        }
    }

    /// Replace the budgets; returns how many incomplete days were reset
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for invalid budgets, or a storage error
    pub fn set_budgets(&mut self, budgets: MacroBudgets) -> AppResult<usize> {
        let reset = self.store.edit_budgets(budgets)?;
        self.storage.save(USER_MACROS, self.store.budgets())?;
        self.persist_days()?;
        Ok(reset)
    }

    /// See [`DayPlanStore::assign`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn assign(&mut self, date: NaiveDate, day_type: DayType) -> AppResult<AssignOutcome> {
        let outcome = self.store.assign(date, day_type)?;
        match &outcome {
            AssignOutcome::Created(_) => self.persist_days()?,
            AssignOutcome::ConfirmationRequired(_) => self.persist_pending()?,
            AssignOutcome::Unchanged => {}
        }
        Ok(outcome)
    }

    /// See [`DayPlanStore::confirm_type_change`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn confirm_type_change(&mut self) -> AppResult<PlannedDay> {
        let result = self.store.confirm_type_change();
        // The pending change is consumed whether or not it applied
        self.persist_pending()?;
        let day = result?;
        self.persist_days()?;
        Ok(day)
    }

    /// See [`DayPlanStore::cancel_type_change`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn cancel_type_change(&mut self) -> AppResult<PendingTypeChange> {
        let pending = self.store.cancel_type_change()?;
        self.persist_pending()?;
        Ok(pending)
    }

    /// See [`DayPlanStore::complete`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn complete(&mut self, date: NaiveDate) -> AppResult<PlannedDay> {
        let day = self.store.complete(date)?;
        self.persist_days()?;
        Ok(day)
    }

    /// See [`DayPlanStore::unlock`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn unlock(&mut self, date: NaiveDate) -> AppResult<PlannedDay> {
        let day = self.store.unlock(date)?;
        self.persist_days()?;
        Ok(day)
    }

    /// See [`DayPlanStore::auto_complete_previous`]
    ///
    /// # Errors
    ///
    /// Returns a storage error if the completed day cannot be saved
    pub fn auto_complete_previous(&mut self) -> AppResult<Option<NaiveDate>> {
        let completed = self.store.auto_complete_previous();
        if completed.is_some() {
            self.persist_days()?;
        }
        Ok(completed)
    }

    /// See [`DayPlanStore::set_training_time`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn set_training_time(&mut self, date: NaiveDate, time: NaiveTime) -> AppResult<PlannedDay> {
        let day = self.store.set_training_time(date, time)?;
        self.persist_days()?;
        Ok(day)
    }

    /// See [`DayPlanStore::rename_meal`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn rename_meal(&mut self, date: NaiveDate, meal_id: &str, name: &str) -> AppResult<Meal> {
        let meal = self.store.rename_meal(date, meal_id, name)?;
        self.persist_days()?;
        Ok(meal)
    }

    /// See [`DayPlanStore::track_meal`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn track_meal(
        &mut self,
        date: NaiveDate,
        meal_id: &str,
        intake: MealIntake,
    ) -> AppResult<Vec<Meal>> {
        let meals = self.store.track_meal(date, meal_id, intake)?;
        self.persist_days()?;
        Ok(meals)
    }

    /// See [`DayPlanStore::untrack_meal`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn untrack_meal(&mut self, date: NaiveDate, meal_id: &str) -> AppResult<Vec<Meal>> {
        let meals = self.store.untrack_meal(date, meal_id)?;
        self.persist_days()?;
        Ok(meals)
    }

    /// See [`DayPlanStore::skip_meal`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn skip_meal(&mut self, date: NaiveDate, meal_id: &str) -> AppResult<Vec<Meal>> {
        let meals = self.store.skip_meal(date, meal_id)?;
        self.persist_days()?;
        Ok(meals)
    }

    /// See [`DayPlanStore::unskip_meal`]
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn unskip_meal(&mut self, date: NaiveDate, meal_id: &str) -> AppResult<Vec<Meal>> {
        let meals = self.store.unskip_meal(date, meal_id)?;
        self.persist_days()?;
        Ok(meals)
    }

    /// Meals of `date`, generating and saving them on first view
    ///
    /// # Errors
    ///
    /// Propagates store and storage errors
    pub fn materialize_meals(&mut self, date: NaiveDate) -> AppResult<Vec<Meal>> {
        let had_meals = self.store.get(date).is_some_and(|day| day.meals.is_some());
        let meals = self.store.materialize_meals(date)?;
        if !had_meals && !meals.is_empty() {
            self.persist_days()?;
        }
        Ok(meals)
    }

    /// Full view of one day, materializing its meals
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned, or a storage error
    pub fn day_view(&mut self, date: NaiveDate) -> AppResult<DayView> {
        self.materialize_meals(date)?;
        let timeline = self.store.timeline(date)?;
        let planned = self.store.planned_macros(date)?;
        let consumed = self.store.consumed_macros(date)?;
        let remaining = self.store.remaining_macros(date)?;
        let day = self.store.planned_day(date)?.clone();
        Ok(DayView {
            day,
            planned,
            consumed,
            remaining,
            timeline,
        })
    }

    /// See [`DayPlanStore::history`]
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `date` is not planned
    pub fn history(&self, date: NaiveDate) -> AppResult<&[DayHistoryEntry]> {
        self.store.history(date)
    }

    /// See [`DayPlanStore::week_of`]
    #[must_use]
    pub fn week_of(&self, date: NaiveDate) -> Vec<WeekDay> {
        self.store.week_of(date)
    }
}
