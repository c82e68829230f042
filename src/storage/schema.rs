// ABOUTME: Versioned envelope for the persisted list of planned days
// ABOUTME: Accepts the legacy bare-array layout and migrates flat consumed fields on meals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! `plannedDays` layout
//!
//! Current layout: `{"schema_version": 1, "days": [...]}`.
//!
//! Legacy layout: a bare array of days whose meals carry `consumedCalories`,
//! `consumedProtein`, `consumedCarbs` and `consumedFat` as flat optional fields.
//! Legacy meals without a time cannot be placed on a timeline; the meal list of
//! such a day is dropped so it is regenerated on next view.

use super::KeyValueStore;
use macro_ledger_core::constants::schema::PLANNED_DAYS_VERSION;
use macro_ledger_core::constants::storage_keys::PLANNED_DAYS;
use macro_ledger_core::errors::{AppError, AppResult};
use macro_ledger_core::models::PlannedDay;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// Persisted form of the planned-day list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedDaysEnvelope {
    /// Layout version
    pub schema_version: u32,
    /// Days in date order
    pub days: Vec<PlannedDay>,
}

impl PlannedDaysEnvelope {
    /// Wrap days in the current layout
    #[must_use]
    pub fn current(days: Vec<PlannedDay>) -> Self {
        Self {
            schema_version: PLANNED_DAYS_VERSION,
            days,
        }
    }
}

/// Decode a stored `plannedDays` value of any supported layout
///
/// # Errors
///
/// Returns `StorageError` for a layout newer than this build supports and
/// `SerializationError` when the days do not decode
pub fn decode_planned_days(value: Value) -> AppResult<Vec<PlannedDay>> {
    match value {
        Value::Array(days) => {
            info!(count = days.len(), "Migrating legacy planned-day list");
            let migrated = days.into_iter().map(migrate_legacy_day).collect();
            Ok(serde_json::from_value(Value::Array(migrated))?)
        }
        Value::Object(_) => {
            let envelope: PlannedDaysEnvelope = serde_json::from_value(value)?;
            if envelope.schema_version > PLANNED_DAYS_VERSION {
                return Err(AppError::storage(format!(
                    "planned days schema {} is newer than {PLANNED_DAYS_VERSION}",
                    envelope.schema_version
                ))
                .with_resource_id(PLANNED_DAYS));
            }
            Ok(envelope.days)
        }
        Value::Null => Ok(Vec::new()),
        other => Err(AppError::serialization(format!(
            "planned days must be an array or an object, found {other}"
        ))
        .with_resource_id(PLANNED_DAYS)),
    }
}

/// Load the planned-day list from a store
///
/// # Errors
///
/// Propagates backend and decoding errors
pub fn load_planned_days<S: KeyValueStore>(store: &S) -> AppResult<Vec<PlannedDay>> {
    store
        .load::<Value>(PLANNED_DAYS)?
        .map_or_else(|| Ok(Vec::new()), decode_planned_days)
}

/// Save the planned-day list in the current layout
///
/// # Errors
///
/// Propagates backend and encoding errors
pub fn save_planned_days<S: KeyValueStore>(store: &S, days: Vec<PlannedDay>) -> AppResult<()> {
    store.save(PLANNED_DAYS, &PlannedDaysEnvelope::current(days))
}

fn migrate_legacy_day(mut day: Value) -> Value {
    let Some(fields) = day.as_object_mut() else {
        return day;
    };
    // The legacy summary nests its window; it is informational and rebuilt on generation
    fields.remove("mealPlan");
    let meals = fields.remove("meals");
    if let Some(Value::Array(meals)) = meals {
        if meals.iter().all(|meal| meal.get("time").is_some_and(Value::is_string)) {
            let migrated: Vec<Value> = meals.into_iter().map(migrate_legacy_meal).collect();
            fields.insert("meals".to_owned(), Value::Array(migrated));
        }
    }
    day
}

fn migrate_legacy_meal(mut meal: Value) -> Value {
    const CONSUMED: [(&str, &str); 4] = [
        ("consumedCalories", "calories"),
        ("consumedProtein", "protein"),
        ("consumedCarbs", "carbs"),
        ("consumedFat", "fat"),
    ];
    let Some(fields) = meal.as_object_mut() else {
        return meal;
    };
    let mut consumed = Map::new();
    for (legacy, field) in CONSUMED {
        if let Some(value) = fields.remove(legacy).filter(|v| !v.is_null()) {
            consumed.insert(field.to_owned(), value);
        }
    }
    if !consumed.is_empty() {
        for (_, field) in CONSUMED {
            consumed.entry(field).or_insert(Value::from(0));
        }
        fields.insert("consumed".to_owned(), Value::Object(consumed));
    }
    for planned in ["calories", "protein", "carbs", "fat"] {
        fields.entry(planned).or_insert(Value::from(0));
    }
    for dropped in ["completed", "locked", "warnings", "suggestedTime", "relativeToTraining"] {
        fields.remove(dropped);
    }
    meal
}
