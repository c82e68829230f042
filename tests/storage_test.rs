// ABOUTME: Integration tests for the key-value backends and the planned-day layout
// ABOUTME: JSON-file round trips, in-memory store, factory selection and legacy migration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{date, standard_budgets, time};
use macro_ledger::config::{LedgerConfig, StorageBackend};
use macro_ledger::storage::schema::{decode_planned_days, load_planned_days, save_planned_days};
use macro_ledger::storage::{InMemoryStore, JsonFileStore, KeyValueStore, Storage};
use macro_ledger::ErrorCode;
use macro_ledger_core::models::{DayType, MacroBudgets, MacroSet, MealStatus, PlannedDay};
use serde_json::json;
use tempfile::TempDir;

// ============================================================================
// JSON File Backend
// ============================================================================

#[test]
fn test_json_file_round_trip() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    store.save("userMacros", &standard_budgets()).unwrap();
    let loaded: Option<MacroBudgets> = store.load("userMacros").unwrap();

    assert_eq!(loaded, Some(standard_budgets()));
    assert!(dir.path().join("userMacros.json").exists());
    assert!(!dir.path().join("userMacros.json.tmp").exists());
}

#[test]
fn test_json_file_missing_key_is_none() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    let loaded: Option<MacroBudgets> = store.load("userMacros").unwrap();

    assert!(loaded.is_none());
    let fallback: MacroBudgets = store.load_or_default("userMacros").unwrap();
    assert_eq!(fallback, MacroBudgets::default());
}

#[test]
fn test_json_file_remove_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    store.save("pendingTypeChange", &json!({"date": "2025-03-05"})).unwrap();

    store.remove("pendingTypeChange").unwrap();
    store.remove("pendingTypeChange").unwrap();

    assert!(store.load::<serde_json::Value>("pendingTypeChange").unwrap().is_none());
}

#[test]
fn test_json_file_rejects_path_like_keys() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    for key in ["../escape", "a/b", "", "dot.key"] {
        let err = store.save(key, &1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "key {key:?}");
    }
}

#[test]
fn test_json_file_corrupt_value_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    std::fs::write(dir.path().join("userMacros.json"), "{not json").unwrap();

    let err = store.load::<MacroBudgets>("userMacros").unwrap_err();

    assert_eq!(err.code, ErrorCode::SerializationError);
}

#[test]
fn test_json_file_open_creates_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("data").join("ledger");

    let store = JsonFileStore::open(&nested).unwrap();

    assert!(nested.is_dir());
    assert_eq!(store.root(), nested.as_path());
}

// ============================================================================
// In-Memory Backend and Factory
// ============================================================================

#[test]
fn test_in_memory_clones_share_entries() {
    let store = InMemoryStore::new();
    let clone = store.clone();

    store.save("userMacros", &standard_budgets()).unwrap();

    assert_eq!(clone.load::<MacroBudgets>("userMacros").unwrap(), Some(standard_budgets()));
    assert!(clone.raw("userMacros").unwrap().unwrap().contains("\"training\""));
}

#[test]
fn test_factory_selects_backend() {
    let dir = TempDir::new().unwrap();

    let memory = Storage::from_config(&LedgerConfig::in_memory()).unwrap();
    let file = Storage::from_config(&LedgerConfig::default().with_data_dir(dir.path())).unwrap();

    assert_eq!(memory.backend(), StorageBackend::Memory);
    assert_eq!(file.backend(), StorageBackend::File);
}

// ============================================================================
// Planned-Day Layout
// ============================================================================

#[test]
fn test_planned_days_saved_in_envelope() {
    let store = InMemoryStore::new();
    let day = PlannedDay::new(date(2025, 3, 5), DayType::Training, Some(time(18, 30)));

    save_planned_days(&store, vec![day.clone()]).unwrap();

    let text = store.raw("plannedDays").unwrap().unwrap();
    let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(raw["schema_version"], 1);
    assert_eq!(raw["days"][0]["type"], "training");
    assert_eq!(raw["days"][0]["trainingTime"], "18:30");
    assert_eq!(load_planned_days(&store).unwrap(), vec![day]);
}

#[test]
fn test_missing_planned_days_is_empty() {
    let store = InMemoryStore::new();

    assert!(load_planned_days(&store).unwrap().is_empty());
    assert!(decode_planned_days(serde_json::Value::Null).unwrap().is_empty());
}

#[test]
fn test_legacy_array_is_migrated() {
    let legacy = json!([
        {
            "date": "2025-03-04",
            "type": "rest",
            "completed": true,
            "originalMacros": {"calories": 2000, "protein": 150, "carbs": 200, "fat": 70},
            "mealPlan": {
                "eatingWindow": {"start": "09:00", "end": "19:30"},
                "mealCount": 4,
                "lastUpdated": "2025-03-04T08:00:00Z"
            },
            "meals": [
                {
                    "id": "breakfast",
                    "name": "Breakfast",
                    "time": "09:00",
                    "mealType": "regular",
                    "calories": 500,
                    "protein": 45,
                    "carbs": 10,
                    "fat": 15,
                    "status": "locked",
                    "locked": true,
                    "warnings": [],
                    "consumedCalories": 480,
                    "consumedProtein": 40
                },
                {
                    "id": "lunch",
                    "name": "Lunch",
                    "time": "13:00",
                    "suggestedTime": "13:00",
                    "mealType": "regular",
                    "status": "open",
                    "skipped": true
                }
            ],
            "history": []
        }
    ]);

    let days = decode_planned_days(legacy).unwrap();

    assert_eq!(days.len(), 1);
    let day = &days[0];
    assert!(day.completed);
    assert_eq!(day.original_macros, Some(MacroSet::new(2000, 150, 200, 70)));
    assert!(day.meal_plan.is_none());
    let meals = day.meals.as_ref().unwrap();
    assert_eq!(meals[0].consumed, Some(MacroSet::new(480, 40, 0, 0)));
    assert_eq!(meals[0].status, MealStatus::Locked);
    assert!(meals[1].planned.is_zero());
    assert!(meals[1].skipped);
    assert!(meals[1].consumed.is_none());
}

#[test]
fn test_legacy_meals_without_time_are_dropped() {
    let legacy = json!([
        {
            "date": "2025-03-06",
            "type": "training",
            "trainingTime": "07:00",
            "meals": [
                {"id": "breakfast", "name": "Breakfast", "mealType": "regular", "status": "open"}
            ]
        }
    ]);

    let days = decode_planned_days(legacy).unwrap();

    assert!(days[0].meals.is_none());
    assert_eq!(days[0].training_time, Some(time(7, 0)));
}

#[test]
fn test_newer_schema_is_rejected() {
    let store = InMemoryStore::new();
    store
        .insert_raw("plannedDays", r#"{"schema_version": 99, "days": []}"#)
        .unwrap();

    let err = load_planned_days(&store).unwrap_err();

    assert_eq!(err.code, ErrorCode::StorageError);
}

#[test]
fn test_scalar_planned_days_is_rejected() {
    let err = decode_planned_days(json!("2025-03-05")).unwrap_err();

    assert_eq!(err.code, ErrorCode::SerializationError);
}
