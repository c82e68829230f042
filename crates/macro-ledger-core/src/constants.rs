// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Storage keys, energy density values and schedule defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Constants grouped by the domain that uses them.

/// Keys used in the persistent key-value store
pub mod storage_keys {
    /// The three day-type budgets (plus BMR)
    pub const USER_MACROS: &str = "userMacros";
    /// The full list of planned days
    pub const PLANNED_DAYS: &str = "plannedDays";
    /// A day-type change awaiting confirmation
    pub const PENDING_TYPE_CHANGE: &str = "pendingTypeChange";
}

/// Schema versions for persisted blobs
pub mod schema {
    /// Current version of the `plannedDays` envelope
    pub const PLANNED_DAYS_VERSION: u32 = 1;
}

/// Energy density of macronutrients (kcal per gram)
pub mod energy {
    /// Protein: 4 kcal/g
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Carbohydrates: 4 kcal/g
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Fat: 9 kcal/g
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
}

/// Schedule defaults
pub mod schedule {
    /// Training time assigned when a day becomes a training day without one
    pub const DEFAULT_TRAINING_TIME: &str = "18:30";
    /// Wire format for meal and training times
    pub const TIME_FORMAT: &str = "%H:%M";
    /// Minutes in a day, used to wrap meal times around midnight
    pub const MINUTES_PER_DAY: i64 = 24 * 60;
}
