// ABOUTME: Key-value persistence abstraction for budgets, planned days and pending changes
// ABOUTME: Pluggable backends (in-memory, JSON files) selected through the Storage factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Persistence layer
//!
//! The ledger persists three whole values, each under its own key:
//!
//! | Key | Value |
//! |---|---|
//! | `userMacros` | [`MacroBudgets`](macro_ledger_core::models::MacroBudgets) |
//! | `plannedDays` | [`PlannedDaysEnvelope`](schema::PlannedDaysEnvelope) |
//! | `pendingTypeChange` | [`PendingTypeChange`](crate::planner::PendingTypeChange) |
//!
//! Every save replaces the whole value; there are no partial updates.

/// Storage factory for backend selection
pub mod factory;
/// JSON-file storage implementation
pub mod json_file;
/// In-memory storage implementation
pub mod memory;
/// Versioned layout of persisted values
pub mod schema;

pub use factory::Storage;
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use macro_ledger_core::errors::AppResult;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key-value store trait for pluggable backend implementations
pub trait KeyValueStore: Send + Sync {
    /// Read and decode the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the value does not decode
    fn load<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>>;

    /// Encode and store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails
    fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()>;

    /// Delete the value under `key`; absent keys are not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Read the value under `key`, falling back to `T::default()` when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the value does not decode
    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> AppResult<T> {
        Ok(self.load(key)?.unwrap_or_default())
    }
}
