// ABOUTME: In-memory key-value store holding JSON text per key
// ABOUTME: Used by tests and dry runs; values go through the same serde path as files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use super::KeyValueStore;
use macro_ledger_core::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory store
///
/// Clones share the same map, so a test can keep a handle while the ledger owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned
    pub fn raw(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AppError::storage("in-memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    /// Store raw JSON under `key` without validating it
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned
    pub fn insert_raw(&self, key: &str, json: impl Into<String>) -> AppResult<()> {
        self.entries
            .write()
            .map_err(|_| AppError::storage("in-memory store lock poisoned"))?
            .insert(key.to_owned(), json.into());
        Ok(())
    }
}

impl KeyValueStore for InMemoryStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        self.raw(key)?
            .map(|json| serde_json::from_str(&json).map_err(AppError::from))
            .transpose()
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.insert_raw(key, json)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries
            .write()
            .map_err(|_| AppError::storage("in-memory store lock poisoned"))?
            .remove(key);
        Ok(())
    }
}
