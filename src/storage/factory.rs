// ABOUTME: Storage factory for configuration-based backend selection
// ABOUTME: Wraps the in-memory and JSON-file stores behind one KeyValueStore value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use super::{json_file::JsonFileStore, memory::InMemoryStore, KeyValueStore};
use crate::config::environment::{LedgerConfig, StorageBackend};
use macro_ledger_core::errors::AppResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

/// Storage backend chosen at startup
#[derive(Debug, Clone)]
pub enum Storage {
    /// Process memory
    Memory(InMemoryStore),
    /// JSON files in a data directory
    File(JsonFileStore),
}

impl Storage {
    /// Open the backend named by `config`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the data directory cannot be created
    pub fn from_config(config: &LedgerConfig) -> AppResult<Self> {
        match config.storage {
            StorageBackend::Memory => {
                info!("Initializing in-memory storage");
                Ok(Self::Memory(InMemoryStore::new()))
            }
            StorageBackend::File => {
                info!(data_dir = %config.data_dir.display(), "Initializing JSON file storage");
                Ok(Self::File(JsonFileStore::open(&config.data_dir)?))
            }
        }
    }

    /// Name of the active backend
    #[must_use]
    pub const fn backend(&self) -> StorageBackend {
        match self {
            Self::Memory(_) => StorageBackend::Memory,
            Self::File(_) => StorageBackend::File,
        }
    }
}

impl From<InMemoryStore> for Storage {
    fn from(store: InMemoryStore) -> Self {
        Self::Memory(store)
    }
}

impl From<JsonFileStore> for Storage {
    fn from(store: JsonFileStore) -> Self {
        Self::File(store)
    }
}

impl KeyValueStore for Storage {
    fn load<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self {
            Self::Memory(store) => store.load(key),
            Self::File(store) => store.load(key),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.save(key, value),
            Self::File(store) => store.save(key, value),
        }
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.remove(key),
            Self::File(store) => store.remove(key),
        }
    }
}
