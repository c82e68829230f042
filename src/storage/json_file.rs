// ABOUTME: File-backed key-value store writing one pretty JSON file per key
// ABOUTME: Writes go through a temporary file and a rename so readers never see partial data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use super::KeyValueStore;
use macro_ledger_core::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON-file store rooted at a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory cannot be created
    pub fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            AppError::storage(format!("cannot create data directory {}", root.display()))
                .with_source(e)
        })?;
        debug!(root = %root.display(), "Opened JSON file store");
        Ok(Self { root })
    }

    /// Directory holding the files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for keys that are not plain identifiers
    pub fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::invalid_input(format!("invalid storage key '{key}'")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let path = self.path_for(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::storage(format!("cannot read {}", path.display()))
                    .with_resource_id(key)
                    .with_source(e))
            }
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            AppError::serialization(format!("{} is not valid: {e}", path.display()))
                .with_resource_id(key)
                .with_source(e)
        })
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let path = self.path_for(key)?;
        let json = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        write_then_rename(&tmp, &path, json.as_bytes()).map_err(|e| {
            AppError::storage(format!("cannot write {}", path.display()))
                .with_resource_id(key)
                .with_source(e)
        })?;
        debug!(key, path = %path.display(), "Saved value");
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!("cannot remove {}", path.display()))
                .with_resource_id(key)
                .with_source(e)),
        }
    }
}

fn write_then_rename(tmp: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(tmp, bytes)?;
    fs::rename(tmp, target)
}
