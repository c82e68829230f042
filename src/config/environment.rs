// ABOUTME: Environment configuration for storage location and planner policy
// ABOUTME: Reads MACRO_LEDGER_* variables with typed defaults and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Environment-based runtime configuration

use super::error::ConfigError;
use anyhow::{Context, Result};
use chrono::NaiveTime;
use macro_ledger_core::constants::schedule::DEFAULT_TRAINING_TIME;
use macro_ledger_core::models::time_format;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Storage backend selector
pub const STORAGE_ENV: &str = "MACRO_LEDGER_STORAGE";
/// Directory holding the JSON files of the file backend
pub const DATA_DIR_ENV: &str = "MACRO_LEDGER_DATA_DIR";
/// How many days ahead a day type may be assigned
pub const PLANNING_HORIZON_ENV: &str = "MACRO_LEDGER_PLANNING_HORIZON_DAYS";
/// Rollover poll interval in seconds
pub const ROLLOVER_POLL_ENV: &str = "MACRO_LEDGER_ROLLOVER_POLL_SECS";
/// Training time given to training days created without one
pub const DEFAULT_TRAINING_TIME_ENV: &str = "MACRO_LEDGER_DEFAULT_TRAINING_TIME";

const DEFAULT_PLANNING_HORIZON_DAYS: u32 = 365;
const DEFAULT_ROLLOVER_POLL_SECS: u64 = 60;
const DATA_DIR_NAME: &str = "macro-ledger";

/// Where planned days and budgets are persisted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key in the data directory
    #[default]
    File,
    /// Process memory only (tests, dry runs)
    Memory,
}

impl StorageBackend {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Self::Memory,
            _ => Self::File,
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Runtime configuration of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Persistence backend
    pub storage: StorageBackend,
    /// Directory of the file backend
    pub data_dir: PathBuf,
    /// Furthest future date (in days from today) that may be planned
    pub planning_horizon_days: u32,
    /// Rollover watcher poll interval
    pub rollover_poll_secs: u64,
    /// Training time for training days created without one
    #[serde(with = "time_format")]
    pub default_training_time: NaiveTime,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File,
            data_dir: default_data_dir(),
            planning_horizon_days: DEFAULT_PLANNING_HORIZON_DAYS,
            rollover_poll_secs: DEFAULT_ROLLOVER_POLL_SECS,
            default_training_time: default_training_time(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading ledger configuration from environment variables");
        let defaults = Self::default();

        let config = Self {
            storage: env::var(STORAGE_ENV)
                .map_or(defaults.storage, |raw| StorageBackend::from_str_or_default(&raw)),
            data_dir: env::var(DATA_DIR_ENV).map_or(defaults.data_dir, PathBuf::from),
            planning_horizon_days: match env::var(PLANNING_HORIZON_ENV) {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {PLANNING_HORIZON_ENV} value '{raw}'"))?,
                Err(_) => defaults.planning_horizon_days,
            },
            rollover_poll_secs: match env::var(ROLLOVER_POLL_ENV) {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {ROLLOVER_POLL_ENV} value '{raw}'"))?,
                Err(_) => defaults.rollover_poll_secs,
            },
            default_training_time: match env::var(DEFAULT_TRAINING_TIME_ENV) {
                Ok(raw) => time_format::parse_hhmm(&raw)
                    .with_context(|| format!("Invalid {DEFAULT_TRAINING_TIME_ENV} value"))?,
                Err(_) => defaults.default_training_time,
            },
        };

        config.validate()?;
        debug!(
            storage = %config.storage,
            data_dir = %config.data_dir.display(),
            horizon = config.planning_horizon_days,
            "Ledger configuration loaded"
        );
        Ok(config)
    }

    /// In-memory configuration with default policy, for tests and dry runs
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::Memory,
            ..Self::default()
        }
    }

    /// Override the data directory (and switch to the file backend)
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.storage = StorageBackend::File;
        self.data_dir = data_dir.into();
        self
    }

    /// Validate policy values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a zero planning horizon or a
    /// zero poll interval
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.planning_horizon_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "planning horizon must be at least one day",
            ));
        }
        if self.rollover_poll_secs == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "rollover poll interval must be at least one second",
            ));
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

fn default_training_time() -> NaiveTime {
    time_format::parse_hhmm(DEFAULT_TRAINING_TIME)
        .unwrap_or_else(|_| NaiveTime::from_hms_opt(18, 30, 0).unwrap_or(NaiveTime::MIN))
}
