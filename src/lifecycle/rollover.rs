// ABOUTME: Polls the clock and completes the previous day when the date rolls over
// ABOUTME: tokio interval loop with select-based shutdown, plus a synchronous single poll
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Date rollover watcher
//!
//! The first poll always counts as a rollover so a ledger opened in the morning
//! completes yesterday straight away.

use crate::ledger::Ledger;
use chrono::NaiveDate;
use macro_ledger_core::errors::AppResult;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Watches for calendar-date changes
#[derive(Debug, Clone)]
pub struct RolloverWatcher {
    poll_interval: Duration,
    last_seen: Option<NaiveDate>,
    rollovers: u64,
}

impl RolloverWatcher {
    /// Watcher polling every `poll_interval`
    #[must_use]
    pub const fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            last_seen: None,
            rollovers: 0,
        }
    }

    /// Watcher polling every `secs` seconds
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Date observed by the last poll
    #[must_use]
    pub const fn last_seen(&self) -> Option<NaiveDate> {
        self.last_seen
    }

    /// Number of date changes handled so far
    #[must_use]
    pub const fn rollovers(&self) -> u64 {
        self.rollovers
    }

    /// Check the clock once
    ///
    /// On a date change the previous day is auto-completed; the completed date
    /// is returned when that changed anything.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the completed day cannot be saved
    pub fn poll_once(&mut self, ledger: &mut Ledger) -> AppResult<Option<NaiveDate>> {
        let today = ledger.store().clock().today();
        if self.last_seen == Some(today) {
            return Ok(None);
        }
        info!(%today, previous = ?self.last_seen, "Date rollover");
        self.last_seen = Some(today);
        self.rollovers += 1;
        ledger.auto_complete_previous()
    }

    /// Poll until `shutdown` resolves
    ///
    /// Poll failures are logged and retried on the next tick.
    pub async fn run<F>(mut self, ledger: &mut Ledger, shutdown: F) -> Self
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.poll_interval);
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.poll_once(ledger) {
                        Ok(Some(date)) => info!(%date, "Previous day completed by rollover"),
                        Ok(None) => debug!("No rollover"),
                        Err(e) => warn!(error = %e, "Rollover poll failed"),
                    }
                }
                () = &mut shutdown => {
                    debug!("Rollover watcher received shutdown signal");
                    break;
                }
            }
        }
        self
    }
}
