// ABOUTME: Two-step confirmation workflow for changing the type of an already planned day
// ABOUTME: Idle / PendingConfirmation state machine plus confirm and cancel on the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Day-type change workflow
//!
//! Reassigning a planned day to a different type discards its meals, so the
//! change is held as a [`PendingTypeChange`] until confirmed. Only one change can
//! be pending; a newer request replaces the older one. There is no timeout.

use super::store::DayPlanStore;
use chrono::{DateTime, NaiveDate, Utc};
use macro_ledger_core::errors::{AppError, AppResult};
use macro_ledger_core::models::{DayType, PlannedDay};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A requested type change awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTypeChange {
    /// Day to change
    pub date: NaiveDate,
    /// Type at request time
    pub current: DayType,
    /// Requested type
    pub proposed: DayType,
    /// When the change was requested
    pub requested_at: DateTime<Utc>,
}

/// Confirmation state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeChangeWorkflow {
    /// Nothing awaiting confirmation
    #[default]
    Idle,
    /// A change awaits confirm or cancel
    PendingConfirmation(PendingTypeChange),
}

impl TypeChangeWorkflow {
    /// Restore from a persisted pending change
    #[must_use]
    pub fn from_pending(pending: Option<PendingTypeChange>) -> Self {
        pending.map_or(Self::Idle, Self::PendingConfirmation)
    }

    /// Pending change, if any
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingTypeChange> {
        match self {
            Self::Idle => None,
            Self::PendingConfirmation(pending) => Some(pending),
        }
    }

    /// Hold `pending`, returning the request it replaced
    pub fn request(&mut self, pending: PendingTypeChange) -> Option<PendingTypeChange> {
        match std::mem::replace(self, Self::PendingConfirmation(pending)) {
            Self::Idle => None,
            Self::PendingConfirmation(previous) => Some(previous),
        }
    }

    /// Leave the pending state, returning the change
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when nothing is pending
    pub fn take(&mut self) -> AppResult<PendingTypeChange> {
        match std::mem::take(self) {
            Self::PendingConfirmation(pending) => Ok(pending),
            Self::Idle => Err(AppError::invalid_input(
                "no day-type change is awaiting confirmation",
            )),
        }
    }
}

impl DayPlanStore {
    /// Change awaiting confirmation, if any
    #[must_use]
    pub const fn pending_type_change(&self) -> Option<&PendingTypeChange> {
        self.workflow.pending()
    }

    /// Apply the pending change and return to idle
    ///
    /// The pending change is consumed even when applying it fails, e.g. because
    /// the day has become a past day since the request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when nothing is pending, `ResourceLocked` when the
    /// day is now in the past and `ResourceNotFound` when the day is gone
    pub fn confirm_type_change(&mut self) -> AppResult<PlannedDay> {
        let pending = self.workflow.take()?;
        if let Err(e) = self.ensure_editable(pending.date) {
            warn!(date = %pending.date, "Discarding type change for a locked day");
            return Err(e);
        }
        info!(
            date = %pending.date,
            from = %pending.current,
            to = %pending.proposed,
            "Confirmed day-type change"
        );
        self.apply_type_change(pending.date, pending.proposed)
    }

    /// Discard the pending change without touching the day
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when nothing is pending
    pub fn cancel_type_change(&mut self) -> AppResult<PendingTypeChange> {
        let pending = self.workflow.take()?;
        info!(date = %pending.date, to = %pending.proposed, "Cancelled day-type change");
        Ok(pending)
    }
}
