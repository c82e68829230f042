// ABOUTME: Meal-plan slot tables used to divide a day budget into meals
// ABOUTME: Per-day-type slot timing, share percentages, clamping bands and residual slots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Meal-Plan Configuration
//!
//! Each day type owns a [`DayTemplate`]: an ordered list of slots. A slot takes a
//! percentage share of every budget field, clamped to an optional band, or the
//! residual of a field once every other slot has been allocated.
//!
//! Default tables:
//!
//! - Training: five slots around the session (breakfast, lunch, pre-workout at
//!   T-60, post-workout at T+30, dinner at T+120); dinner carbs take the residual
//! - Rest: four fixed slots; dinner protein and fat take the residual
//! - Fasting: one break-fast slot with the whole budget

use super::error::ConfigError;
use chrono::NaiveTime;
use macro_ledger_core::models::{time_format, DayType, MacroField, MealKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

/// Environment variable pointing at a JSON file that replaces the default tables
pub const MEAL_PLAN_FILE_ENV: &str = "MACRO_LEDGER_MEAL_PLAN_FILE";

/// How one budget field is allocated to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Allocation {
    /// `round(total * pct / 100)`, then clamped to `[min, max]`
    Share {
        /// Percentage of the day total (0-100)
        pct: u8,
        /// Lower clamp
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
        /// Upper clamp
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
    /// `max(0, total - sum of every other slot)`
    Residual,
}

impl Allocation {
    /// Unclamped share
    #[must_use]
    pub const fn share(pct: u8) -> Self {
        Self::Share {
            pct,
            min: None,
            max: None,
        }
    }

    /// Share clamped to `[min, max]`
    #[must_use]
    pub const fn between(pct: u8, min: u32, max: u32) -> Self {
        Self::Share {
            pct,
            min: Some(min),
            max: Some(max),
        }
    }

    /// Share with a floor
    #[must_use]
    pub const fn at_least(pct: u8, min: u32) -> Self {
        Self::Share {
            pct,
            min: Some(min),
            max: None,
        }
    }

    /// Share with a ceiling
    #[must_use]
    pub const fn at_most(pct: u8, max: u32) -> Self {
        Self::Share {
            pct,
            min: None,
            max: Some(max),
        }
    }

    fn validate(&self, slot: &str) -> Result<(), ConfigError> {
        if let Self::Share { pct, min, max } = *self {
            if pct > 100 {
                return Err(ConfigError::InvalidRange(format!(
                    "slot '{slot}' share {pct}% exceeds 100%"
                )));
            }
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(ConfigError::InvalidRange(format!(
                        "slot '{slot}' band [{min}, {max}] is inverted"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// When a slot takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "anchor", rename_all = "snake_case")]
pub enum SlotTiming {
    /// Fixed clock time
    Fixed {
        /// Time of day
        #[serde(with = "time_format")]
        at: NaiveTime,
    },
    /// Offset in minutes from the training time, wrapping around midnight
    Training {
        /// Signed offset in minutes
        offset_minutes: i64,
    },
}

/// One meal slot of a day template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTemplate {
    /// Stable slot id (e.g. `pre-workout`)
    pub id: String,
    /// Default display name
    pub name: String,
    /// Role of the meal
    pub kind: MealKind,
    /// When the meal happens
    pub timing: SlotTiming,
    /// Calorie allocation
    pub calories: Allocation,
    /// Protein allocation
    pub protein: Allocation,
    /// Carbohydrate allocation
    pub carbs: Allocation,
    /// Fat allocation
    pub fat: Allocation,
}

impl SlotTemplate {
    /// Allocation rule for one field
    #[must_use]
    pub const fn allocation(&self, field: MacroField) -> Allocation {
        match field {
            MacroField::Calories => self.calories,
            MacroField::Protein => self.protein,
            MacroField::Carbs => self.carbs,
            MacroField::Fat => self.fat,
        }
    }
}

/// Ordered slot list for one day type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTemplate {
    /// Slots in eating order; the first and last bound the eating window
    pub slots: Vec<SlotTemplate>,
}

impl DayTemplate {
    /// True when any slot is anchored to the training time
    #[must_use]
    pub fn requires_training_time(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| matches!(slot.timing, SlotTiming::Training { .. }))
    }

    fn validate(&self, label: &str) -> Result<(), ConfigError> {
        if self.slots.is_empty() {
            return Err(ConfigError::InvalidRange(format!(
                "{label} template has no slots"
            )));
        }
        let mut seen = HashSet::new();
        for slot in &self.slots {
            if !seen.insert(slot.id.as_str()) {
                return Err(ConfigError::DuplicateSlot(format!("{label}/{}", slot.id)));
            }
            for field in MacroField::ALL {
                slot.allocation(field).validate(&slot.id)?;
            }
        }
        for field in MacroField::ALL {
            let residuals = self
                .slots
                .iter()
                .filter(|slot| slot.allocation(field) == Allocation::Residual)
                .count();
            if residuals > 1 {
                return Err(ConfigError::InvalidRange(format!(
                    "{label} template has {residuals} residual slots for {field:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Slot tables for every day type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanConfig {
    /// Training-day slots
    pub training: DayTemplate,
    /// Rest-day slots
    pub rest: DayTemplate,
    /// Fasting-day slots
    pub fasting: DayTemplate,
}

fn fixed(hour: u32, minute: u32) -> SlotTiming {
    SlotTiming::Fixed {
        at: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
    }
}

fn slot(
    id: &str,
    name: &str,
    kind: MealKind,
    timing: SlotTiming,
    [calories, protein, carbs, fat]: [Allocation; 4],
) -> SlotTemplate {
    SlotTemplate {
        id: id.to_owned(),
        name: name.to_owned(),
        kind,
        timing,
        calories,
        protein,
        carbs,
        fat,
    }
}

impl Default for MealPlanConfig {
    fn default() -> Self {
        use Allocation as A;
        let training = DayTemplate {
            slots: vec![
                slot(
                    "breakfast",
                    "Breakfast",
                    MealKind::Regular,
                    fixed(8, 0),
                    [
                        A::share(20),
                        A::between(25, 30, 35),
                        A::between(25, 45, 60),
                        A::at_most(15, 10),
                    ],
                ),
                slot(
                    "lunch",
                    "Lunch",
                    MealKind::PreLong,
                    fixed(12, 30),
                    [
                        A::share(30),
                        A::between(30, 35, 40),
                        A::between(35, 70, 90),
                        A::at_most(20, 12),
                    ],
                ),
                slot(
                    "pre-workout",
                    "Pre-Workout",
                    MealKind::PreShort,
                    SlotTiming::Training { offset_minutes: -60 },
                    [
                        A::share(15),
                        A::between(20, 20, 25),
                        A::between(20, 25, 35),
                        A::at_most(5, 5),
                    ],
                ),
                slot(
                    "post-workout",
                    "Post-Workout",
                    MealKind::Post,
                    SlotTiming::Training { offset_minutes: 30 },
                    [
                        A::share(15),
                        A::between(20, 20, 30),
                        A::between(20, 25, 35),
                        A::at_most(5, 5),
                    ],
                ),
                slot(
                    "dinner",
                    "Dinner",
                    MealKind::Recovery,
                    SlotTiming::Training { offset_minutes: 120 },
                    [A::share(20), A::at_least(5, 40), A::Residual, A::at_least(60, 10)],
                ),
            ],
        };
        let rest = DayTemplate {
            slots: vec![
                slot(
                    "breakfast",
                    "Breakfast",
                    MealKind::Regular,
                    fixed(9, 0),
                    [
                        A::share(25),
                        A::at_least(30, 30),
                        A::between(20, 5, 10),
                        A::between(25, 10, 15),
                    ],
                ),
                slot(
                    "lunch",
                    "Lunch",
                    MealKind::Regular,
                    fixed(13, 0),
                    [A::share(35), A::share(35), A::between(40, 10, 20), A::share(35)],
                ),
                slot(
                    "afternoon",
                    "Afternoon Snack",
                    MealKind::Regular,
                    fixed(16, 30),
                    [A::share(15), A::share(20), A::at_least(20, 5), A::share(20)],
                ),
                slot(
                    "dinner",
                    "Dinner",
                    MealKind::Regular,
                    fixed(19, 30),
                    [A::share(25), A::Residual, A::between(20, 10, 15), A::Residual],
                ),
            ],
        };
        let fasting = DayTemplate {
            slots: vec![slot(
                "break-fast",
                "Break Fast",
                MealKind::BreakFast,
                fixed(16, 0),
                [A::share(100); 4],
            )],
        };
        Self {
            training,
            rest,
            fasting,
        }
    }
}

static MEAL_PLAN_CONFIG: OnceLock<MealPlanConfig> = OnceLock::new();

impl MealPlanConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        MEAL_PLAN_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                tracing::warn!("Failed to load meal plan config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load the tables, honoring `MACRO_LEDGER_MEAL_PLAN_FILE` when set
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the file cannot be read or decoded, or a
    /// validation error if the tables are inconsistent
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var(MEAL_PLAN_FILE_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read tables from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the file cannot be read or decoded
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))
    }

    /// Template for a day type
    #[must_use]
    pub const fn template(&self, day_type: DayType) -> &DayTemplate {
        match day_type {
            DayType::Training => &self.training,
            DayType::Rest => &self.rest,
            DayType::Fasting => &self.fasting,
        }
    }

    /// Validate every template
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` for shares above 100%, inverted bands,
    /// empty templates or more than one residual slot per field, and
    /// `ConfigError::DuplicateSlot` when a template reuses a slot id
    pub fn validate(&self) -> Result<(), ConfigError> {
        for day_type in DayType::ALL {
            self.template(day_type).validate(day_type.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_valid() {
        assert!(MealPlanConfig::default().validate().is_ok());
    }

    #[test]
    fn test_only_training_needs_training_time() {
        let config = MealPlanConfig::default();
        assert!(config.training.requires_training_time());
        assert!(!config.rest.requires_training_time());
        assert!(!config.fasting.requires_training_time());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut config = MealPlanConfig::default();
        config.rest.slots[0].carbs = Allocation::between(20, 15, 5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let mut config = MealPlanConfig::default();
        config.rest.slots[1].id = "breakfast".to_owned();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateSlot(_))
        ));
    }

    #[test]
    fn test_tables_round_trip_through_json() {
        let config = MealPlanConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: MealPlanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
