// ABOUTME: MacroSet value type and the per-day-type budget bundle
// ABOUTME: Integer calories/protein/carbs/fat with sum, subtract and scale helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use super::day::DayType;
use crate::constants::energy::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

/// One of the four tracked quantities of a [`MacroSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroField {
    /// Energy in kcal
    Calories,
    /// Protein in grams
    Protein,
    /// Carbohydrates in grams
    Carbs,
    /// Fat in grams
    Fat,
}

impl MacroField {
    /// All fields in display order
    pub const ALL: [Self; 4] = [Self::Calories, Self::Protein, Self::Carbs, Self::Fat];
}

/// Calories and macronutrients in whole units
///
/// Unsigned fields make negative allocations unrepresentable. Planned sets carry
/// no cross-field invariant: calories need not equal 4p + 4c + 9f.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacroSet {
    /// Energy (kcal)
    #[serde(alias = "kcal")]
    pub calories: u32,
    /// Protein (g)
    pub protein: u32,
    /// Carbohydrates (g)
    pub carbs: u32,
    /// Fat (g)
    pub fat: u32,
}

impl MacroSet {
    /// Create a macro set
    #[must_use]
    pub const fn new(calories: u32, protein: u32, carbs: u32, fat: u32) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// All-zero set
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Build a set from grams, deriving calories as 4p + 4c + 9f (rounded)
    #[must_use]
    pub fn from_macros(protein: u32, carbs: u32, fat: u32) -> Self {
        let kcal = f64::from(fat).mul_add(
            KCAL_PER_GRAM_FAT,
            f64::from(protein)
                .mul_add(KCAL_PER_GRAM_PROTEIN, f64::from(carbs) * KCAL_PER_GRAM_CARBS),
        );
        Self::new(round_to_u32(kcal), protein, carbs, fat)
    }

    /// True when every field is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.calories == 0 && self.protein == 0 && self.carbs == 0 && self.fat == 0
    }

    /// Read one field
    #[must_use]
    pub const fn get(&self, field: MacroField) -> u32 {
        match field {
            MacroField::Calories => self.calories,
            MacroField::Protein => self.protein,
            MacroField::Carbs => self.carbs,
            MacroField::Fat => self.fat,
        }
    }

    /// Overwrite one field
    pub fn set(&mut self, field: MacroField, value: u32) {
        match field {
            MacroField::Calories => self.calories = value,
            MacroField::Protein => self.protein = value,
            MacroField::Carbs => self.carbs = value,
            MacroField::Fat => self.fat = value,
        }
    }

    /// Per-field `max(0, self - other)`
    #[must_use]
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self::new(
            self.calories.saturating_sub(other.calories),
            self.protein.saturating_sub(other.protein),
            self.carbs.saturating_sub(other.carbs),
            self.fat.saturating_sub(other.fat),
        )
    }

    /// Multiply every field by `factor`, rounding to the nearest unit
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(
            round_to_u32(f64::from(self.calories) * factor),
            round_to_u32(f64::from(self.protein) * factor),
            round_to_u32(f64::from(self.carbs) * factor),
            round_to_u32(f64::from(self.fat) * factor),
        )
    }
}

impl Add for MacroSet {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.calories.saturating_add(rhs.calories),
            self.protein.saturating_add(rhs.protein),
            self.carbs.saturating_add(rhs.carbs),
            self.fat.saturating_add(rhs.fat),
        )
    }
}

impl Sum for MacroSet {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Self> for MacroSet {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Round a non-negative quantity to the nearest whole unit, flooring negatives at zero
#[must_use]
pub fn round_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.round() as u32
    }
}

/// The three live budgets, one per day type, plus the onboarding BMR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBudgets {
    /// Basal metabolic rate captured during onboarding (informational)
    #[serde(default)]
    pub bmr: u32,
    /// Budget for training days
    pub training: MacroSet,
    /// Budget for rest days
    pub rest: MacroSet,
    /// Budget for fasting days (all zeros unless the user sets one)
    #[serde(default)]
    pub fasting: MacroSet,
}

impl MacroBudgets {
    /// Create budgets with an all-zero fasting day
    #[must_use]
    pub const fn new(bmr: u32, training: MacroSet, rest: MacroSet) -> Self {
        Self {
            bmr,
            training,
            rest,
            fasting: MacroSet::zero(),
        }
    }

    /// Budget that applies to a day type
    #[must_use]
    pub const fn for_type(&self, day_type: DayType) -> MacroSet {
        match day_type {
            DayType::Training => self.training,
            DayType::Rest => self.rest,
            DayType::Fasting => self.fasting,
        }
    }

    /// Validate the budgets the way onboarding does
    ///
    /// Training and rest budgets need positive calories, protein and fat; carbs may
    /// be zero. The fasting budget is free-form.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending budget
    pub fn validate(&self) -> AppResult<()> {
        for (label, budget) in [("training", &self.training), ("rest", &self.rest)] {
            if budget.calories == 0 || budget.protein == 0 || budget.fat == 0 {
                return Err(AppError::invalid_input(format!(
                    "{label} budget needs positive calories, protein and fat"
                ))
                .with_details(serde_json::json!({ "budget": label })));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rounds_each_field() {
        let budget = MacroSet::new(2000, 150, 205, 71);

        assert_eq!(budget.scale(0.5), MacroSet::new(1000, 75, 103, 36));
        assert_eq!(budget.scale(1.0), budget);
        assert_eq!(budget.scale(0.0), MacroSet::default());
    }

    #[test]
    fn test_saturating_sub_never_negative() {
        let planned = MacroSet::new(2000, 150, 200, 70);
        let consumed = MacroSet::new(2500, 100, 250, 70);
        assert_eq!(planned.saturating_sub(&consumed), MacroSet::new(0, 50, 0, 0));
    }

    #[test]
    fn test_from_macros_derives_calories() {
        // 30*4 + 40*4 + 10*9 = 370
        assert_eq!(MacroSet::from_macros(30, 40, 10).calories, 370);
    }

    #[test]
    fn test_sum_of_sets() {
        let total: MacroSet = [MacroSet::new(1, 2, 3, 4), MacroSet::new(10, 20, 30, 40)]
            .iter()
            .sum();
        assert_eq!(total, MacroSet::new(11, 22, 33, 44));
    }

    #[test]
    fn test_kcal_alias_accepted() {
        let set: MacroSet =
            serde_json::from_str(r#"{"kcal":2500,"protein":180,"carbs":250,"fat":80}"#).unwrap();
        assert_eq!(set.calories, 2500);
    }

    #[test]
    fn test_budget_validation_allows_zero_carbs() {
        let budgets = MacroBudgets::new(
            1800,
            MacroSet::new(2500, 180, 0, 80),
            MacroSet::new(2000, 160, 100, 70),
        );
        assert!(budgets.validate().is_ok());
        let broken = MacroBudgets::new(1800, MacroSet::zero(), MacroSet::new(2000, 160, 100, 70));
        assert!(broken.validate().is_err());
    }
}
