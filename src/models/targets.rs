// ABOUTME: Target models: macro coefficients, day targets, meal slots, and overrides
// ABOUTME: Core output contracts consumed by meal generation, persistence, and reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

use crate::config::MacroSeedConfig;
use crate::errors::{EngineError, EngineResult};
use crate::intelligence::physiological_constants::energy::{
    KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};
use crate::models::body::{BodyMetrics, Sex};
use crate::models::goals::GoalType;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Mass basis for coefficient-driven macro targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MacroBasis {
    /// Grams per kilogram of total body mass
    TotalMass,
    /// Grams per kilogram of fat-free (lean) mass
    FatFreeMass,
}

/// Per-kilogram macro coefficients owned by a planning phase
///
/// Seeded from goal-type presets (with an automatic fat-free-mass basis at
/// high body-fat percentages), then freely editable by the coach.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MacroCoefficients {
    /// Which mass the coefficients multiply
    pub basis: MacroBasis,
    /// Protein grams per kilogram of basis mass
    pub protein_g_per_kg: f64,
    /// Fat grams per kilogram of basis mass
    pub fat_g_per_kg: f64,
}

impl MacroCoefficients {
    /// Seed coefficients for a goal, auto-selecting the fat-free-mass basis
    /// when body fat exceeds the sex-specific threshold (male > 25 %,
    /// female > 35 %).
    #[must_use]
    pub fn seed_for_goal(
        goal_type: GoalType,
        metrics: &BodyMetrics,
        config: &MacroSeedConfig,
    ) -> Self {
        let pair = config.pair_for_goal(goal_type);
        let basis = match (metrics.sex, metrics.body_fat_pct) {
            (Some(Sex::Male), Some(bf)) if bf > config.ffm_basis_bf_threshold_male => {
                MacroBasis::FatFreeMass
            }
            (Some(Sex::Female), Some(bf)) if bf > config.ffm_basis_bf_threshold_female => {
                MacroBasis::FatFreeMass
            }
            _ => MacroBasis::TotalMass,
        };
        Self {
            basis,
            protein_g_per_kg: pair.protein_g_per_kg,
            fat_g_per_kg: pair.fat_g_per_kg,
        }
    }

    /// Resolve the basis mass in kilograms for these coefficients
    ///
    /// # Errors
    ///
    /// Returns `INSUFFICIENT_INPUT` when the basis is fat-free mass but body
    /// fat percentage (or mass) is unknown.
    pub fn basis_mass_kg(&self, metrics: &BodyMetrics) -> EngineResult<f64> {
        match self.basis {
            MacroBasis::TotalMass => metrics
                .mass_kg
                .ok_or_else(|| EngineError::insufficient_input("body mass")),
            MacroBasis::FatFreeMass => metrics
                .lean_mass_kg()
                .ok_or_else(|| EngineError::insufficient_input("body fat percentage")),
        }
    }

    /// Validate coefficient ranges
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive or implausibly large coefficients.
    pub fn validate(&self) -> EngineResult<()> {
        if !(0.5..=4.0).contains(&self.protein_g_per_kg) {
            return Err(EngineError::out_of_range(
                "protein coefficient must be between 0.5 and 4.0 g/kg",
            ));
        }
        if !(0.3..=2.5).contains(&self.fat_g_per_kg) {
            return Err(EngineError::out_of_range(
                "fat coefficient must be between 0.3 and 2.5 g/kg",
            ));
        }
        Ok(())
    }
}

/// TDEE breakdown: where the day's energy expenditure comes from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TdeeBreakdown {
    /// Resting energy expenditure (kcal/day)
    pub ree: f64,
    /// Non-exercise activity thermogenesis (kcal/day)
    pub neat: f64,
    /// Thermic effect of food (kcal/day)
    pub tef: f64,
    /// Workout energy cost for this specific day (kcal)
    pub exercise_kcal: f64,
}

impl TdeeBreakdown {
    /// Total daily energy expenditure
    #[must_use]
    pub fn total(&self) -> f64 {
        self.ree + self.neat + self.tef + self.exercise_kcal
    }
}

/// Calories implied by a macro gram triple (protein 4, carbs 4, fat 9 kcal/g)
#[must_use]
pub fn macro_calories(protein_g: f64, carbs_g: f64, fat_g: f64) -> f64 {
    fat_g.mul_add(
        KCAL_PER_G_FAT,
        protein_g.mul_add(KCAL_PER_G_PROTEIN, carbs_g * KCAL_PER_G_CARBS),
    )
}

/// Final per-day nutrition target
///
/// `calories` is always derived from the three macro gram fields; it is never
/// an independent source of truth once macros exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayNutritionTarget {
    /// Day of week
    pub day: Weekday,
    /// Whether this is a workout day
    pub workout_day: bool,
    /// Energy expenditure breakdown
    pub breakdown: TdeeBreakdown,
    /// Target calories, equal to `protein*4 + carbs*4 + fat*9`
    pub calories: f64,
    /// Protein target (grams)
    pub protein_g: f64,
    /// Carbohydrate target (grams)
    pub carbs_g: f64,
    /// Fat target (grams)
    pub fat_g: f64,
    /// Energy availability (kcal per kg fat-free mass), when lean mass is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_availability: Option<f64>,
}

impl DayNutritionTarget {
    /// Calories implied by the stored macro grams
    #[must_use]
    pub fn derived_calories(&self) -> f64 {
        macro_calories(self.protein_g, self.carbs_g, self.fat_g)
    }

    /// Whether the calorie-macro identity holds within the given tolerance
    #[must_use]
    pub fn satisfies_identity(&self, tolerance_kcal: f64) -> bool {
        (self.calories - self.derived_calories()).abs() <= tolerance_kcal
    }
}

/// Meal or snack slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    /// Full meal
    Meal,
    /// Small snack
    Snack,
}

/// Slot position relative to the day's workout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutRelation {
    /// Not adjacent to a workout
    None,
    /// Last slot strictly before the workout
    PreWorkout,
    /// First slot at or after the workout
    PostWorkout,
}

/// Per-slot macro allocation within a day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealSlotTarget {
    /// Display label ("Meal 2", "Snack 1", ...)
    pub label: String,
    /// Meal or snack
    pub slot_type: SlotType,
    /// Scheduled clock time
    pub time: NaiveTime,
    /// Slot calories, derived from the slot's macro grams
    pub calories: f64,
    /// Protein (grams)
    pub protein_g: f64,
    /// Carbohydrate (grams)
    pub carbs_g: f64,
    /// Fat (grams)
    pub fat_g: f64,
    /// Position relative to the workout window
    pub workout_relation: WorkoutRelation,
    /// Human-readable rationale for display only
    pub rationale: String,
}

/// Coach-entered numeric override for one day
///
/// Partial by design: any subset of fields may be present. Only a full,
/// internally consistent override survives reconciliation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DayOverride {
    /// Overridden calories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Overridden protein (grams)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Overridden carbohydrate (grams)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    /// Overridden fat (grams)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
}

impl DayOverride {
    /// No fields set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein_g.is_none()
            && self.carbs_g.is_none()
            && self.fat_g.is_none()
    }

    /// All four fields set
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.calories.is_some()
            && self.protein_g.is_some()
            && self.carbs_g.is_some()
            && self.fat_g.is_some()
    }
}

/// Numeric overrides for a full week, Monday first
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WeekOverrides {
    /// One (possibly empty) override per day of week
    pub days: [DayOverride; 7],
}

impl WeekOverrides {
    /// Override for a given day of week
    #[must_use]
    pub fn get(&self, day: Weekday) -> &DayOverride {
        &self.days[day.num_days_from_monday() as usize]
    }

    /// Mutable override for a given day of week
    pub fn get_mut(&mut self, day: Weekday) -> &mut DayOverride {
        &mut self.days[day.num_days_from_monday() as usize]
    }

    /// Whether every day is free of numeric overrides
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(DayOverride::is_empty)
    }
}
