// ABOUTME: Metabolic estimator: REE, NEAT, TEF, and workout energy cost
// ABOUTME: Zone calorie resolver seam with measured and mass-derived implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Metabolic Estimation
//!
//! Computes resting energy expenditure (measured value when authoritative,
//! otherwise the Mifflin-St Jeor equation) and builds the per-day TDEE
//! breakdown: REE + NEAT + TEF on rest days, plus zone-based workout energy
//! on training days.
//!
//! # Reference
//!
//! Mifflin, M.D., et al. (1990). A new predictive equation for resting energy
//! expenditure. DOI: 10.1093/ajcn/51.2.241

use crate::config::{ActivityFactorsConfig, EngineConfig, ReeConfig, ZoneCalorieConfig};
use crate::errors::EngineResult;
use crate::models::body::{BodyMetrics, Sex};
use crate::models::schedule::{
    ActivityLevel, DaySchedule, WorkoutEffort, WorkoutIntensity, WorkoutSpec, WorkoutType, Zone,
};
use crate::models::targets::TdeeBreakdown;

/// Source of a client's calories-per-minute table, indexed by zone 1-5
///
/// Capability-substitution seam: lab-measured tables take precedence over the
/// mass-derived default, selected once at resolver construction rather than
/// by scattered conditionals.
pub trait ZoneCalorieResolver {
    /// Five-entry kcal-per-minute table for zones 1-5
    fn kcal_per_minute_table(&self) -> [f64; 5];
}

/// Profile-level measured calorie table (e.g. from metabolic cart testing)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredZoneTable(pub [f64; 5]);

impl ZoneCalorieResolver for MeasuredZoneTable {
    fn kcal_per_minute_table(&self) -> [f64; 5] {
        self.0
    }
}

/// Default table estimated from body mass
#[derive(Debug, Clone)]
pub struct MassDerivedZoneTable {
    mass_kg: f64,
    per_kg: [f64; 5],
}

impl MassDerivedZoneTable {
    /// Build the default table for a client of the given mass
    #[must_use]
    pub fn new(mass_kg: f64, config: &ZoneCalorieConfig) -> Self {
        Self {
            mass_kg,
            per_kg: config.default_kcal_per_kg_min,
        }
    }
}

impl ZoneCalorieResolver for MassDerivedZoneTable {
    fn kcal_per_minute_table(&self) -> [f64; 5] {
        self.per_kg.map(|factor| factor * self.mass_kg)
    }
}

/// Select the zone calorie resolver for a client: measured when present,
/// otherwise derived from body mass
#[must_use]
pub fn resolve_zone_table(
    measured: Option<MeasuredZoneTable>,
    mass_kg: f64,
    config: &ZoneCalorieConfig,
) -> [f64; 5] {
    measured.map_or_else(
        || MassDerivedZoneTable::new(mass_kg, config).kcal_per_minute_table(),
        |table| table.kcal_per_minute_table(),
    )
}

/// Calculate resting energy expenditure (kcal/day)
///
/// Uses a measured REE when one is supplied and marked authoritative;
/// otherwise the Mifflin-St Jeor equation over mass, height, and age.
///
/// # Errors
///
/// Returns `INSUFFICIENT_INPUT` when sex, age, height, or mass are missing
/// and no authoritative measurement exists.
pub fn calculate_ree(metrics: &BodyMetrics, config: &ReeConfig) -> EngineResult<f64> {
    if let Some(measured) = metrics.measured_ree {
        if measured.authoritative {
            metrics.validate()?;
            return Ok(measured.kcal_per_day.max(config.minimum_kcal_per_day));
        }
    }

    let required = metrics.required()?;
    let sex_constant = match required.sex {
        Sex::Male => config.male_constant,
        Sex::Female => config.female_constant,
    };
    let ree = config.weight_coef.mul_add(
        required.mass_kg,
        config.height_coef.mul_add(
            required.height_cm,
            config.age_coef.mul_add(f64::from(required.age_years), sex_constant),
        ),
    );
    Ok(ree.max(config.minimum_kcal_per_day))
}

/// Activity factor for a non-exercise activity level
#[must_use]
pub const fn activity_factor(level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    match level {
        ActivityLevel::Sedentary => config.sedentary,
        ActivityLevel::LightlyActive => config.lightly_active,
        ActivityLevel::ModeratelyActive => config.moderately_active,
        ActivityLevel::VeryActive => config.very_active,
    }
}

/// Typical zone for a workout type at a subjective intensity
///
/// Fallback used when the coach recorded no explicit zone.
#[must_use]
pub const fn typical_zone(workout_type: WorkoutType, intensity: WorkoutIntensity) -> Zone {
    match (workout_type, intensity) {
        (WorkoutType::Mobility, _) | (_, WorkoutIntensity::Low) => Zone::Z1,
        (WorkoutType::Strength, WorkoutIntensity::Moderate) => Zone::Z2,
        (WorkoutType::Strength, WorkoutIntensity::High)
        | (WorkoutType::Endurance | WorkoutType::Sport, WorkoutIntensity::Moderate) => Zone::Z3,
        (WorkoutType::Endurance | WorkoutType::Sport, WorkoutIntensity::High)
        | (WorkoutType::Interval, WorkoutIntensity::Moderate) => Zone::Z4,
        (WorkoutType::Interval, WorkoutIntensity::High) => Zone::Z5,
    }
}

/// Energy cost of one workout (kcal) from a resolved zone table
#[must_use]
pub fn workout_energy_kcal(workout: &WorkoutSpec, table: &[f64; 5]) -> f64 {
    let zone = match workout.effort {
        WorkoutEffort::Zone(zone) => zone,
        WorkoutEffort::Intensity(intensity) => typical_zone(workout.workout_type, intensity),
    };
    table[zone.index()] * f64::from(workout.duration_min)
}

/// Build the full TDEE breakdown for one day of the schedule
///
/// Rest-day TDEE = REE + NEAT + TEF, where NEAT = REE x (factor - 1) and
/// TEF = REE x `tef_fraction`. Workout days add the summed zone-based energy
/// of every enabled workout.
///
/// # Errors
///
/// Propagates `INSUFFICIENT_INPUT` from REE calculation; nothing else in the
/// pipeline runs for this client when that fails.
pub fn estimate_day_expenditure(
    metrics: &BodyMetrics,
    activity_level: ActivityLevel,
    day: &DaySchedule,
    measured_zone_table: Option<MeasuredZoneTable>,
    config: &EngineConfig,
) -> EngineResult<TdeeBreakdown> {
    let ree = calculate_ree(metrics, &config.ree)?;
    let required = metrics.required()?;
    let factor = activity_factor(activity_level, &config.activity_factors);
    let neat = ree * (factor - 1.0);
    let tef = ree * config.tdee.tef_fraction;

    let table = resolve_zone_table(measured_zone_table, required.mass_kg, &config.zones);
    let exercise_kcal = day
        .enabled_workouts()
        .map(|workout| workout_energy_kcal(workout, &table))
        .sum();

    Ok(TdeeBreakdown {
        ree,
        neat,
        tef,
        exercise_kcal,
    })
}
