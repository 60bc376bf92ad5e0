// ABOUTME: Energy-availability monitor: kcal per kg fat-free mass after exercise
// ABOUTME: Classifies days against the 30/25 kcal/kg FFM clinical cut-points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Energy Availability
//!
//! Energy availability (EA) is intake minus exercise expenditure, normalized
//! to fat-free mass: `EA = (intake - exercise) / FFM` in kcal per kg per day.
//! Sustained low EA is the established risk marker for relative energy
//! deficiency (Mountjoy et al., 2018, DOI: 10.1136/bjsports-2018-099193);
//! days at 30 kcal/kg or above are fine, below 25 kcal/kg is low. This
//! monitor classifies single days only and never alters targets.

use serde::{Deserialize, Serialize};

use crate::config::EnergyAvailabilityConfig;
use crate::models::targets::DayNutritionTarget;

/// Energy-availability classification for one day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EaClass {
    /// At or above the optimal threshold
    Optimal,
    /// Between the low and optimal thresholds
    Moderate,
    /// Below the low threshold - sustained days here warrant attention
    Low,
}

/// Energy availability in kcal per kg fat-free mass per day
///
/// Returns `None` when lean mass is unknown or non-positive; EA is undefined
/// without a fat-free mass estimate.
#[must_use]
pub fn energy_availability(
    intake_kcal: f64,
    exercise_kcal: f64,
    lean_mass_kg: Option<f64>,
) -> Option<f64> {
    let lean = lean_mass_kg.filter(|&kg| kg > 0.0)?;
    Some((intake_kcal - exercise_kcal) / lean)
}

/// EA for a day target, using the target's exercise expenditure
#[must_use]
pub fn day_energy_availability(
    target: &DayNutritionTarget,
    lean_mass_kg: Option<f64>,
) -> Option<f64> {
    energy_availability(target.calories, target.breakdown.exercise_kcal, lean_mass_kg)
}

/// Classify an EA value against the configured cut-points
#[must_use]
pub fn classify(ea_kcal_per_kg: f64, config: &EnergyAvailabilityConfig) -> EaClass {
    if ea_kcal_per_kg >= config.optimal_threshold {
        EaClass::Optimal
    } else if ea_kcal_per_kg >= config.moderate_threshold {
        EaClass::Moderate
    } else {
        EaClass::Low
    }
}
