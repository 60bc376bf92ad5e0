// ABOUTME: Macro allocator: coefficient-based protein/fat with carbohydrate fill
// ABOUTME: Applies workout bonus split, safety caps, and the calorie-consistency invariant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Macro Allocation
//!
//! Converts per-kilogram protein/fat coefficients over the chosen basis mass
//! into gram targets, fills the remaining calories with carbohydrate, and
//! enforces safety caps. Final calories are always recomputed from the three
//! gram values, never copied from the requested target, so the calorie-macro
//! identity holds even after caps fire.

use crate::config::MacroAllocationConfig;
use crate::intelligence::physiological_constants::energy::{
    KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};
use crate::models::targets::{macro_calories, MacroCoefficients};

/// Allocated macro gram targets with derived calories
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroTargets {
    /// Protein (g, whole grams)
    pub protein_g: f64,
    /// Carbohydrate (g, whole grams)
    pub carbs_g: f64,
    /// Fat (g, whole grams)
    pub fat_g: f64,
    /// Calories derived from the three gram values
    pub calories: f64,
}

/// Allocate macros for one day
///
/// `workout_bonus_kcal` is the day's calorie excess over the rest-day
/// baseline; 25 % of it is routed to protein and 10 % to fat before the
/// carbohydrate fill, so the remaining 65 % lands in carbohydrate implicitly.
#[must_use]
pub fn allocate_macros(
    target_calories: f64,
    basis_mass_kg: f64,
    coefficients: &MacroCoefficients,
    workout_bonus_kcal: f64,
    config: &MacroAllocationConfig,
) -> MacroTargets {
    let mut protein_g = coefficients.protein_g_per_kg * basis_mass_kg;
    let mut fat_g = coefficients.fat_g_per_kg * basis_mass_kg;

    if workout_bonus_kcal > 0.0 {
        protein_g +=
            (workout_bonus_kcal * config.bonus_protein_fraction / KCAL_PER_G_PROTEIN).round();
        fat_g += (workout_bonus_kcal * config.bonus_fat_fraction / KCAL_PER_G_FAT).round();
    }

    protein_g = protein_g.min(config.protein_cap_g);
    fat_g = fat_g.min(config.fat_cap_g);

    // Guarantee the carbohydrate fill at least (1 - ceiling) of the target.
    let protein_fat_kcal = protein_g.mul_add(KCAL_PER_G_PROTEIN, fat_g * KCAL_PER_G_FAT);
    let ceiling_kcal = target_calories * config.protein_fat_calorie_ceiling;
    if protein_fat_kcal > ceiling_kcal && protein_fat_kcal > 0.0 {
        let scale = ceiling_kcal / protein_fat_kcal;
        protein_g *= scale;
        fat_g *= scale;
    }

    let protein_g = protein_g.round();
    let fat_g = fat_g.round();
    let remaining = target_calories
        - protein_g.mul_add(KCAL_PER_G_PROTEIN, fat_g * KCAL_PER_G_FAT);
    let carbs_g = (remaining / KCAL_PER_G_CARBS).round().max(0.0);

    MacroTargets {
        protein_g,
        carbs_g,
        fat_g,
        calories: macro_calories(protein_g, carbs_g, fat_g),
    }
}
