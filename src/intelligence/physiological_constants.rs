// ABOUTME: Physiological constants used throughout the calculation engine
// ABOUTME: Macronutrient energy densities and hard invariant tolerances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Physiological constants based on sports nutrition research
//!
//! Unlike the policy values in [`crate::config`], these are physical
//! constants with no sensible deployment-specific variation.

/// Macronutrient energy densities (Atwater factors)
pub mod energy {
    /// Energy per gram of protein (kcal/g)
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;

    /// Energy per gram of carbohydrate (kcal/g)
    pub const KCAL_PER_G_CARBS: f64 = 4.0;

    /// Energy per gram of fat (kcal/g)
    pub const KCAL_PER_G_FAT: f64 = 9.0;
}

/// Tolerances for the engine's hard numeric invariants
pub mod tolerance {
    /// Calorie identity tolerance after integer-gram rounding (kcal)
    ///
    /// `protein*4 + carbs*4 + fat*9` of rounded grams must equal stored
    /// calories within this bound for every day and slot target.
    pub const CALORIE_IDENTITY_KCAL: f64 = 1.0;
}
