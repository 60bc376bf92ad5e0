// ABOUTME: Configuration module aggregating every engine policy constant
// ABOUTME: EngineConfig with per-domain sections and unified validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! # Engine Configuration
//!
//! Aggregates the per-domain policy configuration ([`nutrition`]) into a
//! single [`EngineConfig`] passed through the calculation pipeline. Defaults
//! are evidence-based; hosts may deserialize a customized configuration and
//! must call [`EngineConfig::validate`] before use.

/// Nutrition policy constants (REE formula, rates, caps, timing, partitions)
pub mod nutrition;

pub use nutrition::{
    ActivityFactorsConfig, CoefficientPair, EnergyAvailabilityConfig, GoalRateConfig,
    MacroAllocationConfig, MacroSeedConfig, MealDistributionConfig, OverrideConfig,
    ProjectionConfig, RateTiers, ReeConfig, SlotFloors, TdeeConfig, TimingMultipliers,
    ZoneCalorieConfig,
};

use crate::errors::EngineResult;
use serde::{Deserialize, Serialize};

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// REE formula coefficients
    pub ree: ReeConfig,
    /// Activity factor multipliers for NEAT
    pub activity_factors: ActivityFactorsConfig,
    /// TDEE component settings
    pub tdee: TdeeConfig,
    /// Default zone calorie table derivation
    pub zones: ZoneCalorieConfig,
    /// Weekly rate presets and energy density
    pub goal_rates: GoalRateConfig,
    /// Goal-type macro coefficient presets and FFM auto-basis thresholds
    pub macro_seed: MacroSeedConfig,
    /// Macro allocation caps and workout bonus split
    pub macro_allocation: MacroAllocationConfig,
    /// Meal-slot distribution weights, multipliers, and floors
    pub meal_distribution: MealDistributionConfig,
    /// Override reconciliation tolerances
    pub overrides: OverrideConfig,
    /// Body-composition projection partitions and feasibility thresholds
    pub projection: ProjectionConfig,
    /// Energy availability classification cut-points
    pub energy_availability: EnergyAvailabilityConfig,
}

impl EngineConfig {
    /// Validate every configuration section
    ///
    /// # Errors
    ///
    /// Returns the first `CONFIG_INVALID` error encountered.
    pub fn validate(&self) -> EngineResult<()> {
        self.zones.validate()?;
        self.macro_allocation.validate()?;
        self.meal_distribution.validate()?;
        self.projection.validate()?;
        self.energy_availability.validate()?;
        Ok(())
    }
}
