// ABOUTME: Policy-constant configuration for the nutrition target engine
// ABOUTME: REE formula, activity factors, goal rates, macro caps, meal timing, projection partitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Nutrition Policy Configuration
//!
//! Every heuristic constant the engine applies - formula coefficients, rate
//! presets, safety caps, timing multipliers, partition ratios - lives here as
//! a configurable value with a documented default, rather than as a literal
//! buried in an algorithm. Deployments confirm these with their own domain
//! stakeholders before shipping changed values.
//!
//! # Scientific References
//!
//! - REE: Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2).
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//! - Nutrient timing: Kerksick, C.M., et al. (2017). ISSN position stand.
//!   <https://doi.org/10.1186/s12970-017-0189-4>

use crate::errors::{EngineError, EngineResult};
use crate::models::goals::GoalType;
use serde::{Deserialize, Serialize};

/// REE (resting energy expenditure) calculation configuration
///
/// Coefficients of the Mifflin-St Jeor equation (1990).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReeConfig {
    /// Weight coefficient (10.0)
    pub weight_coef: f64,
    /// Height coefficient (6.25)
    pub height_coef: f64,
    /// Age coefficient (-5.0)
    pub age_coef: f64,
    /// Male constant (+5)
    pub male_constant: f64,
    /// Female constant (-161)
    pub female_constant: f64,
    /// Sanity floor for any REE estimate (kcal/day): 1000
    pub minimum_kcal_per_day: f64,
}

impl Default for ReeConfig {
    fn default() -> Self {
        Self {
            weight_coef: 10.0,
            height_coef: 6.25,
            age_coef: -5.0,
            male_constant: 5.0,
            female_constant: -161.0,
            minimum_kcal_per_day: 1000.0,
        }
    }
}

/// Activity factor multipliers for NEAT estimation
///
/// NEAT = REE x (factor - 1); exercise energy is added separately per
/// workout, so these multipliers cover non-exercise movement only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Lightly active: 1.375
    pub lightly_active: f64,
    /// Moderately active: 1.55
    pub moderately_active: f64,
    /// Very active: 1.725
    pub very_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
        }
    }
}

/// TDEE component configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TdeeConfig {
    /// Thermic effect of food as a fraction of REE: 0.10
    pub tef_fraction: f64,
}

impl Default for TdeeConfig {
    fn default() -> Self {
        Self { tef_fraction: 0.10 }
    }
}

/// Default zone calorie table derivation from body mass
///
/// When no measured per-zone table exists for the client, zone `z` burns
/// `mass_kg x default_kcal_per_kg_min[z]` kcal per minute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneCalorieConfig {
    /// kcal per kg of body mass per minute, zones 1-5 (strictly increasing)
    pub default_kcal_per_kg_min: [f64; 5],
}

impl Default for ZoneCalorieConfig {
    fn default() -> Self {
        Self {
            default_kcal_per_kg_min: [0.06, 0.09, 0.12, 0.15, 0.18],
        }
    }
}

impl ZoneCalorieConfig {
    /// Validate that the default table is positive and strictly increasing
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` otherwise.
    pub fn validate(&self) -> EngineResult<()> {
        for window in self.default_kcal_per_kg_min.windows(2) {
            if window[0] <= 0.0 || window[1] <= window[0] {
                return Err(EngineError::config(
                    "zone kcal/kg/min table must be positive and strictly increasing",
                ));
            }
        }
        Ok(())
    }
}

/// Weekly rate presets per tier, as percent of body mass per week
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateTiers {
    /// Conservative tier
    pub conservative: f64,
    /// Moderate tier
    pub moderate: f64,
    /// Aggressive tier
    pub aggressive: f64,
}

/// Goal calorie adjustment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalRateConfig {
    /// Fat-loss weekly rates (% body mass, applied as deficit): 0.5/0.75/1.0
    pub fat_loss: RateTiers,
    /// Muscle-gain weekly rates (% body mass, applied as surplus): 0.125/0.25/0.375
    pub muscle_gain: RateTiers,
    /// Recomposition deficit-bias weekly rate (% body mass, signed): -0.25
    pub recomp_deficit_rate_pct: f64,
    /// Recomposition surplus-bias weekly rate (% body mass, signed): +0.125
    pub recomp_surplus_rate_pct: f64,
    /// Energy density of body-mass change (kcal per kg): 7700
    pub kcal_per_kg_mass_change: f64,
}

impl Default for GoalRateConfig {
    fn default() -> Self {
        Self {
            fat_loss: RateTiers {
                conservative: 0.5,
                moderate: 0.75,
                aggressive: 1.0,
            },
            muscle_gain: RateTiers {
                conservative: 0.125,
                moderate: 0.25,
                aggressive: 0.375,
            },
            recomp_deficit_rate_pct: -0.25,
            recomp_surplus_rate_pct: 0.125,
            kcal_per_kg_mass_change: 7700.0,
        }
    }
}

/// A protein/fat coefficient pair in grams per kilogram of basis mass
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoefficientPair {
    /// Protein grams per kg
    pub protein_g_per_kg: f64,
    /// Fat grams per kg
    pub fat_g_per_kg: f64,
}

/// Goal-type presets for seeding `MacroCoefficients`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroSeedConfig {
    /// Fat-loss preset: high protein to preserve lean mass
    pub fat_loss: CoefficientPair,
    /// Muscle-gain preset
    pub muscle_gain: CoefficientPair,
    /// Recomposition preset
    pub recomposition: CoefficientPair,
    /// Maintenance / performance / health preset
    pub maintenance: CoefficientPair,
    /// Body fat percentage above which males default to the FFM basis: 25
    pub ffm_basis_bf_threshold_male: f64,
    /// Body fat percentage above which females default to the FFM basis: 35
    pub ffm_basis_bf_threshold_female: f64,
}

impl Default for MacroSeedConfig {
    fn default() -> Self {
        Self {
            fat_loss: CoefficientPair {
                protein_g_per_kg: 2.2,
                fat_g_per_kg: 0.8,
            },
            muscle_gain: CoefficientPair {
                protein_g_per_kg: 1.8,
                fat_g_per_kg: 1.0,
            },
            recomposition: CoefficientPair {
                protein_g_per_kg: 2.2,
                fat_g_per_kg: 0.9,
            },
            maintenance: CoefficientPair {
                protein_g_per_kg: 1.6,
                fat_g_per_kg: 0.9,
            },
            ffm_basis_bf_threshold_male: 25.0,
            ffm_basis_bf_threshold_female: 35.0,
        }
    }
}

impl MacroSeedConfig {
    /// Preset coefficient pair for a goal type
    #[must_use]
    pub const fn pair_for_goal(&self, goal_type: GoalType) -> CoefficientPair {
        match goal_type {
            GoalType::FatLoss => self.fat_loss,
            GoalType::MuscleGain => self.muscle_gain,
            GoalType::Recomposition => self.recomposition,
            GoalType::Maintenance => self.maintenance,
        }
    }
}

/// Macro allocation caps and workout-bonus split
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroAllocationConfig {
    /// Absolute protein cap (g): 300
    pub protein_cap_g: f64,
    /// Absolute fat cap (g): 180
    pub fat_cap_g: f64,
    /// Maximum fraction of target calories protein+fat may occupy: 0.75
    pub protein_fat_calorie_ceiling: f64,
    /// Fraction of workout bonus calories routed to protein: 0.25
    pub bonus_protein_fraction: f64,
    /// Fraction of workout bonus calories routed to fat: 0.10
    pub bonus_fat_fraction: f64,
}

impl Default for MacroAllocationConfig {
    fn default() -> Self {
        Self {
            protein_cap_g: 300.0,
            fat_cap_g: 180.0,
            protein_fat_calorie_ceiling: 0.75,
            bonus_protein_fraction: 0.25,
            bonus_fat_fraction: 0.10,
        }
    }
}

impl MacroAllocationConfig {
    /// Validate cap and fraction ranges
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for non-positive caps or fractions outside
    /// (0, 1), or a bonus split that exceeds the whole bonus.
    pub fn validate(&self) -> EngineResult<()> {
        if self.protein_cap_g <= 0.0 || self.fat_cap_g <= 0.0 {
            return Err(EngineError::config("macro caps must be positive"));
        }
        if !(0.0..1.0).contains(&self.protein_fat_calorie_ceiling)
            || self.protein_fat_calorie_ceiling < 0.5
        {
            return Err(EngineError::config(
                "protein+fat calorie ceiling must be between 0.5 and 1.0",
            ));
        }
        if self.bonus_protein_fraction + self.bonus_fat_fraction >= 1.0 {
            return Err(EngineError::config(
                "bonus protein and fat fractions must leave room for carbohydrate",
            ));
        }
        Ok(())
    }
}

/// Multiplicative timing adjustment for one slot (applied before renormalization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingMultipliers {
    /// Protein weight multiplier
    pub protein: f64,
    /// Carbohydrate weight multiplier
    pub carbs: f64,
    /// Fat weight multiplier
    pub fat: f64,
}

/// Minimum floors per slot after rounding
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotFloors {
    /// Minimum calories
    pub min_kcal: f64,
    /// Minimum protein (g)
    pub min_protein_g: f64,
    /// Minimum fat (g)
    pub min_fat_g: f64,
}

/// Meal-slot distribution configuration
///
/// Weights follow the ISSN nutrient-timing position stand: carbohydrate and
/// protein shift toward the workout window, fat shifts away from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MealDistributionConfig {
    /// Base share of the day's totals per snack: 0.08
    pub snack_base_share: f64,
    /// Post-workout slot multipliers: protein x1.40, carbs x1.35, fat x0.85
    pub post_workout: TimingMultipliers,
    /// Pre-workout slot multipliers: protein x1.05, carbs x1.25, fat x0.90
    pub pre_workout: TimingMultipliers,
    /// Floors for meal slots: 100 kcal / 10 g protein / 5 g fat
    pub meal_floors: SlotFloors,
    /// Floors for snack slots: 50 kcal / 3 g protein / 2 g fat
    pub snack_floors: SlotFloors,
    /// Slot-sum validation tolerance (kcal): 5
    pub sum_tolerance_kcal: f64,
    /// Slot-sum validation tolerance per macro (g): 2
    pub sum_tolerance_g: f64,
}

impl Default for MealDistributionConfig {
    fn default() -> Self {
        Self {
            snack_base_share: 0.08,
            post_workout: TimingMultipliers {
                protein: 1.40,
                carbs: 1.35,
                fat: 0.85,
            },
            pre_workout: TimingMultipliers {
                protein: 1.05,
                carbs: 1.25,
                fat: 0.90,
            },
            meal_floors: SlotFloors {
                min_kcal: 100.0,
                min_protein_g: 10.0,
                min_fat_g: 5.0,
            },
            snack_floors: SlotFloors {
                min_kcal: 50.0,
                min_protein_g: 3.0,
                min_fat_g: 2.0,
            },
            sum_tolerance_kcal: 5.0,
            sum_tolerance_g: 2.0,
        }
    }
}

impl MealDistributionConfig {
    /// Validate shares and multipliers
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when snack shares could exceed the day or any
    /// multiplier is non-positive.
    pub fn validate(&self) -> EngineResult<()> {
        if !(0.0..0.125).contains(&self.snack_base_share) {
            return Err(EngineError::config(
                "snack base share must be below 0.125 so eight snacks cannot exceed the day",
            ));
        }
        for multipliers in [&self.post_workout, &self.pre_workout] {
            if multipliers.protein <= 0.0 || multipliers.carbs <= 0.0 || multipliers.fat <= 0.0 {
                return Err(EngineError::config("timing multipliers must be positive"));
            }
        }
        Ok(())
    }
}

/// Override reconciliation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideConfig {
    /// Maximum calorie-macro identity gap a kept override may show (kcal): 20
    pub consistency_tolerance_kcal: f64,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            consistency_tolerance_kcal: 20.0,
        }
    }
}

/// Body-composition projection partitions and feasibility thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Fraction of fat-loss mass change that comes from fat mass: 0.90
    pub fat_loss_fat_fraction: f64,
    /// Fraction of muscle-gain mass change that goes to lean mass: 0.60
    pub muscle_gain_lean_fraction: f64,
    /// Surplus-bias recomposition: fraction of the gain going to lean: 0.5
    pub recomp_surplus_lean_fraction: f64,
    /// Maintenance-bias recomposition weekly fat loss (% body mass): 0.15
    pub recomp_maintenance_weekly_fat_loss_pct: f64,
    /// Maintenance-bias recomposition weekly lean gain (% body mass): 0.10
    pub recomp_maintenance_weekly_lean_gain_pct: f64,
    /// Projected body fat below this is flagged (essential fat): 5.0
    pub essential_bf_pct: f64,
    /// Weekly fat-loss rate above this (% body mass) is flagged: 1.0
    pub aggressive_fat_loss_weekly_pct: f64,
    /// Weekly lean-gain rate above this (% body mass) is flagged: 0.25
    pub aggressive_lean_gain_weekly_pct: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fat_loss_fat_fraction: 0.90,
            muscle_gain_lean_fraction: 0.60,
            recomp_surplus_lean_fraction: 0.5,
            recomp_maintenance_weekly_fat_loss_pct: 0.15,
            recomp_maintenance_weekly_lean_gain_pct: 0.10,
            essential_bf_pct: 5.0,
            aggressive_fat_loss_weekly_pct: 1.0,
            aggressive_lean_gain_weekly_pct: 0.25,
        }
    }
}

impl ProjectionConfig {
    /// Validate partition fractions
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for fractions outside (0, 1].
    pub fn validate(&self) -> EngineResult<()> {
        for (name, value) in [
            ("fat_loss_fat_fraction", self.fat_loss_fat_fraction),
            ("muscle_gain_lean_fraction", self.muscle_gain_lean_fraction),
            (
                "recomp_surplus_lean_fraction",
                self.recomp_surplus_lean_fraction,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) || value == 0.0 {
                return Err(EngineError::config(format!(
                    "{name} must be between 0 (exclusive) and 1"
                )));
            }
        }
        Ok(())
    }
}

/// Energy availability classification cut-points (kcal per kg FFM)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyAvailabilityConfig {
    /// At or above this: optimal. Default 30
    pub optimal_threshold: f64,
    /// At or above this (below optimal): moderate. Default 25
    pub moderate_threshold: f64,
}

impl Default for EnergyAvailabilityConfig {
    fn default() -> Self {
        Self {
            optimal_threshold: 30.0,
            moderate_threshold: 25.0,
        }
    }
}

impl EnergyAvailabilityConfig {
    /// Validate cut-point ordering
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when the moderate threshold is not below the
    /// optimal one.
    pub fn validate(&self) -> EngineResult<()> {
        if self.moderate_threshold >= self.optimal_threshold {
            return Err(EngineError::config(
                "moderate EA threshold must be below the optimal threshold",
            ));
        }
        Ok(())
    }
}
