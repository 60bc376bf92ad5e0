// ABOUTME: Goal calorie adjuster: weekly rate resolution and daily calorie delta
// ABOUTME: Converts goal type + rate tier into a TDEE adjustment floored at REE
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Goal Calorie Adjustment
//!
//! Resolves a signed weekly body-mass-change rate from the goal selection,
//! converts it to a daily calorie delta via the configured energy density of
//! mass change, and applies it to TDEE with a hard floor at REE.

use crate::config::GoalRateConfig;
use crate::errors::EngineResult;
use crate::models::goals::{GoalSpec, GoalType, RateTier, RecompBias};

/// Resolved calorie adjustment for one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalAdjustment {
    /// Weekly body-mass-change rate in effect (% of body mass, signed)
    pub weekly_rate_pct: f64,
    /// Daily calorie delta applied to TDEE (kcal, signed)
    pub daily_delta_kcal: f64,
    /// Final target calories after the REE floor
    pub target_calories: f64,
}

const fn tier_value(tiers: &crate::config::RateTiers, tier: RateTier) -> f64 {
    match tier {
        RateTier::Conservative => tiers.conservative,
        RateTier::Moderate => tiers.moderate,
        RateTier::Aggressive => tiers.aggressive,
    }
}

/// Resolve the signed weekly rate (% of body mass per week) for a goal
///
/// An explicit override rate takes precedence over every preset.
#[must_use]
pub fn resolve_weekly_rate_pct(goal: &GoalSpec, config: &GoalRateConfig) -> f64 {
    if let Some(explicit) = goal.explicit_weekly_rate_pct {
        return explicit;
    }
    match goal.goal_type {
        GoalType::FatLoss => -tier_value(&config.fat_loss, goal.rate_tier),
        GoalType::MuscleGain => tier_value(&config.muscle_gain, goal.rate_tier),
        GoalType::Recomposition => match goal.bias() {
            RecompBias::Deficit => config.recomp_deficit_rate_pct,
            RecompBias::Maintenance => 0.0,
            RecompBias::Surplus => config.recomp_surplus_rate_pct,
        },
        GoalType::Maintenance => 0.0,
    }
}

/// Convert a weekly rate into a signed daily calorie delta
#[must_use]
pub fn daily_delta_kcal(weekly_rate_pct: f64, mass_kg: f64, config: &GoalRateConfig) -> f64 {
    weekly_rate_pct / 100.0 * mass_kg * config.kcal_per_kg_mass_change / 7.0
}

/// Compute target calories for a day: TDEE + delta, never below REE
///
/// # Errors
///
/// Propagates goal validation failures (out-of-range explicit rates).
pub fn adjust_calories(
    tdee: f64,
    ree: f64,
    mass_kg: f64,
    goal: &GoalSpec,
    config: &GoalRateConfig,
) -> EngineResult<GoalAdjustment> {
    goal.validate()?;
    let weekly_rate_pct = resolve_weekly_rate_pct(goal, config);
    let delta = daily_delta_kcal(weekly_rate_pct, mass_kg, config);
    Ok(GoalAdjustment {
        weekly_rate_pct,
        daily_delta_kcal: delta,
        target_calories: (tdee + delta).max(ree),
    })
}
