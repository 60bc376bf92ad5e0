// ABOUTME: Body-composition projector: splits mass change into fat and lean partitions
// ABOUTME: Flags infeasible trajectories (essential fat, aggressive rates) without blocking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Body-Composition Projection
//!
//! Projects fat and lean mass over a planning phase from the goal's weekly
//! rate. Mass change is partitioned by goal direction: losses come mostly from
//! fat, gains land mostly on lean tissue, and calorie-neutral recomposition is
//! modeled as slow simultaneous fat loss and lean gain. Feasibility checks
//! (essential body fat, aggressive weekly rates) are advisory flags only; a
//! projection is always produced.

use tracing::debug;

use crate::config::ProjectionConfig;
use crate::models::goals::{GoalSpec, GoalType};
use crate::models::projection::{
    CompositionSnapshot, CompositionTargets, FeasibilityFlag, PhaseProjection,
};

/// Project composition over `horizon_weeks` at the given weekly rate
///
/// `weekly_rate_pct` is a signed percent of current body mass per week (as
/// resolved by the goal adjuster); the rate is held constant over the horizon
/// rather than compounded, matching how phase targets are communicated.
/// Explicit `targets` replace the partition-derived values component-wise.
#[must_use]
pub fn project_phase(
    current: CompositionSnapshot,
    goal: &GoalSpec,
    weekly_rate_pct: f64,
    horizon_weeks: u32,
    targets: Option<CompositionTargets>,
    config: &ProjectionConfig,
) -> PhaseProjection {
    let weeks = f64::from(horizon_weeks);
    let weekly_mass_kg = current.mass_kg * weekly_rate_pct / 100.0;
    let total_mass_kg = weekly_mass_kg * weeks;

    let (fat_delta, lean_delta) =
        partition_mass_change(goal, total_mass_kg, weeks, current, config);
    let targets = targets.unwrap_or_default();
    let projected_fat = targets
        .fat_mass_kg
        .unwrap_or_else(|| (current.fat_mass_kg + fat_delta).max(0.0));
    let projected_lean = targets
        .lean_mass_kg
        .unwrap_or_else(|| (current.lean_mass_kg + lean_delta).max(0.0));
    let projected = CompositionSnapshot::from_fat_and_lean(projected_fat, projected_lean);

    let flags = feasibility_flags(current, projected, horizon_weeks, config);
    if !flags.is_empty() {
        debug!(
            goal = ?goal.goal_type,
            weekly_rate_pct,
            flags = flags.len(),
            "phase projection raised feasibility flags"
        );
    }

    PhaseProjection {
        current,
        projected,
        horizon_weeks,
        weekly_rate_pct,
        flags,
    }
}

/// Split a total mass change into fat and lean deltas
fn partition_mass_change(
    goal: &GoalSpec,
    total_mass_kg: f64,
    weeks: f64,
    current: CompositionSnapshot,
    config: &ProjectionConfig,
) -> (f64, f64) {
    match goal.goal_type {
        GoalType::Maintenance => (0.0, 0.0),
        GoalType::FatLoss => {
            let fat = total_mass_kg * config.fat_loss_fat_fraction;
            (fat, total_mass_kg - fat)
        }
        GoalType::MuscleGain => {
            let lean = total_mass_kg * config.muscle_gain_lean_fraction;
            (total_mass_kg - lean, lean)
        }
        GoalType::Recomposition => partition_recomp(total_mass_kg, weeks, current, config),
    }
}

/// Recomposition partitions
///
/// At a deficit the whole loss comes from fat (lean change is negligible at
/// these small rates); at a surplus half the gain is lean; at maintenance
/// calories, fat drifts down and lean drifts up at slow configured weekly
/// percentages even though net mass change is zero.
fn partition_recomp(
    total_mass_kg: f64,
    weeks: f64,
    current: CompositionSnapshot,
    config: &ProjectionConfig,
) -> (f64, f64) {
    if total_mass_kg < 0.0 {
        (total_mass_kg, 0.0)
    } else if total_mass_kg > 0.0 {
        let lean = total_mass_kg * config.recomp_surplus_lean_fraction;
        (total_mass_kg - lean, lean)
    } else {
        let weekly_fat = -current.mass_kg * config.recomp_maintenance_weekly_fat_loss_pct / 100.0;
        let weekly_lean = current.mass_kg * config.recomp_maintenance_weekly_lean_gain_pct / 100.0;
        (weekly_fat * weeks, weekly_lean * weeks)
    }
}

fn feasibility_flags(
    current: CompositionSnapshot,
    projected: CompositionSnapshot,
    horizon_weeks: u32,
    config: &ProjectionConfig,
) -> Vec<FeasibilityFlag> {
    let mut flags = Vec::new();
    if projected.body_fat_pct < config.essential_bf_pct {
        flags.push(FeasibilityFlag::BodyFatBelowEssential {
            projected_bf_pct: projected.body_fat_pct,
        });
    }
    if horizon_weeks > 0 && current.mass_kg > 0.0 {
        let weeks = f64::from(horizon_weeks);
        let weekly_fat_loss_pct =
            (current.fat_mass_kg - projected.fat_mass_kg) / weeks / current.mass_kg * 100.0;
        if weekly_fat_loss_pct > config.aggressive_fat_loss_weekly_pct {
            flags.push(FeasibilityFlag::AggressiveFatLossRate {
                weekly_rate_pct: weekly_fat_loss_pct,
            });
        }
        let weekly_lean_gain_pct =
            (projected.lean_mass_kg - current.lean_mass_kg) / weeks / current.mass_kg * 100.0;
        if weekly_lean_gain_pct > config.aggressive_lean_gain_weekly_pct {
            flags.push(FeasibilityFlag::AggressiveLeanGainRate {
                weekly_rate_pct: weekly_lean_gain_pct,
            });
        }
    }
    flags
}
