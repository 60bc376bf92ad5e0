// ABOUTME: Body-composition projection models over a planning phase
// ABOUTME: CompositionSnapshot, FeasibilityFlag, and PhaseProjection definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

use serde::{Deserialize, Serialize};

/// Body composition at a point in time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CompositionSnapshot {
    /// Total body mass (kg)
    pub mass_kg: f64,
    /// Body fat percentage (0-100)
    pub body_fat_pct: f64,
    /// Fat mass (kg)
    pub fat_mass_kg: f64,
    /// Lean (fat-free) mass (kg)
    pub lean_mass_kg: f64,
}

impl CompositionSnapshot {
    /// Build a snapshot from mass and body fat percentage
    #[must_use]
    pub fn from_mass_and_bf(mass_kg: f64, body_fat_pct: f64) -> Self {
        let fat_mass_kg = mass_kg * body_fat_pct / 100.0;
        Self {
            mass_kg,
            body_fat_pct,
            fat_mass_kg,
            lean_mass_kg: mass_kg - fat_mass_kg,
        }
    }

    /// Build a snapshot from explicit fat and lean masses,
    /// recomputing the implied body fat percentage
    #[must_use]
    pub fn from_fat_and_lean(fat_mass_kg: f64, lean_mass_kg: f64) -> Self {
        let mass_kg = fat_mass_kg + lean_mass_kg;
        let body_fat_pct = if mass_kg > 0.0 {
            fat_mass_kg / mass_kg * 100.0
        } else {
            0.0
        };
        Self {
            mass_kg,
            body_fat_pct,
            fat_mass_kg,
            lean_mass_kg,
        }
    }
}

/// Explicit end-of-phase composition targets
///
/// When supplied, these replace the partition-derived projection for the
/// components they name; the implied body fat percentage is recomputed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CompositionTargets {
    /// Target fat mass at the end of the phase (kg)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_mass_kg: Option<f64>,
    /// Target lean mass at the end of the phase (kg)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lean_mass_kg: Option<f64>,
}

/// Advisory feasibility flags - never block saving a phase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "flag", rename_all = "snake_case")]
pub enum FeasibilityFlag {
    /// Projected body fat falls below the essential-fat floor
    BodyFatBelowEssential {
        /// Projected body fat percentage
        projected_bf_pct: f64,
    },
    /// Weekly fat-loss rate beyond the sustainable range
    AggressiveFatLossRate {
        /// Weekly rate as percent of body mass
        weekly_rate_pct: f64,
    },
    /// Weekly lean-gain rate beyond what training supports
    AggressiveLeanGainRate {
        /// Weekly rate as percent of body mass
        weekly_rate_pct: f64,
    },
}

/// Projected fat/lean trajectory over a planning phase
///
/// Immutable once computed; recomputed whenever goal or metrics change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseProjection {
    /// Current composition
    pub current: CompositionSnapshot,
    /// Projected composition at the end of the horizon
    pub projected: CompositionSnapshot,
    /// Phase length in weeks
    pub horizon_weeks: u32,
    /// Weekly body-mass-change rate applied (percent of body mass, signed)
    pub weekly_rate_pct: f64,
    /// Advisory feasibility flags
    pub flags: Vec<FeasibilityFlag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_round_trip() {
        let snapshot = CompositionSnapshot::from_mass_and_bf(80.0, 18.0);
        assert!((snapshot.fat_mass_kg - 14.4).abs() < 1e-9);
        let rebuilt =
            CompositionSnapshot::from_fat_and_lean(snapshot.fat_mass_kg, snapshot.lean_mass_kg);
        assert!((rebuilt.body_fat_pct - 18.0).abs() < 1e-9);
        assert!((rebuilt.mass_kg - 80.0).abs() < 1e-9);
    }
}
