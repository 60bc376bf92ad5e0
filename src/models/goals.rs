// ABOUTME: Goal selection models for calorie adjustment and projection
// ABOUTME: GoalType, RateTier, RecompBias, and GoalSpec definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Coaching goal driving calorie adjustment and macro presets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Caloric deficit targeting fat mass
    FatLoss,
    /// Caloric surplus targeting lean mass
    MuscleGain,
    /// Simultaneous fat loss and lean gain near maintenance
    Recomposition,
    /// Maintenance, performance, or general health - no calorie delta
    Maintenance,
}

/// Preset aggressiveness of the weekly body-mass-change rate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateTier {
    /// Slow, most sustainable rate
    Conservative,
    /// Default rate
    Moderate,
    /// Fastest supported rate
    Aggressive,
}

/// Direction bias for recomposition phases
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecompBias {
    /// Small deficit - prioritize fat loss
    Deficit,
    /// Calorie-neutral recomposition
    Maintenance,
    /// Small surplus - prioritize lean gain
    Surplus,
}

/// Goal selection: type, rate tier or recomposition bias, optional explicit rate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalSpec {
    /// Goal type
    pub goal_type: GoalType,
    /// Preset rate tier (ignored for recomposition)
    pub rate_tier: RateTier,
    /// Recomposition bias (only read for `GoalType::Recomposition`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recomp_bias: Option<RecompBias>,
    /// Explicit weekly rate as percent of body mass, overriding the preset.
    /// Sign convention: negative = mass loss, positive = mass gain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_weekly_rate_pct: Option<f64>,
}

impl GoalSpec {
    /// A goal with preset rates and no overrides
    #[must_use]
    pub const fn preset(goal_type: GoalType, rate_tier: RateTier) -> Self {
        Self {
            goal_type,
            rate_tier,
            recomp_bias: None,
            explicit_weekly_rate_pct: None,
        }
    }

    /// Bias actually in effect for recomposition goals
    #[must_use]
    pub fn bias(&self) -> RecompBias {
        self.recomp_bias.unwrap_or(RecompBias::Maintenance)
    }

    /// Validate the explicit rate override, when present
    ///
    /// # Errors
    ///
    /// Returns an error for explicit weekly rates beyond +/-2 % of body mass,
    /// which no evidence-based protocol prescribes.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(rate) = self.explicit_weekly_rate_pct {
            if !(-2.0..=2.0).contains(&rate) {
                return Err(EngineError::out_of_range(
                    "explicit weekly rate must be between -2 and 2 percent of body mass",
                ));
            }
        }
        Ok(())
    }
}
