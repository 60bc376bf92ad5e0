// ABOUTME: Unified error handling for the nutrition target engine
// ABOUTME: ErrorCode, EngineError, EngineResult, and recoverable EngineWarning types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! # Unified Error Handling
//!
//! This module provides the centralized error handling system for the engine.
//! Fatal conditions (spec'd as blocking, e.g. missing profile data) surface as
//! [`EngineError`]; locally recoverable conditions (discarded overrides,
//! slot-sum mismatches, infeasible goal projections) are modeled as
//! [`EngineWarning`] values carried alongside results, so callers can display
//! them without losing the computed fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Required body metrics are missing; no targets can be computed
    #[serde(rename = "INSUFFICIENT_INPUT")]
    InsufficientInput = 1000,
    /// The provided input is invalid (NaN, negative mass, empty schedule, ...)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 1001,
    /// A provided value is outside the acceptable range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 1002,
    /// Engine configuration failed validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 2000,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InsufficientInput => {
                "Required profile data is missing - add the missing fields to compute targets"
            }
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ConfigInvalid => "Engine configuration is invalid",
            Self::InternalError => "An internal engine error occurred",
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct EngineError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl EngineError {
    /// Create a new `EngineError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Required profile field missing (surfaced as "add missing profile data")
    pub fn insufficient_input(field: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InsufficientInput,
            format!("missing required profile field: {}", field.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value out of range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal engine error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type EngineResult<T> = Result<T, EngineError>;

/// Non-fatal, locally recovered conditions surfaced to the caller
///
/// Warnings never abort computation: an inconsistent override falls back to
/// computed values, a slot-sum mismatch asks for an explicit recalculation,
/// an infeasible projection is advisory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineWarning {
    /// A manual override failed the calorie-macro identity and was discarded
    InconsistentOverride {
        /// Day the override belonged to
        day: String,
        /// Absolute gap between entered calories and macro-derived calories (kcal)
        delta_kcal: f64,
    },
    /// Meal-slot totals diverge from the day target beyond tolerance
    ///
    /// Requires an explicit "recalculate" action; never silently corrected.
    DistributionMismatch {
        /// Day the slots belong to
        day: String,
        /// Calorie divergence (kcal)
        delta_kcal: f64,
        /// Largest per-macro divergence (grams)
        delta_grams: f64,
    },
    /// Projected composition or rate-of-change crossed a safety threshold
    InfeasibleGoal {
        /// Human-readable explanation of the flag
        reason: String,
    },
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentOverride { day, delta_kcal } => write!(
                f,
                "override for {day} is off by {delta_kcal:.0} kcal and was discarded"
            ),
            Self::DistributionMismatch {
                day,
                delta_kcal,
                delta_grams,
            } => write!(
                f,
                "meal slots for {day} diverge from the day target by {delta_kcal:.0} kcal / {delta_grams:.0} g - recalculate to fix"
            ),
            Self::InfeasibleGoal { reason } => write!(f, "goal feasibility: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::InsufficientInput).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_INPUT\"");
    }

    #[test]
    fn test_insufficient_input_message() {
        let error = EngineError::insufficient_input("body mass");
        assert_eq!(error.code, ErrorCode::InsufficientInput);
        assert!(error.to_string().contains("body mass"));
    }

    #[test]
    fn test_warning_display() {
        let warning = EngineWarning::InconsistentOverride {
            day: "monday".into(),
            delta_kcal: 680.0,
        };
        assert!(warning.to_string().contains("discarded"));
    }
}
