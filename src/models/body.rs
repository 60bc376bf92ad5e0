// ABOUTME: Body metrics models for metabolic and composition calculations
// ABOUTME: Sex, MeasuredRee, BodyMetrics with derived fat/lean mass and completeness checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Biological sex for metabolic rate calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male (higher REE constant)
    Male,
    /// Female (lower REE constant)
    Female,
}

/// A directly measured resting energy expenditure reading
///
/// Only used in place of the predictive formula when marked authoritative,
/// e.g. from indirect calorimetry rather than a wearable estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MeasuredRee {
    /// Measured resting energy expenditure (kcal/day)
    pub kcal_per_day: f64,
    /// Whether the measurement should override the predictive formula
    pub authoritative: bool,
}

/// Client body metrics supplied by the surrounding profile storage
///
/// All fields are optional at the boundary; [`BodyMetrics::required`]
/// produces the validated view the estimator needs, or an
/// `INSUFFICIENT_INPUT` error naming the first missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BodyMetrics {
    /// Biological sex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    /// Height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Body mass in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass_kg: Option<f64>,
    /// Body fat percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_pct: Option<f64>,
    /// Directly measured REE, if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_ree: Option<MeasuredRee>,
}

/// Validated body metrics with every estimator-required field present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredMetrics {
    /// Biological sex
    pub sex: Sex,
    /// Age in years
    pub age_years: u32,
    /// Height in centimeters
    pub height_cm: f64,
    /// Body mass in kilograms
    pub mass_kg: f64,
}

impl BodyMetrics {
    /// Fat mass in kg, derived as `mass x bf%`
    #[must_use]
    pub fn fat_mass_kg(&self) -> Option<f64> {
        match (self.mass_kg, self.body_fat_pct) {
            (Some(mass), Some(bf)) => Some(mass * bf / 100.0),
            _ => None,
        }
    }

    /// Lean (fat-free) mass in kg, derived as `mass - fat mass`
    #[must_use]
    pub fn lean_mass_kg(&self) -> Option<f64> {
        match (self.mass_kg, self.body_fat_pct) {
            (Some(mass), Some(bf)) => Some(mass * (1.0 - bf / 100.0)),
            _ => None,
        }
    }

    /// Validate that provided values are physically plausible
    ///
    /// # Errors
    ///
    /// Returns an error if mass, height, age, or body fat percentage are out
    /// of accepted ranges (derived fat and lean mass must both be >= 0).
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(mass) = self.mass_kg {
            if !(20.0..=300.0).contains(&mass) {
                return Err(EngineError::out_of_range(
                    "body mass must be between 20 and 300 kg",
                ));
            }
        }
        if let Some(height) = self.height_cm {
            if !(100.0..=250.0).contains(&height) {
                return Err(EngineError::out_of_range(
                    "height must be between 100 and 250 cm",
                ));
            }
        }
        if let Some(age) = self.age_years {
            if !(10..=120).contains(&age) {
                return Err(EngineError::out_of_range(
                    "age must be between 10 and 120 years",
                ));
            }
        }
        if let Some(bf) = self.body_fat_pct {
            if !(0.0..=100.0).contains(&bf) {
                return Err(EngineError::out_of_range(
                    "body fat percentage must be between 0 and 100",
                ));
            }
        }
        if let Some(ree) = self.measured_ree {
            if ree.kcal_per_day <= 0.0 {
                return Err(EngineError::out_of_range("measured REE must be positive"));
            }
        }
        Ok(())
    }

    /// Produce the validated view required for metabolic estimation
    ///
    /// # Errors
    ///
    /// Returns `INSUFFICIENT_INPUT` naming the first missing field, or a
    /// range error from [`BodyMetrics::validate`]. Nothing downstream of the
    /// estimator runs when this fails.
    pub fn required(&self) -> EngineResult<RequiredMetrics> {
        self.validate()?;
        let sex = self.sex.ok_or_else(|| EngineError::insufficient_input("sex"))?;
        let age_years = self
            .age_years
            .ok_or_else(|| EngineError::insufficient_input("age"))?;
        let height_cm = self
            .height_cm
            .ok_or_else(|| EngineError::insufficient_input("height"))?;
        let mass_kg = self
            .mass_kg
            .ok_or_else(|| EngineError::insufficient_input("body mass"))?;
        Ok(RequiredMetrics {
            sex,
            age_years,
            height_cm,
            mass_kg,
        })
    }
}
