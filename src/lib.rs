// ABOUTME: Main library entry point for the macroplan nutrition engine
// ABOUTME: Pure, synchronous calculation of nutrition targets and meal-slot plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

#![deny(unsafe_code)]

//! # Macroplan
//!
//! A pure, synchronous nutrition target and meal-timing calculation engine
//! for coaching platforms. Given body metrics, a goal, and a weekly activity
//! schedule, it produces per-day calorie and macro targets, timed meal-slot
//! allocations, a body-composition projection, and energy-availability
//! classification.
//!
//! ## Design
//!
//! - **Pure computation**: no I/O, no clocks, no randomness. The same request
//!   and configuration always produce the same plan.
//! - **Grams are truth**: a target's calories are always derived from its
//!   macro grams (`protein*4 + carbs*4 + fat*9`), including after manual
//!   overrides and slot distribution.
//! - **Warnings over errors**: recoverable conditions (discarded overrides,
//!   slot-sum drift, infeasible projections) ride along as
//!   [`errors::EngineWarning`] values instead of aborting the plan.
//!
//! ## Example
//!
//! ```rust
//! use macroplan::config::EngineConfig;
//! use macroplan::intelligence::planner::{compute_phase_plan, PlanRequest};
//! use macroplan::models::body::{BodyMetrics, Sex};
//! use macroplan::models::goals::{GoalSpec, GoalType, RateTier};
//! use macroplan::models::schedule::{ActivityLevel, ActivitySchedule};
//! use macroplan::models::targets::WeekOverrides;
//!
//! # fn main() -> macroplan::errors::EngineResult<()> {
//! let request = PlanRequest {
//!     metrics: BodyMetrics {
//!         sex: Some(Sex::Male),
//!         age_years: Some(30),
//!         height_cm: Some(180.0),
//!         mass_kg: Some(80.0),
//!         body_fat_pct: Some(18.0),
//!         measured_ree: None,
//!     },
//!     goal: GoalSpec::preset(GoalType::FatLoss, RateTier::Moderate),
//!     schedule: ActivitySchedule::rest_week(ActivityLevel::ModeratelyActive),
//!     coefficients: None,
//!     overrides: WeekOverrides::default(),
//!     measured_zone_table: None,
//!     horizon_weeks: 12,
//!     composition_targets: None,
//! };
//!
//! let plan = compute_phase_plan(&request, &EngineConfig::default())?;
//! assert_eq!(plan.days.len(), 7);
//! # Ok(())
//! # }
//! ```

/// Engine configuration with documented physiological defaults
pub mod config;
/// Unified error and warning types
pub mod errors;
/// Calculation stages and the phase planner
pub mod intelligence;
/// Domain models: body metrics, schedules, goals, targets, projections
pub mod models;

pub use config::EngineConfig;
pub use errors::{EngineError, EngineResult, EngineWarning, ErrorCode};
pub use intelligence::planner::{compute_phase_plan, DayPlan, PhasePlan, PlanRequest};
