// ABOUTME: Data model module: body metrics, schedule, goals, targets, projections
// ABOUTME: Re-exports the shared types every engine component operates on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! # Data Models
//!
//! Shared data structures for the calculation engine: client body metrics,
//! the weekly activity schedule, goal selection, per-day and per-slot targets,
//! and phase projections. These are the contracts exchanged with profile
//! storage, persistence, and the external meal-content generator.

/// Body metrics and derived composition
pub mod body;
/// Goal selection (type, rate tier, recomposition bias)
pub mod goals;
/// Phase projection snapshots and feasibility flags
pub mod projection;
/// Weekly activity schedule and workout specs
pub mod schedule;
/// Macro coefficients, day targets, meal slots, and overrides
pub mod targets;

pub use body::{BodyMetrics, MeasuredRee, RequiredMetrics, Sex};
pub use goals::{GoalSpec, GoalType, RateTier, RecompBias};
pub use projection::{CompositionSnapshot, CompositionTargets, FeasibilityFlag, PhaseProjection};
pub use schedule::{
    ActivityLevel, ActivitySchedule, DaySchedule, TimeOfDayBucket, WorkoutEffort, WorkoutIntensity,
    WorkoutSpec, WorkoutType, Zone,
};
pub use targets::{
    macro_calories, DayNutritionTarget, DayOverride, MacroBasis, MacroCoefficients, MealSlotTarget,
    SlotType, TdeeBreakdown, WeekOverrides, WorkoutRelation,
};
