// ABOUTME: Calculation-engine module tree: estimation, allocation, distribution, projection
// ABOUTME: Re-exports the main entry points for callers that skip per-stage access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! # Calculation Engine
//!
//! The calculation stages behind a phase plan. Each submodule is a pure
//! function layer over the models and configuration; [`planner`] wires them
//! together into the full pipeline.

/// Energy-availability computation and classification
pub mod energy_availability;
/// Goal-driven calorie adjustment
pub mod goal_adjuster;
/// Coefficient-based macro allocation
pub mod macro_allocator;
/// Meal-slot distribution with workout timing
pub mod meal_distributor;
/// REE, NEAT, TEF, and workout energy estimation
pub mod metabolic;
/// Manual-override reconciliation and invalidation
pub mod overrides;
/// Physiological constants shared across stages
pub mod physiological_constants;
/// Phase-plan orchestration
pub mod planner;
/// Body-composition projection and feasibility flags
pub mod projection;

pub use energy_availability::{classify, day_energy_availability, energy_availability, EaClass};
pub use goal_adjuster::{adjust_calories, resolve_weekly_rate_pct, GoalAdjustment};
pub use macro_allocator::{allocate_macros, MacroTargets};
pub use meal_distributor::{distribute_day, validate_distribution};
pub use metabolic::{
    calculate_ree, estimate_day_expenditure, resolve_zone_table, workout_energy_kcal,
    MassDerivedZoneTable, MeasuredZoneTable, ZoneCalorieResolver,
};
pub use overrides::{
    apply_calorie_edit, apply_macro_edit, invalidate_overrides, reconcile_day, MacroField,
    OverrideInvalidation,
};
pub use planner::{compute_day_plan, compute_phase_plan, DayPlan, PhasePlan, PlanRequest, WeeklySummary};
pub use projection::project_phase;
