// ABOUTME: Phase planner: orchestrates estimation, adjustment, allocation, and distribution
// ABOUTME: Produces the full week of day plans plus projection and summary in one pass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Phase Planning
//!
//! The planner wires the calculation stages together: expenditure estimation,
//! goal calorie adjustment, macro allocation, override reconciliation,
//! meal-slot distribution, energy-availability classification, and the
//! composition projection. The whole pipeline is a pure function of the
//! request and configuration, so recomputing a plan with unchanged inputs
//! yields an identical result.
//!
//! Warnings gathered along the way (discarded overrides, feasibility flags)
//! ride along in the plan instead of aborting it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::errors::{EngineResult, EngineWarning};
use crate::intelligence::energy_availability::{classify, day_energy_availability, EaClass};
use crate::intelligence::goal_adjuster::{adjust_calories, daily_delta_kcal, resolve_weekly_rate_pct};
use crate::intelligence::macro_allocator::allocate_macros;
use crate::intelligence::meal_distributor::{distribute_day, validate_distribution};
use crate::intelligence::metabolic::{estimate_day_expenditure, MeasuredZoneTable};
use crate::intelligence::overrides::reconcile_day;
use crate::intelligence::projection::project_phase;
use crate::models::body::BodyMetrics;
use crate::models::goals::GoalSpec;
use crate::models::projection::{
    CompositionSnapshot, CompositionTargets, FeasibilityFlag, PhaseProjection,
};
use crate::models::schedule::{ActivityLevel, ActivitySchedule, DaySchedule};
use crate::models::targets::{
    DayNutritionTarget, MacroCoefficients, MealSlotTarget, WeekOverrides,
};

/// Everything needed to compute a phase plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// Client body metrics
    pub metrics: BodyMetrics,
    /// Goal and rate selection
    pub goal: GoalSpec,
    /// Weekly activity schedule
    pub schedule: ActivitySchedule,
    /// Macro coefficients; seeded from the goal when absent
    pub coefficients: Option<MacroCoefficients>,
    /// Manual per-day overrides
    pub overrides: WeekOverrides,
    /// Measured per-zone calorie table, when the client has test data
    pub measured_zone_table: Option<MeasuredZoneTable>,
    /// Phase length in weeks
    pub horizon_weeks: u32,
    /// Explicit end-of-phase fat/lean masses; overrides the rate-derived projection
    pub composition_targets: Option<CompositionTargets>,
}

/// One fully computed day: target, meal slots, and EA classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    /// The reconciled day target
    pub target: DayNutritionTarget,
    /// Meal and snack slot allocations
    pub slots: Vec<MealSlotTarget>,
    /// Energy-availability class, when lean mass is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ea_class: Option<EaClass>,
}

/// Week-level averages for display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    /// Mean daily calories across the week
    pub mean_calories: f64,
    /// Mean daily protein (g)
    pub mean_protein_g: f64,
    /// Mean daily carbohydrate (g)
    pub mean_carbs_g: f64,
    /// Mean daily fat (g)
    pub mean_fat_g: f64,
    /// Mean energy availability (kcal/kg lean mass/day), when lean mass is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_energy_availability: Option<f64>,
    /// Number of workout days in the week
    pub workout_days: u8,
}

/// A complete computed phase plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhasePlan {
    /// Coefficients in effect (seeded or caller-supplied)
    pub coefficients: MacroCoefficients,
    /// Weekly body-mass-change rate (% of body mass, signed)
    pub weekly_rate_pct: f64,
    /// Daily calorie delta applied to rest-day TDEE (kcal, signed)
    pub daily_delta_kcal: f64,
    /// Seven day plans, Monday first
    pub days: Vec<DayPlan>,
    /// Week-level averages
    pub summary: WeeklySummary,
    /// Composition projection, when body fat percentage is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<PhaseProjection>,
    /// Non-fatal warnings raised during computation
    pub warnings: Vec<EngineWarning>,
}

/// Compute the full phase plan for a request
///
/// # Errors
///
/// Returns an error when the request fails validation or the metrics lack
/// fields the estimator requires.
pub fn compute_phase_plan(request: &PlanRequest, config: &EngineConfig) -> EngineResult<PhasePlan> {
    config.validate()?;
    request.metrics.validate()?;
    request.goal.validate()?;
    request.schedule.validate()?;

    let coefficients = request.coefficients.unwrap_or_else(|| {
        MacroCoefficients::seed_for_goal(request.goal.goal_type, &request.metrics, &config.macro_seed)
    });
    coefficients.validate()?;

    let mass_kg = request.metrics.required()?.mass_kg;
    let weekly_rate_pct = resolve_weekly_rate_pct(&request.goal, &config.goal_rates);
    let delta_kcal = daily_delta_kcal(weekly_rate_pct, mass_kg, &config.goal_rates);

    let mut warnings = Vec::new();
    let mut day_schedules: Vec<&DaySchedule> = request.schedule.days.iter().collect();
    day_schedules.sort_by_key(|d| d.day.num_days_from_monday());

    let mut days = Vec::with_capacity(7);
    for schedule in day_schedules {
        let (plan, mut day_warnings) = compute_day_plan(
            schedule,
            request.schedule.activity_level,
            &request.metrics,
            &request.goal,
            &coefficients,
            &request.overrides,
            request.measured_zone_table,
            config,
        )?;
        warnings.append(&mut day_warnings);
        days.push(plan);
    }

    let summary = summarize_week(&days);
    let projection = build_projection(request, weekly_rate_pct, config);
    if let Some(projection) = &projection {
        for flag in &projection.flags {
            warnings.push(EngineWarning::InfeasibleGoal {
                reason: flag_reason(flag),
            });
        }
    }

    info!(
        goal = ?request.goal.goal_type,
        weekly_rate_pct,
        mean_calories = summary.mean_calories,
        warnings = warnings.len(),
        "computed phase plan"
    );

    Ok(PhasePlan {
        coefficients,
        weekly_rate_pct,
        daily_delta_kcal: delta_kcal,
        days,
        summary,
        projection,
        warnings,
    })
}

/// Compute one day's target, slots, and EA class
///
/// Rest-day baseline calories are TDEE without exercise plus the goal delta,
/// floored at REE; workout days add the session's expenditure on top, and
/// that addition is what feeds the allocator's protein/fat bonus split.
///
/// # Errors
///
/// Returns an error when expenditure estimation or allocation inputs are
/// missing or out of range.
#[allow(clippy::too_many_arguments)]
pub fn compute_day_plan(
    schedule: &DaySchedule,
    activity_level: ActivityLevel,
    metrics: &BodyMetrics,
    goal: &GoalSpec,
    coefficients: &MacroCoefficients,
    overrides: &WeekOverrides,
    measured_zone_table: Option<MeasuredZoneTable>,
    config: &EngineConfig,
) -> EngineResult<(DayPlan, Vec<EngineWarning>)> {
    let breakdown =
        estimate_day_expenditure(metrics, activity_level, schedule, measured_zone_table, config)?;

    let rest_tdee = breakdown.ree + breakdown.neat + breakdown.tef;
    let mass_kg = metrics.required()?.mass_kg;
    let adjustment = adjust_calories(rest_tdee, breakdown.ree, mass_kg, goal, &config.goal_rates)?;
    let workout_bonus = breakdown.exercise_kcal;
    let target_calories = adjustment.target_calories + workout_bonus;

    let basis_mass = coefficients.basis_mass_kg(metrics)?;
    let macros = allocate_macros(
        target_calories,
        basis_mass,
        coefficients,
        workout_bonus,
        &config.macro_allocation,
    );

    let computed = DayNutritionTarget {
        day: schedule.day,
        workout_day: schedule.is_workout_day(),
        breakdown,
        calories: macros.calories,
        protein_g: macros.protein_g,
        carbs_g: macros.carbs_g,
        fat_g: macros.fat_g,
        energy_availability: None,
    };

    let mut warnings = Vec::new();
    let (mut target, override_warning) = reconcile_day(
        &computed,
        overrides.get(schedule.day),
        &config.overrides,
    );
    if let Some(warning) = override_warning {
        warnings.push(warning);
    }

    let lean_mass = metrics.lean_mass_kg();
    target.energy_availability = day_energy_availability(&target, lean_mass);
    let ea_class = target
        .energy_availability
        .map(|ea| classify(ea, &config.energy_availability));

    let slots = distribute_day(&target, schedule, &config.meal_distribution)?;
    // Slot floors can overshoot a small day target; when the computed slots
    // cannot sum back, the divergence is surfaced instead of hidden.
    if let Some(warning) = validate_distribution(&slots, &target, &config.meal_distribution) {
        warnings.push(warning);
    }

    debug!(
        day = %schedule.day,
        calories = target.calories,
        workout_day = target.workout_day,
        "computed day plan"
    );
    Ok((
        DayPlan {
            target,
            slots,
            ea_class,
        },
        warnings,
    ))
}

fn summarize_week(days: &[DayPlan]) -> WeeklySummary {
    let n = days.len().max(1) as f64;
    let ea_values: Vec<f64> =
        days.iter().filter_map(|d| d.target.energy_availability).collect();
    let mean_energy_availability = if ea_values.is_empty() {
        None
    } else {
        Some(ea_values.iter().sum::<f64>() / ea_values.len() as f64)
    };
    WeeklySummary {
        mean_calories: days.iter().map(|d| d.target.calories).sum::<f64>() / n,
        mean_protein_g: days.iter().map(|d| d.target.protein_g).sum::<f64>() / n,
        mean_carbs_g: days.iter().map(|d| d.target.carbs_g).sum::<f64>() / n,
        mean_fat_g: days.iter().map(|d| d.target.fat_g).sum::<f64>() / n,
        mean_energy_availability,
        workout_days: days.iter().filter(|d| d.target.workout_day).count() as u8,
    }
}

fn build_projection(
    request: &PlanRequest,
    weekly_rate_pct: f64,
    config: &EngineConfig,
) -> Option<PhaseProjection> {
    let mass = request.metrics.mass_kg?;
    let bf = request.metrics.body_fat_pct?;
    let current = CompositionSnapshot::from_mass_and_bf(mass, bf);
    Some(project_phase(
        current,
        &request.goal,
        weekly_rate_pct,
        request.horizon_weeks,
        request.composition_targets,
        &config.projection,
    ))
}

fn flag_reason(flag: &FeasibilityFlag) -> String {
    match flag {
        FeasibilityFlag::BodyFatBelowEssential { projected_bf_pct } => format!(
            "projected body fat {projected_bf_pct:.1}% falls below the essential-fat floor"
        ),
        FeasibilityFlag::AggressiveFatLossRate { weekly_rate_pct } => format!(
            "fat loss of {weekly_rate_pct:.2}% of body mass per week exceeds the sustainable range"
        ),
        FeasibilityFlag::AggressiveLeanGainRate { weekly_rate_pct } => format!(
            "lean gain of {weekly_rate_pct:.2}% of body mass per week exceeds what training supports"
        ),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::intelligence::physiological_constants::tolerance::CALORIE_IDENTITY_KCAL;
    use crate::models::body::{MeasuredRee, Sex};
    use crate::models::goals::{GoalType, RateTier};
    use crate::models::schedule::{
        ActivityLevel, TimeOfDayBucket, WorkoutEffort, WorkoutSpec, WorkoutType,
    };
    use chrono::Weekday;

    fn metrics() -> BodyMetrics {
        BodyMetrics {
            sex: Some(Sex::Male),
            age_years: Some(30),
            height_cm: Some(180.0),
            mass_kg: Some(80.0),
            body_fat_pct: Some(18.0),
            measured_ree: None,
        }
    }

    fn request() -> PlanRequest {
        PlanRequest {
            metrics: metrics(),
            goal: GoalSpec::preset(GoalType::Maintenance, RateTier::Moderate),
            schedule: ActivitySchedule::rest_week(ActivityLevel::ModeratelyActive),
            coefficients: None,
            overrides: WeekOverrides::default(),
            measured_zone_table: None,
            horizon_weeks: 12,
            composition_targets: None,
        }
    }

    #[test]
    fn test_plan_covers_whole_week() {
        let plan = compute_phase_plan(&request(), &EngineConfig::default()).unwrap();
        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.days[0].target.day, Weekday::Mon);
        assert_eq!(plan.days[6].target.day, Weekday::Sun);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_every_day_satisfies_calorie_identity() {
        let plan = compute_phase_plan(&request(), &EngineConfig::default()).unwrap();
        for day in &plan.days {
            assert!(day.target.satisfies_identity(CALORIE_IDENTITY_KCAL));
        }
    }

    #[test]
    fn test_workout_day_gets_more_calories() {
        let mut request = request();
        request.schedule.days[2].workouts.push(WorkoutSpec {
            workout_type: WorkoutType::Endurance,
            duration_min: 60,
            effort: WorkoutEffort::Zone(crate::models::schedule::Zone::Z3),
            time_of_day: TimeOfDayBucket::Evening,
            enabled: true,
        });
        let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
        let rest = &plan.days[0].target;
        let workout = &plan.days[2].target;
        assert!(workout.workout_day);
        assert!(workout.calories > rest.calories);
        assert!(workout.protein_g > rest.protein_g);
        assert_eq!(plan.summary.workout_days, 1);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let request = request();
        let config = EngineConfig::default();
        let first = compute_phase_plan(&request, &config).unwrap();
        let second = compute_phase_plan(&request, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_discarded_override_surfaces_as_warning() {
        let mut request = request();
        let day_override = request.overrides.get_mut(Weekday::Mon);
        day_override.calories = Some(2000.0);
        day_override.protein_g = Some(150.0);
        day_override.carbs_g = Some(0.0);
        day_override.fat_g = Some(80.0);

        let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
        assert!(matches!(
            plan.warnings.first(),
            Some(EngineWarning::InconsistentOverride { .. })
        ));
        // The Monday target stayed at its computed values.
        assert!(plan.days[0].target.satisfies_identity(CALORIE_IDENTITY_KCAL));
        assert!((plan.days[0].target.protein_g - plan.days[1].target.protein_g).abs() < 1e-9);
    }

    #[test]
    fn test_measured_ree_respected_end_to_end() {
        let mut request = request();
        request.metrics.measured_ree = Some(MeasuredRee {
            kcal_per_day: 2000.0,
            authoritative: true,
        });
        let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
        assert!((plan.days[0].target.breakdown.ree - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_present_with_body_fat() {
        let plan = compute_phase_plan(&request(), &EngineConfig::default()).unwrap();
        assert!(plan.projection.is_some());

        let mut request = request();
        request.metrics.body_fat_pct = None;
        let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
        assert!(plan.projection.is_none());
    }

    #[test]
    fn test_ea_classified_when_lean_mass_known() {
        let plan = compute_phase_plan(&request(), &EngineConfig::default()).unwrap();
        for day in &plan.days {
            assert!(day.target.energy_availability.is_some());
            assert!(day.ea_class.is_some());
        }
    }
}
