// ABOUTME: End-to-end tests for the phase-plan pipeline through the public API
// ABOUTME: Covers calorie identity, workout bonuses, overrides, slots, and projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Weekday;
use macroplan::config::EngineConfig;
use macroplan::errors::EngineWarning;
use macroplan::intelligence::physiological_constants::tolerance::CALORIE_IDENTITY_KCAL;
use macroplan::intelligence::planner::{compute_phase_plan, PlanRequest};
use macroplan::models::body::{BodyMetrics, Sex};
use macroplan::models::goals::{GoalSpec, GoalType, RateTier};
use macroplan::models::schedule::{
    ActivityLevel, ActivitySchedule, TimeOfDayBucket, WorkoutEffort, WorkoutSpec, WorkoutType, Zone,
};
use macroplan::models::targets::{
    MacroBasis, MacroCoefficients, SlotType, WeekOverrides, WorkoutRelation,
};

// === Fixtures ===

/// Reference male client: 30 y, 180 cm, 80 kg, 18 % body fat
fn male_metrics() -> BodyMetrics {
    BodyMetrics {
        sex: Some(Sex::Male),
        age_years: Some(30),
        height_cm: Some(180.0),
        mass_kg: Some(80.0),
        body_fat_pct: Some(18.0),
        measured_ree: None,
    }
}

fn coefficients(protein: f64, fat: f64) -> MacroCoefficients {
    MacroCoefficients {
        basis: MacroBasis::TotalMass,
        protein_g_per_kg: protein,
        fat_g_per_kg: fat,
    }
}

fn maintenance_request() -> PlanRequest {
    PlanRequest {
        metrics: male_metrics(),
        goal: GoalSpec::preset(GoalType::Maintenance, RateTier::Moderate),
        schedule: ActivitySchedule::rest_week(ActivityLevel::ModeratelyActive),
        coefficients: Some(coefficients(2.0, 0.9)),
        overrides: WeekOverrides::default(),
        measured_zone_table: None,
        horizon_weeks: 12,
        composition_targets: None,
    }
}

fn zone3_workout(bucket: TimeOfDayBucket) -> WorkoutSpec {
    WorkoutSpec {
        workout_type: WorkoutType::Endurance,
        duration_min: 60,
        effort: WorkoutEffort::Zone(Zone::Z3),
        time_of_day: bucket,
        enabled: true,
    }
}

// === Rest-day reference numbers ===

#[test]
fn test_rest_day_reference_targets() {
    let plan = compute_phase_plan(&maintenance_request(), &EngineConfig::default()).unwrap();
    let monday = &plan.days[0].target;

    // Mifflin-St Jeor: 10*80 + 6.25*180 - 5*30 + 5 = 1780 kcal
    assert!((monday.breakdown.ree - 1780.0).abs() < 1e-9);
    // NEAT at moderately active: 1780 * 0.55 = 979; TEF: 178
    assert!((monday.breakdown.neat - 979.0).abs() < 1e-9);
    assert!((monday.breakdown.tef - 178.0).abs() < 1e-9);
    assert!((monday.breakdown.exercise_kcal - 0.0).abs() < 1e-9);

    // Coefficients 2.0/0.9 g/kg over 80 kg
    assert!((monday.protein_g - 160.0).abs() < 1e-9);
    assert!((monday.fat_g - 72.0).abs() < 1e-9);
    // Carb fill toward 2937 kcal maintenance: round((2937-640-648)/4) = 412
    assert!((monday.carbs_g - 412.0).abs() < 1e-9);
}

#[test]
fn test_calorie_identity_holds_for_every_goal() {
    let config = EngineConfig::default();
    for goal_type in [
        GoalType::FatLoss,
        GoalType::MuscleGain,
        GoalType::Recomposition,
        GoalType::Maintenance,
    ] {
        let mut request = maintenance_request();
        request.goal = GoalSpec::preset(goal_type, RateTier::Moderate);
        request.coefficients = None; // exercise the goal-seeded path too
        let plan = compute_phase_plan(&request, &config).unwrap();
        for day in &plan.days {
            assert!(
                day.target.satisfies_identity(CALORIE_IDENTITY_KCAL),
                "identity violated for {goal_type:?} on {}",
                day.target.day
            );
        }
    }
}

#[test]
fn test_fat_loss_moderate_daily_deficit() {
    let mut request = maintenance_request();
    request.goal = GoalSpec::preset(GoalType::FatLoss, RateTier::Moderate);
    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();

    // -0.75 %/wk of 80 kg at 7700 kcal/kg = -660 kcal/day
    assert!((plan.daily_delta_kcal - (-660.0)).abs() < 1e-9);
    assert!((plan.weekly_rate_pct - (-0.75)).abs() < 1e-9);
    // Rest target 2937 - 660 = 2277, well above the REE floor
    let monday = &plan.days[0].target;
    assert!(monday.calories < 2400.0);
    assert!(monday.calories > monday.breakdown.ree);
}

// === Workout days ===

#[test]
fn test_workout_day_bonus_lands_in_protein_and_fat() {
    let mut request = maintenance_request();
    request.schedule.days[2]
        .workouts
        .push(zone3_workout(TimeOfDayBucket::Evening));
    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();

    let rest = &plan.days[0].target;
    let wednesday = &plan.days[2].target;
    assert!(wednesday.workout_day);

    // Zone 3 at 80 kg: 0.12 kcal/kg/min * 80 * 60 = 576 kcal
    assert!((wednesday.breakdown.exercise_kcal - 576.0).abs() < 1e-9);
    // Bonus split: round(576*0.25/4) = 36 g protein, round(576*0.10/9) = 6 g fat
    assert!((wednesday.protein_g - rest.protein_g - 36.0).abs() < 1e-9);
    assert!((wednesday.fat_g - rest.fat_g - 6.0).abs() < 1e-9);
    // The rest of the bonus lands in carbohydrate
    assert!(wednesday.carbs_g > rest.carbs_g);
    assert!(wednesday.calories > rest.calories + 500.0);
}

#[test]
fn test_evening_workout_shapes_meal_slots() {
    let mut request = maintenance_request();
    request.schedule.days[0]
        .workouts
        .push(zone3_workout(TimeOfDayBucket::Evening));
    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();

    let monday = &plan.days[0];
    let post = monday
        .slots
        .iter()
        .find(|s| s.workout_relation == WorkoutRelation::PostWorkout)
        .expect("evening workout should have a post-workout slot");
    let pre = monday
        .slots
        .iter()
        .find(|s| s.workout_relation == WorkoutRelation::PreWorkout)
        .expect("evening workout should have a pre-workout slot");
    assert!(pre.time < post.time);

    // Slots sum back to the day target within the configured tolerances
    let sum_protein: f64 = monday.slots.iter().map(|s| s.protein_g).sum();
    let sum_calories: f64 = monday.slots.iter().map(|s| s.calories).sum();
    assert!((sum_protein - monday.target.protein_g).abs() <= 2.0);
    assert!((sum_calories - monday.target.calories).abs() <= 5.0);
}

#[test]
fn test_rest_day_slot_structure() {
    let plan = compute_phase_plan(&maintenance_request(), &EngineConfig::default()).unwrap();
    let monday = &plan.days[0];

    // Default schedule: 3 meals + 2 snacks
    assert_eq!(monday.slots.len(), 5);
    let snacks: Vec<_> = monday
        .slots
        .iter()
        .filter(|s| s.slot_type == SlotType::Snack)
        .collect();
    assert_eq!(snacks.len(), 2);
    // Snacks are small: each well under any meal's calories
    let min_meal = monday
        .slots
        .iter()
        .filter(|s| s.slot_type == SlotType::Meal)
        .map(|s| s.calories)
        .fold(f64::INFINITY, f64::min);
    for snack in snacks {
        assert!(snack.calories < min_meal);
    }
}

// === Overrides ===

#[test]
fn test_inconsistent_override_discarded_with_warning() {
    let mut request = maintenance_request();
    let monday = request.overrides.get_mut(Weekday::Mon);
    monday.calories = Some(2000.0);
    monday.protein_g = Some(150.0);
    monday.carbs_g = Some(0.0);
    monday.fat_g = Some(80.0);

    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
    // 2000 entered vs 150*4 + 80*9 = 1320 derived: 680 kcal gap, discarded
    match plan.warnings.first() {
        Some(EngineWarning::InconsistentOverride { day, delta_kcal }) => {
            assert_eq!(day, "mon");
            assert!((delta_kcal - 680.0).abs() < 1e-9);
        }
        other => panic!("expected InconsistentOverride, got {other:?}"),
    }
    // Monday fell back to the computed target
    assert!((plan.days[0].target.protein_g - 160.0).abs() < 1e-9);
}

#[test]
fn test_consistent_override_flows_into_slots() {
    let mut request = maintenance_request();
    let monday = request.overrides.get_mut(Weekday::Mon);
    monday.calories = Some(2510.0);
    monday.protein_g = Some(170.0);
    monday.carbs_g = Some(300.0);
    monday.fat_g = Some(70.0);

    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
    assert!(plan.warnings.is_empty());

    let target = &plan.days[0].target;
    assert!((target.calories - 2510.0).abs() < 1e-9);
    // Slots redistribute the overridden day, not the computed one
    let sum_protein: f64 = plan.days[0].slots.iter().map(|s| s.protein_g).sum();
    assert!((sum_protein - 170.0).abs() <= 2.0);
}

// === Determinism ===

#[test]
fn test_pipeline_is_idempotent() {
    let mut request = maintenance_request();
    request.schedule.days[4]
        .workouts
        .push(zone3_workout(TimeOfDayBucket::Morning));
    request.overrides.get_mut(Weekday::Tue).protein_g = Some(175.0);

    let config = EngineConfig::default();
    let first = compute_phase_plan(&request, &config).unwrap();
    let second = compute_phase_plan(&request, &config).unwrap();
    assert_eq!(first, second);
}

// === Coefficient seeding ===

#[test]
fn test_high_body_fat_female_seeds_ffm_basis() {
    let mut request = maintenance_request();
    request.metrics = BodyMetrics {
        sex: Some(Sex::Female),
        age_years: Some(35),
        height_cm: Some(165.0),
        mass_kg: Some(90.0),
        body_fat_pct: Some(38.0),
        measured_ree: None,
    };
    request.goal = GoalSpec::preset(GoalType::FatLoss, RateTier::Moderate);
    request.coefficients = None;

    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
    assert_eq!(plan.coefficients.basis, MacroBasis::FatFreeMass);
    // Protein scales off 55.8 kg lean mass, not 90 kg total
    let monday = &plan.days[0].target;
    assert!((monday.protein_g - (2.2_f64 * 55.8).round()).abs() <= 1.0);
}

// === Projection and energy availability ===

#[test]
fn test_fat_loss_projection_direction() {
    let mut request = maintenance_request();
    request.goal = GoalSpec::preset(GoalType::FatLoss, RateTier::Moderate);
    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();

    let projection = plan.projection.expect("body fat known, projection expected");
    assert!(projection.projected.mass_kg < projection.current.mass_kg);
    assert!(projection.projected.body_fat_pct < projection.current.body_fat_pct);
    // Moderate rate on a lean-enough client raises no feasibility flags
    assert!(projection.flags.is_empty());
}

#[test]
fn test_aggressive_cut_on_lean_client_warns() {
    let mut request = maintenance_request();
    request.metrics.body_fat_pct = Some(8.0);
    request.goal = GoalSpec::preset(GoalType::FatLoss, RateTier::Aggressive);
    request.horizon_weeks = 16;

    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
    assert!(plan
        .warnings
        .iter()
        .any(|w| matches!(w, EngineWarning::InfeasibleGoal { .. })));
}

#[test]
fn test_energy_availability_reported_per_day() {
    let mut request = maintenance_request();
    request.goal = GoalSpec::preset(GoalType::FatLoss, RateTier::Aggressive);
    request.schedule.days[0]
        .workouts
        .push(zone3_workout(TimeOfDayBucket::Morning));

    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
    let monday = &plan.days[0];
    let tuesday = &plan.days[1];

    let monday_ea = monday.target.energy_availability.unwrap();
    let tuesday_ea = tuesday.target.energy_availability.unwrap();
    // Lean mass is 65.6 kg; EA nets out the session's expenditure
    let lean = 80.0 * (1.0 - 0.18);
    assert!((monday_ea - (monday.target.calories - 576.0) / lean).abs() < 1e-9);
    assert!((tuesday_ea - tuesday.target.calories / lean).abs() < 1e-9);
    assert!(monday.ea_class.is_some());

    // The weekly summary carries the mean of the per-day values
    let per_day: Vec<f64> = plan
        .days
        .iter()
        .map(|d| d.target.energy_availability.unwrap())
        .collect();
    let expected_mean = per_day.iter().sum::<f64>() / per_day.len() as f64;
    let summary_ea = plan.summary.mean_energy_availability.unwrap();
    assert!((summary_ea - expected_mean).abs() < 1e-9);
}

#[test]
fn test_summary_ea_absent_without_body_fat() {
    let mut request = maintenance_request();
    request.metrics.body_fat_pct = None;
    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
    assert!(plan.summary.mean_energy_availability.is_none());
}

#[test]
fn test_light_client_many_slots_flags_distribution_mismatch() {
    // A 30 kg client at maintenance seeds a 48 g protein day, while sixteen
    // slots carry 104 g of protein floors. The slots cannot sum back to the
    // day target, and the plan must say so instead of passing silently.
    let mut request = maintenance_request();
    request.metrics = BodyMetrics {
        sex: Some(Sex::Male),
        age_years: Some(30),
        height_cm: Some(150.0),
        mass_kg: Some(30.0),
        body_fat_pct: Some(18.0),
        measured_ree: None,
    };
    request.coefficients = None;
    request.schedule = ActivitySchedule::rest_week(ActivityLevel::Sedentary);
    for day in &mut request.schedule.days {
        day.meal_count = 8;
        day.snack_count = 8;
    }

    let plan = compute_phase_plan(&request, &EngineConfig::default()).unwrap();
    assert!(plan
        .warnings
        .iter()
        .any(|w| matches!(w, EngineWarning::DistributionMismatch { .. })));

    // The day target itself is untouched by the slot floors
    let monday = &plan.days[0];
    assert!(monday.target.satisfies_identity(CALORIE_IDENTITY_KCAL));
    assert!((monday.target.protein_g - 48.0).abs() < 1e-9);
    let slot_protein: f64 = monday.slots.iter().map(|s| s.protein_g).sum();
    assert!(slot_protein > monday.target.protein_g);
}

#[test]
fn test_missing_metrics_fail_fast() {
    let mut request = maintenance_request();
    request.metrics.height_cm = None;
    let result = compute_phase_plan(&request, &EngineConfig::default());
    assert!(result.is_err());
    let error = result.unwrap_err();
    assert!(error.to_string().contains("height"));
}
