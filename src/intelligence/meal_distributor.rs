// ABOUTME: Meal-slot distributor: splits a day target across timed meal and snack slots
// ABOUTME: Applies workout-timing multipliers, slot floors, and residual repair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Meal-Slot Distribution
//!
//! Splits a day's macro targets across meal and snack slots spaced evenly
//! through the waking window. Snacks take a fixed small calorie share; meals
//! split the remainder equally. On workout days the slot straddling the
//! workout gets macro-specific timing multipliers (more protein and
//! carbohydrate after training, more carbohydrate and less fat before), then
//! each macro's weights are renormalized so the day totals are preserved.
//!
//! Grams are rounded per slot and any rounding residual is folded into the
//! largest slot, so recomputed distributions sum back to the day target
//! whenever the per-slot floors fit inside it. When the floors overshoot a
//! small day target the sums cannot be restored; [`validate_distribution`]
//! reports the divergence, for computed and user-edited slot sets alike,
//! without silently rewriting slots.

use chrono::{Duration, NaiveTime};
use tracing::debug;

use crate::config::{MealDistributionConfig, SlotFloors, TimingMultipliers};
use crate::errors::{EngineError, EngineResult, EngineWarning};
use crate::intelligence::physiological_constants::energy::KCAL_PER_G_CARBS;
use crate::models::schedule::DaySchedule;
use crate::models::targets::{
    macro_calories, DayNutritionTarget, MealSlotTarget, SlotType, WorkoutRelation,
};

/// Distribute a day target across the schedule's meal and snack slots
///
/// Slot times are spaced evenly through the waking window; snacks are placed
/// at evenly spread interior positions so the first and last slots are meals.
///
/// Per-slot floors are always honored, so a small day target spread over many
/// slots can yield slots that sum above the day total. Callers that need the
/// sum invariant should check the result with [`validate_distribution`].
///
/// # Errors
///
/// Returns an error when the schedule has no meal slots.
pub fn distribute_day(
    target: &DayNutritionTarget,
    schedule: &DaySchedule,
    config: &MealDistributionConfig,
) -> EngineResult<Vec<MealSlotTarget>> {
    let meals = usize::from(schedule.meal_count);
    let snacks = usize::from(schedule.snack_count);
    let total = meals + snacks;
    if meals == 0 {
        return Err(EngineError::invalid_input(
            "cannot distribute a day without meal slots",
        ));
    }

    let times = slot_times(schedule.wake, schedule.sleep, total);
    let snack_flags = snack_positions(total, snacks);

    // Base calorie weights: fixed snack share, meals split the remainder.
    let snack_share = config.snack_base_share;
    let meal_share = snack_share.mul_add(-(snacks as f64), 1.0) / meals as f64;
    let base: Vec<f64> = snack_flags
        .iter()
        .map(|&is_snack| if is_snack { snack_share } else { meal_share })
        .collect();

    let relations = workout_relations(target, schedule, &times);

    let protein = distribute_macro(target.protein_g, &base, &relations, config, |m| m.protein);
    let carbs = distribute_macro(target.carbs_g, &base, &relations, config, |m| m.carbs);
    let fat = distribute_macro(target.fat_g, &base, &relations, config, |m| m.fat);

    let mut slots = Vec::with_capacity(total);
    let mut meal_no = 0;
    let mut snack_no = 0;
    for i in 0..total {
        let slot_type = if snack_flags[i] {
            snack_no += 1;
            SlotType::Snack
        } else {
            meal_no += 1;
            SlotType::Meal
        };
        let label = match slot_type {
            SlotType::Meal => format!("Meal {meal_no}"),
            SlotType::Snack => format!("Snack {snack_no}"),
        };
        slots.push(MealSlotTarget {
            label,
            slot_type,
            time: times[i],
            calories: macro_calories(protein[i], carbs[i], fat[i]),
            protein_g: protein[i],
            carbs_g: carbs[i],
            fat_g: fat[i],
            workout_relation: relations[i],
            rationale: rationale_for(slot_type, relations[i]),
        });
    }

    apply_floors(&mut slots, config);
    repair_residual(&mut slots, target);

    debug!(
        day = %target.day,
        slots = slots.len(),
        workout_day = target.workout_day,
        "distributed day target across meal slots"
    );
    Ok(slots)
}

/// Check an existing distribution against its day target
///
/// User-edited slots are never repaired automatically; a divergence beyond the
/// configured tolerances produces a warning asking for explicit recalculation.
#[must_use]
pub fn validate_distribution(
    slots: &[MealSlotTarget],
    target: &DayNutritionTarget,
    config: &MealDistributionConfig,
) -> Option<EngineWarning> {
    let sum_calories: f64 = slots.iter().map(|s| s.calories).sum();
    let sum_protein: f64 = slots.iter().map(|s| s.protein_g).sum();
    let sum_carbs: f64 = slots.iter().map(|s| s.carbs_g).sum();
    let sum_fat: f64 = slots.iter().map(|s| s.fat_g).sum();

    let delta_kcal = (sum_calories - target.calories).abs();
    let delta_grams = (sum_protein - target.protein_g)
        .abs()
        .max((sum_carbs - target.carbs_g).abs())
        .max((sum_fat - target.fat_g).abs());

    if delta_kcal > config.sum_tolerance_kcal || delta_grams > config.sum_tolerance_g {
        return Some(EngineWarning::DistributionMismatch {
            day: target.day.to_string().to_lowercase(),
            delta_kcal,
            delta_grams,
        });
    }
    None
}

/// Evenly spaced slot times across the waking window
///
/// Slot `i` of `n` lands at `wake + (i+1) * window / (n+1)`, leaving margin
/// after waking and before sleep.
fn slot_times(wake: NaiveTime, sleep: NaiveTime, total: usize) -> Vec<NaiveTime> {
    let window_secs = (sleep - wake).num_seconds().max(0);
    let step = window_secs / (total as i64 + 1);
    (0..total)
        .map(|i| wake + Duration::seconds(step * (i as i64 + 1)))
        .collect()
}

/// Snack flags per slot index, snacks spread across interior positions
///
/// Snack `k` of `s` sits at index `(k+1) * total / (s+1)`. Because there is
/// always at least one meal, the resulting indices are distinct and start past
/// index zero, so the day always begins with a meal.
fn snack_positions(total: usize, snacks: usize) -> Vec<bool> {
    let mut flags = vec![false; total];
    for k in 0..snacks {
        let idx = (k + 1) * total / (snacks + 1);
        flags[idx.min(total - 1)] = true;
    }
    flags
}

fn workout_relations(
    target: &DayNutritionTarget,
    schedule: &DaySchedule,
    times: &[NaiveTime],
) -> Vec<WorkoutRelation> {
    let mut relations = vec![WorkoutRelation::None; times.len()];
    if !target.workout_day {
        return relations;
    }
    let Some(bucket) = schedule.workout_bucket() else {
        return relations;
    };
    let workout_time = bucket.representative_time();

    let post = times
        .iter()
        .position(|&t| t >= workout_time)
        .unwrap_or(times.len());
    if post < times.len() {
        relations[post] = WorkoutRelation::PostWorkout;
        if post > 0 {
            relations[post - 1] = WorkoutRelation::PreWorkout;
        }
    } else if let Some(last) = relations.last_mut() {
        // Workout after the final slot: the last slot still fuels it.
        *last = WorkoutRelation::PreWorkout;
    }
    relations
}

/// Weight, multiply, normalize, and round one macro across the slots
fn distribute_macro(
    day_grams: f64,
    base: &[f64],
    relations: &[WorkoutRelation],
    config: &MealDistributionConfig,
    pick: impl Fn(&TimingMultipliers) -> f64,
) -> Vec<f64> {
    let weights: Vec<f64> = base
        .iter()
        .zip(relations)
        .map(|(&w, relation)| match relation {
            WorkoutRelation::PostWorkout => w * pick(&config.post_workout),
            WorkoutRelation::PreWorkout => w * pick(&config.pre_workout),
            WorkoutRelation::None => w,
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return vec![0.0; base.len()];
    }
    weights
        .iter()
        .map(|w| (day_grams * w / sum).round())
        .collect()
}

/// Raise slots to their per-type floors, filling calorie shortfalls with carbs
fn apply_floors(slots: &mut [MealSlotTarget], config: &MealDistributionConfig) {
    for slot in &mut *slots {
        let floors: &SlotFloors = match slot.slot_type {
            SlotType::Meal => &config.meal_floors,
            SlotType::Snack => &config.snack_floors,
        };
        slot.protein_g = slot.protein_g.max(floors.min_protein_g);
        slot.fat_g = slot.fat_g.max(floors.min_fat_g);
        let mut calories = macro_calories(slot.protein_g, slot.carbs_g, slot.fat_g);
        if calories < floors.min_kcal {
            slot.carbs_g += ((floors.min_kcal - calories) / KCAL_PER_G_CARBS).ceil();
            calories = macro_calories(slot.protein_g, slot.carbs_g, slot.fat_g);
        }
        slot.calories = calories;
    }
}

/// Fold per-macro rounding residuals into the largest slot
///
/// Keeps computed distributions summing exactly back to the day target; the
/// largest slot absorbs a few grams without noticeable distortion. Residuals
/// never push a macro negative.
fn repair_residual(slots: &mut [MealSlotTarget], target: &DayNutritionTarget) {
    let Some(largest) = (0..slots.len()).max_by(|&a, &b| {
        slots[a]
            .calories
            .partial_cmp(&slots[b].calories)
            .unwrap_or(std::cmp::Ordering::Equal)
    }) else {
        return;
    };

    let residual_p = target.protein_g - slots.iter().map(|s| s.protein_g).sum::<f64>();
    let residual_c = target.carbs_g - slots.iter().map(|s| s.carbs_g).sum::<f64>();
    let residual_f = target.fat_g - slots.iter().map(|s| s.fat_g).sum::<f64>();

    let slot = &mut slots[largest];
    slot.protein_g = (slot.protein_g + residual_p).max(0.0);
    slot.carbs_g = (slot.carbs_g + residual_c).max(0.0);
    slot.fat_g = (slot.fat_g + residual_f).max(0.0);
    slot.calories = macro_calories(slot.protein_g, slot.carbs_g, slot.fat_g);
}

fn rationale_for(slot_type: SlotType, relation: WorkoutRelation) -> String {
    match (slot_type, relation) {
        (_, WorkoutRelation::PostWorkout) => {
            "post-workout recovery: protein and carbohydrate emphasis".into()
        }
        (_, WorkoutRelation::PreWorkout) => {
            "pre-workout fueling: carbohydrate emphasis, lighter fat".into()
        }
        (SlotType::Meal, WorkoutRelation::None) => "even share of the day's meals".into(),
        (SlotType::Snack, WorkoutRelation::None) => "light snack between meals".into(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::models::schedule::{
        TimeOfDayBucket, WorkoutEffort, WorkoutIntensity, WorkoutSpec, WorkoutType,
    };
    use crate::models::targets::TdeeBreakdown;
    use chrono::Weekday;

    fn target(workout_day: bool, protein: f64, carbs: f64, fat: f64) -> DayNutritionTarget {
        DayNutritionTarget {
            day: Weekday::Mon,
            workout_day,
            breakdown: TdeeBreakdown {
                ree: 1780.0,
                neat: 623.0,
                tef: 178.0,
                exercise_kcal: if workout_day { 500.0 } else { 0.0 },
            },
            calories: macro_calories(protein, carbs, fat),
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
            energy_availability: None,
        }
    }

    fn evening_workout_schedule() -> DaySchedule {
        DaySchedule {
            workouts: vec![WorkoutSpec {
                workout_type: WorkoutType::Strength,
                duration_min: 60,
                effort: WorkoutEffort::Intensity(WorkoutIntensity::Moderate),
                time_of_day: TimeOfDayBucket::Evening,
                enabled: true,
            }],
            ..DaySchedule::default()
        }
    }

    #[test]
    fn test_rest_day_slots_sum_to_target() {
        let target = target(false, 160.0, 434.0, 72.0);
        let slots =
            distribute_day(&target, &DaySchedule::default(), &MealDistributionConfig::default())
                .unwrap();
        assert_eq!(slots.len(), 5);
        assert!(validate_distribution(&slots, &target, &MealDistributionConfig::default())
            .is_none());
        let protein: f64 = slots.iter().map(|s| s.protein_g).sum();
        assert!((protein - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_and_last_slots_are_meals() {
        let target = target(false, 160.0, 434.0, 72.0);
        let slots =
            distribute_day(&target, &DaySchedule::default(), &MealDistributionConfig::default())
                .unwrap();
        assert_eq!(slots.first().unwrap().slot_type, SlotType::Meal);
        assert_eq!(slots.last().unwrap().slot_type, SlotType::Meal);
        let snack_count = slots.iter().filter(|s| s.slot_type == SlotType::Snack).count();
        assert_eq!(snack_count, 2);
    }

    #[test]
    fn test_slot_times_inside_waking_window() {
        let schedule = DaySchedule::default();
        let target = target(false, 160.0, 434.0, 72.0);
        let slots =
            distribute_day(&target, &schedule, &MealDistributionConfig::default()).unwrap();
        for slot in &slots {
            assert!(slot.time > schedule.wake);
            assert!(slot.time < schedule.sleep);
        }
        for pair in slots.windows(2) {
            assert!(pair[0].time < pair[1].time);
        }
    }

    #[test]
    fn test_evening_workout_marks_pre_and_post_slots() {
        let schedule = evening_workout_schedule();
        let target = target(true, 191.0, 500.0, 78.0);
        let slots =
            distribute_day(&target, &schedule, &MealDistributionConfig::default()).unwrap();

        let post = slots
            .iter()
            .find(|s| s.workout_relation == WorkoutRelation::PostWorkout)
            .unwrap();
        let pre = slots
            .iter()
            .find(|s| s.workout_relation == WorkoutRelation::PreWorkout)
            .unwrap();
        assert!(pre.time < post.time);
        assert!(post.time >= TimeOfDayBucket::Evening.representative_time());

        // Post-workout slot carries more protein than a comparable plain slot.
        let plain_meal = slots
            .iter()
            .find(|s| {
                s.slot_type == SlotType::Meal && s.workout_relation == WorkoutRelation::None
            })
            .unwrap();
        if post.slot_type == SlotType::Meal {
            assert!(post.protein_g > plain_meal.protein_g);
        }
    }

    #[test]
    fn test_workout_day_distribution_still_sums() {
        let schedule = evening_workout_schedule();
        let target = target(true, 191.0, 500.0, 78.0);
        let config = MealDistributionConfig::default();
        let slots = distribute_day(&target, &schedule, &config).unwrap();
        assert!(validate_distribution(&slots, &target, &config).is_none());
    }

    #[test]
    fn test_snack_floors_apply_on_tiny_targets() {
        let target = target(false, 60.0, 80.0, 30.0);
        let config = MealDistributionConfig::default();
        let slots = distribute_day(&target, &DaySchedule::default(), &config).unwrap();
        for slot in &slots {
            let floors = match slot.slot_type {
                SlotType::Meal => &config.meal_floors,
                SlotType::Snack => &config.snack_floors,
            };
            // The residual-repair slot may sit above its floor; no slot below.
            assert!(slot.protein_g >= floors.min_protein_g || slot.calories >= floors.min_kcal);
        }
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let schedule = evening_workout_schedule();
        let target = target(true, 191.0, 500.0, 78.0);
        let config = MealDistributionConfig::default();
        let first = distribute_day(&target, &schedule, &config).unwrap();
        let second = distribute_day(&target, &schedule, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_floor_overshoot_on_small_target_is_flagged() {
        // A light client's maintenance day spread over the maximum slot count:
        // protein floors alone (8 * 10 + 8 * 3 = 104 g) exceed the 48 g day
        // target, so the slots cannot sum back and validation must say so.
        let target = target(false, 48.0, 246.0, 27.0);
        let schedule = DaySchedule { meal_count: 8, snack_count: 8, ..DaySchedule::default() };
        let config = MealDistributionConfig::default();
        let slots = distribute_day(&target, &schedule, &config).unwrap();
        assert_eq!(slots.len(), 16);

        let slot_protein: f64 = slots.iter().map(|s| s.protein_g).sum();
        assert!(slot_protein > target.protein_g + config.sum_tolerance_g);
        match validate_distribution(&slots, &target, &config) {
            Some(EngineWarning::DistributionMismatch { delta_kcal, delta_grams, .. }) => {
                assert!(delta_grams > config.sum_tolerance_g);
                assert!(delta_kcal > config.sum_tolerance_kcal);
            }
            other => panic!("expected DistributionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_edited_slots_flag_mismatch_without_repair() {
        let target = target(false, 160.0, 434.0, 72.0);
        let config = MealDistributionConfig::default();
        let mut slots = distribute_day(&target, &DaySchedule::default(), &config).unwrap();
        slots[0].protein_g += 40.0;
        slots[0].calories = macro_calories(slots[0].protein_g, slots[0].carbs_g, slots[0].fat_g);
        match validate_distribution(&slots, &target, &config) {
            Some(EngineWarning::DistributionMismatch { delta_grams, .. }) => {
                assert!((delta_grams - 40.0).abs() < 1e-9);
            }
            other => panic!("expected DistributionMismatch, got {other:?}"),
        }
    }
}
