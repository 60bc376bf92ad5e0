// ABOUTME: Override reconciler: merges manual day edits onto computed targets
// ABOUTME: Enforces the calorie-consistency gate and invalidates stale overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

//! Override Reconciliation
//!
//! Users can pin a day's calories and macro grams. Only a full override (all
//! four values) that passes the consistency gate survives reconciliation: if
//! the entered calories disagree with the macro-derived calories by more than
//! the configured tolerance, the override is discarded wholesale and a
//! warning is emitted rather than silently repairing the user's numbers.
//! Partial overrides are likewise discarded; the interactive edit helpers
//! ([`apply_calorie_edit`], [`apply_macro_edit`]) are how a single-field
//! change becomes a complete, identity-satisfying state before it is stored.

use chrono::Weekday;
use tracing::{debug, warn};

use crate::config::OverrideConfig;
use crate::errors::EngineWarning;
use crate::intelligence::physiological_constants::energy::{
    KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};
use crate::models::targets::{macro_calories, DayNutritionTarget, DayOverride, WeekOverrides};

/// Upstream change that makes stored overrides stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideInvalidation {
    /// Body metrics changed (mass, composition, measured REE)
    ProfileChanged,
    /// Goal type, rate tier, or bias changed
    GoalChanged,
    /// Macro coefficients or basis changed
    CoefficientsChanged,
    /// One day's schedule changed (workouts, meal counts, wake/sleep)
    DayScheduleChanged(Weekday),
}

/// Pure reducer that clears overrides invalidated by an upstream change
///
/// Profile, goal, and coefficient changes shift every day's baseline, so all
/// seven overrides are dropped. A single-day schedule change only drops that
/// day's override.
#[must_use]
pub fn invalidate_overrides(
    mut overrides: WeekOverrides,
    trigger: OverrideInvalidation,
) -> WeekOverrides {
    match trigger {
        OverrideInvalidation::ProfileChanged
        | OverrideInvalidation::GoalChanged
        | OverrideInvalidation::CoefficientsChanged => {
            overrides.days = [DayOverride::default(); 7];
        }
        OverrideInvalidation::DayScheduleChanged(day) => {
            *overrides.get_mut(day) = DayOverride::default();
        }
    }
    overrides
}

/// Reconcile a day override against the computed target
///
/// Returns the reconciled target plus a warning when a full override failed
/// the consistency gate. Partial overrides are dropped quietly; they can only
/// arise from stale stored state, since the interactive edit helpers always
/// produce complete values.
#[must_use]
pub fn reconcile_day(
    target: &DayNutritionTarget,
    day_override: &DayOverride,
    config: &OverrideConfig,
) -> (DayNutritionTarget, Option<EngineWarning>) {
    if day_override.is_empty() {
        return (target.clone(), None);
    }
    if !day_override.is_full() {
        debug!(day = %target.day, "discarding partial day override");
        return (target.clone(), None);
    }
    reconcile_full(target, day_override, config)
}

fn reconcile_full(
    target: &DayNutritionTarget,
    day_override: &DayOverride,
    config: &OverrideConfig,
) -> (DayNutritionTarget, Option<EngineWarning>) {
    // is_full() guarantees all four values are present
    let (Some(calories), Some(protein), Some(carbs), Some(fat)) = (
        day_override.calories,
        day_override.protein_g,
        day_override.carbs_g,
        day_override.fat_g,
    ) else {
        return (target.clone(), None);
    };

    let derived = macro_calories(protein, carbs, fat);
    let delta_kcal = (calories - derived).abs();
    if delta_kcal > config.consistency_tolerance_kcal {
        warn!(
            day = %target.day,
            entered = calories,
            derived,
            delta_kcal,
            "day override failed the calorie-consistency gate and was discarded"
        );
        return (
            target.clone(),
            Some(EngineWarning::InconsistentOverride {
                day: target.day.to_string().to_lowercase(),
                delta_kcal,
            }),
        );
    }

    let mut reconciled = target.clone();
    reconciled.protein_g = protein;
    reconciled.carbs_g = carbs;
    reconciled.fat_g = fat;
    // Grams verbatim, calories re-derived: a small entered-vs-derived gap
    // inside the tolerance resolves in favor of the grams.
    reconciled.calories = derived;
    (reconciled, None)
}

/// Edit a day target's calories in place, holding protein and fat
///
/// Carbohydrate is the balancing macro; the stored calories are re-derived
/// from the resulting grams so the identity holds after rounding.
pub fn apply_calorie_edit(target: &mut DayNutritionTarget, new_calories: f64) {
    target.carbs_g = solve_carbs(new_calories, target.protein_g, target.fat_g);
    target.calories = macro_calories(target.protein_g, target.carbs_g, target.fat_g);
}

/// Macro field addressed by [`apply_macro_edit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroField {
    /// Protein grams
    Protein,
    /// Carbohydrate grams
    Carbs,
    /// Fat grams
    Fat,
}

/// Edit one macro gram value in place and re-derive calories
pub fn apply_macro_edit(target: &mut DayNutritionTarget, field: MacroField, grams: f64) {
    match field {
        MacroField::Protein => target.protein_g = grams,
        MacroField::Carbs => target.carbs_g = grams,
        MacroField::Fat => target.fat_g = grams,
    }
    target.calories = macro_calories(target.protein_g, target.carbs_g, target.fat_g);
}

fn solve_carbs(calories: f64, protein_g: f64, fat_g: f64) -> f64 {
    let remaining =
        calories - protein_g.mul_add(KCAL_PER_G_PROTEIN, fat_g * KCAL_PER_G_FAT);
    (remaining / KCAL_PER_G_CARBS).round().max(0.0)
}
