// ABOUTME: Weekly activity schedule models driving per-day target computation
// ABOUTME: ActivityLevel, Zone, WorkoutSpec, DaySchedule, and ActivitySchedule definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macroplan

use crate::errors::{EngineError, EngineResult};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Habitual non-exercise activity level for NEAT estimation
///
/// Multipliers are configured in `ActivityFactorsConfig`; exercise energy is
/// added separately per workout, so these describe everyday movement only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (desk work, little walking)
    Sedentary,
    /// Lightly active (some walking, standing work)
    LightlyActive,
    /// Moderately active (regular daily movement)
    ModeratelyActive,
    /// Very active (physical job or high daily step count)
    VeryActive,
}

/// Discretized exercise-intensity bucket used for calorie-per-minute lookup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Zone {
    /// Zone 1 - recovery effort
    Z1,
    /// Zone 2 - aerobic endurance
    Z2,
    /// Zone 3 - tempo
    Z3,
    /// Zone 4 - threshold
    Z4,
    /// Zone 5 - maximal effort
    Z5,
}

impl Zone {
    /// Index into a five-entry calories-per-minute table
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Z1 => 0,
            Self::Z2 => 1,
            Self::Z3 => 2,
            Self::Z4 => 3,
            Self::Z5 => 4,
        }
    }
}

/// Workout modality, used with intensity to infer a typical zone
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Resistance training
    Strength,
    /// Steady-state cardio
    Endurance,
    /// Interval or HIIT session
    Interval,
    /// Team or racket sport
    Sport,
    /// Mobility, yoga, stretching
    Mobility,
}

/// Subjective workout intensity when no explicit zone is recorded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutIntensity {
    /// Low intensity, conversational effort
    Low,
    /// Moderate intensity
    Moderate,
    /// High intensity
    High,
}

/// How a workout's energy zone is determined
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutEffort {
    /// An explicitly chosen physiological zone
    Zone(Zone),
    /// Intensity fallback, mapped to a typical zone via the workout type
    Intensity(WorkoutIntensity),
}

/// Coarse time-of-day bucket for workout placement relative to meals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDayBucket {
    /// Before breakfast (~06:00)
    EarlyMorning,
    /// Mid-morning (~09:00)
    Morning,
    /// Around lunch (~12:00)
    Midday,
    /// Mid-afternoon (~15:30)
    Afternoon,
    /// After work (~18:30)
    Evening,
}

impl TimeOfDayBucket {
    /// Representative clock time used to relate meal slots to the workout
    #[must_use]
    pub fn representative_time(self) -> NaiveTime {
        let (h, m) = match self {
            Self::EarlyMorning => (6, 0),
            Self::Morning => (9, 0),
            Self::Midday => (12, 0),
            Self::Afternoon => (15, 30),
            Self::Evening => (18, 30),
        };
        NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
    }
}

/// A single scheduled workout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSpec {
    /// Workout modality
    pub workout_type: WorkoutType,
    /// Duration in minutes
    pub duration_min: u32,
    /// Explicit zone or intensity fallback
    pub effort: WorkoutEffort,
    /// When during the day the workout happens
    pub time_of_day: TimeOfDayBucket,
    /// Disabled workouts are kept in the schedule but ignored by computation
    pub enabled: bool,
}

/// One day of the weekly schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySchedule {
    /// Day of week this entry describes
    pub day: Weekday,
    /// Wake time
    pub wake: NaiveTime,
    /// Sleep time
    pub sleep: NaiveTime,
    /// Scheduled workouts (may be empty)
    pub workouts: Vec<WorkoutSpec>,
    /// Number of meals
    pub meal_count: u8,
    /// Number of snacks
    pub snack_count: u8,
}

impl DaySchedule {
    /// A day with at least one enabled workout is a workout day
    #[must_use]
    pub fn is_workout_day(&self) -> bool {
        self.workouts.iter().any(|w| w.enabled)
    }

    /// Enabled workouts only
    pub fn enabled_workouts(&self) -> impl Iterator<Item = &WorkoutSpec> {
        self.workouts.iter().filter(|w| w.enabled)
    }

    /// Time bucket of the first enabled workout, if any
    #[must_use]
    pub fn workout_bucket(&self) -> Option<TimeOfDayBucket> {
        self.enabled_workouts().next().map(|w| w.time_of_day)
    }

    /// Validate slot counts and the waking window
    ///
    /// # Errors
    ///
    /// Returns an error when the day has no meals, an implausible number of
    /// slots, or a non-positive waking window.
    pub fn validate(&self) -> EngineResult<()> {
        if self.meal_count == 0 {
            return Err(EngineError::invalid_input("each day needs at least one meal"));
        }
        if self.meal_count > 8 || self.snack_count > 8 {
            return Err(EngineError::out_of_range(
                "meal and snack counts must each be at most 8",
            ));
        }
        if self.sleep <= self.wake {
            return Err(EngineError::invalid_input(
                "sleep time must be after wake time",
            ));
        }
        for workout in &self.workouts {
            if workout.duration_min == 0 || workout.duration_min > 360 {
                return Err(EngineError::out_of_range(
                    "workout duration must be between 1 and 360 minutes",
                ));
            }
        }
        Ok(())
    }
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self {
            day: Weekday::Mon,
            wake: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
            sleep: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN),
            workouts: Vec::new(),
            meal_count: 3,
            snack_count: 2,
        }
    }
}

/// Weekly activity schedule, one entry per day of week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivitySchedule {
    /// Habitual non-exercise activity level
    pub activity_level: ActivityLevel,
    /// Seven day entries, Monday first
    pub days: Vec<DaySchedule>,
}

impl ActivitySchedule {
    /// A default schedule (seven rest days) at the given activity level
    #[must_use]
    pub fn rest_week(activity_level: ActivityLevel) -> Self {
        let days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(|day| DaySchedule {
            day,
            ..DaySchedule::default()
        })
        .collect();
        Self {
            activity_level,
            days,
        }
    }

    /// Validate the week: exactly seven distinct days, each internally valid
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed week or any invalid day entry.
    pub fn validate(&self) -> EngineResult<()> {
        if self.days.len() != 7 {
            return Err(EngineError::invalid_input(
                "a schedule must contain exactly seven days",
            ));
        }
        for day in &self.days {
            day.validate()?;
        }
        let mut seen = [false; 7];
        for day in &self.days {
            let idx = day.day.num_days_from_monday() as usize;
            if seen[idx] {
                return Err(EngineError::invalid_input(
                    "schedule contains a duplicate day of week",
                ));
            }
            seen[idx] = true;
        }
        Ok(())
    }
}
