// ABOUTME: Exercise effects on the insulin wave before and after a meal
// ABOUTME: Pre-meal workout, postprandial activity with proximity and energy boosts, NEAT and steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::tier_at_least;
use crate::config::wave::ActivityConfig;
use mealwave_core::models::{ClockTime, Workout, WorkoutKind};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: f64 = 1440.0;

/// Activity bonuses for one meal (negative shortens the wave)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityBreakdown {
    /// Workout before the meal
    pub workout_bonus: f64,
    /// Best activity started within the postprandial window
    pub postprandial_bonus: f64,
    /// Household and incidental movement
    pub neat_bonus: f64,
    /// Step count
    pub steps_bonus: f64,
}

impl ActivityBreakdown {
    /// Sum of all activity bonuses
    #[must_use]
    pub fn total(&self) -> f64 {
        self.workout_bonus + self.postprandial_bonus + self.neat_bonus + self.steps_bonus
    }

    /// Whether any activity shortened the wave
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.total() < 0.0
    }
}

/// Inputs for the activity calculation
#[derive(Debug, Clone, Copy)]
pub struct ActivityInputs<'a> {
    /// Meal start
    pub meal_time: ClockTime,
    /// Workouts of the day
    pub workouts: &'a [Workout],
    /// Household minutes
    pub household_minutes: Option<f64>,
    /// Step count
    pub steps: Option<u32>,
    /// Body weight in kg
    pub weight_kg: Option<f64>,
}

/// Minutes from meal start to workout start, wrapping across midnight
fn gap_after_meal(meal_time: ClockTime, workout: &Workout) -> f64 {
    let gap = meal_time.minutes_until(workout.time);
    if gap < -MINUTES_PER_DAY / 2.0 {
        gap + MINUTES_PER_DAY
    } else {
        gap
    }
}

fn intensity_minutes(workout: &Workout, config: &ActivityConfig) -> f64 {
    workout
        .high_intensity_minutes()
        .mul_add(config.intensity_zone_weight, workout.low_intensity_minutes())
}

/// Pre-meal workout bonus from the summed intensity minutes of earlier workouts
#[must_use]
pub fn workout_bonus(meal_time: ClockTime, workouts: &[Workout], config: &ActivityConfig) -> f64 {
    let minutes: f64 = workouts
        .iter()
        .filter(|workout| gap_after_meal(meal_time, workout) < 0.0)
        .map(|workout| intensity_minutes(workout, config))
        .sum();
    tier_at_least(minutes, &config.workout_tiers)
}

fn kind_multiplier(kind: WorkoutKind, config: &ActivityConfig) -> f64 {
    match kind {
        WorkoutKind::Cardio => config.cardio_multiplier,
        WorkoutKind::Strength => config.strength_multiplier,
        WorkoutKind::Hobby => config.hobby_multiplier,
    }
}

fn proximity_boost(gap_min: f64, config: &ActivityConfig) -> f64 {
    config
        .proximity_boosts
        .iter()
        .find(|(max_gap, _)| gap_min <= *max_gap)
        .map_or(config.late_proximity_boost, |(_, boost)| *boost)
}

fn energy_boost(workout: &Workout, weight_kg: f64, config: &ActivityConfig) -> f64 {
    let intensity = if workout.high_intensity_minutes() > workout.low_intensity_minutes() {
        config.high_intensity_energy_factor
    } else {
        1.0
    };
    let kcal = workout.total_minutes()
        * config.kcal_per_minute
        * (weight_kg / config.reference_weight_kg)
        * intensity;
    config
        .energy_boosts
        .iter()
        .find(|(threshold, _)| kcal >= *threshold)
        .map_or(1.0, |(_, boost)| *boost)
}

fn base_postprandial(workout: &Workout, config: &ActivityConfig) -> Option<f64> {
    let (high_min, high_bonus) = config.postprandial_high;
    let (moderate_min, moderate_bonus) = config.postprandial_moderate;
    let (light_min, light_bonus) = config.postprandial_light;
    let total = workout.total_minutes();

    if workout.high_intensity_minutes() >= high_min {
        Some(high_bonus)
    } else if total >= moderate_min {
        Some(moderate_bonus)
    } else if total >= light_min {
        Some(light_bonus)
    } else {
        None
    }
}

/// Strongest (most negative) bonus among activities started inside the postprandial window
#[must_use]
pub fn postprandial_bonus(
    meal_time: ClockTime,
    workouts: &[Workout],
    weight_kg: f64,
    config: &ActivityConfig,
) -> f64 {
    workouts
        .iter()
        .filter_map(|workout| {
            let gap = gap_after_meal(meal_time, workout);
            if !(0.0..=config.postprandial_window_min).contains(&gap) {
                return None;
            }
            let base = base_postprandial(workout, config)?;
            let scaled = base
                * kind_multiplier(workout.kind, config)
                * proximity_boost(gap, config)
                * energy_boost(workout, weight_kg, config);
            Some(scaled.max(config.postprandial_floor))
        })
        .fold(0.0, f64::min)
}

/// All activity bonuses for a meal
#[must_use]
pub fn activity_breakdown(inputs: &ActivityInputs<'_>, config: &ActivityConfig) -> ActivityBreakdown {
    let weight = inputs.weight_kg.unwrap_or(config.reference_weight_kg);
    ActivityBreakdown {
        workout_bonus: workout_bonus(inputs.meal_time, inputs.workouts, config),
        postprandial_bonus: postprandial_bonus(inputs.meal_time, inputs.workouts, weight, config),
        neat_bonus: inputs
            .household_minutes
            .map_or(0.0, |minutes| tier_at_least(minutes, &config.neat_tiers)),
        steps_bonus: inputs
            .steps
            .map_or(0.0, |steps| tier_at_least(f64::from(steps), &config.step_tiers)),
    }
}
