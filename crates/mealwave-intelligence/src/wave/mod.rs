// ABOUTME: Insulin wave model combining meal composition, activity, day factors and circadian phase
// ABOUTME: Pure and total: missing inputs fall back to neutral factors, nothing ever fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Insulin Wave Model
//!
//! Estimates how long insulin stays elevated after a meal:
//!
//! ```text
//! wave_hours = baseline x meal_total x circadian x max(floor, 1 + sum(bonuses)) x spicy
//! ```
//!
//! clamped to the configured bounds. `meal_total` comes from
//! [`multiplier::meal_multiplier`]; the bonuses come from activity, day
//! physiology and overlap with the previous meal's wave.

/// Exercise effects
pub mod activity;
/// Circadian sensitivity
pub mod circadian;
/// Day-level physiology
pub mod day_factors;
/// Meal-composition multiplier
pub mod multiplier;
/// Per-meal nutrient aggregation
pub mod nutrients;
/// Rise, plateau and decline
pub mod phases;

use crate::config::wave::{BaselineConfig, StackingConfig};
use crate::config::WaveModelConfig;
use activity::{activity_breakdown, ActivityBreakdown, ActivityInputs};
use circadian::{circadian_factor, CircadianFactor};
use day_factors::{day_factor_breakdown, DayFactorBreakdown};
use mealwave_core::models::{ClockTime, DayRecord, Meal, PersonProfile, ProductCatalog, Sex};
use multiplier::{meal_multiplier, GlCategory, MealMultiplier};
use nutrients::NutrientProfile;
use phases::{wave_phases, WavePhases};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use multiplier::gl_curve;

/// First tier whose threshold `value` reaches; tiers descend
pub(crate) fn tier_at_least(value: f64, tiers: &[(f64, f64)]) -> f64 {
    tiers
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map_or(0.0, |(_, bonus)| *bonus)
}

/// First tier whose threshold `value` is strictly below; tiers ascend
pub(crate) fn tier_below(value: f64, tiers: &[(f64, f64)]) -> f64 {
    tiers
        .iter()
        .find(|(threshold, _)| value < *threshold)
        .map_or(0.0, |(_, bonus)| *bonus)
}

/// Wave of the meal eaten before the one being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviousWave {
    /// When the previous wave ends
    pub wave_end: ClockTime,
    /// Glycemic load of the previous meal
    pub glycemic_load: f64,
}

/// Context surrounding a meal
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveContext<'a> {
    /// Person attributes
    pub profile: Option<&'a PersonProfile>,
    /// Record of the day the meal belongs to
    pub day: Option<&'a DayRecord>,
    /// Previous meal's wave, for the second-meal effect
    pub previous: Option<PreviousWave>,
    /// Chronotype shift of the circadian peak in hours
    pub circadian_shift_hours: f64,
}

/// Full output of the wave model for one meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveResult {
    /// Product of every sub-multiplier
    pub total_multiplier: f64,
    /// Wave length in hours
    pub wave_hours: f64,
    /// Personal baseline in hours
    pub baseline_hours: f64,
    /// Meal start
    pub meal_time: ClockTime,
    /// Meal start plus wave length
    pub wave_end: ClockTime,
    /// Meal-composition decomposition
    pub meal: MealMultiplier,
    /// Activity bonuses
    pub activity: ActivityBreakdown,
    /// Day and meal-extra bonuses
    pub day_factors: DayFactorBreakdown,
    /// Circadian multiplier and period
    pub circadian: CircadianFactor,
    /// Second-meal effect bonus
    pub stacking_bonus: f64,
    /// `max(floor, 1 + sum(bonuses))`
    pub bonus_factor: f64,
    /// Glycemic load of the meal
    pub glycemic_load: f64,
    /// GL category
    pub gl_category: GlCategory,
    /// Phase decomposition
    pub phases: WavePhases,
}

/// Personal baseline wave length from age, BMI and sex
#[must_use]
pub fn personal_baseline_hours(profile: Option<&PersonProfile>, config: &BaselineConfig) -> f64 {
    let Some(profile) = profile else {
        return config.base_wave_hours;
    };
    if let Some(hours) = profile.insulin_wave_hours.filter(|hours| *hours > 0.0) {
        return hours;
    }

    let age_factor = profile.age.map_or(0.0, |age| {
        (f64::from(age) - config.age_pivot_years).max(0.0) * config.age_factor_per_year
    });
    let bmi_factor = profile.bmi().map_or(0.0, |bmi| {
        let delta = bmi - config.bmi_pivot;
        if delta > 0.0 {
            delta * config.bmi_factor_per_unit
        } else {
            (delta * config.bmi_factor_per_unit / 2.0).max(config.bmi_factor_floor)
        }
    });
    let sex_factor = match profile.sex {
        Some(Sex::Female) => config.female_factor,
        Some(Sex::Male) => config.male_factor,
        None => 0.0,
    };

    (config.base_wave_hours * (1.0 + age_factor + bmi_factor + sex_factor))
        .clamp(config.min_wave_hours, config.max_wave_hours)
}

/// Second-meal effect when a meal starts before the previous wave ended
#[must_use]
pub fn stacking_bonus(
    meal_time: ClockTime,
    previous: Option<PreviousWave>,
    config: &StackingConfig,
) -> f64 {
    let Some(previous) = previous else {
        return 0.0;
    };
    let overlap = meal_time.minutes_until(previous.wave_end);
    if overlap <= 0.0 {
        return 0.0;
    }
    let decay = (overlap / config.overlap_reference_min * config.decay_rate).min(1.0);
    let gl_factor = (previous.glycemic_load.max(0.0) / config.gl_reference).min(config.gl_factor_cap);
    (decay * gl_factor * config.max_stack_bonus).max(config.max_stack_bonus)
}

/// Seam through which the planner reaches the wave model
pub trait WaveEstimator: Send + Sync {
    /// Wave for a logged meal
    fn wave_for_meal(
        &self,
        meal: &Meal,
        catalog: &dyn ProductCatalog,
        context: &WaveContext<'_>,
    ) -> WaveResult;

    /// Personal baseline wave length
    fn baseline_hours(&self, profile: Option<&PersonProfile>) -> f64;
}

/// Insulin wave model with injected configuration
#[derive(Debug, Clone, Default)]
pub struct WaveModel {
    config: WaveModelConfig,
}

impl WaveModel {
    /// Create a model with the given configuration
    #[must_use]
    pub const fn new(config: WaveModelConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &WaveModelConfig {
        &self.config
    }

    /// Aggregate a meal's nutrients with this model's settings
    #[must_use]
    pub fn nutrients(&self, meal: &Meal, catalog: &dyn ProductCatalog) -> NutrientProfile {
        NutrientProfile::from_meal(meal, catalog, &self.config)
    }

    /// Meal-composition multiplier alone
    #[must_use]
    pub fn compute_multiplier(&self, nutrients: &NutrientProfile) -> MealMultiplier {
        meal_multiplier(nutrients, &self.config)
    }

    /// Full wave for a nutrient profile eaten at `meal_time`
    #[must_use]
    pub fn compute(
        &self,
        nutrients: &NutrientProfile,
        meal_time: ClockTime,
        context: &WaveContext<'_>,
    ) -> WaveResult {
        let config = &self.config;
        let weight_kg = context.profile.and_then(|profile| profile.weight_kg);
        let baseline_hours = personal_baseline_hours(context.profile, &config.baseline);
        let meal = meal_multiplier(nutrients, config);

        let activity = activity_breakdown(
            &ActivityInputs {
                meal_time,
                workouts: context
                    .day
                    .map(|day| day.workouts.as_slice())
                    .unwrap_or_default(),
                household_minutes: context.day.and_then(|day| day.household_minutes),
                steps: context.day.and_then(|day| day.steps),
                weight_kg,
            },
            &config.activity,
        );
        let day_factors = day_factor_breakdown(
            context.day,
            nutrients,
            weight_kg,
            &config.day_factors,
            &config.nutrients,
        );
        let circadian = circadian_factor(
            meal_time.wrapped_hours(),
            context.circadian_shift_hours,
            &config.circadian,
        );
        let stacking_bonus = stacking_bonus(meal_time, context.previous, &config.stacking);

        let bonuses = activity.total() + day_factors.total() + stacking_bonus;
        let bonus_factor = (1.0 + bonuses).max(config.combination.min_bonus_factor);
        let total_multiplier =
            meal.total * circadian.multiplier * bonus_factor * day_factors.spicy_multiplier;
        let wave_hours = (baseline_hours * total_multiplier).clamp(
            config.combination.min_wave_hours,
            config.combination.max_wave_hours,
        );
        let phases = wave_phases(
            wave_hours * 60.0,
            nutrients,
            activity.has_activity(),
            &config.phases,
        );

        debug!(
            meal_time = %meal_time,
            glycemic_load = nutrients.glycemic_load,
            meal_total = meal.total,
            circadian = circadian.multiplier,
            bonus_factor,
            wave_hours,
            "Computed insulin wave"
        );

        WaveResult {
            total_multiplier,
            wave_hours,
            baseline_hours,
            meal_time,
            wave_end: meal_time.plus_hours(wave_hours),
            meal,
            activity,
            day_factors,
            circadian,
            stacking_bonus,
            bonus_factor,
            glycemic_load: nutrients.glycemic_load,
            gl_category: meal.gl_category,
            phases,
        }
    }

    /// Waves for every meal of a day in order, chaining the second-meal effect
    #[must_use]
    pub fn compute_day(
        &self,
        day: &DayRecord,
        catalog: &dyn ProductCatalog,
        profile: Option<&PersonProfile>,
        circadian_shift_hours: f64,
    ) -> Vec<WaveResult> {
        let mut meals: Vec<&Meal> = day.meals.iter().collect();
        meals.sort_by(|a, b| a.time.hours().total_cmp(&b.time.hours()));

        let mut previous = None;
        meals
            .into_iter()
            .map(|meal| {
                let nutrients = self.nutrients(meal, catalog);
                let context = WaveContext {
                    profile,
                    day: Some(day),
                    previous,
                    circadian_shift_hours,
                };
                let result = self.compute(&nutrients, meal.time, &context);
                previous = Some(PreviousWave {
                    wave_end: result.wave_end,
                    glycemic_load: result.glycemic_load,
                });
                result
            })
            .collect()
    }
}

impl WaveEstimator for WaveModel {
    fn wave_for_meal(
        &self,
        meal: &Meal,
        catalog: &dyn ProductCatalog,
        context: &WaveContext<'_>,
    ) -> WaveResult {
        let nutrients = self.nutrients(meal, catalog);
        self.compute(&nutrients, meal.time, context)
    }

    fn baseline_hours(&self, profile: Option<&PersonProfile>) -> f64 {
        personal_baseline_hours(profile, &self.config.baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_helpers() {
        let at_least = [(45.0, -0.15), (20.0, -0.08)];
        assert!((tier_at_least(50.0, &at_least) + 0.15).abs() < 1e-12);
        assert!((tier_at_least(20.0, &at_least) + 0.08).abs() < 1e-12);
        assert!(tier_at_least(10.0, &at_least).abs() < 1e-12);

        let below = [(4.0, 0.20), (5.0, 0.15)];
        assert!((tier_below(3.0, &below) - 0.20).abs() < 1e-12);
        assert!(tier_below(5.0, &below).abs() < 1e-12);
    }

    #[test]
    fn test_stacking_bonus_bounded() {
        let config = StackingConfig::default();
        let previous = Some(PreviousWave {
            wave_end: ClockTime::from_hours(15.0),
            glycemic_load: 60.0,
        });
        let bonus = stacking_bonus(ClockTime::from_hours(11.0), previous, &config);
        assert!((bonus + 0.15).abs() < 1e-12);
        assert!(stacking_bonus(ClockTime::from_hours(16.0), previous, &config).abs() < 1e-12);
    }

    #[test]
    fn test_baseline_override_and_clamp() {
        let config = BaselineConfig::default();
        let explicit = PersonProfile {
            insulin_wave_hours: Some(4.0),
            ..PersonProfile::default()
        };
        assert!((personal_baseline_hours(Some(&explicit), &config) - 4.0).abs() < 1e-12);

        let older = PersonProfile {
            age: Some(60),
            weight_kg: Some(110.0),
            height_cm: Some(170.0),
            sex: Some(Sex::Male),
            ..PersonProfile::default()
        };
        let hours = personal_baseline_hours(Some(&older), &config);
        assert!(hours > 3.0 && hours <= 4.5);
    }
}
