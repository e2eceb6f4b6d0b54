// ABOUTME: Day-level physiological bonuses: sleep, hydration, stress, cycle phase and meal extras
// ABOUTME: Trans fat, alcohol, caffeine and the spicy multiplier are evaluated per meal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrients::NutrientProfile;
use super::{tier_at_least, tier_below};
use crate::config::wave::{DayFactorConfig, NutrientBonusConfig};
use mealwave_core::models::{AlcoholLevel, DayRecord, SleepQuality};
use serde::{Deserialize, Serialize};

/// Day and meal-extra bonuses (positive lengthens the wave)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayFactorBreakdown {
    /// Short sleep
    pub sleep: f64,
    /// Poor sleep quality
    pub sleep_quality: f64,
    /// Under-hydration
    pub hydration: f64,
    /// High stress
    pub stress: f64,
    /// Luteal phase
    pub cycle: f64,
    /// Trans fat in the meal
    pub trans_fat: f64,
    /// Alcohol in the meal
    pub alcohol: f64,
    /// Caffeine in the meal
    pub caffeine: f64,
    /// Multiplier for spicy meals (1.0 otherwise)
    pub spicy_multiplier: f64,
}

impl Default for DayFactorBreakdown {
    fn default() -> Self {
        Self {
            sleep: 0.0,
            sleep_quality: 0.0,
            hydration: 0.0,
            stress: 0.0,
            cycle: 0.0,
            trans_fat: 0.0,
            alcohol: 0.0,
            caffeine: 0.0,
            spicy_multiplier: 1.0,
        }
    }
}

impl DayFactorBreakdown {
    /// Sum of additive bonuses
    #[must_use]
    pub fn total(&self) -> f64 {
        self.sleep
            + self.sleep_quality
            + self.hydration
            + self.stress
            + self.cycle
            + self.trans_fat
            + self.alcohol
            + self.caffeine
    }
}

fn hydration_bonus(water_ml: f64, weight_kg: f64, config: &DayFactorConfig) -> f64 {
    let goal = weight_kg * config.water_ml_per_kg;
    if goal <= 0.0 {
        return 0.0;
    }
    tier_below(water_ml / goal, &config.hydration_tiers)
}

fn cycle_bonus(cycle_day: u8, config: &DayFactorConfig) -> f64 {
    if (config.luteal_phase_start_day..=config.cycle_length_days).contains(&cycle_day) {
        config.luteal_multiplier - 1.0
    } else {
        0.0
    }
}

fn sleep_quality_bonus(quality: SleepQuality, config: &DayFactorConfig) -> f64 {
    match quality {
        SleepQuality::Poor => config.sleep_quality_poor_bonus,
        SleepQuality::Mediocre => config.sleep_quality_mediocre_bonus,
        SleepQuality::Normal | SleepQuality::Good => 0.0,
    }
}

fn alcohol_bonus(level: AlcoholLevel, config: &NutrientBonusConfig) -> f64 {
    match level {
        AlcoholLevel::Strong => config.alcohol_strong_bonus,
        AlcoholLevel::Medium => config.alcohol_medium_bonus,
        AlcoholLevel::Light => config.alcohol_light_bonus,
    }
}

/// Day and meal-extra factors; missing day fields are neutral
#[must_use]
pub fn day_factor_breakdown(
    day: Option<&DayRecord>,
    nutrients: &NutrientProfile,
    weight_kg: Option<f64>,
    day_config: &DayFactorConfig,
    nutrient_config: &NutrientBonusConfig,
) -> DayFactorBreakdown {
    let mut breakdown = DayFactorBreakdown {
        trans_fat: tier_at_least(nutrients.trans_fat, &nutrient_config.trans_fat_tiers),
        alcohol: nutrients
            .alcohol
            .map_or(0.0, |level| alcohol_bonus(level, nutrient_config)),
        caffeine: if nutrients.caffeine {
            nutrient_config.caffeine_bonus
        } else {
            0.0
        },
        spicy_multiplier: if nutrients.spicy {
            nutrient_config.spicy_multiplier
        } else {
            1.0
        },
        ..DayFactorBreakdown::default()
    };

    let Some(day) = day else {
        return breakdown;
    };
    if let Some(hours) = day.sleep_hours.filter(|hours| *hours > 0.0) {
        breakdown.sleep = tier_below(hours, &day_config.sleep_hours_tiers);
    }
    if let Some(quality) = day.sleep_quality {
        breakdown.sleep_quality = sleep_quality_bonus(quality, day_config);
    }
    if let (Some(water), Some(weight)) = (day.water_ml, weight_kg) {
        breakdown.hydration = hydration_bonus(water, weight, day_config);
    }
    if let Some(stress) = day.stress_avg {
        breakdown.stress = tier_at_least(stress, &day_config.stress_tiers);
    }
    if let Some(cycle_day) = day.cycle_day {
        breakdown.cycle = cycle_bonus(cycle_day, day_config);
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_missing_day_is_neutral() {
        let breakdown = day_factor_breakdown(
            None,
            &NutrientProfile::default(),
            None,
            &DayFactorConfig::default(),
            &NutrientBonusConfig::default(),
        );
        assert!(breakdown.total().abs() < 1e-12);
        assert!((breakdown.spicy_multiplier - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_sleep_dehydration_and_luteal_phase() {
        let mut day = DayRecord::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        day.sleep_hours = Some(4.5);
        day.water_ml = Some(800.0);
        day.cycle_day = Some(20);
        let breakdown = day_factor_breakdown(
            Some(&day),
            &NutrientProfile::default(),
            Some(70.0),
            &DayFactorConfig::default(),
            &NutrientBonusConfig::default(),
        );
        assert!((breakdown.sleep - 0.15).abs() < 1e-9);
        assert!((breakdown.hydration - 0.05).abs() < 1e-9);
        assert!((breakdown.cycle - 0.08).abs() < 1e-9);
    }
}
