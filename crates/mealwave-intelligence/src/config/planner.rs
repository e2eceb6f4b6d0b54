// ABOUTME: Meal timeline planner configuration with scheduling and budget defaults
// ABOUTME: Sleep buffer, hunger trade-off, force split, ratio tables, protein floor and TEF
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigError;
use mealwave_core::constants::planner::{self as constants, scenario, tef};
use serde::{Deserialize, Serialize};

/// Thermic effect of food per macro
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TefConfig {
    /// Share of protein energy
    pub protein: f64,
    /// Share of carbohydrate energy
    pub carbs: f64,
    /// Share of fat energy
    pub fat: f64,
}

impl Default for TefConfig {
    fn default() -> Self {
        Self {
            protein: tef::PROTEIN,
            carbs: tef::CARBS,
            fat: tef::FAT,
        }
    }
}

/// Scenario thresholds and GL ceilings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Final meal closer to sleep than this is pre-sleep
    pub pre_sleep_hours: f64,
    /// Meals under this kcal are snacks
    pub light_snack_kcal: f64,
    /// Meals over this protein are protein-focused
    pub protein_focus_g: f64,
    /// GL ceiling for pre-sleep meals and snacks
    pub low_gl_max: f64,
    /// GL ceiling after training
    pub post_workout_gl_max: f64,
    /// GL ceiling otherwise
    pub default_gl_max: f64,
    /// Reduction for a low optimal GI
    pub low_gi_gl_reduction: f64,
    /// Optimal GI under which the reduction applies
    pub low_gi_optimal: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            pre_sleep_hours: scenario::PRE_SLEEP_HOURS,
            light_snack_kcal: scenario::LIGHT_SNACK_KCAL,
            protein_focus_g: scenario::PROTEIN_FOCUS_G,
            low_gl_max: scenario::LOW_GL_MAX,
            post_workout_gl_max: scenario::POST_WORKOUT_GL_MAX,
            default_gl_max: scenario::DEFAULT_GL_MAX,
            low_gi_gl_reduction: scenario::LOW_GI_GL_REDUCTION,
            low_gi_optimal: scenario::LOW_GI_OPTIMAL,
        }
    }
}

/// Meal timeline planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Fat-burn margin after wave end in minutes
    pub fat_burn_window_min: f64,
    /// Pre-sleep buffer in hours
    pub pre_sleep_buffer_hours: f64,
    /// Smallest buffer the hunger trade-off may use
    pub min_pre_sleep_buffer_hours: f64,
    /// Remaining kcal that triggers the hunger trade-off
    pub hunger_tradeoff_kcal: f64,
    /// Sleep target when nothing else is known
    pub fallback_sleep_hour: f64,
    /// Hours from the average last meal to sleep
    pub last_meal_to_sleep_hours: f64,
    /// Days used for sleep estimation
    pub sleep_estimate_days: usize,
    /// Samples needed for a history-based sleep estimate
    pub sleep_estimate_min_samples: usize,
    /// Wave estimate base when the profile has none
    pub default_wave_estimate_hours: f64,
    /// Bounds of a planned meal's wave estimate
    pub wave_estimate_bounds: (f64, f64),
    /// Wave length for a last meal without items
    pub fallback_wave_hours: f64,
    /// Hard cap on planned meals
    pub max_meals: usize,
    /// Meals assumed when budgeting the next meal
    pub lookahead_meals: usize,
    /// Hours a further meal needs before the deadline
    pub min_next_meal_hours: f64,
    /// Hours-to-sleep required for another meal
    pub min_hours_to_sleep: f64,
    /// Planned meal window length
    pub meal_window_hours: f64,
    /// Remaining kcal below which nothing is planned
    pub min_budget_kcal: f64,
    /// Largest nominal single meal
    pub single_meal_ceiling_kcal: f64,
    /// Gap between meals when a split is forced
    pub force_split_gap_hours: f64,
    /// Budget ratios by meal count, index 0 for one meal
    pub budget_ratios: Vec<Vec<f64>>,
    /// Blend of the hours-to-sleep weighting
    pub sleep_proximity_blend: f64,
    /// Hours-to-sleep with no penalty
    pub sleep_proximity_full_hours: f64,
    /// Blend of the time-of-day weighting
    pub time_of_day_blend: f64,
    /// Protein floor in g/kg per meal
    pub protein_floor_g_per_kg: f64,
    /// Protein floor cap in grams
    pub protein_floor_cap_g: f64,
    /// Anabolic window after a workout in hours
    pub anabolic_window_hours: f64,
    /// Recovery protein share of kcal
    pub recovery_protein_share: f64,
    /// Recovery carbohydrate share of kcal
    pub recovery_carb_share: f64,
    /// Thermic effect of food
    pub tef: TefConfig,
    /// Scenario thresholds
    pub scenario: ScenarioConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fat_burn_window_min: constants::FAT_BURN_WINDOW_MIN,
            pre_sleep_buffer_hours: constants::PRE_SLEEP_BUFFER_HOURS,
            min_pre_sleep_buffer_hours: constants::MIN_PRE_SLEEP_BUFFER_HOURS,
            hunger_tradeoff_kcal: constants::HUNGER_TRADEOFF_KCAL,
            fallback_sleep_hour: constants::FALLBACK_SLEEP_HOUR,
            last_meal_to_sleep_hours: constants::LAST_MEAL_TO_SLEEP_HOURS,
            sleep_estimate_days: constants::SLEEP_ESTIMATE_DAYS,
            sleep_estimate_min_samples: constants::SLEEP_ESTIMATE_MIN_SAMPLES,
            default_wave_estimate_hours: constants::DEFAULT_WAVE_ESTIMATE_HOURS,
            wave_estimate_bounds: constants::WAVE_ESTIMATE_BOUNDS,
            fallback_wave_hours: constants::FALLBACK_WAVE_HOURS,
            max_meals: constants::MAX_MEALS,
            lookahead_meals: constants::LOOKAHEAD_MEALS,
            min_next_meal_hours: constants::MIN_NEXT_MEAL_HOURS,
            min_hours_to_sleep: constants::MIN_HOURS_TO_SLEEP,
            meal_window_hours: constants::MEAL_WINDOW_HOURS,
            min_budget_kcal: constants::MIN_BUDGET_KCAL,
            single_meal_ceiling_kcal: constants::SINGLE_MEAL_CEILING_KCAL,
            force_split_gap_hours: constants::FORCE_SPLIT_GAP_HOURS,
            budget_ratios: constants::BUDGET_RATIOS
                .iter()
                .map(|ratios| ratios.to_vec())
                .collect(),
            sleep_proximity_blend: constants::SLEEP_PROXIMITY_BLEND,
            sleep_proximity_full_hours: constants::SLEEP_PROXIMITY_FULL_HOURS,
            time_of_day_blend: constants::TIME_OF_DAY_BLEND,
            protein_floor_g_per_kg: constants::PROTEIN_FLOOR_G_PER_KG,
            protein_floor_cap_g: constants::PROTEIN_FLOOR_CAP_G,
            anabolic_window_hours: constants::ANABOLIC_WINDOW_HOURS,
            recovery_protein_share: constants::RECOVERY_PROTEIN_SHARE,
            recovery_carb_share: constants::RECOVERY_CARB_SHARE,
            tef: TefConfig::default(),
            scenario: ScenarioConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if buffers, caps or ratio tables are inconsistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pre_sleep_buffer_hours < 0.0
            || self.min_pre_sleep_buffer_hours > self.pre_sleep_buffer_hours
        {
            return Err(ConfigError::InvalidRange(
                "min_pre_sleep_buffer_hours must be <= pre_sleep_buffer_hours",
            ));
        }
        if self.fat_burn_window_min < 0.0 || self.meal_window_hours <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "fat_burn_window_min must be >= 0 and meal_window_hours positive",
            ));
        }
        if self.max_meals == 0 || self.budget_ratios.len() < self.max_meals {
            return Err(ConfigError::InvalidRange(
                "budget_ratios must cover every meal count up to max_meals",
            ));
        }
        if self.lookahead_meals == 0 {
            return Err(ConfigError::InvalidRange("lookahead_meals must be positive"));
        }
        for (index, ratios) in self.budget_ratios.iter().enumerate() {
            if ratios.len() != index + 1 {
                return Err(ConfigError::InvalidRange(
                    "budget_ratios row n must hold n + 1 ratios",
                ));
            }
            if (ratios.iter().sum::<f64>() - 1.0).abs() > 0.01 {
                return Err(ConfigError::InvalidWeights(
                    "each budget_ratios row must sum to 1.0",
                ));
            }
        }
        if self.force_split_gap_hours <= 0.0 || self.single_meal_ceiling_kcal <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "force_split_gap_hours and single_meal_ceiling_kcal must be positive",
            ));
        }
        let (low, high) = self.wave_estimate_bounds;
        if low <= 0.0 || low >= high {
            return Err(ConfigError::InvalidRange(
                "wave_estimate_bounds must be positive and ordered",
            ));
        }
        if self.recovery_protein_share + self.recovery_carb_share > 1.0 {
            return Err(ConfigError::InvalidWeights(
                "recovery protein and carbohydrate shares must not exceed 1.0",
            ));
        }
        if !(0.0..=1.0).contains(&self.sleep_proximity_blend)
            || !(0.0..=1.0).contains(&self.time_of_day_blend)
        {
            return Err(ConfigError::InvalidRange(
                "ratio blend weights must be within [0, 1]",
            ));
        }
        Ok(())
    }
}
