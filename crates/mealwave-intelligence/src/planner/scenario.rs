// ABOUTME: Scenario tagging for planned meals with GL ceilings and sleep-friendly food hints
// ABOUTME: Pre-sleep wins over post-workout, which wins over snack, protein and balanced tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::planner::ScenarioConfig;
use mealwave_core::constants::planner::sleep_hint;
use mealwave_core::models::MacroBudget;
use serde::{Deserialize, Serialize};

/// What a planned meal is for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealScenario {
    /// Recovery after a recent workout
    PostWorkout,
    /// Last meal close to sleep
    PreSleep,
    /// Small top-up
    LightSnack,
    /// Protein-focused
    ProteinDeficit,
    /// Everything else
    Balanced,
}

/// Food category suggested for meals close to sleep
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SleepFriendlyHint {
    /// Cottage cheese, kefir, yogurt
    CaseinRichDairy,
    /// Oats, whole grains, legumes
    LowGiComplexCarbs,
    /// Eggs, fish, lean poultry
    LightProtein,
}

/// Inputs for classifying one slot
#[derive(Debug, Clone, Copy)]
pub struct SlotContext {
    /// Slot is the last of the plan
    pub is_last: bool,
    /// Slot is the first of the plan and a workout just ended
    pub post_workout: bool,
    /// Hours between slot start and sleep
    pub hours_to_sleep: f64,
    /// Configured pre-sleep buffer
    pub pre_sleep_buffer_hours: f64,
}

/// Tag a slot from its position, macros and distance to sleep
#[must_use]
pub fn classify(macros: &MacroBudget, slot: &SlotContext, config: &ScenarioConfig) -> MealScenario {
    let pre_sleep_window = config.pre_sleep_hours.max(slot.pre_sleep_buffer_hours);
    if slot.is_last && slot.hours_to_sleep < pre_sleep_window {
        MealScenario::PreSleep
    } else if slot.post_workout {
        MealScenario::PostWorkout
    } else if macros.kcal < config.light_snack_kcal {
        MealScenario::LightSnack
    } else if macros.protein > config.protein_focus_g {
        MealScenario::ProteinDeficit
    } else {
        MealScenario::Balanced
    }
}

/// Glycemic-load ceiling for a scenario, lowered for people who do best on low GI
#[must_use]
pub fn target_gl_max(
    scenario: MealScenario,
    gi_optimal: Option<f64>,
    config: &ScenarioConfig,
) -> f64 {
    let ceiling = match scenario {
        MealScenario::PreSleep | MealScenario::LightSnack => config.low_gl_max,
        MealScenario::PostWorkout => config.post_workout_gl_max,
        MealScenario::ProteinDeficit | MealScenario::Balanced => config.default_gl_max,
    };
    match gi_optimal {
        Some(gi) if gi < config.low_gi_optimal => (ceiling - config.low_gi_gl_reduction).max(0.0),
        _ => ceiling,
    }
}

/// Sleep-friendly category matching a slot's macros
#[must_use]
pub fn sleep_friendly_hint(macros: &MacroBudget) -> SleepFriendlyHint {
    if macros.protein >= sleep_hint::CASEIN_PROTEIN_G {
        SleepFriendlyHint::CaseinRichDairy
    } else if macros.carbs > macros.protein * sleep_hint::CARB_HEAVY_RATIO {
        SleepFriendlyHint::LowGiComplexCarbs
    } else {
        SleepFriendlyHint::LightProtein
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(is_last: bool, post_workout: bool, hours_to_sleep: f64) -> SlotContext {
        SlotContext {
            is_last,
            post_workout,
            hours_to_sleep,
            pre_sleep_buffer_hours: 3.0,
        }
    }

    #[test]
    fn test_precedence() {
        let config = ScenarioConfig::default();
        let meal = MacroBudget::new(35.0, 60.0, 15.0, 500.0);
        assert_eq!(
            classify(&meal, &slot(true, true, 2.0), &config),
            MealScenario::PreSleep
        );
        assert_eq!(
            classify(&meal, &slot(false, true, 6.0), &config),
            MealScenario::PostWorkout
        );
        assert_eq!(
            classify(&meal, &slot(false, false, 6.0), &config),
            MealScenario::ProteinDeficit
        );
        let snack = MacroBudget::new(5.0, 15.0, 3.0, 120.0);
        assert_eq!(
            classify(&snack, &slot(false, false, 6.0), &config),
            MealScenario::LightSnack
        );
    }

    #[test]
    fn test_gl_ceiling_lowered_for_low_gi() {
        let config = ScenarioConfig::default();
        assert!((target_gl_max(MealScenario::Balanced, Some(56.0), &config) - 20.0).abs() < 1e-12);
        assert!((target_gl_max(MealScenario::Balanced, Some(45.0), &config) - 15.0).abs() < 1e-12);
        assert!((target_gl_max(MealScenario::PreSleep, None, &config) - 10.0).abs() < 1e-12);
    }
}
