// ABOUTME: Meal-composition wave multiplier from GI, glycemic load and macronutrient bonuses
// ABOUTME: GL-gated GI effect, GL-scaled bonuses, continuous GL curve, liquid and food-form corrections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrients::NutrientProfile;
use super::tier_at_least;
use crate::config::wave::{GlycemicConfig, NutrientBonusConfig};
use crate::config::WaveModelConfig;
use mealwave_core::models::{FoodForm, ProteinSource};
use serde::{Deserialize, Serialize};

/// Glycemic load category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GlCategory {
    /// Under 2
    Micro,
    /// Under 5
    VeryLow,
    /// Under 10
    Low,
    /// Under 20
    Medium,
    /// Under 30
    High,
    /// 30 and above
    VeryHigh,
}

impl GlCategory {
    /// Classify a glycemic load against exclusive upper bounds
    #[must_use]
    pub fn from_load(glycemic_load: f64, bounds: &[f64; 5]) -> Self {
        const ORDER: [GlCategory; 5] = [
            GlCategory::Micro,
            GlCategory::VeryLow,
            GlCategory::Low,
            GlCategory::Medium,
            GlCategory::High,
        ];
        ORDER
            .iter()
            .zip(bounds)
            .find(|(_, bound)| glycemic_load < **bound)
            .map_or(Self::VeryHigh, |(category, _)| *category)
    }
}

/// Decomposed meal-composition multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealMultiplier {
    /// GI contribution after GL gating (1.0 is neutral)
    pub gi_factor: f64,
    /// Scale applied to nutrient bonuses
    pub gl_scale: f64,
    /// Continuous GL curve multiplier
    pub gl_multiplier: f64,
    /// Protein bonus
    pub protein_bonus: f64,
    /// Fiber bonus
    pub fiber_bonus: f64,
    /// Fat bonus
    pub fat_bonus: f64,
    /// Liquid meal correction
    pub liquid_multiplier: f64,
    /// Food-form correction
    pub form_multiplier: f64,
    /// Product of all of the above
    pub total: f64,
    /// GL category
    pub gl_category: GlCategory,
}

/// GI band multiplier without gating
#[must_use]
pub fn gi_band_multiplier(gi: f64, config: &GlycemicConfig) -> f64 {
    config
        .gi_bands
        .iter()
        .find(|(upper, _)| gi <= *upper)
        .map_or(config.high_gi_multiplier, |(_, multiplier)| *multiplier)
}

/// Share of the GI effect that applies at a glycemic load
///
/// Zero below the minimum load, linear up to the full load, one above.
#[must_use]
pub fn gi_weight(glycemic_load: f64, config: &GlycemicConfig) -> f64 {
    if glycemic_load < config.gi_effect_min_gl {
        0.0
    } else if glycemic_load >= config.gi_effect_full_gl {
        1.0
    } else {
        (glycemic_load - config.gi_effect_min_gl)
            / (config.gi_effect_full_gl - config.gi_effect_min_gl)
    }
}

/// GI contribution after GL gating
#[must_use]
pub fn gi_factor(gi: f64, glycemic_load: f64, config: &GlycemicConfig) -> f64 {
    let weight = gi_weight(glycemic_load, config);
    (gi_band_multiplier(gi, config) - 1.0).mul_add(weight, 1.0)
}

/// Scale applied to nutrient bonuses at a glycemic load
#[must_use]
pub fn gl_scale(glycemic_load: f64, config: &GlycemicConfig) -> f64 {
    if glycemic_load >= config.gl_scale_full {
        return 1.0;
    }
    let span = 1.0 - config.gl_scale_floor;
    (glycemic_load.max(0.0) / config.gl_scale_full)
        .mul_add(span, config.gl_scale_floor)
        .max(config.gl_scale_floor)
}

/// Continuous glycemic-load curve, non-decreasing in load
#[must_use]
pub fn gl_curve(glycemic_load: f64, config: &GlycemicConfig) -> f64 {
    let normalized = glycemic_load.max(0.0) / config.gl_curve_reference;
    let span = config.gl_curve_ceiling - config.gl_curve_floor;
    normalized
        .powf(config.gl_curve_exponent)
        .mul_add(span, config.gl_curve_floor)
        .min(config.gl_curve_ceiling)
}

fn protein_type_multiplier(source: ProteinSource, config: &NutrientBonusConfig) -> f64 {
    match source {
        ProteinSource::Animal => config.protein_animal_multiplier,
        ProteinSource::Plant => config.protein_plant_multiplier,
        ProteinSource::Whey => config.protein_whey_multiplier,
        ProteinSource::Mixed => config.protein_mixed_multiplier,
    }
}

fn form_multiplier(form: Option<FoodForm>, config: &NutrientBonusConfig) -> f64 {
    match form {
        Some(FoodForm::Liquid) => config.form_liquid_multiplier,
        Some(FoodForm::Processed) => config.form_processed_multiplier,
        Some(FoodForm::Whole) => config.form_whole_multiplier,
        None => 1.0,
    }
}

/// Meal-composition multiplier for a nutrient profile
#[must_use]
pub fn meal_multiplier(nutrients: &NutrientProfile, config: &WaveModelConfig) -> MealMultiplier {
    let glycemic = &config.glycemic;
    let bonuses = &config.nutrients;
    let load = nutrients.glycemic_load.max(0.0);

    let gi_factor = gi_factor(nutrients.avg_gi, load, glycemic);
    let gl_scale = gl_scale(load, glycemic);
    let gl_multiplier = gl_curve(load, glycemic);

    let protein_bonus = tier_at_least(nutrients.protein, &bonuses.protein_tiers)
        * protein_type_multiplier(nutrients.protein_source, bonuses)
        * gl_scale;
    let fiber_bonus = tier_at_least(nutrients.fiber, &bonuses.fiber_tiers) * gl_scale;
    let fat_bonus = tier_at_least(nutrients.fat, &bonuses.fat_tiers) * gl_scale;

    let liquid_multiplier = if nutrients.is_liquid {
        bonuses.liquid_wave_multiplier
    } else {
        1.0
    };
    let form_multiplier = form_multiplier(nutrients.food_form, bonuses);

    // Insulin index already raised the item GL; no separate insulinogenic term
    let composition = gi_factor + protein_bonus + fiber_bonus + fat_bonus;
    let total = composition.max(0.0) * gl_multiplier * liquid_multiplier * form_multiplier;

    MealMultiplier {
        gi_factor,
        gl_scale,
        gl_multiplier,
        protein_bonus,
        fiber_bonus,
        fat_bonus,
        liquid_multiplier,
        form_multiplier,
        total,
        gl_category: GlCategory::from_load(load, &glycemic.gl_category_bounds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gl_category_bounds() {
        let bounds = GlycemicConfig::default().gl_category_bounds;
        assert_eq!(GlCategory::from_load(0.0, &bounds), GlCategory::Micro);
        assert_eq!(GlCategory::from_load(4.9, &bounds), GlCategory::VeryLow);
        assert_eq!(GlCategory::from_load(10.0, &bounds), GlCategory::Medium);
        assert_eq!(GlCategory::from_load(30.0, &bounds), GlCategory::VeryHigh);
    }

    #[test]
    fn test_gi_weight_interpolates() {
        let config = GlycemicConfig::default();
        assert!(gi_weight(6.9, &config).abs() < 1e-12);
        assert!((gi_weight(13.5, &config) - 0.5).abs() < 1e-12);
        assert!((gi_weight(25.0, &config) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_insulinogenic_bonus_not_counted_twice() {
        let config = WaveModelConfig::default();
        let plain = NutrientProfile {
            protein: 15.6,
            fat: 12.0,
            ..NutrientProfile::default()
        };
        let dairy = NutrientProfile {
            insulinogenic_bonus: 0.15,
            ..plain.clone()
        };
        assert_eq!(meal_multiplier(&plain, &config), meal_multiplier(&dairy, &config));
    }

    #[test]
    fn test_gl_scale_floor_and_full() {
        let config = GlycemicConfig::default();
        assert!((gl_scale(0.0, &config) - 0.25).abs() < 1e-12);
        assert!((gl_scale(10.0, &config) - 0.625).abs() < 1e-12);
        assert!((gl_scale(40.0, &config) - 1.0).abs() < 1e-12);
    }
}
