// ABOUTME: Insulin wave model configuration with physiological defaults
// ABOUTME: GI bands, GL curve, nutrient and activity tiers, circadian and day-factor settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Wave Model Configuration
//!
//! Tier tables are `(threshold, value)` pairs ordered so that the first
//! matching tier wins: "at least" tables descend, "strictly below" tables
//! ascend.

use super::{validate_ascending_tiers, validate_bounds, validate_descending_tiers, ConfigError};
use mealwave_core::constants::wave::{
    activity, baseline, circadian, combination, day_factors, glycemic, insulin_index, nutrients,
    phases, stacking,
};
use serde::{Deserialize, Serialize};

/// Insulin wave model configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveModelConfig {
    /// Glycemic index and load settings
    pub glycemic: GlycemicConfig,
    /// Insulin index boosts
    pub insulin_index: InsulinIndexConfig,
    /// Macronutrient bonuses and meal-form corrections
    pub nutrients: NutrientBonusConfig,
    /// Circadian sensitivity curve
    pub circadian: CircadianConfig,
    /// Exercise and incidental activity
    pub activity: ActivityConfig,
    /// Day-level physiology
    pub day_factors: DayFactorConfig,
    /// Personal baseline wave
    pub baseline: BaselineConfig,
    /// Wave phase decomposition
    pub phases: PhaseConfig,
    /// Second-meal effect
    pub stacking: StackingConfig,
    /// Final combination bounds
    pub combination: CombinationConfig,
}

/// Glycemic index bands and glycemic-load gating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlycemicConfig {
    /// `(upper inclusive GI, multiplier)` bands, ascending
    pub gi_bands: Vec<(f64, f64)>,
    /// Multiplier above the last band
    pub high_gi_multiplier: f64,
    /// GI used when a meal has no carbohydrates
    pub neutral_gi: f64,
    /// GL below which GI has no effect
    pub gi_effect_min_gl: f64,
    /// GL from which GI applies fully
    pub gi_effect_full_gl: f64,
    /// Nutrient-bonus scale at zero GL
    pub gl_scale_floor: f64,
    /// GL at which nutrient bonuses reach full scale
    pub gl_scale_full: f64,
    /// GL curve value at zero load
    pub gl_curve_floor: f64,
    /// GL curve cap
    pub gl_curve_ceiling: f64,
    /// GL at which the curve reaches its cap
    pub gl_curve_reference: f64,
    /// GL curve exponent
    pub gl_curve_exponent: f64,
    /// Exclusive upper bounds of the GL categories
    pub gl_category_bounds: [f64; 5],
}

impl Default for GlycemicConfig {
    fn default() -> Self {
        Self {
            gi_bands: glycemic::GI_BANDS.to_vec(),
            high_gi_multiplier: glycemic::HIGH_GI_MULTIPLIER,
            neutral_gi: glycemic::NEUTRAL_GI,
            gi_effect_min_gl: glycemic::GI_EFFECT_MIN_GL,
            gi_effect_full_gl: glycemic::GI_EFFECT_FULL_GL,
            gl_scale_floor: glycemic::GL_SCALE_FLOOR,
            gl_scale_full: glycemic::GL_SCALE_FULL,
            gl_curve_floor: glycemic::GL_CURVE_FLOOR,
            gl_curve_ceiling: glycemic::GL_CURVE_CEILING,
            gl_curve_reference: glycemic::GL_CURVE_REFERENCE,
            gl_curve_exponent: glycemic::GL_CURVE_EXPONENT,
            gl_category_bounds: glycemic::GL_CATEGORY_BOUNDS,
        }
    }
}

/// Insulin index GL boosts and insulinogenic bonuses per food category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsulinIndexConfig {
    /// Liquid dairy GL boost
    pub liquid_dairy_gl_boost: f64,
    /// Soft dairy GL boost
    pub soft_dairy_gl_boost: f64,
    /// Hard dairy GL boost
    pub hard_dairy_gl_boost: f64,
    /// Protein food GL boost
    pub protein_gl_boost: f64,
    /// Largest added GL as a multiple of the item's own GL
    pub max_gl_boost: f64,
    /// Liquid dairy wave bonus
    pub liquid_dairy_bonus: f64,
    /// Soft dairy wave bonus
    pub soft_dairy_bonus: f64,
    /// Hard dairy wave bonus
    pub hard_dairy_bonus: f64,
    /// Protein food wave bonus
    pub protein_bonus: f64,
}

impl Default for InsulinIndexConfig {
    fn default() -> Self {
        Self {
            liquid_dairy_gl_boost: insulin_index::LIQUID_DAIRY_GL_BOOST,
            soft_dairy_gl_boost: insulin_index::SOFT_DAIRY_GL_BOOST,
            hard_dairy_gl_boost: insulin_index::HARD_DAIRY_GL_BOOST,
            protein_gl_boost: insulin_index::PROTEIN_GL_BOOST,
            max_gl_boost: insulin_index::MAX_GL_BOOST,
            liquid_dairy_bonus: insulin_index::LIQUID_DAIRY_BONUS,
            soft_dairy_bonus: insulin_index::SOFT_DAIRY_BONUS,
            hard_dairy_bonus: insulin_index::HARD_DAIRY_BONUS,
            protein_bonus: insulin_index::PROTEIN_BONUS,
        }
    }
}

/// Macronutrient bonus tiers and meal-form corrections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientBonusConfig {
    /// Protein `(grams, bonus)` tiers, descending
    pub protein_tiers: Vec<(f64, f64)>,
    /// Animal protein multiplier
    pub protein_animal_multiplier: f64,
    /// Plant protein multiplier
    pub protein_plant_multiplier: f64,
    /// Whey protein multiplier
    pub protein_whey_multiplier: f64,
    /// Mixed protein multiplier
    pub protein_mixed_multiplier: f64,
    /// Fiber `(grams, bonus)` tiers, descending
    pub fiber_tiers: Vec<(f64, f64)>,
    /// Fat `(grams, bonus)` tiers, descending
    pub fat_tiers: Vec<(f64, f64)>,
    /// Trans fat `(grams, bonus)` tiers, descending
    pub trans_fat_tiers: Vec<(f64, f64)>,
    /// Wave multiplier for liquid meals
    pub liquid_wave_multiplier: f64,
    /// Liquid gram share above which a meal is liquid
    pub liquid_ratio_threshold: f64,
    /// Liquid food-form multiplier
    pub form_liquid_multiplier: f64,
    /// Processed food-form multiplier
    pub form_processed_multiplier: f64,
    /// Whole food-form multiplier
    pub form_whole_multiplier: f64,
    /// Strong alcohol bonus
    pub alcohol_strong_bonus: f64,
    /// Medium alcohol bonus
    pub alcohol_medium_bonus: f64,
    /// Light alcohol bonus
    pub alcohol_light_bonus: f64,
    /// Caffeine bonus
    pub caffeine_bonus: f64,
    /// Spicy meal multiplier
    pub spicy_multiplier: f64,
}

impl Default for NutrientBonusConfig {
    fn default() -> Self {
        Self {
            protein_tiers: nutrients::PROTEIN_TIERS.to_vec(),
            protein_animal_multiplier: nutrients::PROTEIN_ANIMAL_MULTIPLIER,
            protein_plant_multiplier: nutrients::PROTEIN_PLANT_MULTIPLIER,
            protein_whey_multiplier: nutrients::PROTEIN_WHEY_MULTIPLIER,
            protein_mixed_multiplier: nutrients::PROTEIN_MIXED_MULTIPLIER,
            fiber_tiers: nutrients::FIBER_TIERS.to_vec(),
            fat_tiers: nutrients::FAT_TIERS.to_vec(),
            trans_fat_tiers: nutrients::TRANS_FAT_TIERS.to_vec(),
            liquid_wave_multiplier: nutrients::LIQUID_WAVE_MULTIPLIER,
            liquid_ratio_threshold: nutrients::LIQUID_RATIO_THRESHOLD,
            form_liquid_multiplier: nutrients::FORM_LIQUID_MULTIPLIER,
            form_processed_multiplier: nutrients::FORM_PROCESSED_MULTIPLIER,
            form_whole_multiplier: nutrients::FORM_WHOLE_MULTIPLIER,
            alcohol_strong_bonus: nutrients::ALCOHOL_STRONG_BONUS,
            alcohol_medium_bonus: nutrients::ALCOHOL_MEDIUM_BONUS,
            alcohol_light_bonus: nutrients::ALCOHOL_LIGHT_BONUS,
            caffeine_bonus: nutrients::CAFFEINE_BONUS,
            spicy_multiplier: nutrients::SPICY_MULTIPLIER,
        }
    }
}

/// Cosine circadian sensitivity curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircadianConfig {
    /// Hour of peak insulin sensitivity
    pub peak_hour: f64,
    /// Multiplier at the peak
    pub min_multiplier: f64,
    /// Multiplier at the opposite phase
    pub max_multiplier: f64,
}

impl Default for CircadianConfig {
    fn default() -> Self {
        Self {
            peak_hour: circadian::PEAK_HOUR,
            min_multiplier: circadian::MIN_MULTIPLIER,
            max_multiplier: circadian::MAX_MULTIPLIER,
        }
    }
}

/// Pre-meal, postprandial and incidental activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Weight of zone 3-4 minutes in intensity minutes
    pub intensity_zone_weight: f64,
    /// Pre-meal `(intensity minutes, bonus)` tiers, descending
    pub workout_tiers: Vec<(f64, f64)>,
    /// Postprandial window in minutes
    pub postprandial_window_min: f64,
    /// `(high-intensity minutes, bonus)`
    pub postprandial_high: (f64, f64),
    /// `(total minutes, bonus)`
    pub postprandial_moderate: (f64, f64),
    /// `(total minutes, bonus)`
    pub postprandial_light: (f64, f64),
    /// Cardio multiplier
    pub cardio_multiplier: f64,
    /// Strength multiplier
    pub strength_multiplier: f64,
    /// Hobby multiplier
    pub hobby_multiplier: f64,
    /// `(max gap minutes, boost)` proximity tiers, ascending
    pub proximity_boosts: Vec<(f64, f64)>,
    /// Boost beyond the last proximity tier
    pub late_proximity_boost: f64,
    /// kcal per minute at the reference weight
    pub kcal_per_minute: f64,
    /// Reference body weight in kg
    pub reference_weight_kg: f64,
    /// Energy factor when high intensity dominates
    pub high_intensity_energy_factor: f64,
    /// `(kcal, boost)` energy tiers, descending
    pub energy_boosts: Vec<(f64, f64)>,
    /// Strongest postprandial bonus
    pub postprandial_floor: f64,
    /// NEAT `(minutes, bonus)` tiers, descending
    pub neat_tiers: Vec<(f64, f64)>,
    /// Step `(steps, bonus)` tiers, descending
    pub step_tiers: Vec<(f64, f64)>,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            intensity_zone_weight: activity::INTENSITY_ZONE_WEIGHT,
            workout_tiers: activity::WORKOUT_TIERS.to_vec(),
            postprandial_window_min: activity::POSTPRANDIAL_WINDOW_MIN,
            postprandial_high: activity::POSTPRANDIAL_HIGH,
            postprandial_moderate: activity::POSTPRANDIAL_MODERATE,
            postprandial_light: activity::POSTPRANDIAL_LIGHT,
            cardio_multiplier: activity::CARDIO_MULTIPLIER,
            strength_multiplier: activity::STRENGTH_MULTIPLIER,
            hobby_multiplier: activity::HOBBY_MULTIPLIER,
            proximity_boosts: activity::PROXIMITY_BOOSTS.to_vec(),
            late_proximity_boost: activity::LATE_PROXIMITY_BOOST,
            kcal_per_minute: activity::KCAL_PER_MINUTE,
            reference_weight_kg: activity::REFERENCE_WEIGHT_KG,
            high_intensity_energy_factor: activity::HIGH_INTENSITY_ENERGY_FACTOR,
            energy_boosts: activity::ENERGY_BOOSTS.to_vec(),
            postprandial_floor: activity::POSTPRANDIAL_FLOOR,
            neat_tiers: activity::NEAT_TIERS.to_vec(),
            step_tiers: activity::STEP_TIERS.to_vec(),
        }
    }
}

/// Day-level physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayFactorConfig {
    /// `(hours strictly below, bonus)` sleep tiers, ascending
    pub sleep_hours_tiers: Vec<(f64, f64)>,
    /// Poor sleep quality bonus
    pub sleep_quality_poor_bonus: f64,
    /// Mediocre sleep quality bonus
    pub sleep_quality_mediocre_bonus: f64,
    /// Water goal in ml per kg
    pub water_ml_per_kg: f64,
    /// `(goal share strictly below, bonus)` hydration tiers, ascending
    pub hydration_tiers: Vec<(f64, f64)>,
    /// `(stress at or above, bonus)` tiers, descending
    pub stress_tiers: Vec<(f64, f64)>,
    /// First luteal day
    pub luteal_phase_start_day: u8,
    /// Last cycle day
    pub cycle_length_days: u8,
    /// Luteal multiplier
    pub luteal_multiplier: f64,
}

impl Default for DayFactorConfig {
    fn default() -> Self {
        Self {
            sleep_hours_tiers: day_factors::SLEEP_HOURS_TIERS.to_vec(),
            sleep_quality_poor_bonus: day_factors::SLEEP_QUALITY_POOR_BONUS,
            sleep_quality_mediocre_bonus: day_factors::SLEEP_QUALITY_MEDIOCRE_BONUS,
            water_ml_per_kg: day_factors::WATER_ML_PER_KG,
            hydration_tiers: day_factors::HYDRATION_TIERS.to_vec(),
            stress_tiers: day_factors::STRESS_TIERS.to_vec(),
            luteal_phase_start_day: day_factors::LUTEAL_PHASE_START_DAY,
            cycle_length_days: day_factors::CYCLE_LENGTH_DAYS,
            luteal_multiplier: day_factors::LUTEAL_MULTIPLIER,
        }
    }
}

/// Personal baseline wave settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Population baseline in hours
    pub base_wave_hours: f64,
    /// Lower bound in hours
    pub min_wave_hours: f64,
    /// Upper bound in hours
    pub max_wave_hours: f64,
    /// Age pivot in years
    pub age_pivot_years: f64,
    /// Growth per year over the pivot
    pub age_factor_per_year: f64,
    /// BMI pivot
    pub bmi_pivot: f64,
    /// Growth per BMI unit over the pivot
    pub bmi_factor_per_unit: f64,
    /// Largest low-BMI reduction
    pub bmi_factor_floor: f64,
    /// Female adjustment
    pub female_factor: f64,
    /// Male adjustment
    pub male_factor: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            base_wave_hours: baseline::BASE_WAVE_HOURS,
            min_wave_hours: baseline::MIN_WAVE_HOURS,
            max_wave_hours: baseline::MAX_WAVE_HOURS,
            age_pivot_years: baseline::AGE_PIVOT_YEARS,
            age_factor_per_year: baseline::AGE_FACTOR_PER_YEAR,
            bmi_pivot: baseline::BMI_PIVOT,
            bmi_factor_per_unit: baseline::BMI_FACTOR_PER_UNIT,
            bmi_factor_floor: baseline::BMI_FACTOR_FLOOR,
            female_factor: baseline::FEMALE_FACTOR,
            male_factor: baseline::MALE_FACTOR,
        }
    }
}

/// Rise, plateau and decline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Base rise in minutes
    pub rise_base_min: f64,
    /// Rise minutes per 5 g fiber
    pub rise_fiber_min_per_5g: f64,
    /// Liquid rise factor
    pub rise_liquid_factor: f64,
    /// Rise bounds in minutes
    pub rise_bounds_min: (f64, f64),
    /// Base plateau share
    pub plateau_base_share: f64,
    /// Plateau share per 20 g protein
    pub plateau_protein_share: f64,
    /// Plateau share per 15 g fat
    pub plateau_fat_share: f64,
    /// Maximum plateau share
    pub plateau_max_share: f64,
    /// Decline change with activity
    pub decline_activity_factor: f64,
    /// Minimum decline in minutes
    pub decline_min: f64,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            rise_base_min: phases::RISE_BASE_MIN,
            rise_fiber_min_per_5g: phases::RISE_FIBER_MIN_PER_5G,
            rise_liquid_factor: phases::RISE_LIQUID_FACTOR,
            rise_bounds_min: phases::RISE_BOUNDS_MIN,
            plateau_base_share: phases::PLATEAU_BASE_SHARE,
            plateau_protein_share: phases::PLATEAU_PROTEIN_SHARE,
            plateau_fat_share: phases::PLATEAU_FAT_SHARE,
            plateau_max_share: phases::PLATEAU_MAX_SHARE,
            decline_activity_factor: phases::DECLINE_ACTIVITY_FACTOR,
            decline_min: phases::DECLINE_MIN,
        }
    }
}

/// Second-meal effect settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackingConfig {
    /// Strongest stacking bonus
    pub max_stack_bonus: f64,
    /// Decay rate over the reference overlap
    pub decay_rate: f64,
    /// Reference overlap in minutes
    pub overlap_reference_min: f64,
    /// Previous GL normalisation
    pub gl_reference: f64,
    /// Cap on the previous GL factor
    pub gl_factor_cap: f64,
}

impl Default for StackingConfig {
    fn default() -> Self {
        Self {
            max_stack_bonus: stacking::MAX_STACK_BONUS,
            decay_rate: stacking::DECAY_RATE,
            overlap_reference_min: stacking::OVERLAP_REFERENCE_MIN,
            gl_reference: stacking::GL_REFERENCE,
            gl_factor_cap: stacking::GL_FACTOR_CAP,
        }
    }
}

/// Final combination bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationConfig {
    /// Lower bound of `1 + sum(bonuses)`
    pub min_bonus_factor: f64,
    /// Shortest reported wave in hours
    pub min_wave_hours: f64,
    /// Longest reported wave in hours
    pub max_wave_hours: f64,
}

impl Default for CombinationConfig {
    fn default() -> Self {
        Self {
            min_bonus_factor: combination::MIN_BONUS_FACTOR,
            min_wave_hours: combination::MIN_WAVE_HOURS,
            max_wave_hours: combination::MAX_WAVE_HOURS,
        }
    }
}

impl WaveModelConfig {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if bounds are inverted or tier tables are out of order
    pub fn validate(&self) -> Result<(), ConfigError> {
        let glycemic = &self.glycemic;
        validate_ascending_tiers(&glycemic.gi_bands, "gi_bands must ascend by GI")?;
        if glycemic.gi_effect_min_gl >= glycemic.gi_effect_full_gl {
            return Err(ConfigError::InvalidRange(
                "gi_effect_min_gl must be < gi_effect_full_gl",
            ));
        }
        if !(0.0..=1.0).contains(&glycemic.gl_scale_floor) || glycemic.gl_scale_full <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "gl_scale_floor must be within [0, 1] and gl_scale_full positive",
            ));
        }
        if glycemic.gl_curve_floor >= glycemic.gl_curve_ceiling
            || glycemic.gl_curve_reference <= 0.0
            || glycemic.gl_curve_exponent <= 0.0
        {
            return Err(ConfigError::InvalidRange(
                "GL curve must rise from floor to ceiling over a positive reference",
            ));
        }

        let nutrients = &self.nutrients;
        validate_descending_tiers(&nutrients.protein_tiers, "protein_tiers must descend")?;
        validate_descending_tiers(&nutrients.fiber_tiers, "fiber_tiers must descend")?;
        validate_descending_tiers(&nutrients.fat_tiers, "fat_tiers must descend")?;
        validate_descending_tiers(&nutrients.trans_fat_tiers, "trans_fat_tiers must descend")?;

        let circadian = &self.circadian;
        if !(0.0..24.0).contains(&circadian.peak_hour) {
            return Err(ConfigError::InvalidRange("circadian peak_hour must be in [0, 24)"));
        }
        validate_bounds(
            (circadian.min_multiplier, circadian.max_multiplier),
            "circadian min_multiplier must be < max_multiplier",
        )?;

        let activity = &self.activity;
        validate_descending_tiers(&activity.workout_tiers, "workout_tiers must descend")?;
        validate_ascending_tiers(&activity.proximity_boosts, "proximity_boosts must ascend")?;
        validate_descending_tiers(&activity.energy_boosts, "energy_boosts must descend")?;
        validate_descending_tiers(&activity.neat_tiers, "neat_tiers must descend")?;
        validate_descending_tiers(&activity.step_tiers, "step_tiers must descend")?;
        if activity.postprandial_floor >= 0.0 || activity.reference_weight_kg <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "postprandial_floor must be negative and reference_weight_kg positive",
            ));
        }

        let day = &self.day_factors;
        validate_ascending_tiers(&day.sleep_hours_tiers, "sleep_hours_tiers must ascend")?;
        validate_ascending_tiers(&day.hydration_tiers, "hydration_tiers must ascend")?;
        validate_descending_tiers(&day.stress_tiers, "stress_tiers must descend")?;
        if day.luteal_phase_start_day > day.cycle_length_days {
            return Err(ConfigError::InvalidRange(
                "luteal_phase_start_day must not exceed cycle_length_days",
            ));
        }

        validate_bounds(
            (self.baseline.min_wave_hours, self.baseline.max_wave_hours),
            "baseline min_wave_hours must be < max_wave_hours",
        )?;
        validate_bounds(self.phases.rise_bounds_min, "rise bounds must be ordered")?;
        if self.stacking.max_stack_bonus > 0.0 {
            return Err(ConfigError::InvalidRange("max_stack_bonus must not be positive"));
        }
        validate_bounds(
            (self.combination.min_wave_hours, self.combination.max_wave_hours),
            "combination min_wave_hours must be < max_wave_hours",
        )
    }
}
