// ABOUTME: Adaptive threshold engine configuration: tiers, priors, limits, TTL and change detection
// ABOUTME: Defaults come from population studies and physiological guard rails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{validate_bounds, ConfigError};
use mealwave_core::constants::thresholds::{
    self as constants, chronotype, invalidation, limits, priors, protein, ttl,
};
use serde::{Deserialize, Serialize};

/// Mean and standard deviation of a population prior
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Prior {
    /// Population mean
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
}

impl From<(f64, f64)> for Prior {
    fn from((mean, std): (f64, f64)) -> Self {
        Self { mean, std }
    }
}

/// Inclusive physiological range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Limit {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Limit {
    /// Clamp a value into the range
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl From<(f64, f64)> for Limit {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Priors for every numeric threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdPriors {
    /// Last-meal hour
    pub late_eating_hour: Prior,
    /// Inter-meal gap in minutes
    pub ideal_meal_gap_min: Prior,
    /// Optimal GI
    pub gi_optimal: Prior,
    /// Morning protein grams
    pub morning_protein_g: Prior,
    /// Daily fiber grams
    pub fiber_target: Prior,
    /// Protein per meal grams
    pub protein_per_meal_g: Prior,
}

impl Default for ThresholdPriors {
    fn default() -> Self {
        Self {
            late_eating_hour: priors::LATE_EATING_HOUR.into(),
            ideal_meal_gap_min: priors::IDEAL_MEAL_GAP_MIN.into(),
            gi_optimal: priors::GI_OPTIMAL.into(),
            morning_protein_g: priors::MORNING_PROTEIN_G.into(),
            fiber_target: priors::FIBER_TARGET.into(),
            protein_per_meal_g: priors::PROTEIN_PER_MEAL_G.into(),
        }
    }
}

/// Hard limits for every numeric threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdLimits {
    /// Last-meal hour
    pub late_eating_hour: Limit,
    /// Inter-meal gap in minutes
    pub ideal_meal_gap_min: Limit,
    /// Optimal GI
    pub gi_optimal: Limit,
    /// Morning protein grams
    pub morning_protein_g: Limit,
    /// Daily fiber grams
    pub fiber_target: Limit,
    /// Protein per meal grams
    pub protein_per_meal_g: Limit,
}

impl Default for ThresholdLimits {
    fn default() -> Self {
        Self {
            late_eating_hour: limits::LATE_EATING_HOUR.into(),
            ideal_meal_gap_min: limits::IDEAL_MEAL_GAP_MIN.into(),
            gi_optimal: limits::GI_OPTIMAL.into(),
            morning_protein_g: limits::MORNING_PROTEIN_G.into(),
            fiber_target: limits::FIBER_TARGET.into(),
            protein_per_meal_g: limits::PROTEIN_PER_MEAL_G.into(),
        }
    }
}

/// Daily protein coefficients in g/kg per goal and tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProteinCoefficients {
    /// Prior tier, cutting
    pub prior_cut: f64,
    /// Prior tier, maintaining
    pub prior_maintain: f64,
    /// Prior tier, bulking
    pub prior_bulk: f64,
    /// Full tier, cutting
    pub full_cut: f64,
    /// Full tier, maintaining
    pub full_maintain: f64,
    /// Full tier, bulking
    pub full_bulk: f64,
    /// Weight assumed when the profile has none
    pub default_weight_kg: f64,
}

impl Default for ProteinCoefficients {
    fn default() -> Self {
        Self {
            prior_cut: protein::PRIOR_CUT,
            prior_maintain: protein::PRIOR_MAINTAIN,
            prior_bulk: protein::PRIOR_BULK,
            full_cut: protein::FULL_CUT,
            full_maintain: protein::FULL_MAINTAIN,
            full_bulk: protein::FULL_BULK,
            default_weight_kg: protein::DEFAULT_WEIGHT_KG,
        }
    }
}

/// Adaptive TTL and stability scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtlConfig {
    /// Base TTL in hours
    pub base_hours: f64,
    /// Hours added at full stability
    pub stability_bonus_hours: f64,
    /// Maximum TTL in hours
    pub max_hours: f64,
    /// Stability with too little history
    pub default_stability: f64,
    /// Days required for a stability score
    pub min_days: usize,
    /// Calorie samples required for a stability score
    pub min_kcal_samples: usize,
    /// Timing CV with fewer than 3 samples
    pub default_timing_cv: f64,
    /// `(weight, CV ceiling)` for daily calories
    pub kcal_component: (f64, f64),
    /// `(weight, CV ceiling)` for meal counts
    pub meals_component: (f64, f64),
    /// `(weight, CV ceiling)` for last-meal timing
    pub timing_component: (f64, f64),
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            base_hours: ttl::BASE_HOURS,
            stability_bonus_hours: ttl::STABILITY_BONUS_HOURS,
            max_hours: ttl::MAX_HOURS,
            default_stability: ttl::DEFAULT_STABILITY,
            min_days: ttl::MIN_DAYS,
            min_kcal_samples: ttl::MIN_KCAL_SAMPLES,
            default_timing_cv: ttl::DEFAULT_TIMING_CV,
            kcal_component: ttl::KCAL_COMPONENT,
            meals_component: ttl::MEALS_COMPONENT,
            timing_component: ttl::TIMING_COMPONENT,
        }
    }
}

/// Significant-change detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationConfig {
    /// Goal change weight
    pub goal_change_weight: f64,
    /// Weight change weight
    pub weight_change_weight: f64,
    /// Training shift weight
    pub training_shift_weight: f64,
    /// Diet break weight
    pub diet_break_weight: f64,
    /// Body-weight delta in kg
    pub weight_delta_kg: f64,
    /// Recent days inspected
    pub recent_days: usize,
    /// Recent calorie days required for a diet break
    pub min_diet_break_days: usize,
    /// Snapshot calories required before comparing
    pub min_snapshot_kcal: f64,
    /// Relative calorie deviation
    pub kcal_deviation: f64,
    /// Relative workout-minute deviation
    pub training_deviation: f64,
    /// Snapshot workout minutes required before comparing
    pub min_snapshot_workout_min: f64,
}

impl Default for InvalidationConfig {
    fn default() -> Self {
        Self {
            goal_change_weight: invalidation::GOAL_CHANGE_WEIGHT,
            weight_change_weight: invalidation::WEIGHT_CHANGE_WEIGHT,
            training_shift_weight: invalidation::TRAINING_SHIFT_WEIGHT,
            diet_break_weight: invalidation::DIET_BREAK_WEIGHT,
            weight_delta_kg: invalidation::WEIGHT_DELTA_KG,
            recent_days: invalidation::RECENT_DAYS,
            min_diet_break_days: invalidation::MIN_DIET_BREAK_DAYS,
            min_snapshot_kcal: invalidation::MIN_SNAPSHOT_KCAL,
            kcal_deviation: invalidation::KCAL_DEVIATION,
            training_deviation: invalidation::TRAINING_DEVIATION,
            min_snapshot_workout_min: invalidation::MIN_SNAPSHOT_WORKOUT_MIN,
        }
    }
}

/// Chronotype detection boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronotypeConfig {
    /// Lark: average first meal before this hour
    pub lark_first_before: f64,
    /// Lark: average last meal before this hour
    pub lark_last_before: f64,
    /// Owl: average first meal after this hour
    pub owl_first_after: f64,
    /// Owl: average last meal after this hour
    pub owl_last_after: f64,
    /// Owl circadian shift in hours
    pub owl_shift_hours: f64,
    /// Lark circadian shift in hours
    pub lark_shift_hours: f64,
}

impl Default for ChronotypeConfig {
    fn default() -> Self {
        Self {
            lark_first_before: chronotype::LARK_FIRST_BEFORE,
            lark_last_before: chronotype::LARK_LAST_BEFORE,
            owl_first_after: chronotype::OWL_FIRST_AFTER,
            owl_last_after: chronotype::OWL_LAST_AFTER,
            owl_shift_hours: chronotype::OWL_SHIFT_HOURS,
            lark_shift_hours: chronotype::LARK_SHIFT_HOURS,
        }
    }
}

/// Adaptive threshold engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Days for the full tier
    pub min_days_full: usize,
    /// Days for the partial tier
    pub min_days_partial: usize,
    /// Days at which confidence saturates
    pub optimal_days: usize,
    /// Samples per full-tier threshold
    pub min_samples_full: usize,
    /// Samples before confidence is computed
    pub min_samples_confidence: usize,
    /// Confidence above which a threshold is reliable
    pub reliable_confidence: f64,
    /// CV at which confidence reaches zero
    pub confidence_cv_ceiling: f64,
    /// Confidence of population priors
    pub prior_confidence: f64,
    /// Largest kept inter-meal gap in minutes
    pub max_gap_min: f64,
    /// Meals before this hour count as morning
    pub morning_cutoff_hour: f64,
    /// Share of P75 morning protein used
    pub morning_protein_factor: f64,
    /// Fiber floor in grams
    pub fiber_floor_g: f64,
    /// EMA span for inter-meal gaps
    pub gap_ema_span: usize,
    /// Bayesian blend steepness
    pub blend_steepness: f64,
    /// Population priors
    pub priors: ThresholdPriors,
    /// Physiological limits
    pub limits: ThresholdLimits,
    /// Protein coefficients
    pub protein: ProteinCoefficients,
    /// TTL scoring
    pub ttl: TtlConfig,
    /// Change detection
    pub invalidation: InvalidationConfig,
    /// Chronotype boundaries
    pub chronotype: ChronotypeConfig,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_days_full: constants::MIN_DAYS_FULL,
            min_days_partial: constants::MIN_DAYS_PARTIAL,
            optimal_days: constants::OPTIMAL_DAYS,
            min_samples_full: constants::MIN_SAMPLES_FULL,
            min_samples_confidence: constants::MIN_SAMPLES_CONFIDENCE,
            reliable_confidence: constants::RELIABLE_CONFIDENCE,
            confidence_cv_ceiling: constants::CONFIDENCE_CV_CEILING,
            prior_confidence: constants::PRIOR_CONFIDENCE,
            max_gap_min: constants::MAX_GAP_MIN,
            morning_cutoff_hour: constants::MORNING_CUTOFF_HOUR,
            morning_protein_factor: constants::MORNING_PROTEIN_FACTOR,
            fiber_floor_g: constants::FIBER_FLOOR_G,
            gap_ema_span: constants::GAP_EMA_SPAN,
            blend_steepness: constants::BLEND_STEEPNESS,
            priors: ThresholdPriors::default(),
            limits: ThresholdLimits::default(),
            protein: ProteinCoefficients::default(),
            ttl: TtlConfig::default(),
            invalidation: InvalidationConfig::default(),
            chronotype: ChronotypeConfig::default(),
        }
    }
}

impl ThresholdConfig {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if tiers, TTLs, limits or weights are inconsistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_days_partial == 0 || self.min_days_partial >= self.min_days_full {
            return Err(ConfigError::InvalidRange(
                "min_days_partial must be positive and < min_days_full",
            ));
        }
        if self.optimal_days < self.min_days_full {
            return Err(ConfigError::InvalidRange(
                "optimal_days must be >= min_days_full",
            ));
        }
        if !(0.0..=1.0).contains(&self.reliable_confidence)
            || !(0.0..=1.0).contains(&self.prior_confidence)
        {
            return Err(ConfigError::InvalidRange(
                "confidence settings must be within [0, 1]",
            ));
        }
        if self.ttl.base_hours <= 0.0 || self.ttl.base_hours > self.ttl.max_hours {
            return Err(ConfigError::InvalidRange(
                "ttl base_hours must be positive and <= max_hours",
            ));
        }
        let weight_sum = self.ttl.kcal_component.0
            + self.ttl.meals_component.0
            + self.ttl.timing_component.0;
        if (weight_sum - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "stability component weights must sum to 1.0",
            ));
        }

        let limits = &self.limits;
        for (limit, message) in [
            (limits.late_eating_hour, "late_eating_hour limit must be ordered"),
            (limits.ideal_meal_gap_min, "ideal_meal_gap_min limit must be ordered"),
            (limits.gi_optimal, "gi_optimal limit must be ordered"),
            (limits.morning_protein_g, "morning_protein_g limit must be ordered"),
            (limits.fiber_target, "fiber_target limit must be ordered"),
            (limits.protein_per_meal_g, "protein_per_meal_g limit must be ordered"),
        ] {
            validate_bounds((limit.min, limit.max), message)?;
        }
        Ok(())
    }
}
