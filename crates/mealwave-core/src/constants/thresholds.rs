// ABOUTME: Adaptive threshold constants: history tiers, population priors, limits and TTLs
// ABOUTME: Guard rails applied to every personalized threshold regardless of tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Days of history required for the full personalized tier
pub const MIN_DAYS_FULL: usize = 14;

/// Days of history required for the partial (blended) tier
pub const MIN_DAYS_PARTIAL: usize = 7;

/// History length at which sample-size confidence saturates
pub const OPTIMAL_DAYS: usize = 21;

/// Minimum observations for a full-tier percentile threshold
pub const MIN_SAMPLES_FULL: usize = 10;

/// Minimum observations before a per-threshold confidence is computed
pub const MIN_SAMPLES_CONFIDENCE: usize = 3;

/// Confidence above which a threshold is flagged reliable
pub const RELIABLE_CONFIDENCE: f64 = 0.7;

/// Coefficient of variation at which threshold confidence reaches zero
pub const CONFIDENCE_CV_CEILING: f64 = 0.4;

/// Variance recorded for a threshold with too few samples
pub const UNKNOWN_VARIANCE: f64 = 999.0;

/// Confidence attached to every population prior
pub const PRIOR_CONFIDENCE: f64 = 0.3;

/// Number of threshold slots counted by the partial tier's overall confidence
pub const THRESHOLD_SLOTS: f64 = 8.0;

/// Inter-meal gaps are kept only when strictly between 0 and this many minutes
pub const MAX_GAP_MIN: f64 = 720.0;

/// Meals before this hour count towards morning protein
pub const MORNING_CUTOFF_HOUR: f64 = 12.0;

/// Share of P75 morning protein used as the target
pub const MORNING_PROTEIN_FACTOR: f64 = 0.85;

/// Fiber target never drops below this many grams
pub const FIBER_FLOOR_G: f64 = 25.0;

/// EMA span for smoothing inter-meal gaps
pub const GAP_EMA_SPAN: usize = 7;

/// Bayesian blend sigmoid steepness
pub const BLEND_STEEPNESS: f64 = 10.0;

/// Meals per day assumed when history has none
pub const DEFAULT_MEALS_PER_DAY: f64 = 4.0;

/// Confidence attached to thresholds derived by rule rather than percentile
pub mod fixed_confidence {
    /// Profile-derived protein per meal in the partial tier
    pub const PARTIAL_PROTEIN: f64 = 0.8;
    /// Profile-derived protein per meal in the full tier
    pub const FULL_PROTEIN: f64 = 0.9;
    /// Variance recorded for profile-derived protein
    pub const PROTEIN_VARIANCE: f64 = 0.1;
    /// Detected chronotype
    pub const CHRONOTYPE: f64 = 0.8;
    /// Chronotype-derived circadian shift
    pub const CIRCADIAN_SHIFT: f64 = 0.7;
}

/// Population priors `(mean, std)`
///
/// References:
/// - Gill, S. & Panda, S. (2015). A smartphone app reveals erratic diurnal eating patterns
/// - Institute of Medicine (2005). Dietary Reference Intakes: fiber
/// - Areta, J.L. et al. (2013). Timing and distribution of protein ingestion
pub mod priors {
    /// Hour of the last meal
    pub const LATE_EATING_HOUR: (f64, f64) = (21.2, 1.8);
    /// Ideal gap between meals in minutes
    pub const IDEAL_MEAL_GAP_MIN: (f64, f64) = (260.0, 45.0);
    /// Optimal average glycemic index
    pub const GI_OPTIMAL: (f64, f64) = (56.0, 8.5);
    /// Morning protein in grams
    pub const MORNING_PROTEIN_G: (f64, f64) = (22.0, 8.3);
    /// Daily fiber target in grams
    pub const FIBER_TARGET: (f64, f64) = (28.0, 6.2);
    /// Protein per meal in grams
    pub const PROTEIN_PER_MEAL_G: (f64, f64) = (28.0, 9.1);
}

/// Hard physiological limits `(min, max)`
pub mod limits {
    /// Last-meal hour
    pub const LATE_EATING_HOUR: (f64, f64) = (20.0, 24.0);
    /// Ideal inter-meal gap in minutes
    pub const IDEAL_MEAL_GAP_MIN: (f64, f64) = (120.0, 360.0);
    /// Optimal GI
    pub const GI_OPTIMAL: (f64, f64) = (40.0, 70.0);
    /// Morning protein grams
    pub const MORNING_PROTEIN_G: (f64, f64) = (15.0, 50.0);
    /// Daily fiber grams
    pub const FIBER_TARGET: (f64, f64) = (20.0, 50.0);
    /// Protein per meal grams
    pub const PROTEIN_PER_MEAL_G: (f64, f64) = (15.0, 60.0);
}

/// Daily protein coefficients in g/kg
pub mod protein {
    /// Prior tier, cutting
    pub const PRIOR_CUT: f64 = 1.8;
    /// Prior tier, maintaining
    pub const PRIOR_MAINTAIN: f64 = 1.4;
    /// Prior tier, bulking
    pub const PRIOR_BULK: f64 = 1.6;
    /// Full tier, cutting
    pub const FULL_CUT: f64 = 1.6;
    /// Full tier, maintaining
    pub const FULL_MAINTAIN: f64 = 1.4;
    /// Full tier, bulking
    pub const FULL_BULK: f64 = 2.0;
    /// Body weight assumed when the profile has none
    pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
}

/// Adaptive TTL and stability scoring
pub mod ttl {
    /// Base TTL in hours
    pub const BASE_HOURS: f64 = 12.0;
    /// TTL hours added at full stability
    pub const STABILITY_BONUS_HOURS: f64 = 60.0;
    /// Maximum TTL in hours
    pub const MAX_HOURS: f64 = 72.0;
    /// Stability assumed with too little history
    pub const DEFAULT_STABILITY: f64 = 0.3;
    /// Days required for a stability score
    pub const MIN_DAYS: usize = 7;
    /// Days with calories required for a stability score
    pub const MIN_KCAL_SAMPLES: usize = 5;
    /// Timing CV assumed when fewer than 3 last-meal samples exist
    pub const DEFAULT_TIMING_CV: f64 = 0.15;
    /// `(weight, CV ceiling)` for daily calories
    pub const KCAL_COMPONENT: (f64, f64) = (0.45, 0.35);
    /// `(weight, CV ceiling)` for meals per day
    pub const MEALS_COMPONENT: (f64, f64) = (0.25, 0.3);
    /// `(weight, CV ceiling)` for last-meal timing
    pub const TIMING_COMPONENT: (f64, f64) = (0.30, 0.2);
}

/// Significant-change invalidation
pub mod invalidation {
    /// Weight of a goal change
    pub const GOAL_CHANGE_WEIGHT: f64 = 1.0;
    /// Weight of a large body-weight change
    pub const WEIGHT_CHANGE_WEIGHT: f64 = 0.8;
    /// Weight of a training pattern shift
    pub const TRAINING_SHIFT_WEIGHT: f64 = 0.7;
    /// Weight of a diet-pattern break
    pub const DIET_BREAK_WEIGHT: f64 = 0.6;
    /// Body-weight change in kg that invalidates
    pub const WEIGHT_DELTA_KG: f64 = 5.0;
    /// Recent days inspected for change detection
    pub const RECENT_DAYS: usize = 7;
    /// Minimum recent days with calories for a diet-pattern break
    pub const MIN_DIET_BREAK_DAYS: usize = 3;
    /// Snapshot average calories required before comparing
    pub const MIN_SNAPSHOT_KCAL: f64 = 200.0;
    /// Relative calorie deviation that counts as a break
    pub const KCAL_DEVIATION: f64 = 0.3;
    /// Relative workout-minute deviation that counts as a training shift
    pub const TRAINING_DEVIATION: f64 = 0.5;
    /// Snapshot workout minutes required before comparing
    pub const MIN_SNAPSHOT_WORKOUT_MIN: f64 = 10.0;
}

/// Chronotype detection from average first/last meal hours
pub mod chronotype {
    /// Lark: first meal earlier than this
    pub const LARK_FIRST_BEFORE: f64 = 7.0;
    /// Lark: last meal earlier than this
    pub const LARK_LAST_BEFORE: f64 = 21.0;
    /// Owl: first meal later than this
    pub const OWL_FIRST_AFTER: f64 = 9.0;
    /// Owl: last meal later than this
    pub const OWL_LAST_AFTER: f64 = 22.0;
    /// Circadian shift for owls in hours
    pub const OWL_SHIFT_HOURS: f64 = 2.0;
    /// Circadian shift for larks in hours
    pub const LARK_SHIFT_HOURS: f64 = -1.0;
}

/// Phenotype multipliers applied on top of computed thresholds
pub mod phenotype {
    /// Late-eating hour, insulin resistant
    pub const LATE_HOUR_INSULIN_RESISTANT: f64 = 0.85;
    /// Late-eating hour, metabolic syndrome risk
    pub const LATE_HOUR_METABOLIC_SYNDROME: f64 = 0.8;
    /// Late-eating hour, evening type
    pub const LATE_HOUR_EVENING_TYPE: f64 = 1.1;
    /// Late-eating hour, morning type
    pub const LATE_HOUR_MORNING_TYPE: f64 = 0.95;
    /// Protein per meal, low satiety
    pub const PROTEIN_LOW_SATIETY: f64 = 1.2;
    /// Protein per meal, high satiety
    pub const PROTEIN_HIGH_SATIETY: f64 = 0.9;
    /// Protein per meal, volume eater
    pub const PROTEIN_VOLUME_EATER: f64 = 0.95;
    /// Protein per meal, insulin resistant
    pub const PROTEIN_INSULIN_RESISTANT: f64 = 1.15;
    /// Fiber target, insulin resistant
    pub const FIBER_INSULIN_RESISTANT: f64 = 1.2;
    /// Fiber target, low satiety
    pub const FIBER_LOW_SATIETY: f64 = 1.3;
}
