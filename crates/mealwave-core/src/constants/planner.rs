// ABOUTME: Meal timeline planner scheduling constants
// ABOUTME: Sleep buffers, fat-burn margin, meal caps, budget ratios, protein floor and TEF
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Minutes of fat oxidation allowed after a wave ends before the next meal
pub const FAT_BURN_WINDOW_MIN: f64 = 30.0;

/// No eating within this many hours of sleep
pub const PRE_SLEEP_BUFFER_HOURS: f64 = 3.0;

/// Smallest pre-sleep buffer the hunger trade-off may shrink to
pub const MIN_PRE_SLEEP_BUFFER_HOURS: f64 = 1.5;

/// Remaining kcal that triggers the hunger trade-off
pub const HUNGER_TRADEOFF_KCAL: f64 = 600.0;

/// Sleep target used when nothing else is known
pub const FALLBACK_SLEEP_HOUR: f64 = 23.0;

/// Hour at which the planning day starts; earlier times belong to the previous night
pub const DAY_BOUNDARY_HOUR: f64 = 3.0;

/// Sleep targets before this hour fall after midnight
pub const AFTER_MIDNIGHT_SLEEP_CUTOFF_HOUR: f64 = 12.0;

/// Hours between the average last meal and sleep
pub const LAST_MEAL_TO_SLEEP_HOURS: f64 = 3.0;

/// Days of history used for sleep-target estimation
pub const SLEEP_ESTIMATE_DAYS: usize = 7;

/// Samples required for a history-based sleep estimate
pub const SLEEP_ESTIMATE_MIN_SAMPLES: usize = 3;

/// Wave length assumed for a planned meal before adjustment
pub const DEFAULT_WAVE_ESTIMATE_HOURS: f64 = 3.5;

/// Bounds of a planned meal's wave estimate in hours
pub const WAVE_ESTIMATE_BOUNDS: (f64, f64) = (2.5, 5.0);

/// Wave length assumed for the last meal when the model cannot run
pub const FALLBACK_WAVE_HOURS: f64 = 3.0;

/// Hard cap on planned meals
pub const MAX_MEALS: usize = 4;

/// Meals assumed when estimating the next meal's budget
pub const LOOKAHEAD_MEALS: usize = 2;

/// A further meal needs this many hours before the deadline after its earliest start
pub const MIN_NEXT_MEAL_HOURS: f64 = 2.0;

/// Remaining hours-to-sleep needed to schedule another meal
pub const MIN_HOURS_TO_SLEEP: f64 = 1.5;

/// Length of a planned meal window in hours
pub const MEAL_WINDOW_HOURS: f64 = 1.0;

/// Remaining kcal below which nothing is planned
pub const MIN_BUDGET_KCAL: f64 = 50.0;

/// Largest nominal single meal
pub const SINGLE_MEAL_CEILING_KCAL: f64 = 900.0;

/// Minimum gap between meals when a split is forced
pub const FORCE_SPLIT_GAP_HOURS: f64 = 2.0;

/// Budget ratios by meal count
pub const BUDGET_RATIOS: [&[f64]; 4] = [
    &[1.0],
    &[0.60, 0.40],
    &[0.45, 0.35, 0.20],
    &[0.35, 0.30, 0.20, 0.15],
];

/// Weight given to the hours-to-sleep adjustment when re-weighting ratios
pub const SLEEP_PROXIMITY_BLEND: f64 = 0.3;

/// Hours-to-sleep at which a slot gets no sleep-proximity penalty
pub const SLEEP_PROXIMITY_FULL_HOURS: f64 = 6.0;

/// Weight given to the time-of-day factor when re-weighting ratios
pub const TIME_OF_DAY_BLEND: f64 = 0.2;

/// Protein floor per meal in g/kg body weight
pub const PROTEIN_FLOOR_G_PER_KG: f64 = 0.3;

/// Protein floor ceiling in grams
pub const PROTEIN_FLOOR_CAP_G: f64 = 40.0;

/// Post-workout anabolic window in hours
pub const ANABOLIC_WINDOW_HOURS: f64 = 2.0;

/// Post-workout protein share of kcal
pub const RECOVERY_PROTEIN_SHARE: f64 = 0.30;

/// Post-workout carbohydrate share of kcal
pub const RECOVERY_CARB_SHARE: f64 = 0.50;

/// kcal per gram of protein and carbohydrate
pub const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;

/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Thermic effect of food as a share of each macro's energy
///
/// Reference: Westerterp, K.R. (2004). Diet induced thermogenesis. Nutr Metab 1:5
pub mod tef {
    /// Protein
    pub const PROTEIN: f64 = 0.25;
    /// Carbohydrate
    pub const CARBS: f64 = 0.08;
    /// Fat
    pub const FAT: f64 = 0.03;
}

/// Scenario detection
pub mod scenario {
    /// Last meal closer than this many hours to sleep is pre-sleep
    pub const PRE_SLEEP_HOURS: f64 = 4.0;
    /// Meals below this many kcal are snacks
    pub const LIGHT_SNACK_KCAL: f64 = 150.0;
    /// Meals above this many grams of protein are protein-focused
    pub const PROTEIN_FOCUS_G: f64 = 30.0;
    /// GL ceiling for pre-sleep meals and snacks
    pub const LOW_GL_MAX: f64 = 10.0;
    /// GL ceiling after a workout
    pub const POST_WORKOUT_GL_MAX: f64 = 30.0;
    /// GL ceiling otherwise
    pub const DEFAULT_GL_MAX: f64 = 20.0;
    /// GL ceiling reduction when the person's optimal GI is low
    pub const LOW_GI_GL_REDUCTION: f64 = 5.0;
    /// Optimal GI under which the reduction applies
    pub const LOW_GI_OPTIMAL: f64 = 50.0;
}

/// Macro-based wave estimate for a planned meal
pub mod wave_estimate {
    /// GI above which the wave shortens
    pub const HIGH_GI: f64 = 70.0;
    /// GI below which the wave lengthens
    pub const LOW_GI: f64 = 40.0;
    /// GI assumed when unknown
    pub const NEUTRAL_GI: f64 = 50.0;
    /// Multiplier for high-GI meals
    pub const HIGH_GI_FACTOR: f64 = 0.9;
    /// Multiplier for low-GI meals
    pub const LOW_GI_FACTOR: f64 = 1.1;
    /// Fat grams above which the wave lengthens
    pub const HIGH_FAT_G: f64 = 20.0;
    /// Multiplier for fatty meals
    pub const HIGH_FAT_FACTOR: f64 = 1.15;
    /// Protein grams above which the wave lengthens
    pub const HIGH_PROTEIN_G: f64 = 30.0;
    /// Multiplier for protein-heavy meals
    pub const HIGH_PROTEIN_FACTOR: f64 = 1.05;
}

/// Sleep-friendly food hints for pre-sleep meals
pub mod sleep_hint {
    /// Protein grams from which a casein-rich dairy hint is given
    pub const CASEIN_PROTEIN_G: f64 = 20.0;
    /// Carb-to-protein ratio above which complex low-GI carbs are suggested
    pub const CARB_HEAVY_RATIO: f64 = 2.0;
}
