// ABOUTME: Insulin wave physiology constants grouped by contributing factor
// ABOUTME: GI bands, glycemic-load curve, nutrient bonuses, activity, circadian and day factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physiological constants for the insulin wave model
//!
//! Tier tables are ordered from the strongest tier to the weakest; the first
//! tier whose threshold is met wins. Bonuses are fractional changes of wave
//! length (negative shortens, positive lengthens).

/// Glycemic index bands and glycemic-load gating
///
/// References:
/// - Brand-Miller, J. et al. (2003). Low-glycemic index diets in the management of diabetes
/// - Atkinson, F.S. et al. (2008). International tables of glycemic index and glycemic load values
pub mod glycemic {
    /// GI bands as `(upper inclusive GI, wave multiplier)`; GI above the last band uses
    /// [`HIGH_GI_MULTIPLIER`]
    pub const GI_BANDS: [(f64, f64); 3] = [(35.0, 1.2), (55.0, 1.0), (70.0, 0.85)];

    /// Wave multiplier for GI above 70
    pub const HIGH_GI_MULTIPLIER: f64 = 0.7;

    /// GI assumed for a meal without carbohydrates
    pub const NEUTRAL_GI: f64 = 50.0;

    /// Below this glycemic load GI has no effect on the wave
    pub const GI_EFFECT_MIN_GL: f64 = 7.0;

    /// From this glycemic load GI applies at full strength
    pub const GI_EFFECT_FULL_GL: f64 = 20.0;

    /// Nutrient-bonus scale at zero glycemic load
    pub const GL_SCALE_FLOOR: f64 = 0.25;

    /// Glycemic load at which nutrient bonuses reach full scale
    pub const GL_SCALE_FULL: f64 = 20.0;

    /// Continuous GL curve: multiplier at zero load
    pub const GL_CURVE_FLOOR: f64 = 0.15;

    /// Continuous GL curve: multiplier at and above [`GL_CURVE_REFERENCE`]
    pub const GL_CURVE_CEILING: f64 = 1.30;

    /// Continuous GL curve: load at which the ceiling is reached
    pub const GL_CURVE_REFERENCE: f64 = 40.0;

    /// Continuous GL curve exponent
    pub const GL_CURVE_EXPONENT: f64 = 0.6;

    /// GL category upper bounds (exclusive): micro, very low, low, medium, high
    pub const GL_CATEGORY_BOUNDS: [f64; 5] = [2.0, 5.0, 10.0, 20.0, 30.0];
}

/// Per-item insulin index boosts applied to glycemic load
///
/// Reference: Holt, S.H. et al. (1997). An insulin index of foods. Am J Clin Nutr 66(5)
pub mod insulin_index {
    /// Milk, kefir and other drinkable dairy
    pub const LIQUID_DAIRY_GL_BOOST: f64 = 1.5;
    /// Yogurt, cottage cheese, cream
    pub const SOFT_DAIRY_GL_BOOST: f64 = 1.3;
    /// Hard cheeses
    pub const HARD_DAIRY_GL_BOOST: f64 = 1.1;
    /// Meat, fish and other protein foods
    pub const PROTEIN_GL_BOOST: f64 = 1.2;
    /// Maximum added GL as a multiple of the item's base GL
    pub const MAX_GL_BOOST: f64 = 2.0;

    /// Insulinogenic wave bonus: liquid dairy
    pub const LIQUID_DAIRY_BONUS: f64 = 0.15;
    /// Insulinogenic wave bonus: soft dairy
    pub const SOFT_DAIRY_BONUS: f64 = 0.10;
    /// Insulinogenic wave bonus: hard dairy
    pub const HARD_DAIRY_BONUS: f64 = 0.05;
    /// Insulinogenic wave bonus: protein foods
    pub const PROTEIN_BONUS: f64 = 0.08;
}

/// Macronutrient bonuses, scaled by the glycemic-load factor
///
/// References:
/// - Liddle, R.A. et al. (1991). Gastric emptying and fat
/// - Weickert, M.O. & Pfeiffer, A.F. (2008). Metabolic effects of dietary fiber
pub mod nutrients {
    /// Protein tiers `(grams, base bonus)`
    pub const PROTEIN_TIERS: [(f64, f64); 3] = [(50.0, 0.07), (35.0, 0.05), (20.0, 0.03)];
    /// Protein type multiplier: animal
    pub const PROTEIN_ANIMAL_MULTIPLIER: f64 = 1.8;
    /// Protein type multiplier: plant
    pub const PROTEIN_PLANT_MULTIPLIER: f64 = 1.3;
    /// Protein type multiplier: whey
    pub const PROTEIN_WHEY_MULTIPLIER: f64 = 2.0;
    /// Protein type multiplier: mixed or unknown
    pub const PROTEIN_MIXED_MULTIPLIER: f64 = 1.5;

    /// Fiber tiers `(grams, bonus)`
    pub const FIBER_TIERS: [(f64, f64); 3] = [(15.0, -0.20), (10.0, -0.15), (5.0, -0.08)];

    /// Fat tiers `(grams, bonus)`
    pub const FAT_TIERS: [(f64, f64); 3] = [(25.0, 0.15), (15.0, 0.10), (8.0, 0.05)];

    /// Trans fat tiers `(grams, bonus)`
    pub const TRANS_FAT_TIERS: [(f64, f64); 3] = [(2.0, 0.15), (1.0, 0.08), (0.5, 0.04)];

    /// Liquid meals produce a shorter wave
    pub const LIQUID_WAVE_MULTIPLIER: f64 = 0.75;
    /// Share of liquid grams above which a meal counts as liquid
    pub const LIQUID_RATIO_THRESHOLD: f64 = 0.5;

    /// Food form multiplier: liquid
    pub const FORM_LIQUID_MULTIPLIER: f64 = 1.30;
    /// Food form multiplier: processed
    pub const FORM_PROCESSED_MULTIPLIER: f64 = 1.15;
    /// Food form multiplier: whole
    pub const FORM_WHOLE_MULTIPLIER: f64 = 0.85;

    /// Alcohol bonus: strong drinks
    pub const ALCOHOL_STRONG_BONUS: f64 = 0.25;
    /// Alcohol bonus: wine, beer
    pub const ALCOHOL_MEDIUM_BONUS: f64 = 0.18;
    /// Alcohol bonus: light drinks
    pub const ALCOHOL_LIGHT_BONUS: f64 = 0.10;
    /// Caffeine bonus
    pub const CAFFEINE_BONUS: f64 = 0.06;
    /// Capsaicin thermogenesis shortens the wave slightly
    pub const SPICY_MULTIPLIER: f64 = 0.96;
}

/// Circadian insulin sensitivity
///
/// Reference: Saad, A. et al. (2012). Diurnal pattern to insulin secretion and insulin action
pub mod circadian {
    /// Hour of peak insulin sensitivity (minimum wave multiplier)
    pub const PEAK_HOUR: f64 = 8.0;
    /// Multiplier at peak sensitivity
    pub const MIN_MULTIPLIER: f64 = 0.85;
    /// Multiplier at the opposite phase
    pub const MAX_MULTIPLIER: f64 = 1.20;
}

/// Exercise before and after the meal
///
/// References:
/// - Colberg, S.R. et al. (2009). Postprandial walking is better for lowering glycemic effect
/// - Reynolds, A.N. et al. (2016). Advice to walk after meals is more effective
pub mod activity {
    /// Weight applied to zone 3-4 minutes when computing intensity minutes
    pub const INTENSITY_ZONE_WEIGHT: f64 = 1.5;
    /// Pre-meal workout tiers `(intensity minutes, bonus)`
    pub const WORKOUT_TIERS: [(f64, f64); 2] = [(45.0, -0.15), (20.0, -0.08)];

    /// Activity must start within this many minutes after the meal
    pub const POSTPRANDIAL_WINDOW_MIN: f64 = 120.0;
    /// High-intensity minutes threshold and bonus
    pub const POSTPRANDIAL_HIGH: (f64, f64) = (30.0, -0.50);
    /// Moderate total minutes threshold and bonus
    pub const POSTPRANDIAL_MODERATE: (f64, f64) = (20.0, -0.35);
    /// Light total minutes threshold and bonus
    pub const POSTPRANDIAL_LIGHT: (f64, f64) = (15.0, -0.20);
    /// Type multiplier: cardio
    pub const CARDIO_MULTIPLIER: f64 = 1.3;
    /// Type multiplier: strength
    pub const STRENGTH_MULTIPLIER: f64 = 1.0;
    /// Type multiplier: hobby or unclassified
    pub const HOBBY_MULTIPLIER: f64 = 0.8;
    /// Proximity boosts `(max gap minutes, boost)`; later starts use [`LATE_PROXIMITY_BOOST`]
    pub const PROXIMITY_BOOSTS: [(f64, f64); 3] = [(15.0, 1.5), (30.0, 1.3), (60.0, 1.0)];
    /// Boost for activity starting more than an hour after the meal
    pub const LATE_PROXIMITY_BOOST: f64 = 0.7;
    /// Energy estimate in kcal per minute for a 70 kg person
    pub const KCAL_PER_MINUTE: f64 = 5.0;
    /// Reference body weight for the energy estimate
    pub const REFERENCE_WEIGHT_KG: f64 = 70.0;
    /// Energy multiplier when high-intensity minutes dominate
    pub const HIGH_INTENSITY_ENERGY_FACTOR: f64 = 1.5;
    /// Energy boosts `(kcal, boost)`
    pub const ENERGY_BOOSTS: [(f64, f64); 2] = [(500.0, 1.5), (300.0, 1.25)];
    /// Strongest allowed postprandial bonus
    pub const POSTPRANDIAL_FLOOR: f64 = -0.85;

    /// NEAT tiers `(household minutes, bonus)`
    pub const NEAT_TIERS: [(f64, f64); 3] = [(60.0, -0.10), (30.0, -0.05), (15.0, -0.02)];
    /// Step tiers `(steps, bonus)`
    pub const STEP_TIERS: [(f64, f64); 3] = [(8000.0, -0.08), (5000.0, -0.04), (2000.0, -0.02)];
}

/// Day-level physiological state
///
/// References:
/// - Spiegel, K. et al. (1999). Impact of sleep debt on metabolic and endocrine function
/// - Rosmond, R. (2005). Role of stress in the pathogenesis of the metabolic syndrome
pub mod day_factors {
    /// Sleep tiers `(hours strictly below, bonus)`
    pub const SLEEP_HOURS_TIERS: [(f64, f64); 3] = [(4.0, 0.20), (5.0, 0.15), (6.0, 0.08)];
    /// Poor sleep quality bonus
    pub const SLEEP_QUALITY_POOR_BONUS: f64 = 0.08;
    /// Mediocre sleep quality bonus
    pub const SLEEP_QUALITY_MEDIOCRE_BONUS: f64 = 0.04;
    /// Daily water goal per kg of body weight
    pub const WATER_ML_PER_KG: f64 = 30.0;
    /// Hydration tiers `(share of goal strictly below, bonus)`
    pub const HYDRATION_TIERS: [(f64, f64); 3] = [(0.3, 0.08), (0.5, 0.05), (0.7, 0.03)];
    /// Stress tiers `(average stress at or above, bonus)` on a 1-10 scale
    pub const STRESS_TIERS: [(f64, f64); 2] = [(7.0, 0.15), (5.0, 0.08)];
    /// First luteal-phase cycle day
    pub const LUTEAL_PHASE_START_DAY: u8 = 15;
    /// Last cycle day considered
    pub const CYCLE_LENGTH_DAYS: u8 = 28;
    /// Luteal-phase insulin resistance multiplier
    pub const LUTEAL_MULTIPLIER: f64 = 1.08;
}

/// Personal baseline wave duration
///
/// Reference: Basu, R. et al. (2006). Mechanisms of the age-associated deterioration in glucose tolerance
pub mod baseline {
    /// Population baseline wave length in hours
    pub const BASE_WAVE_HOURS: f64 = 3.0;
    /// Lower bound for the personal baseline
    pub const MIN_WAVE_HOURS: f64 = 1.5;
    /// Upper bound for the personal baseline
    pub const MAX_WAVE_HOURS: f64 = 4.5;
    /// Age above which the baseline grows
    pub const AGE_PIVOT_YEARS: f64 = 30.0;
    /// Baseline growth per year over the pivot
    pub const AGE_FACTOR_PER_YEAR: f64 = 0.004;
    /// BMI above which the baseline grows
    pub const BMI_PIVOT: f64 = 25.0;
    /// Baseline growth per BMI unit over the pivot (half this rate applies below)
    pub const BMI_FACTOR_PER_UNIT: f64 = 0.015;
    /// Largest reduction from a low BMI
    pub const BMI_FACTOR_FLOOR: f64 = -0.10;
    /// Female baseline adjustment
    pub const FEMALE_FACTOR: f64 = -0.05;
    /// Male baseline adjustment
    pub const MALE_FACTOR: f64 = 0.03;
}

/// Wave phase decomposition
pub mod phases {
    /// Base rise duration in minutes
    pub const RISE_BASE_MIN: f64 = 20.0;
    /// Extra rise minutes per 5 g fiber
    pub const RISE_FIBER_MIN_PER_5G: f64 = 3.0;
    /// Liquid meals rise faster
    pub const RISE_LIQUID_FACTOR: f64 = 0.6;
    /// Rise bounds in minutes
    pub const RISE_BOUNDS_MIN: (f64, f64) = (10.0, 45.0);
    /// Base plateau share of the post-rise wave
    pub const PLATEAU_BASE_SHARE: f64 = 0.35;
    /// Plateau share added per 20 g protein
    pub const PLATEAU_PROTEIN_SHARE: f64 = 0.05;
    /// Plateau share added per 15 g fat
    pub const PLATEAU_FAT_SHARE: f64 = 0.08;
    /// Maximum plateau share
    pub const PLATEAU_MAX_SHARE: f64 = 0.55;
    /// Activity speeds up the decline
    pub const DECLINE_ACTIVITY_FACTOR: f64 = -0.15;
    /// Minimum decline duration in minutes
    pub const DECLINE_MIN: f64 = 20.0;
}

/// Second-meal effect when a meal starts inside the previous wave
///
/// Reference: Wolever, T.M. (2006). The glycaemic index: a physiological classification
pub mod stacking {
    /// Strongest stacking bonus
    pub const MAX_STACK_BONUS: f64 = -0.15;
    /// Decay rate over a 90 minute overlap
    pub const DECAY_RATE: f64 = 0.5;
    /// Overlap normalisation in minutes
    pub const OVERLAP_REFERENCE_MIN: f64 = 90.0;
    /// Previous-meal GL normalisation
    pub const GL_REFERENCE: f64 = 30.0;
    /// Cap on the previous-GL factor
    pub const GL_FACTOR_CAP: f64 = 1.2;
}

/// Final combination of all factors
pub mod combination {
    /// Lower bound of `1 + sum(bonuses)`
    pub const MIN_BONUS_FACTOR: f64 = 0.3;
    /// Shortest wave the model reports, in hours
    pub const MIN_WAVE_HOURS: f64 = 0.5;
    /// Longest wave the model reports, in hours
    pub const MAX_WAVE_HOURS: f64 = 6.0;
}
