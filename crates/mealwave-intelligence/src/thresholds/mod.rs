// ABOUTME: Personalized threshold types: names, sources, entries and the per-person ThresholdSet
// ABOUTME: Declares the tiered engine and the adaptive cache policy submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Adaptive Thresholds
//!
//! A [`ThresholdSet`] holds one [`ThresholdEntry`] per [`ThresholdName`].
//! Entries carry their own confidence and a [`ThresholdSource`] tag so a
//! consumer can tell a population prior from a value learned from history.
//!
//! The [`engine`] chooses a tier from the history length; the
//! [`cache_policy`] decides how long a computed set stays valid.

/// Stability scoring, adaptive TTL and change detection
pub mod cache_policy;
/// Tiered threshold computation
pub mod engine;

pub use cache_policy::{CachedThresholds, ChangeEvent};
pub use engine::ThresholdEngine;

use chrono::{DateTime, NaiveDate, Utc};
use mealwave_core::models::Goal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Personalized threshold identifiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdName {
    /// Hour after which eating counts as late
    LateEatingHour,
    /// Ideal minutes between meals
    IdealMealGapMin,
    /// Glycemic index the person tolerates best
    GiOptimal,
    /// Protein target before noon
    MorningProteinG,
    /// Daily fiber target
    FiberTarget,
    /// Protein target per meal
    ProteinPerMealG,
    /// Lark, owl or neutral
    Chronotype,
    /// Circadian peak shift in hours
    CircadianShift,
}

impl ThresholdName {
    /// Every threshold in display order
    pub const ALL: [Self; 8] = [
        Self::LateEatingHour,
        Self::IdealMealGapMin,
        Self::GiOptimal,
        Self::MorningProteinG,
        Self::FiberTarget,
        Self::ProteinPerMealG,
        Self::Chronotype,
        Self::CircadianShift,
    ];

    /// Stable string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LateEatingHour => "late_eating_hour",
            Self::IdealMealGapMin => "ideal_meal_gap_min",
            Self::GiOptimal => "gi_optimal",
            Self::MorningProteinG => "morning_protein_g",
            Self::FiberTarget => "fiber_target",
            Self::ProteinPerMealG => "protein_per_meal_g",
            Self::Chronotype => "chronotype",
            Self::CircadianShift => "circadian_shift",
        }
    }
}

impl fmt::Display for ThresholdName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a threshold value was obtained
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// Population mean
    PopulationPrior,
    /// Prior and observation blended by sample size
    BayesianBlend,
    /// 75th percentile of history
    ComputedP75,
    /// Median of EMA-smoothed history
    ComputedMedianEma,
    /// 25th percentile of history
    ComputedP25,
    /// Scaled 75th percentile
    ComputedP75Adjusted,
    /// 75th percentile with a floor
    ComputedP75Floor,
    /// Derived from body weight and goal
    CalculatedFromProfile,
    /// Derived from meal timing patterns
    ComputedPattern,
    /// Derived from the detected chronotype
    DerivedFromChronotype,
}

impl ThresholdSource {
    /// Whether the value came from the person's own data
    #[must_use]
    pub const fn is_computed(self) -> bool {
        !matches!(self, Self::PopulationPrior)
    }
}

/// Meal-timing chronotype
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Chronotype {
    /// Early riser
    Lark,
    /// Late riser
    Owl,
    /// Neither
    #[default]
    Neutral,
}

/// Threshold value: numeric or a chronotype label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ThresholdValue {
    /// Numeric threshold
    Numeric(f64),
    /// Chronotype label
    Chronotype(Chronotype),
}

impl ThresholdValue {
    /// Numeric value, if any
    #[must_use]
    pub const fn as_f64(self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(value),
            Self::Chronotype(_) => None,
        }
    }

    /// Chronotype value, if any
    #[must_use]
    pub const fn as_chronotype(self) -> Option<Chronotype> {
        match self {
            Self::Chronotype(chronotype) => Some(chronotype),
            Self::Numeric(_) => None,
        }
    }
}

/// One personalized threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThresholdEntry {
    /// Threshold value
    pub value: ThresholdValue,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Sample variance of the underlying observations
    pub variance: f64,
    /// Confidence above the reliability cutoff
    pub reliable: bool,
    /// Provenance
    pub source: ThresholdSource,
}

impl ThresholdEntry {
    /// Numeric entry; `reliable` follows from `confidence`
    #[must_use]
    pub fn numeric(
        value: f64,
        confidence: f64,
        variance: f64,
        reliable_cutoff: f64,
        source: ThresholdSource,
    ) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        Self {
            value: ThresholdValue::Numeric(value),
            confidence,
            variance,
            reliable: confidence > reliable_cutoff,
            source,
        }
    }

    /// Numeric value, if any
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

/// History tier a set was computed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdTier {
    /// Population priors only
    Default,
    /// Blended with priors
    Partial,
    /// Fully personalized
    Full,
}

/// Inclusive date range of the history a set was computed from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
}

impl DateRange {
    /// Whether `other` lies inside this range
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

/// Profile and behavior snapshot taken when the set was computed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProfileSnapshot {
    /// Goal at computation time
    pub goal: Goal,
    /// Body weight at computation time
    pub weight_kg: Option<f64>,
    /// Average daily kcal of the recent window
    pub avg_kcal: Option<f64>,
    /// Average daily workout minutes of the recent window
    pub avg_workout_minutes: Option<f64>,
}

/// Per-person personalized thresholds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdSet {
    /// Entries by name; always complete
    pub thresholds: BTreeMap<ThresholdName, ThresholdEntry>,
    /// Overall confidence in `[0, 1]`
    pub overall_confidence: f64,
    /// History tier
    pub tier: ThresholdTier,
    /// Computation timestamp
    pub computed_at: DateTime<Utc>,
    /// Days of history used
    pub days_used: usize,
    /// History date range, absent for empty history
    pub date_range: Option<DateRange>,
    /// Snapshot for change detection
    pub snapshot: ProfileSnapshot,
    /// Whether the phenotype decorator ran
    #[serde(default)]
    pub phenotype_applied: bool,
}

impl ThresholdSet {
    /// Entry for `name`
    #[must_use]
    pub fn get(&self, name: ThresholdName) -> Option<&ThresholdEntry> {
        self.thresholds.get(&name)
    }

    /// Value for `name`
    #[must_use]
    pub fn value(&self, name: ThresholdName) -> Option<ThresholdValue> {
        self.get(name).map(|entry| entry.value)
    }

    /// Numeric value for `name`
    #[must_use]
    pub fn numeric(&self, name: ThresholdName) -> Option<f64> {
        self.value(name).and_then(ThresholdValue::as_f64)
    }

    /// Numeric value for `name`, only when the entry is reliable
    #[must_use]
    pub fn reliable_numeric(&self, name: ThresholdName) -> Option<f64> {
        self.get(name)
            .filter(|entry| entry.reliable)
            .and_then(ThresholdEntry::as_f64)
    }

    /// Detected chronotype
    #[must_use]
    pub fn chronotype(&self) -> Chronotype {
        self.value(ThresholdName::Chronotype)
            .and_then(ThresholdValue::as_chronotype)
            .unwrap_or_default()
    }

    /// Circadian peak shift in hours, zero when unknown
    #[must_use]
    pub fn circadian_shift(&self) -> f64 {
        self.numeric(ThresholdName::CircadianShift).unwrap_or(0.0)
    }

    /// Number of reliable entries
    #[must_use]
    pub fn reliable_count(&self) -> usize {
        self.thresholds.values().filter(|entry| entry.reliable).count()
    }

    /// Number of entries learned from history
    #[must_use]
    pub fn computed_count(&self) -> usize {
        self.thresholds
            .values()
            .filter(|entry| entry.source.is_computed())
            .count()
    }
}
