// ABOUTME: Tiered threshold computation: population priors, Bayesian blend, or full percentiles
// ABOUTME: Every value is clamped to its physiological limit and tagged with confidence and source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Threshold Engine
//!
//! | History       | Tier      | Method                                  |
//! |---------------|-----------|-----------------------------------------|
//! | < 7 days      | `Default` | population priors, overall confidence 0 |
//! | 7 to 13 days  | `Partial` | sigmoid-weighted blend with priors      |
//! | >= 14 days    | `Full`    | percentiles, EMA and chronotype         |
//!
//! Day summaries are built in parallel with rayon; the rest is sequential.

use super::{
    Chronotype, DateRange, ProfileSnapshot, ThresholdEntry, ThresholdName, ThresholdSet,
    ThresholdSource, ThresholdTier, ThresholdValue,
};
use crate::config::thresholds::{Limit, Prior};
use crate::config::{ThresholdConfig, WaveModelConfig};
use crate::stats::{coefficient_of_variation, ema, mean, median, percentile, sigmoid, variance};
use crate::wave::nutrients::NutrientProfile;
use chrono::{DateTime, Utc};
use mealwave_core::constants::thresholds::{
    fixed_confidence, DEFAULT_MEALS_PER_DAY, THRESHOLD_SLOTS, UNKNOWN_VARIANCE,
};
use mealwave_core::models::{DayRecord, Goal, PersonProfile, ProductCatalog};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Per-day observations extracted from a day record
#[derive(Debug, Clone, Default)]
pub struct DaySummary {
    /// Hour of the first meal
    pub first_meal_hour: Option<f64>,
    /// Hour of the last meal
    pub last_meal_hour: Option<f64>,
    /// Gaps between consecutive meals in minutes
    pub gaps_min: Vec<f64>,
    /// Carbohydrate-weighted GI of the day
    pub avg_gi: Option<f64>,
    /// Protein eaten before the morning cutoff
    pub morning_protein_g: Option<f64>,
    /// Fiber eaten in the day
    pub fiber_g: f64,
    /// Protein eaten in the day
    pub protein_g: f64,
    /// Number of meals
    pub meal_count: usize,
    /// Reported or summed kcal
    pub kcal: f64,
    /// Workout minutes
    pub workout_minutes: f64,
}

impl DaySummary {
    /// Summarize one day
    #[must_use]
    pub fn from_day(
        day: &DayRecord,
        catalog: &dyn ProductCatalog,
        wave_config: &WaveModelConfig,
        config: &ThresholdConfig,
    ) -> Self {
        let mut meals: Vec<(f64, NutrientProfile)> = day
            .meals
            .iter()
            .map(|meal| {
                (
                    meal.time.hours(),
                    NutrientProfile::from_meal(meal, catalog, wave_config),
                )
            })
            .collect();
        meals.sort_by(|a, b| a.0.total_cmp(&b.0));

        let gaps_min = meals
            .windows(2)
            .map(|pair| (pair[1].0 - pair[0].0) * 60.0)
            .filter(|gap| *gap > 0.0 && *gap < config.max_gap_min)
            .collect();

        let carbs: f64 = meals.iter().map(|(_, meal)| meal.carbs).sum();
        let avg_gi = (carbs > 0.0).then(|| {
            meals
                .iter()
                .map(|(_, meal)| meal.avg_gi * meal.carbs)
                .sum::<f64>()
                / carbs
        });

        let morning: Vec<f64> = meals
            .iter()
            .filter(|(hour, _)| *hour < config.morning_cutoff_hour)
            .map(|(_, meal)| meal.protein)
            .collect();
        let summed_kcal: f64 = meals.iter().map(|(_, meal)| meal.kcal).sum();

        Self {
            first_meal_hour: meals.first().map(|(hour, _)| *hour),
            last_meal_hour: meals.last().map(|(hour, _)| *hour),
            gaps_min,
            avg_gi,
            morning_protein_g: (!morning.is_empty()).then(|| morning.iter().sum()),
            fiber_g: meals.iter().map(|(_, meal)| meal.fiber).sum(),
            protein_g: meals.iter().map(|(_, meal)| meal.protein).sum(),
            meal_count: meals.len(),
            kcal: day.eaten_kcal.unwrap_or(summed_kcal),
            workout_minutes: day.workout_minutes(),
        }
    }
}

/// Observation series gathered across summaries
#[derive(Debug, Default)]
struct Observations {
    last_hours: Vec<f64>,
    first_hours: Vec<f64>,
    gaps: Vec<f64>,
    gis: Vec<f64>,
    morning_protein: Vec<f64>,
    fiber: Vec<f64>,
    meals_per_day: Vec<f64>,
}

impl Observations {
    fn collect(summaries: &[DaySummary]) -> Self {
        let mut obs = Self::default();
        for day in summaries {
            obs.last_hours.extend(day.last_meal_hour);
            obs.first_hours.extend(day.first_meal_hour);
            obs.gaps.extend_from_slice(&day.gaps_min);
            obs.gis.extend(day.avg_gi);
            obs.morning_protein.extend(day.morning_protein_g);
            if day.meal_count > 0 {
                obs.fiber.push(day.fiber_g);
                obs.meals_per_day.push(day.meal_count as f64);
            }
        }
        obs
    }
}

/// Personalized threshold engine
#[derive(Debug, Clone, Default)]
pub struct ThresholdEngine {
    config: ThresholdConfig,
    wave_config: WaveModelConfig,
}

impl ThresholdEngine {
    /// Create an engine; `wave_config` drives nutrient resolution
    #[must_use]
    pub const fn new(config: ThresholdConfig, wave_config: WaveModelConfig) -> Self {
        Self {
            config,
            wave_config,
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Compute thresholds stamped with the current time
    #[must_use]
    pub fn compute(
        &self,
        history: &[DayRecord],
        profile: Option<&PersonProfile>,
        catalog: &dyn ProductCatalog,
    ) -> ThresholdSet {
        self.compute_at(history, profile, catalog, Utc::now())
    }

    /// Compute thresholds stamped with `now`
    #[must_use]
    pub fn compute_at(
        &self,
        history: &[DayRecord],
        profile: Option<&PersonProfile>,
        catalog: &dyn ProductCatalog,
        now: DateTime<Utc>,
    ) -> ThresholdSet {
        let mut days: Vec<&DayRecord> = history.iter().collect();
        days.sort_by_key(|day| day.date);
        let summaries = self.summarize(&days, catalog);

        let (tier, thresholds, overall) = if days.len() < self.config.min_days_partial {
            (ThresholdTier::Default, self.prior_entries(profile), 0.0)
        } else if days.len() < self.config.min_days_full {
            let thresholds = self.partial_entries(&summaries, profile);
            let computed = thresholds.values().filter(|e| e.source.is_computed()).count();
            (
                ThresholdTier::Partial,
                thresholds,
                computed as f64 / THRESHOLD_SLOTS,
            )
        } else {
            let overall = (days.len() as f64 / self.config.optimal_days as f64).min(1.0);
            (
                ThresholdTier::Full,
                self.full_entries(&summaries, profile),
                overall,
            )
        };

        info!(
            days = days.len(),
            tier = ?tier,
            overall_confidence = overall,
            "Computed personalized thresholds"
        );

        ThresholdSet {
            thresholds,
            overall_confidence: overall.clamp(0.0, 1.0),
            tier,
            computed_at: now,
            days_used: days.len(),
            date_range: date_range(&days),
            snapshot: self.snapshot(&summaries, profile),
            phenotype_applied: false,
        }
    }

    fn summarize(&self, days: &[&DayRecord], catalog: &dyn ProductCatalog) -> Vec<DaySummary> {
        days.par_iter()
            .map(|day| DaySummary::from_day(day, catalog, &self.wave_config, &self.config))
            .collect()
    }

    fn snapshot(&self, summaries: &[DaySummary], profile: Option<&PersonProfile>) -> ProfileSnapshot {
        let recent = &summaries[summaries
            .len()
            .saturating_sub(self.config.invalidation.recent_days)..];
        let kcal: Vec<f64> = recent.iter().map(|d| d.kcal).filter(|k| *k > 0.0).collect();
        let workouts: Vec<f64> = recent.iter().map(|d| d.workout_minutes).collect();
        ProfileSnapshot {
            goal: profile.map_or(Goal::default(), |p| p.goal),
            weight_kg: profile.and_then(|p| p.weight_kg),
            avg_kcal: mean(&kcal),
            avg_workout_minutes: mean(&workouts),
        }
    }

    /// Prior entry clamped to its limit
    fn prior_entry(&self, prior: Prior, limit: Limit) -> ThresholdEntry {
        ThresholdEntry::numeric(
            limit.clamp(prior.mean),
            self.config.prior_confidence,
            prior.std * prior.std,
            self.config.reliable_confidence,
            ThresholdSource::PopulationPrior,
        )
    }

    /// Confidence and variance of an observation series
    fn confidence(&self, values: &[f64]) -> (f64, f64) {
        if values.len() < self.config.min_samples_confidence {
            return (0.0, UNKNOWN_VARIANCE);
        }
        let sample = (values.len() as f64 / self.config.optimal_days as f64).min(1.0);
        let stability =
            (1.0 - coefficient_of_variation(values) / self.config.confidence_cv_ceiling).max(0.0);
        (
            sample * stability,
            variance(values).unwrap_or(UNKNOWN_VARIANCE),
        )
    }

    fn computed_entry(
        &self,
        value: f64,
        values: &[f64],
        limit: Limit,
        source: ThresholdSource,
    ) -> ThresholdEntry {
        let (confidence, variance) = self.confidence(values);
        ThresholdEntry::numeric(
            limit.clamp(value),
            confidence,
            variance,
            self.config.reliable_confidence,
            source,
        )
    }

    fn daily_protein_coefficient(&self, goal: Goal, full: bool) -> f64 {
        let coefficients = &self.config.protein;
        match (goal, full) {
            (Goal::Cut, false) => coefficients.prior_cut,
            (Goal::Maintain, false) => coefficients.prior_maintain,
            (Goal::Bulk, false) => coefficients.prior_bulk,
            (Goal::Cut, true) => coefficients.full_cut,
            (Goal::Maintain, true) => coefficients.full_maintain,
            (Goal::Bulk, true) => coefficients.full_bulk,
        }
    }

    fn protein_per_meal(
        &self,
        profile: Option<&PersonProfile>,
        meals_per_day: f64,
        full: bool,
    ) -> f64 {
        let goal = profile.map_or(Goal::default(), |p| p.goal);
        let weight = profile
            .and_then(|p| p.weight_kg)
            .filter(|w| *w > 0.0)
            .unwrap_or(self.config.protein.default_weight_kg);
        let meals = if meals_per_day > 0.0 {
            meals_per_day
        } else {
            DEFAULT_MEALS_PER_DAY
        };
        self.config
            .limits
            .protein_per_meal_g
            .clamp(weight * self.daily_protein_coefficient(goal, full) / meals)
    }

    fn prior_entries(&self, profile: Option<&PersonProfile>) -> BTreeMap<ThresholdName, ThresholdEntry> {
        let priors = &self.config.priors;
        let limits = &self.config.limits;
        let mut entries = BTreeMap::new();
        entries.insert(
            ThresholdName::LateEatingHour,
            self.prior_entry(priors.late_eating_hour, limits.late_eating_hour),
        );
        entries.insert(
            ThresholdName::IdealMealGapMin,
            self.prior_entry(priors.ideal_meal_gap_min, limits.ideal_meal_gap_min),
        );
        entries.insert(
            ThresholdName::GiOptimal,
            self.prior_entry(priors.gi_optimal, limits.gi_optimal),
        );
        entries.insert(
            ThresholdName::MorningProteinG,
            self.prior_entry(priors.morning_protein_g, limits.morning_protein_g),
        );
        entries.insert(
            ThresholdName::FiberTarget,
            self.prior_entry(priors.fiber_target, limits.fiber_target),
        );

        let mut protein = self.prior_entry(priors.protein_per_meal_g, limits.protein_per_meal_g);
        if profile.and_then(|p| p.weight_kg).is_some() {
            protein.value =
                ThresholdValue::Numeric(self.protein_per_meal(profile, DEFAULT_MEALS_PER_DAY, false));
        }
        entries.insert(ThresholdName::ProteinPerMealG, protein);

        entries.insert(
            ThresholdName::Chronotype,
            ThresholdEntry {
                value: ThresholdValue::Chronotype(Chronotype::Neutral),
                confidence: self.config.prior_confidence,
                variance: 0.0,
                reliable: false,
                source: ThresholdSource::PopulationPrior,
            },
        );
        entries.insert(
            ThresholdName::CircadianShift,
            ThresholdEntry::numeric(
                0.0,
                self.config.prior_confidence,
                0.0,
                self.config.reliable_confidence,
                ThresholdSource::PopulationPrior,
            ),
        );
        entries
    }

    /// Blend an observation with its prior; the prior weight decays as days accumulate
    fn blended_entry(
        &self,
        observed: Option<f64>,
        values: &[f64],
        prior: Prior,
        limit: Limit,
        prior_weight: f64,
    ) -> ThresholdEntry {
        match observed {
            Some(observed) if values.len() >= self.config.min_samples_confidence => {
                let blended = prior_weight.mul_add(prior.mean, (1.0 - prior_weight) * observed);
                self.computed_entry(blended, values, limit, ThresholdSource::BayesianBlend)
            }
            _ => self.prior_entry(prior, limit),
        }
    }

    fn partial_entries(
        &self,
        summaries: &[DaySummary],
        profile: Option<&PersonProfile>,
    ) -> BTreeMap<ThresholdName, ThresholdEntry> {
        let obs = Observations::collect(summaries);
        let progress = (summaries.len() as f64 / self.config.min_days_full as f64).min(1.0);
        let prior_weight = sigmoid(-self.config.blend_steepness * (progress - 0.5));
        debug!(days = summaries.len(), prior_weight, "Blending thresholds with priors");

        let priors = &self.config.priors;
        let limits = &self.config.limits;
        let mut entries = self.prior_entries(profile);

        entries.insert(
            ThresholdName::LateEatingHour,
            self.blended_entry(
                percentile(&obs.last_hours, 90.0),
                &obs.last_hours,
                priors.late_eating_hour,
                limits.late_eating_hour,
                prior_weight,
            ),
        );
        entries.insert(
            ThresholdName::IdealMealGapMin,
            self.blended_entry(
                median(&obs.gaps),
                &obs.gaps,
                priors.ideal_meal_gap_min,
                limits.ideal_meal_gap_min,
                prior_weight,
            ),
        );
        entries.insert(
            ThresholdName::GiOptimal,
            self.blended_entry(
                median(&obs.gis),
                &obs.gis,
                priors.gi_optimal,
                limits.gi_optimal,
                prior_weight,
            ),
        );
        entries.insert(
            ThresholdName::MorningProteinG,
            self.blended_entry(
                median(&obs.morning_protein),
                &obs.morning_protein,
                priors.morning_protein_g,
                limits.morning_protein_g,
                prior_weight,
            ),
        );
        entries.insert(
            ThresholdName::FiberTarget,
            self.blended_entry(
                median(&obs.fiber),
                &obs.fiber,
                priors.fiber_target,
                limits.fiber_target,
                prior_weight,
            ),
        );

        let meals_per_day = mean(&obs.meals_per_day).unwrap_or(DEFAULT_MEALS_PER_DAY);
        entries.insert(
            ThresholdName::ProteinPerMealG,
            ThresholdEntry::numeric(
                self.protein_per_meal(profile, meals_per_day, false),
                fixed_confidence::PARTIAL_PROTEIN,
                fixed_confidence::PROTEIN_VARIANCE,
                self.config.reliable_confidence,
                ThresholdSource::CalculatedFromProfile,
            ),
        );
        entries
    }

    /// Full-tier entry from `value`, or the prior when samples are short
    fn full_entry(
        &self,
        value: Option<f64>,
        values: &[f64],
        prior: Prior,
        limit: Limit,
        source: ThresholdSource,
    ) -> ThresholdEntry {
        match value {
            Some(value) if values.len() >= self.config.min_samples_full => {
                self.computed_entry(value, values, limit, source)
            }
            _ => self.prior_entry(prior, limit),
        }
    }

    fn detect_chronotype(&self, obs: &Observations) -> Option<Chronotype> {
        let first = mean(&obs.first_hours)?;
        let last = mean(&obs.last_hours)?;
        let bounds = &self.config.chronotype;
        Some(
            if first < bounds.lark_first_before && last < bounds.lark_last_before {
                Chronotype::Lark
            } else if first > bounds.owl_first_after && last > bounds.owl_last_after {
                Chronotype::Owl
            } else {
                Chronotype::Neutral
            },
        )
    }

    fn full_entries(
        &self,
        summaries: &[DaySummary],
        profile: Option<&PersonProfile>,
    ) -> BTreeMap<ThresholdName, ThresholdEntry> {
        let obs = Observations::collect(summaries);
        let priors = &self.config.priors;
        let limits = &self.config.limits;
        let mut entries = self.prior_entries(profile);

        entries.insert(
            ThresholdName::LateEatingHour,
            self.full_entry(
                percentile(&obs.last_hours, 75.0),
                &obs.last_hours,
                priors.late_eating_hour,
                limits.late_eating_hour,
                ThresholdSource::ComputedP75,
            ),
        );

        let smoothed_gaps = ema(&obs.gaps, self.config.gap_ema_span);
        entries.insert(
            ThresholdName::IdealMealGapMin,
            self.full_entry(
                median(&smoothed_gaps),
                &obs.gaps,
                priors.ideal_meal_gap_min,
                limits.ideal_meal_gap_min,
                ThresholdSource::ComputedMedianEma,
            ),
        );
        entries.insert(
            ThresholdName::GiOptimal,
            self.full_entry(
                percentile(&obs.gis, 25.0),
                &obs.gis,
                priors.gi_optimal,
                limits.gi_optimal,
                ThresholdSource::ComputedP25,
            ),
        );
        entries.insert(
            ThresholdName::MorningProteinG,
            self.full_entry(
                percentile(&obs.morning_protein, 75.0)
                    .map(|p75| p75 * self.config.morning_protein_factor),
                &obs.morning_protein,
                priors.morning_protein_g,
                limits.morning_protein_g,
                ThresholdSource::ComputedP75Adjusted,
            ),
        );
        entries.insert(
            ThresholdName::FiberTarget,
            self.full_entry(
                percentile(&obs.fiber, 75.0).map(|p75| p75.max(self.config.fiber_floor_g)),
                &obs.fiber,
                priors.fiber_target,
                limits.fiber_target,
                ThresholdSource::ComputedP75Floor,
            ),
        );

        let meals_per_day = median(&obs.meals_per_day).unwrap_or(DEFAULT_MEALS_PER_DAY);
        entries.insert(
            ThresholdName::ProteinPerMealG,
            ThresholdEntry::numeric(
                self.protein_per_meal(profile, meals_per_day, true),
                fixed_confidence::FULL_PROTEIN,
                fixed_confidence::PROTEIN_VARIANCE,
                self.config.reliable_confidence,
                ThresholdSource::CalculatedFromProfile,
            ),
        );

        if let Some(chronotype) = self.detect_chronotype(&obs) {
            self.insert_chronotype(&mut entries, chronotype);
        }
        entries
    }

    fn insert_chronotype(
        &self,
        entries: &mut BTreeMap<ThresholdName, ThresholdEntry>,
        chronotype: Chronotype,
    ) {
        let shift = match chronotype {
            Chronotype::Owl => self.config.chronotype.owl_shift_hours,
            Chronotype::Lark => self.config.chronotype.lark_shift_hours,
            Chronotype::Neutral => 0.0,
        };
        debug!(chronotype = ?chronotype, shift, "Detected chronotype");
        entries.insert(
            ThresholdName::Chronotype,
            ThresholdEntry {
                value: ThresholdValue::Chronotype(chronotype),
                confidence: fixed_confidence::CHRONOTYPE,
                variance: 0.0,
                reliable: fixed_confidence::CHRONOTYPE > self.config.reliable_confidence,
                source: ThresholdSource::ComputedPattern,
            },
        );
        entries.insert(
            ThresholdName::CircadianShift,
            ThresholdEntry::numeric(
                shift,
                fixed_confidence::CIRCADIAN_SHIFT,
                0.0,
                self.config.reliable_confidence,
                ThresholdSource::DerivedFromChronotype,
            ),
        );
    }
}

fn date_range(days: &[&DayRecord]) -> Option<DateRange> {
    Some(DateRange {
        start: days.first()?.date,
        end: days.last()?.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use mealwave_core::models::{ClockTime, EmptyCatalog, Meal, MealItem, ProductFacts};

    fn day(offset: u64, meal_hours: &[f64]) -> DayRecord {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap();
        let mut record = DayRecord::new(date);
        record.meals = meal_hours
            .iter()
            .map(|hour| Meal {
                time: ClockTime::from_hours(*hour),
                items: vec![MealItem::new("oats", 100.0).with_snapshot(ProductFacts {
                    carbs: Some(60.0),
                    protein: Some(12.0),
                    gi: Some(55.0),
                    fiber: Some(8.0),
                    kcal: Some(380.0),
                    ..ProductFacts::default()
                })],
            })
            .collect();
        record
    }

    #[test]
    fn test_summary_gaps_and_morning_protein() {
        let engine = ThresholdEngine::default();
        let summary = DaySummary::from_day(
            &day(0, &[8.0, 12.5, 19.0]),
            &EmptyCatalog,
            &engine.wave_config,
            &engine.config,
        );
        assert_eq!(summary.meal_count, 3);
        assert_eq!(summary.gaps_min.len(), 2);
        assert!((summary.gaps_min[0] - 270.0).abs() < 1e-9);
        assert!((summary.morning_protein_g.unwrap() - 12.0).abs() < 1e-9);
        assert!((summary.last_meal_hour.unwrap() - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_needs_three_samples() {
        let engine = ThresholdEngine::default();
        let (confidence, variance) = engine.confidence(&[1.0, 2.0]);
        assert!(confidence.abs() < 1e-12);
        assert!((variance - UNKNOWN_VARIANCE).abs() < 1e-12);
    }

    #[test]
    fn test_partial_tier_blends() {
        let engine = ThresholdEngine::default();
        let history: Vec<DayRecord> = (0..10).map(|i| day(i, &[8.0, 13.0, 20.0])).collect();
        let set = engine.compute(&history, None, &EmptyCatalog);
        assert_eq!(set.tier, ThresholdTier::Partial);
        let late = set.get(ThresholdName::LateEatingHour).unwrap();
        assert_eq!(late.source, ThresholdSource::BayesianBlend);
        let value = late.as_f64().unwrap();
        assert!((20.0..=21.2).contains(&value));
        assert!(set.overall_confidence > 0.0 && set.overall_confidence <= 1.0);
    }
}
