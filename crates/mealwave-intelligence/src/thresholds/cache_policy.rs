// ABOUTME: Cache policy for threshold sets: stability score, adaptive TTL and change detection
// ABOUTME: Decides freshness, coverage and whether a new set may replace a cached one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{DateRange, ProfileSnapshot, ThresholdSet, ThresholdTier};
use crate::config::thresholds::{InvalidationConfig, TtlConfig};
use crate::stats::{coefficient_of_variation, mean};
use crate::wave::nutrients::meal_kcal;
use chrono::{DateTime, Duration, Utc};
use mealwave_core::models::{DayRecord, PersonProfile, ProductCatalog};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Energy eaten on a day: the logged total, else the sum over its meals
#[must_use]
pub fn day_kcal(day: &DayRecord, catalog: &dyn ProductCatalog) -> f64 {
    day.eaten_kcal
        .unwrap_or_else(|| day.meals.iter().map(|meal| meal_kcal(meal, catalog)).sum())
}

fn positive_kcal<'a>(
    days: impl IntoIterator<Item = &'a DayRecord>,
    catalog: &dyn ProductCatalog,
) -> Vec<f64> {
    days.into_iter()
        .map(|day| day_kcal(day, catalog))
        .filter(|kcal| *kcal > 0.0)
        .collect()
}

/// Behavioral stability in `[0, 1]`, from the variation of daily kcal, meal count and timing
#[must_use]
pub fn stability_score(
    history: &[DayRecord],
    catalog: &dyn ProductCatalog,
    config: &TtlConfig,
) -> f64 {
    if history.len() < config.min_days {
        return config.default_stability;
    }
    let kcal = positive_kcal(history, catalog);
    if kcal.len() < config.min_kcal_samples {
        return config.default_stability;
    }
    let meals: Vec<f64> = history
        .iter()
        .filter(|day| !day.meals.is_empty())
        .map(|day| day.meals.len() as f64)
        .collect();
    let last_hours: Vec<f64> = history
        .iter()
        .filter_map(DayRecord::last_meal)
        .map(|meal| meal.time.hours())
        .collect();
    let timing_cv = if last_hours.len() < 3 {
        config.default_timing_cv
    } else {
        coefficient_of_variation(&last_hours)
    };

    let component = |(weight, ceiling): (f64, f64), cv: f64| weight * (1.0 - cv / ceiling).max(0.0);
    let score = component(config.kcal_component, coefficient_of_variation(&kcal))
        + component(config.meals_component, coefficient_of_variation(&meals))
        + component(config.timing_component, timing_cv);
    score.clamp(0.0, 1.0)
}

/// TTL in hours: `min(base + bonus x stability, max)`
#[must_use]
pub fn adaptive_ttl_hours(stability: f64, config: &TtlConfig) -> f64 {
    config
        .stability_bonus_hours
        .mul_add(stability.clamp(0.0, 1.0), config.base_hours)
        .min(config.max_hours)
}

/// Event that invalidates a cached set early
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// Goal differs from the snapshot
    GoalChanged,
    /// Body weight moved by at least the configured delta
    WeightChanged {
        /// Signed change in kg
        delta_kg: f64,
    },
    /// Recent workout minutes deviate from the snapshot
    TrainingShift {
        /// Relative deviation
        deviation: f64,
    },
    /// Recent kcal deviate from the snapshot
    DietBreak {
        /// Relative deviation
        deviation: f64,
    },
}

impl ChangeEvent {
    /// Severity used for ranking
    #[must_use]
    pub fn weight(&self, config: &InvalidationConfig) -> f64 {
        match self {
            Self::GoalChanged => config.goal_change_weight,
            Self::WeightChanged { .. } => config.weight_change_weight,
            Self::TrainingShift { .. } => config.training_shift_weight,
            Self::DietBreak { .. } => config.diet_break_weight,
        }
    }
}

fn recent_days<'a>(history: &'a [DayRecord], config: &InvalidationConfig) -> Vec<&'a DayRecord> {
    let mut days: Vec<&DayRecord> = history.iter().collect();
    days.sort_by_key(|day| day.date);
    let skip = days.len().saturating_sub(config.recent_days);
    days.split_off(skip)
}

fn training_shift(
    recent: &[&DayRecord],
    snapshot: &ProfileSnapshot,
    config: &InvalidationConfig,
) -> Option<ChangeEvent> {
    let baseline = snapshot
        .avg_workout_minutes
        .filter(|minutes| *minutes >= config.min_snapshot_workout_min)?;
    let minutes: Vec<f64> = recent.iter().map(|day| day.workout_minutes()).collect();
    let deviation = (mean(&minutes)? - baseline).abs() / baseline;
    (deviation > config.training_deviation).then_some(ChangeEvent::TrainingShift { deviation })
}

fn diet_break(
    recent: &[&DayRecord],
    snapshot: &ProfileSnapshot,
    catalog: &dyn ProductCatalog,
    config: &InvalidationConfig,
) -> Option<ChangeEvent> {
    let baseline = snapshot
        .avg_kcal
        .filter(|kcal| *kcal >= config.min_snapshot_kcal)?;
    let kcal = positive_kcal(recent.iter().copied(), catalog);
    if kcal.len() < config.min_diet_break_days {
        return None;
    }
    let deviation = (mean(&kcal)? - baseline).abs() / baseline;
    (deviation > config.kcal_deviation).then_some(ChangeEvent::DietBreak { deviation })
}

/// All significant changes since `snapshot`, most severe first
#[must_use]
pub fn detect_changes(
    snapshot: &ProfileSnapshot,
    history: &[DayRecord],
    profile: Option<&PersonProfile>,
    catalog: &dyn ProductCatalog,
    config: &InvalidationConfig,
) -> Vec<ChangeEvent> {
    let mut events = Vec::new();
    if let Some(profile) = profile {
        if profile.goal != snapshot.goal {
            events.push(ChangeEvent::GoalChanged);
        }
        if let (Some(now), Some(then)) = (profile.weight_kg, snapshot.weight_kg) {
            let delta_kg = now - then;
            if delta_kg.abs() >= config.weight_delta_kg {
                events.push(ChangeEvent::WeightChanged { delta_kg });
            }
        }
    }
    let recent = recent_days(history, config);
    events.extend(training_shift(&recent, snapshot, config));
    events.extend(diet_break(&recent, snapshot, catalog, config));

    events.sort_by(|a, b| b.weight(config).total_cmp(&a.weight(config)));
    if !events.is_empty() {
        debug!(events = ?events, "Detected significant changes");
    }
    events
}

/// Most severe change since `snapshot`, if any
#[must_use]
pub fn significant_change(
    snapshot: &ProfileSnapshot,
    history: &[DayRecord],
    profile: Option<&PersonProfile>,
    catalog: &dyn ProductCatalog,
    config: &InvalidationConfig,
) -> Option<ChangeEvent> {
    detect_changes(snapshot, history, profile, catalog, config)
        .into_iter()
        .next()
}

/// Date range of a history, if non-empty
#[must_use]
pub fn history_range(history: &[DayRecord]) -> Option<DateRange> {
    let start = history.iter().map(|day| day.date).min()?;
    let end = history.iter().map(|day| day.date).max()?;
    Some(DateRange { start, end })
}

/// Whether a cached set was computed from at least the requested history
#[must_use]
pub fn covers_history(set: &ThresholdSet, history: &[DayRecord]) -> bool {
    if set.days_used >= history.len() {
        return true;
    }
    match (set.date_range, history_range(history)) {
        (Some(cached), Some(requested)) => cached.covers(&requested),
        (_, None) => true,
        (None, Some(_)) => false,
    }
}

/// Whether `candidate` may replace `existing` in the cache
///
/// A partial-tier set never replaces one computed from more days, or one
/// with more computed thresholds at the same day count.
#[must_use]
pub fn should_overwrite(existing: Option<&ThresholdSet>, candidate: &ThresholdSet) -> bool {
    let Some(existing) = existing else {
        return true;
    };
    if candidate.tier != ThresholdTier::Partial {
        return true;
    }
    if existing.days_used > candidate.days_used {
        return false;
    }
    !(existing.days_used == candidate.days_used
        && existing.computed_count() > candidate.computed_count())
}

/// Threshold set with its cache metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedThresholds {
    /// Undecorated threshold set
    pub set: ThresholdSet,
    /// When it was cached
    pub cached_at: DateTime<Utc>,
    /// Adaptive TTL in hours
    pub ttl_hours: f64,
    /// Stability score the TTL was derived from
    pub stability: f64,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

impl CachedThresholds {
    /// Wrap a set, deriving stability and TTL from `history`
    #[must_use]
    pub fn new(
        set: ThresholdSet,
        history: &[DayRecord],
        catalog: &dyn ProductCatalog,
        config: &TtlConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let stability = stability_score(history, catalog, config);
        let ttl_hours = adaptive_ttl_hours(stability, config);
        let expires_at = now + Duration::seconds((ttl_hours * 3600.0) as i64);
        debug!(stability, ttl_hours, "Derived adaptive threshold TTL");
        Self {
            set,
            cached_at: now,
            ttl_hours,
            stability,
            expires_at,
        }
    }

    /// Whether the entry has not yet expired
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealwave_core::models::{EmptyCatalog, Goal};

    #[test]
    fn test_ttl_bounds() {
        let config = TtlConfig::default();
        assert!((adaptive_ttl_hours(0.0, &config) - 12.0).abs() < 1e-9);
        assert!((adaptive_ttl_hours(1.0, &config) - 72.0).abs() < 1e-9);
        assert!((adaptive_ttl_hours(0.5, &config) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_history_uses_default_stability() {
        let config = TtlConfig::default();
        assert!((stability_score(&[], &EmptyCatalog, &config) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_goal_change_outranks_weight() {
        let snapshot = ProfileSnapshot {
            goal: Goal::Maintain,
            weight_kg: Some(80.0),
            ..ProfileSnapshot::default()
        };
        let profile = PersonProfile {
            goal: Goal::Cut,
            weight_kg: Some(74.0),
            ..PersonProfile::default()
        };
        let events = detect_changes(
            &snapshot,
            &[],
            Some(&profile),
            &EmptyCatalog,
            &InvalidationConfig::default(),
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ChangeEvent::GoalChanged);
    }
}
