// ABOUTME: Integration tests for the adaptive threshold engine and its cache policy
// ABOUTME: Covers history tiers, confidence bounds, limits, ordering and adaptive TTL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, Utc};
use common::{chicken, meal, profile, rice, steady_day, steady_history};
use mealwave::intelligence::config::thresholds::{InvalidationConfig, ThresholdLimits, TtlConfig};
use mealwave::intelligence::thresholds::cache_policy::{
    adaptive_ttl_hours, covers_history, day_kcal, detect_changes, should_overwrite,
    stability_score,
};
use mealwave::intelligence::thresholds::{CachedThresholds, ChangeEvent, ThresholdTier};
use mealwave::intelligence::{ThresholdEngine, ThresholdName};
use mealwave::models::{ClockTime, DayRecord, EmptyCatalog, Goal, Workout, WorkoutKind};
use std::ops::Range;

/// Steady days logged only as meals, without a daily kcal total
fn meals_only_history(range: Range<u64>) -> Vec<DayRecord> {
    range
        .map(|offset| {
            let mut day = steady_day(offset);
            day.eaten_kcal = None;
            day
        })
        .collect()
}

/// Steady day with an extra large lunch
fn overeating_day(offset: u64) -> DayRecord {
    let mut day = steady_day(offset);
    day.eaten_kcal = None;
    day.meals.push(meal(
        16.0,
        &[("chicken", 300.0, chicken()), ("rice", 400.0, rice())],
    ));
    day
}

/// Meals-only steady day with a 45 minute run at 07:00
fn training_day(offset: u64) -> DayRecord {
    let mut day = steady_day(offset);
    day.eaten_kcal = None;
    day.workouts = vec![Workout {
        time: ClockTime::from_hours(7.0),
        zone_minutes: [10.0, 25.0, 10.0, 0.0],
        kind: WorkoutKind::Cardio,
    }];
    day
}

#[test]
fn test_short_history_uses_priors_only() {
    let engine = ThresholdEngine::default();
    let set = engine.compute(&steady_history(3), None, &EmptyCatalog);

    assert_eq!(set.tier, ThresholdTier::Default);
    assert!(set.overall_confidence.abs() < f64::EPSILON);
    assert_eq!(set.days_used, 3);
    assert_eq!(set.thresholds.len(), ThresholdName::ALL.len());
    for name in ThresholdName::ALL {
        let entry = set.get(name).unwrap();
        assert!(!entry.source.is_computed(), "{name:?} should be a prior");
        assert!(!entry.reliable);
    }
    assert_eq!(set.computed_count(), 0);
}

#[test]
fn test_partial_tier_confidence_counts_computed_slots() {
    let engine = ThresholdEngine::default();
    let set = engine.compute(&steady_history(10), Some(&profile()), &EmptyCatalog);

    assert_eq!(set.tier, ThresholdTier::Partial);
    let expected = set.computed_count() as f64 / ThresholdName::ALL.len() as f64;
    assert!((set.overall_confidence - expected).abs() < 1e-9);
    assert!(set.overall_confidence > 0.0);
}

#[test]
fn test_full_tier_confidence_saturates() {
    let engine = ThresholdEngine::default();
    let set = engine.compute(&steady_history(25), Some(&profile()), &EmptyCatalog);

    assert_eq!(set.tier, ThresholdTier::Full);
    assert!((set.overall_confidence - 1.0).abs() < 1e-9);
    for entry in set.thresholds.values() {
        assert!((0.0..=1.0).contains(&entry.confidence));
        assert!(entry.variance >= 0.0);
    }
}

#[test]
fn test_values_stay_within_limits() {
    let limits = ThresholdLimits::default();
    let engine = ThresholdEngine::default();

    for days in [0, 5, 10, 25] {
        let set = engine.compute(&steady_history(days), Some(&profile()), &EmptyCatalog);
        let late = set.numeric(ThresholdName::LateEatingHour).unwrap();
        let gap = set.numeric(ThresholdName::IdealMealGapMin).unwrap();
        let gi = set.numeric(ThresholdName::GiOptimal).unwrap();
        let fiber = set.numeric(ThresholdName::FiberTarget).unwrap();
        let protein = set.numeric(ThresholdName::ProteinPerMealG).unwrap();

        assert!(late >= limits.late_eating_hour.min && late <= limits.late_eating_hour.max);
        assert!(gap >= limits.ideal_meal_gap_min.min && gap <= limits.ideal_meal_gap_min.max);
        assert!(gi >= limits.gi_optimal.min && gi <= limits.gi_optimal.max);
        assert!(fiber >= limits.fiber_target.min && fiber <= limits.fiber_target.max);
        assert!(
            protein >= limits.protein_per_meal_g.min && protein <= limits.protein_per_meal_g.max
        );
    }
}

#[test]
fn test_history_order_does_not_matter() {
    let engine = ThresholdEngine::default();
    let now = Utc::now();
    let history = steady_history(16);
    let mut reversed = history.clone();
    reversed.reverse();

    let forward = engine.compute_at(&history, Some(&profile()), &EmptyCatalog, now);
    let backward = engine.compute_at(&reversed, Some(&profile()), &EmptyCatalog, now);
    assert_eq!(forward, backward);
}

#[test]
fn test_snapshot_records_goal_and_weight() {
    let engine = ThresholdEngine::default();
    let mut person = profile();
    person.goal = Goal::Cut;
    let set = engine.compute(&steady_history(8), Some(&person), &EmptyCatalog);

    assert_eq!(set.snapshot.goal, Goal::Cut);
    assert_eq!(set.snapshot.weight_kg, Some(75.0));
    assert!(set.snapshot.avg_kcal.unwrap() > 1900.0);
    let range = set.date_range.unwrap();
    assert!(range.start < range.end);
}

#[test]
fn test_stable_history_earns_longer_ttl() {
    let config = TtlConfig::default();
    let stable = stability_score(&steady_history(25), &EmptyCatalog, &config);
    let short = stability_score(&steady_history(3), &EmptyCatalog, &config);

    assert!(stable > short);
    assert!(adaptive_ttl_hours(stable, &config) > config.base_hours);
    assert!(adaptive_ttl_hours(stable, &config) <= config.max_hours);
    assert!((short - config.default_stability).abs() < 1e-9);
}

#[test]
fn test_cached_thresholds_expiry() {
    let engine = ThresholdEngine::default();
    let history = steady_history(25);
    let set = engine.compute(&history, None, &EmptyCatalog);
    let now = Utc::now();
    let ttl = TtlConfig::default();
    let cached = CachedThresholds::new(set, &history, &EmptyCatalog, &ttl, now);

    assert!(cached.is_fresh(now));
    assert!(cached.is_fresh(now + Duration::hours(11)));
    assert!(!cached.is_fresh(now + Duration::hours(73)));
    assert_eq!(
        cached.expires_at - cached.cached_at,
        Duration::seconds((cached.ttl_hours * 3600.0) as i64)
    );
}

#[test]
fn test_coverage_and_overwrite_rules() {
    let engine = ThresholdEngine::default();
    let full = engine.compute(&steady_history(20), None, &EmptyCatalog);
    let partial = engine.compute(&steady_history(9), None, &EmptyCatalog);

    assert!(covers_history(&full, &steady_history(20)));
    assert!(covers_history(&full, &steady_history(12)));
    assert!(!covers_history(&partial, &steady_history(20)));

    assert!(should_overwrite(None, &partial));
    assert!(!should_overwrite(Some(&full), &partial));
    assert!(should_overwrite(Some(&partial), &full));
}

#[test]
fn test_meals_only_history_scores_as_stable() {
    let config = TtlConfig::default();
    let history = meals_only_history(0..25);
    assert!(day_kcal(&history[0], &EmptyCatalog) > 1000.0);

    let stability = stability_score(&history, &EmptyCatalog, &config);
    assert!(stability > 0.99, "stability {stability}");

    let set = ThresholdEngine::default().compute(&history, None, &EmptyCatalog);
    let cached = CachedThresholds::new(set, &history, &EmptyCatalog, &config, Utc::now());
    assert!((cached.ttl_hours - config.max_hours).abs() < 1e-9);
}

#[test]
fn test_diet_break_detected_from_meal_logs() {
    let engine = ThresholdEngine::default();
    let set = engine.compute(&meals_only_history(0..14), None, &EmptyCatalog);
    let baseline = set.snapshot.avg_kcal.unwrap();

    let mut history = meals_only_history(7..14);
    history.extend((14..21).map(overeating_day));
    let events = detect_changes(
        &set.snapshot,
        &history,
        None,
        &EmptyCatalog,
        &InvalidationConfig::default(),
    );

    assert_eq!(events.len(), 1);
    match events[0] {
        ChangeEvent::DietBreak { deviation } => {
            let recent = day_kcal(&history[13], &EmptyCatalog);
            assert!((deviation - (recent - baseline) / baseline).abs() < 1e-9);
        }
        other => panic!("expected a diet break, got {other:?}"),
    }
}

#[test]
fn test_training_shift_outranks_diet_break() {
    let engine = ThresholdEngine::default();
    let trained: Vec<DayRecord> = (0..14).map(training_day).collect();
    let set = engine.compute(&trained, None, &EmptyCatalog);
    assert!((set.snapshot.avg_workout_minutes.unwrap() - 45.0).abs() < 1e-9);

    // Training stops and lunches grow in the latest week
    let mut history = trained[7..].to_vec();
    history.extend((14..21).map(overeating_day));
    let events = detect_changes(
        &set.snapshot,
        &history,
        None,
        &EmptyCatalog,
        &InvalidationConfig::default(),
    );

    assert_eq!(events.len(), 2);
    assert_eq!(events[0], ChangeEvent::TrainingShift { deviation: 1.0 });
    assert!(matches!(events[1], ChangeEvent::DietBreak { .. }));
}

#[test]
fn test_steady_history_raises_no_change() {
    let history = steady_history(14);
    let set = ThresholdEngine::default().compute(&history, Some(&profile()), &EmptyCatalog);
    let events = detect_changes(
        &set.snapshot,
        &history,
        Some(&profile()),
        &EmptyCatalog,
        &InvalidationConfig::default(),
    );
    assert!(events.is_empty());
}
