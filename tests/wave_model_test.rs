// ABOUTME: Integration tests for the insulin wave model
// ABOUTME: Exercises GL gating, the continuous GL curve, day chaining and baseline overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{chicken, date, meal, oats, owl_history, profile, rice, steady_day};
use mealwave::intelligence::config::wave::GlycemicConfig;
use mealwave::intelligence::wave::gl_curve;
use mealwave::intelligence::{ThresholdEngine, WaveContext, WaveModel, WaveModelConfig};
use mealwave::models::{ClockTime, DayRecord, EmptyCatalog, Workout, WorkoutKind};

#[test]
fn test_zero_glycemic_load_keeps_gi_neutral() {
    let model = WaveModel::default();
    let protein_only = meal(13.0, &[("chicken", 200.0, chicken())]);
    let nutrients = model.nutrients(&protein_only, &EmptyCatalog);

    assert!(nutrients.glycemic_load.abs() < f64::EPSILON);
    let multiplier = model.compute_multiplier(&nutrients);
    assert!((multiplier.gi_factor - 1.0).abs() < 1e-9);
    assert!(multiplier.total > 0.0);
}

#[test]
fn test_gl_curve_is_non_decreasing() {
    let config = GlycemicConfig::default();
    let mut previous = gl_curve(0.0, &config);
    for step in 1..=160 {
        let load = f64::from(step) * 0.5;
        let value = gl_curve(load, &config);
        assert!(value >= previous, "curve dropped at GL {load}");
        previous = value;
    }
    assert!((gl_curve(500.0, &config) - config.gl_curve_ceiling).abs() < 1e-9);
}

#[test]
fn test_day_waves_are_ordered_and_bounded() {
    let config = WaveModelConfig::default();
    let model = WaveModel::new(config.clone());
    let mut day = steady_day(0);
    day.meals.reverse();

    let waves = model.compute_day(&day, &EmptyCatalog, Some(&profile()), 0.0);
    assert_eq!(waves.len(), 3);
    for pair in waves.windows(2) {
        assert!(pair[0].meal_time.hours() <= pair[1].meal_time.hours());
    }
    for wave in &waves {
        assert!(wave.wave_hours >= config.combination.min_wave_hours);
        assert!(wave.wave_hours <= config.combination.max_wave_hours);
        let expected_end = wave.meal_time.hours() + wave.wave_hours;
        assert!((wave.wave_end.hours() - expected_end).abs() < 1e-9);
        let phases = &wave.phases;
        assert!(phases.rise_min + phases.plateau_min + phases.decline_min > 0.0);
    }
}

#[test]
fn test_overlapping_meal_gets_stacking_bonus() {
    let config = WaveModelConfig::default();
    let model = WaveModel::new(config.clone());
    let mut day = DayRecord::new(date(0));
    day.meals = vec![
        meal(12.0, &[("rice", 250.0, rice())]),
        meal(12.25, &[("oats", 60.0, oats())]),
    ];

    let waves = model.compute_day(&day, &EmptyCatalog, None, 0.0);
    assert!(waves[0].stacking_bonus.abs() < f64::EPSILON);
    assert!(waves[1].stacking_bonus < 0.0);
    assert!(waves[1].stacking_bonus >= config.stacking.max_stack_bonus);
}

#[test]
fn test_profile_wave_length_overrides_baseline() {
    let model = WaveModel::default();
    let mut person = profile();
    person.insulin_wave_hours = Some(3.75);
    let lunch = meal(13.0, &[("rice", 150.0, rice())]);
    let nutrients = model.nutrients(&lunch, &EmptyCatalog);

    let context = WaveContext {
        profile: Some(&person),
        day: None,
        previous: None,
        circadian_shift_hours: 0.0,
    };
    let result = model.compute(&nutrients, ClockTime::from_hours(13.0), &context);
    assert!((result.baseline_hours - 3.75).abs() < 1e-9);
}

#[test]
fn test_missing_product_data_is_total() {
    let model = WaveModel::default();
    let unknown = meal(9.0, &[]);
    let mut day = DayRecord::new(date(1));
    day.meals = vec![unknown];

    let waves = model.compute_day(&day, &EmptyCatalog, None, 0.0);
    assert_eq!(waves.len(), 1);
    assert!(waves[0].wave_hours.is_finite());
    assert!(waves[0].glycemic_load.abs() < f64::EPSILON);
}

#[test]
fn test_walk_after_meal_shortens_wave() {
    let model = WaveModel::default();
    let lunch = meal(13.0, &[("rice", 200.0, rice())]);
    let nutrients = model.nutrients(&lunch, &EmptyCatalog);
    let person = profile();

    let resting = DayRecord::new(date(2));
    let mut walked = DayRecord::new(date(2));
    walked.workouts = vec![Workout {
        time: ClockTime::from_hours(13.25),
        zone_minutes: [30.0, 0.0, 0.0, 0.0],
        kind: WorkoutKind::Hobby,
    }];

    let context = |day| WaveContext {
        profile: Some(&person),
        day: Some(day),
        previous: None,
        circadian_shift_hours: 0.0,
    };
    let at_rest = model.compute(&nutrients, lunch.time, &context(&resting));
    let after_walk = model.compute(&nutrients, lunch.time, &context(&walked));

    assert!(at_rest.activity.postprandial_bonus.abs() < f64::EPSILON);
    assert!(after_walk.activity.postprandial_bonus < 0.0);
    assert!(after_walk.bonus_factor < at_rest.bonus_factor);
    assert!(after_walk.wave_hours < at_rest.wave_hours);
}

#[test]
fn test_owl_chronotype_moves_circadian_trough() {
    let set = ThresholdEngine::default().compute(&owl_history(21), Some(&profile()), &EmptyCatalog);
    let shift = set.circadian_shift();
    assert!((shift - 2.0).abs() < 1e-9);

    let model = WaveModel::default();
    let breakfast = meal(10.0, &[("oats", 80.0, oats())]);
    let nutrients = model.nutrients(&breakfast, &EmptyCatalog);
    let with_shift = |circadian_shift_hours| WaveContext {
        circadian_shift_hours,
        ..WaveContext::default()
    };
    let owl = model.compute(&nutrients, breakfast.time, &with_shift(shift));
    let neutral = model.compute(&nutrients, breakfast.time, &with_shift(0.0));

    let trough = model.config().circadian.min_multiplier;
    assert!((owl.circadian.multiplier - trough).abs() < 1e-9);
    assert!(owl.circadian.multiplier < neutral.circadian.multiplier);
    assert!(owl.wave_hours <= neutral.wave_hours);
}
