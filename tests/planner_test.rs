// ABOUTME: Integration tests for the meal timeline planner
// ABOUTME: Covers hunger trade-off, forced split, budget conservation, sleep sources and unavailability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{chicken, date, day_target, meal, oats, owl_history, profile, rice, steady_history};
use mealwave::intelligence::planner::budget::recovery_split;
use mealwave::intelligence::planner::scenario::MealScenario;
use mealwave::intelligence::planner::sleep::SleepSource;
use mealwave::intelligence::planner::PlanReason;
use mealwave::intelligence::{
    MealPlan, MealPlanner, PlanError, PlanRequest, PlannerConfig, ThresholdEngine, WaveModel,
};
use mealwave::models::{ClockTime, DayRecord, EmptyCatalog, MacroBudget, Workout, WorkoutKind};
use std::sync::Arc;

fn planner() -> MealPlanner {
    MealPlanner::new(PlannerConfig::default(), Arc::new(WaveModel::default()))
}

fn request_at(hour: f64, eaten_kcal: f64) -> PlanRequest {
    let target = day_target();
    let share = eaten_kcal / target.kcal;
    PlanRequest {
        current_time: Some(ClockTime::from_hours(hour)),
        day_target: target,
        day_eaten: MacroBudget::new(
            target.protein * share,
            target.carbs * share,
            target.fat * share,
            eaten_kcal,
        ),
        ..PlanRequest::default()
    }
}

fn plan(request: &PlanRequest) -> MealPlan {
    planner().plan(request, None, &EmptyCatalog)
}

/// Today's record with one strength session of `minutes` starting at `hour`
fn trained_today(hour: f64, minutes: f64) -> DayRecord {
    let mut today = DayRecord::new(date(30));
    today.workouts = vec![Workout {
        time: ClockTime::from_hours(hour),
        zone_minutes: [0.0, minutes, 0.0, 0.0],
        kind: WorkoutKind::Strength,
    }];
    today
}

#[test]
fn test_late_hungry_evening_shrinks_buffer() {
    let plan = plan(&request_at(20.0, 1200.0));
    let summary = plan.summary.as_ref().unwrap();

    assert!(plan.available);
    assert_eq!(plan.meals.len(), 1);
    assert!(summary.hunger_tradeoff_applied);
    assert!((summary.pre_sleep_buffer_hours - 2.0).abs() < 1e-9);
    assert_eq!(summary.sleep_source, SleepSource::Fallback);

    let only = &plan.meals[0];
    assert!((only.time_start.hours() - 20.0).abs() < 1e-9);
    assert!(only.is_actionable && only.is_last);
    assert!((only.macros.kcal - 800.0).abs() <= 1.0);
}

#[test]
fn test_late_small_budget_has_no_time() {
    let plan = plan(&request_at(20.0, 1600.0));
    let summary = plan.summary.unwrap();

    assert!(plan.available);
    assert!(plan.meals.is_empty());
    assert!(!summary.hunger_tradeoff_applied);
    assert_eq!(summary.reason, Some(PlanReason::NotEnoughTimeBeforeSleep));
}

#[test]
fn test_large_midday_budget_is_split_under_ceiling() {
    let config = PlannerConfig::default();
    let plan = plan(&request_at(12.0, 535.0));

    assert!(plan.meals.len() >= 2);
    assert!((plan.meals[0].time_start.hours() - 12.0).abs() < 1e-9);
    for planned in &plan.meals {
        assert!(
            planned.macros.kcal <= config.single_meal_ceiling_kcal + 1.0,
            "meal {} has {} kcal",
            planned.index,
            planned.macros.kcal
        );
    }
}

#[test]
fn test_budget_is_conserved() {
    for (hour, eaten) in [(8.0, 300.0), (12.0, 535.0), (15.5, 900.0)] {
        let request = request_at(hour, eaten);
        let remaining = MacroBudget::remaining(&request.day_target, &request.day_eaten);
        let plan = plan(&request);
        let total: f64 = plan.meals.iter().map(|m| m.macros.kcal).sum();

        assert!(!plan.meals.is_empty());
        assert!(
            (total - remaining.kcal).abs() <= plan.meals.len() as f64,
            "planned {total} of {} kcal at {hour}",
            remaining.kcal
        );
    }
}

#[test]
fn test_schedule_shape() {
    let config = PlannerConfig::default();
    let plan = plan(&request_at(8.0, 300.0));
    let summary = plan.summary.as_ref().unwrap();

    assert!(plan.meals.len() <= config.max_meals);
    assert_eq!(summary.total_meals, plan.meals.len());
    for pair in plan.meals.windows(2) {
        assert!(pair[0].time_start.hours() <= pair[1].time_start.hours());
    }
    for (index, planned) in plan.meals.iter().enumerate() {
        assert_eq!(planned.index, index);
        assert_eq!(planned.is_actionable, index == 0);
        assert_eq!(planned.is_last, index + 1 == plan.meals.len());
        assert!(planned.time_start.hours() <= summary.last_meal_deadline.hours() + 1e-9);
        assert!(planned.fat_burn_window.start.hours() <= planned.fat_burn_window.end.hours());
    }
}

#[test]
fn test_planning_is_deterministic() {
    let mut request = request_at(10.0, 450.0);
    request.profile = Some(profile());
    request.history = steady_history(7);
    let planner = planner();

    let first = planner.plan(&request, None, &EmptyCatalog);
    let second = planner.plan(&request, None, &EmptyCatalog);
    assert_eq!(first, second);
}

#[test]
fn test_first_meal_waits_for_last_wave() {
    let mut request = request_at(12.5, 700.0);
    request.last_meal = Some(meal(
        12.0,
        &[("chicken", 150.0, chicken()), ("rice", 200.0, rice())],
    ));
    let plan = plan(&request);

    let fat_burn_hours = PlannerConfig::default().fat_burn_window_min / 60.0;
    assert!(plan.meals[0].time_start.hours() > 12.0 + fat_burn_hours);
}

#[test]
fn test_sleep_source_precedence() {
    let mut request = request_at(10.0, 450.0);
    request.profile = Some(profile());
    let from_profile = plan(&request).summary.unwrap();
    assert_eq!(from_profile.sleep_source, SleepSource::Profile);

    request.history = steady_history(7);
    let from_bedtime = plan(&request).summary.unwrap();
    assert_eq!(from_bedtime.sleep_source, SleepSource::Bedtime);
    assert!((from_bedtime.sleep_target.hours() - 23.0).abs() < 1e-9);
}

#[test]
fn test_thresholds_feed_protein_floor() {
    let history = steady_history(25);
    let thresholds = ThresholdEngine::default().compute(&history, Some(&profile()), &EmptyCatalog);
    let mut request = request_at(9.0, 300.0);
    request.profile = Some(profile());

    let plan = planner().plan(&request, Some(&thresholds), &EmptyCatalog);
    assert!(plan.available);
    assert!(!plan.meals.is_empty());
    assert!(plan.meals.iter().all(|m| m.macros.protein > 0.0));
}

#[test]
fn test_goal_practically_met() {
    let plan = plan(&request_at(10.0, 1980.0));
    assert!(plan.meals.is_empty());
    assert_eq!(
        plan.summary.unwrap().reason,
        Some(PlanReason::DayGoalPracticallyMet)
    );
}

#[test]
fn test_missing_current_time_is_unavailable() {
    let mut request = request_at(10.0, 500.0);
    request.current_time = None;
    let plan = plan(&request);

    assert!(!plan.available);
    assert!(plan.meals.is_empty());
    assert!(plan.summary.is_none());
    assert_eq!(plan.error, Some(PlanError::MissingCurrentTime));
}

#[test]
fn test_planner_without_wave_model_is_unavailable() {
    let planner = MealPlanner::without_wave_model(PlannerConfig::default());
    let plan = planner.plan(&request_at(10.0, 500.0), None, &EmptyCatalog);

    assert!(!plan.available);
    assert_eq!(plan.error, Some(PlanError::WaveModelUnavailable));
}

#[test]
fn test_final_slot_near_sleep_is_pre_sleep() {
    let plan = plan(&request_at(20.0, 1200.0));
    let last = plan.meals.last().unwrap();

    assert!(last.is_last);
    assert!(last.hours_to_sleep < PlannerConfig::default().scenario.pre_sleep_hours);
    assert_eq!(last.scenario, MealScenario::PreSleep);
    assert!(last.sleep_friendly_hint.is_some());
}

#[test]
fn test_recent_workout_gets_recovery_split() {
    let config = PlannerConfig::default();
    let mut request = request_at(10.0, 300.0);
    request.today = Some(trained_today(8.5, 60.0));
    let plan = plan(&request);

    let first = &plan.meals[0];
    assert!(!first.is_last);
    assert_eq!(first.scenario, MealScenario::PostWorkout);
    assert_eq!(first.macros, recovery_split(first.macros.kcal, &config));
    assert!(plan.meals[1..]
        .iter()
        .all(|m| m.scenario != MealScenario::PostWorkout));
}

#[test]
fn test_workout_outside_anabolic_window_is_ignored() {
    let mut request = request_at(12.0, 535.0);
    request.today = Some(trained_today(7.0, 60.0));
    let plan = plan(&request);

    assert!(!plan.meals.is_empty());
    assert!(plan
        .meals
        .iter()
        .all(|m| m.scenario != MealScenario::PostWorkout));
}

#[test]
fn test_after_midnight_sleep_still_plans_the_morning() {
    let mut request = request_at(10.0, 300.0);
    request.history = (0..5)
        .map(|offset| {
            let mut day = DayRecord::new(date(offset));
            day.meals = vec![meal(21.5, &[("rice", 200.0, rice())])];
            day
        })
        .collect();
    let plan = plan(&request);
    let summary = plan.summary.as_ref().unwrap();

    assert_eq!(summary.sleep_source, SleepSource::LastMealPattern);
    assert!((summary.sleep_target.hours() - 24.5).abs() < 1e-9);
    assert_eq!(summary.sleep_target.to_string(), "00:30");
    assert!((summary.last_meal_deadline.hours() - 21.5).abs() < 1e-9);
    assert!(summary.reason.is_none());
    assert!(!plan.meals.is_empty());
    assert!((plan.meals[0].time_start.hours() - 10.0).abs() < 1e-9);
}

#[test]
fn test_forced_split_respects_reported_deadline() {
    for hour in [14.0, 15.0, 16.0, 17.0, 18.0] {
        let plan = plan(&request_at(hour, 0.0));
        let summary = plan.summary.as_ref().unwrap();
        let deadline = summary.last_meal_deadline.hours();

        for planned in &plan.meals {
            assert!(
                planned.time_start.hours() <= deadline + 1e-9,
                "meal {} at {} after deadline {} when planning at {hour}",
                planned.index,
                planned.time_start,
                summary.last_meal_deadline
            );
        }
    }
}

#[test]
fn test_owl_thresholds_shorten_morning_wave() {
    let engine = ThresholdEngine::default();
    let owl = engine.compute(&owl_history(21), None, &EmptyCatalog);
    let neutral = engine.compute(&steady_history(21), None, &EmptyCatalog);
    assert!(owl.circadian_shift() > 0.0);
    assert!(neutral.circadian_shift().abs() < f64::EPSILON);

    let mut request = request_at(10.25, 500.0);
    request.last_meal = Some(meal(10.0, &[("oats", 80.0, oats())]));
    let planner = planner();
    let owl_plan = planner.plan(&request, Some(&owl), &EmptyCatalog);
    let neutral_plan = planner.plan(&request, Some(&neutral), &EmptyCatalog);

    assert!(owl_plan.meals[0].time_start.hours() < neutral_plan.meals[0].time_start.hours());
}
