// ABOUTME: Shared test utilities and fixtures for mealwave integration tests
// ABOUTME: Provides day history builders, products, profiles and store/service setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `mealwave`
//!
//! This module provides common fixtures to reduce duplication across
//! integration tests.

use chrono::{Days, NaiveDate};
use mealwave::cache::memory::InMemoryThresholdStore;
use mealwave::cache::CacheConfig;
use mealwave::models::{
    ClockTime, DayRecord, EmptyCatalog, Goal, MacroBudget, Meal, MealItem, PersonProfile,
    ProductFacts,
};
use mealwave::thresholds_service::ThresholdService;
use mealwave_intelligence::ThresholdEngine;
use std::env;
use std::sync::{Arc, Once};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Date `offset` days after 2025-03-01
pub fn date(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .checked_add_days(Days::new(offset))
        .unwrap()
}

/// Rolled oats per 100 g
pub fn oats() -> ProductFacts {
    ProductFacts {
        kcal: Some(370.0),
        gi: Some(55.0),
        complex_carbs: Some(60.0),
        simple_carbs: Some(1.0),
        protein: Some(13.0),
        fiber: Some(10.0),
        good_fat: Some(5.0),
        bad_fat: Some(1.5),
        ..ProductFacts::default()
    }
}

/// Chicken breast per 100 g
pub fn chicken() -> ProductFacts {
    ProductFacts {
        kcal: Some(165.0),
        gi: Some(0.0),
        protein: Some(31.0),
        good_fat: Some(2.5),
        bad_fat: Some(1.0),
        ..ProductFacts::default()
    }
}

/// White rice per 100 g
pub fn rice() -> ProductFacts {
    ProductFacts {
        kcal: Some(130.0),
        gi: Some(73.0),
        complex_carbs: Some(28.0),
        protein: Some(2.7),
        fiber: Some(0.4),
        good_fat: Some(0.3),
        ..ProductFacts::default()
    }
}

/// Meal at `hour` made of inline-snapshot items
pub fn meal(hour: f64, items: &[(&str, f64, ProductFacts)]) -> Meal {
    Meal {
        time: ClockTime::from_hours(hour),
        items: items
            .iter()
            .map(|(id, grams, facts)| MealItem::new(*id, *grams).with_snapshot(facts.clone()))
            .collect(),
    }
}

/// Breakfast, lunch and dinner at fixed times with stable intake
pub fn steady_day(offset: u64) -> DayRecord {
    let mut day = DayRecord::new(date(offset));
    day.meals = vec![
        meal(8.0, &[("oats", 80.0, oats())]),
        meal(13.0, &[("chicken", 150.0, chicken()), ("rice", 200.0, rice())]),
        meal(19.0, &[("chicken", 120.0, chicken()), ("oats", 50.0, oats())]),
    ];
    day.eaten_kcal = Some(2000.0 + (offset % 3) as f64 * 25.0);
    day.sleep_hours = Some(7.5);
    day.bedtime = Some(ClockTime::from_hours(23.0));
    day
}

/// `days` consecutive steady days
pub fn steady_history(days: u64) -> Vec<DayRecord> {
    (0..days).map(steady_day).collect()
}

/// `days` of late breakfasts and late dinners, with bedtime after midnight
pub fn owl_history(days: u64) -> Vec<DayRecord> {
    (0..days)
        .map(|offset| {
            let mut day = steady_day(offset);
            day.meals = vec![
                meal(10.5, &[("oats", 80.0, oats())]),
                meal(16.0, &[("chicken", 150.0, chicken()), ("rice", 200.0, rice())]),
                meal(22.5, &[("chicken", 120.0, chicken()), ("oats", 50.0, oats())]),
            ];
            day.bedtime = Some(ClockTime::from_hours(1.5));
            day
        })
        .collect()
}

/// Maintenance profile with a 23:00 sleep target
pub fn profile() -> PersonProfile {
    PersonProfile {
        weight_kg: Some(75.0),
        height_cm: Some(178.0),
        age: Some(34),
        goal: Goal::Maintain,
        sleep_target: Some(ClockTime::from_hours(23.0)),
        ..PersonProfile::default()
    }
}

/// Daily target of 2000 kcal
pub fn day_target() -> MacroBudget {
    MacroBudget::new(150.0, 200.0, 65.0, 2000.0)
}

/// In-memory store without the background cleanup task
pub fn test_store() -> Arc<InMemoryThresholdStore> {
    Arc::new(InMemoryThresholdStore::new(&CacheConfig {
        enable_background_cleanup: false,
        ..CacheConfig::default()
    }))
}

/// Threshold service over `store` with default configuration
pub fn threshold_service(store: Arc<InMemoryThresholdStore>) -> ThresholdService {
    init_test_logging();
    ThresholdService::new(ThresholdEngine::default(), store, Arc::new(EmptyCatalog))
}
