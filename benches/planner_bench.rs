// ABOUTME: Criterion benchmarks for the wave model, threshold engine and meal planner
// ABOUTME: Measures per-day wave chaining, threshold computation over history and full planning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the mealwave computation pipeline.
//!
//! Threshold computation is measured across history lengths that hit each
//! tier; planning is measured with and without thresholds.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mealwave::intelligence::{MealPlanner, PlanRequest, PlannerConfig, ThresholdEngine, WaveModel};
use mealwave::models::{
    ClockTime, DayRecord, EmptyCatalog, MacroBudget, Meal, MealItem, PersonProfile, ProductFacts,
};
use std::sync::Arc;

fn mixed_meal(hour: f64) -> Meal {
    let rice = ProductFacts {
        kcal: Some(130.0),
        gi: Some(73.0),
        complex_carbs: Some(28.0),
        protein: Some(2.7),
        ..ProductFacts::default()
    };
    let chicken = ProductFacts {
        kcal: Some(165.0),
        protein: Some(31.0),
        good_fat: Some(2.5),
        bad_fat: Some(1.0),
        ..ProductFacts::default()
    };
    Meal {
        time: ClockTime::from_hours(hour),
        items: vec![
            MealItem::new("rice", 180.0).with_snapshot(rice),
            MealItem::new("chicken", 140.0).with_snapshot(chicken),
        ],
    }
}

#[allow(clippy::cast_precision_loss)]
fn history(days: u64) -> Vec<DayRecord> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    (0..days)
        .map(|offset| {
            let date = start.checked_add_days(Days::new(offset)).unwrap_or(start);
            let mut day = DayRecord::new(date);
            let drift = (offset % 4) as f64 * 0.25;
            day.meals = vec![
                mixed_meal(8.0 + drift),
                mixed_meal(13.0 + drift),
                mixed_meal(19.5 - drift),
            ];
            day.eaten_kcal = Some(1900.0 + (offset % 5) as f64 * 40.0);
            day.bedtime = Some(ClockTime::from_hours(23.0));
            day
        })
        .collect()
}

fn bench_wave_day(c: &mut Criterion) {
    let model = WaveModel::default();
    let day = &history(1)[0];

    c.bench_function("wave_compute_day", |b| {
        b.iter(|| model.compute_day(black_box(day), &EmptyCatalog, None, 0.0));
    });
}

fn bench_thresholds(c: &mut Criterion) {
    let engine = ThresholdEngine::default();
    let mut group = c.benchmark_group("thresholds_compute");

    for days in [5_u64, 10, 30, 90] {
        let records = history(days);
        group.throughput(Throughput::Elements(days));
        group.bench_with_input(BenchmarkId::from_parameter(days), &records, |b, records| {
            b.iter(|| engine.compute(black_box(records), None, &EmptyCatalog));
        });
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let planner = MealPlanner::new(PlannerConfig::default(), Arc::new(WaveModel::default()));
    let recent = history(14);
    let thresholds = ThresholdEngine::default().compute(&recent, None, &EmptyCatalog);
    let request = PlanRequest {
        current_time: Some(ClockTime::from_hours(9.5)),
        day_target: MacroBudget::new(150.0, 220.0, 70.0, 2200.0),
        day_eaten: MacroBudget::new(20.0, 40.0, 8.0, 320.0),
        profile: Some(PersonProfile {
            weight_kg: Some(80.0),
            ..PersonProfile::default()
        }),
        history: recent,
        ..PlanRequest::default()
    };

    let mut group = c.benchmark_group("plan");
    group.bench_function("without_thresholds", |b| {
        b.iter(|| planner.plan(black_box(&request), None, &EmptyCatalog));
    });
    group.bench_function("with_thresholds", |b| {
        b.iter(|| planner.plan(black_box(&request), Some(&thresholds), &EmptyCatalog));
    });
    group.finish();
}

criterion_group!(benches, bench_wave_day, bench_thresholds, bench_plan);
criterion_main!(benches);
