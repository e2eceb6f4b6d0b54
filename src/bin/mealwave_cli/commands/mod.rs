// ABOUTME: Command implementations for mealwave-cli
// ABOUTME: Each command loads its input document and returns a JSON value to print
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mealwave::cache::memory::InMemoryThresholdStore;
use mealwave::cache::CacheConfig;
use mealwave::config::MealwaveConfig;
use mealwave::errors::AppResult;
use mealwave::input::{load_json, PlanInput, ThresholdsInput, WaveInput};
use mealwave::intelligence::{ThresholdEngine, WaveModel};
use mealwave::planning::PlanningService;
use mealwave::thresholds_service::ThresholdService;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// One-shot store: the process exits before any cleanup would run
fn one_shot_store(config: &MealwaveConfig) -> Arc<InMemoryThresholdStore> {
    Arc::new(InMemoryThresholdStore::new(&CacheConfig {
        enable_background_cleanup: false,
        ..config.cache.clone()
    }))
}

/// `plan --input <file>`
pub async fn plan(config: &MealwaveConfig, path: &Path) -> AppResult<Value> {
    let input: PlanInput = load_json(path).await?;
    let person_id = input.person_id();
    let service = PlanningService::from_config(config, one_shot_store(config), input.catalog());

    let plan = service.plan(person_id, &input.request).await;
    info!(
        person_id = %person_id,
        available = plan.available,
        meals = plan.meals.len(),
        "Planned remaining meals"
    );
    Ok(serde_json::to_value(plan)?)
}

/// `wave --input <file>`
pub async fn wave(config: &MealwaveConfig, path: &Path) -> AppResult<Value> {
    let input: WaveInput = load_json(path).await?;
    let model = WaveModel::new(config.intelligence.wave.clone());
    let waves = model.compute_day(
        &input.day,
        &input.catalog,
        input.profile.as_ref(),
        input.circadian_shift_hours,
    );
    info!(date = %input.day.date, meals = waves.len(), "Modelled insulin waves");
    Ok(json!({
        "date": input.day.date,
        "baseline_hours": waves.first().map(|w| w.baseline_hours),
        "waves": waves,
    }))
}

/// `thresholds --input <file>`
pub async fn thresholds(config: &MealwaveConfig, path: &Path) -> AppResult<Value> {
    let input: ThresholdsInput = load_json(path).await?;
    let person_id = input.person_id();
    let engine = ThresholdEngine::new(
        config.intelligence.thresholds.clone(),
        config.intelligence.wave.clone(),
    );
    let service = ThresholdService::new(engine, one_shot_store(config), input.catalog());

    let lookup = service
        .lookup(person_id, &input.history, input.profile.as_ref())
        .await?;
    info!(
        person_id = %person_id,
        tier = ?lookup.set.tier,
        reliable = lookup.set.reliable_count(),
        "Computed thresholds"
    );
    Ok(json!({
        "person_id": person_id,
        "cache": lookup.status,
        "thresholds": lookup.set,
    }))
}
