// ABOUTME: Unit tests for environment-driven mealwave configuration
// ABOUTME: Validates overrides, parse errors, retention validation and environment parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use mealwave::config::{Environment, MealwaveConfig};
use mealwave::constants::env_config;
use mealwave::logging::LoggingConfig;
use serial_test::serial;
use std::env;
use std::time::Duration;

const ALL_KEYS: [&str; 13] = [
    "ENVIRONMENT",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
    env_config::PRE_SLEEP_BUFFER_HOURS,
    env_config::FAT_BURN_WINDOW_MIN,
    env_config::SINGLE_MEAL_CEILING_KCAL,
    env_config::FORCE_SPLIT_GAP_HOURS,
    env_config::CIRCADIAN_PEAK_HOUR,
    env_config::THRESHOLD_BASE_TTL_HOURS,
    env_config::THRESHOLD_MAX_TTL_HOURS,
    env_config::CACHE_MAX_ENTRIES,
    env_config::CACHE_RETENTION_HOURS,
    env_config::CACHE_CLEANUP_INTERVAL_SECS,
];

fn clear_env() {
    for key in ALL_KEYS {
        env::remove_var(key);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("production"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("test"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("invalid"),
        Environment::Development
    ); // Default fallback
    assert!(Environment::Production.is_production());
    assert_eq!(Environment::Testing.to_string(), "testing");
}

#[test]
#[serial]
fn test_logging_follows_deployment_environment() {
    clear_env();
    env::set_var("ENVIRONMENT", "prod");
    let production = LoggingConfig::from_env();
    clear_env();

    assert_eq!(production.environment, Environment::Production);
    assert!(production.include_location);
    assert!(production.include_thread);

    let development = LoggingConfig::from_env();
    assert_eq!(development.environment, Environment::Development);
    assert!(!development.include_location);
}

#[test]
#[serial]
fn test_defaults_without_overrides() {
    clear_env();
    let config = MealwaveConfig::from_env().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert!((config.intelligence.planner.pre_sleep_buffer_hours - 3.0).abs() < f64::EPSILON);
    assert!((config.intelligence.planner.single_meal_ceiling_kcal - 900.0).abs() < f64::EPSILON);
    assert_eq!(config.cache.max_entries, 10_000);
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");
    env::set_var(env_config::PRE_SLEEP_BUFFER_HOURS, "2.5");
    env::set_var(env_config::SINGLE_MEAL_CEILING_KCAL, "750");
    env::set_var(env_config::FORCE_SPLIT_GAP_HOURS, "2.25");
    env::set_var(env_config::CACHE_MAX_ENTRIES, "50");
    env::set_var(env_config::CACHE_RETENTION_HOURS, "96");
    env::set_var(env_config::CACHE_CLEANUP_INTERVAL_SECS, "30");

    let config = MealwaveConfig::from_env().unwrap();
    clear_env();

    assert!(config.environment.is_production());
    let planner = &config.intelligence.planner;
    assert!((planner.pre_sleep_buffer_hours - 2.5).abs() < f64::EPSILON);
    assert!((planner.single_meal_ceiling_kcal - 750.0).abs() < f64::EPSILON);
    assert!((planner.force_split_gap_hours - 2.25).abs() < f64::EPSILON);
    assert_eq!(config.cache.max_entries, 50);
    assert_eq!(config.cache.retention, Duration::from_secs(96 * 3600));
    assert_eq!(config.cache.cleanup_interval, Duration::from_secs(30));
}

#[test]
#[serial]
fn test_blank_value_keeps_default() {
    clear_env();
    env::set_var(env_config::FAT_BURN_WINDOW_MIN, "  ");

    let config = MealwaveConfig::from_env().unwrap();
    clear_env();

    assert!((config.intelligence.planner.fat_burn_window_min - 30.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_unparseable_value_names_the_variable() {
    clear_env();
    env::set_var(env_config::CACHE_MAX_ENTRIES, "lots");

    let err = MealwaveConfig::from_env().unwrap_err();
    clear_env();

    assert!(err.to_string().contains(env_config::CACHE_MAX_ENTRIES));
}

#[test]
#[serial]
fn test_retention_must_cover_max_ttl() {
    clear_env();
    env::set_var(env_config::CACHE_RETENTION_HOURS, "24");

    let result = MealwaveConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_retention_below_ttl() {
    let mut config = MealwaveConfig::default();
    assert!(config.validate().is_ok());

    config.cache.retention = Duration::from_secs(3600);
    assert!(config.validate().is_err());
}
