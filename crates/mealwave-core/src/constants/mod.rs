// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Physiological, personalization, scheduling, and cache constants for mealwave
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the component that consumes them. The
//! configuration structs in `mealwave-intelligence` take their `Default`
//! values from here, so a deployment can override any of them without
//! touching the algorithms.

/// Cache-related constants (retention, capacity, cleanup)
pub mod cache;
/// Adaptive threshold tiers, priors, limits and TTLs
pub mod thresholds;
/// Meal timeline planner scheduling constants
pub mod planner;
/// Insulin wave physiology constants
pub mod wave;

/// Service identifiers used in structured logs
pub mod service_names {
    /// Library and CLI service name
    pub const MEALWAVE: &str = "mealwave";
    /// CLI binary name
    pub const MEALWAVE_CLI: &str = "mealwave-cli";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Pre-sleep buffer in hours
    pub const PRE_SLEEP_BUFFER_HOURS: &str = "MEALWAVE_PRE_SLEEP_BUFFER_HOURS";
    /// Fat-burn margin after wave end in minutes
    pub const FAT_BURN_WINDOW_MIN: &str = "MEALWAVE_FAT_BURN_WINDOW_MIN";
    /// Single-meal safety ceiling in kcal
    pub const SINGLE_MEAL_CEILING_KCAL: &str = "MEALWAVE_SINGLE_MEAL_CEILING_KCAL";
    /// Tightened gap used when a split is forced
    pub const FORCE_SPLIT_GAP_HOURS: &str = "MEALWAVE_FORCE_SPLIT_GAP_HOURS";
    /// Circadian peak sensitivity hour
    pub const CIRCADIAN_PEAK_HOUR: &str = "MEALWAVE_CIRCADIAN_PEAK_HOUR";
    /// Base threshold TTL in hours
    pub const THRESHOLD_BASE_TTL_HOURS: &str = "MEALWAVE_THRESHOLD_BASE_TTL_HOURS";
    /// Maximum threshold TTL in hours
    pub const THRESHOLD_MAX_TTL_HOURS: &str = "MEALWAVE_THRESHOLD_MAX_TTL_HOURS";
    /// Maximum cached persons
    pub const CACHE_MAX_ENTRIES: &str = "MEALWAVE_CACHE_MAX_ENTRIES";
    /// Retention of cached threshold sets in hours
    pub const CACHE_RETENTION_HOURS: &str = "MEALWAVE_CACHE_RETENTION_HOURS";
    /// Background cleanup interval in seconds
    pub const CACHE_CLEANUP_INTERVAL_SECS: &str = "MEALWAVE_CACHE_CLEANUP_INTERVAL_SECS";
}
