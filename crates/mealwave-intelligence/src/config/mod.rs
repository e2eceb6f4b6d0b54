// ABOUTME: Configuration for the wave model, threshold engine and planner
// ABOUTME: Aggregates component configs and defines the shared validation error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Component configuration
//!
//! Every struct defaults to the physiological constants in
//! `mealwave_core::constants` and validates its own invariants. Components
//! receive their config at construction and never read globals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Meal timeline planner configuration
pub mod planner;
/// Adaptive threshold configuration
pub mod thresholds;
/// Insulin wave model configuration
pub mod wave;

pub use planner::PlannerConfig;
pub use thresholds::ThresholdConfig;
pub use wave::WaveModelConfig;

/// Configuration-related errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Value outside acceptable range
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Weights don't sum to the required total
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Configuration for all three computation components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelligenceConfig {
    /// Wave model settings
    pub wave: WaveModelConfig,
    /// Threshold engine settings
    pub thresholds: ThresholdConfig,
    /// Planner settings
    pub planner: PlannerConfig,
}

impl IntelligenceConfig {
    /// Validate every component
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wave.validate()?;
        self.thresholds.validate()?;
        self.planner.validate()
    }
}

/// Check that `(threshold, value)` tiers are strictly descending by threshold
pub(crate) fn validate_descending_tiers(
    tiers: &[(f64, f64)],
    message: &'static str,
) -> Result<(), ConfigError> {
    if tiers.windows(2).all(|pair| pair[0].0 > pair[1].0) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange(message))
    }
}

/// Check that `(threshold, value)` tiers are strictly ascending by threshold
pub(crate) fn validate_ascending_tiers(
    tiers: &[(f64, f64)],
    message: &'static str,
) -> Result<(), ConfigError> {
    if tiers.windows(2).all(|pair| pair[0].0 < pair[1].0) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange(message))
    }
}

/// Check that `(min, max)` is ordered
pub(crate) fn validate_bounds(bounds: (f64, f64), message: &'static str) -> Result<(), ConfigError> {
    if bounds.0 < bounds.1 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange(message))
    }
}
