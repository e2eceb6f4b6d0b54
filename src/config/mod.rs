// ABOUTME: Configuration management module for runtime settings of the mealwave engine
// ABOUTME: Overlays environment variables on the validated component defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for mealwave
//!
//! Component configuration (wave model, thresholds, planner) lives in
//! `mealwave-intelligence` with defaults taken from `mealwave-core`
//! constants. This module reads the deployment overrides from the
//! environment and adds the settings of the threshold cache.

/// Environment-driven configuration
pub mod environment;

pub use environment::{Environment, MealwaveConfig};
