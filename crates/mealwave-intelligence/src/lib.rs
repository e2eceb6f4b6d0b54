// ABOUTME: Insulin wave model, adaptive thresholds, and meal timeline planner
// ABOUTME: Pure computation crate with injected configuration and no I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealwave Intelligence
//!
//! The three computational components of mealwave, each depending on the
//! one before it:
//!
//! - **wave**: post-meal insulin wave length from meal composition, activity,
//!   day physiology and circadian phase
//! - **thresholds**: personalized thresholds learned from day history, with
//!   tiered confidence and an adaptive cache policy
//! - **planner**: schedules the rest of the day's meals before sleep
//!
//! Every function is total over its inputs. Missing data falls back to
//! neutral factors or population priors rather than failing.

/// Component configuration with validated defaults
pub mod config;

/// Phenotype decorator over threshold sets
pub mod phenotype;

/// Meal timeline planner
pub mod planner;

/// Descriptive statistics
pub mod stats;

/// Adaptive threshold engine and cache policy
pub mod thresholds;

/// Insulin wave model
pub mod wave;

pub use config::{ConfigError, IntelligenceConfig, PlannerConfig, ThresholdConfig, WaveModelConfig};
pub use planner::{MealPlan, MealPlanner, PlanError, PlanRequest, PlannedMeal};
pub use thresholds::{ThresholdEngine, ThresholdName, ThresholdSet};
pub use wave::{WaveContext, WaveEstimator, WaveModel, WaveResult};
