// ABOUTME: Main library entry point for the mealwave meal-timing engine
// ABOUTME: Wires configuration, logging, the threshold cache and the planning service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealwave
//!
//! Meal timing from a model of post-meal insulin activity. Three
//! computation components live in `mealwave-intelligence`:
//!
//! - **Wave model**: how long insulin stays elevated after a meal
//! - **Adaptive thresholds**: personalized limits learned from day history
//! - **Meal timeline planner**: when and how much to eat before sleep
//!
//! This crate adds the runtime around them: environment configuration,
//! structured logging, a per-person threshold store with stale-while-revalidate
//! refresh, and the `mealwave-cli` binary.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealwave::cache::memory::InMemoryThresholdStore;
//! use mealwave::config::MealwaveConfig;
//! use mealwave::models::EmptyCatalog;
//! use mealwave::planning::PlanningService;
//! use mealwave_intelligence::PlanRequest;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MealwaveConfig::from_env()?;
//!     let store = Arc::new(InMemoryThresholdStore::new(&config.cache));
//!     let service = PlanningService::from_config(&config, store, Arc::new(EmptyCatalog));
//!
//!     let plan = service.plan(Uuid::new_v4(), &PlanRequest::default()).await;
//!     println!("{} meals planned", plan.meals.len());
//!     Ok(())
//! }
//! ```

/// Threshold store abstraction and in-memory backend
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// JSON input documents for the CLI
pub mod input;

/// Structured logging setup
pub mod logging;

/// Planning service over cached thresholds
pub mod planning;

/// Stale-while-revalidate threshold service
pub mod thresholds_service;

pub use mealwave_core::{constants, errors, models};
pub use mealwave_intelligence as intelligence;
