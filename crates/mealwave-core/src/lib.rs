// ABOUTME: Core types and constants for the mealwave meal-timing engine
// ABOUTME: Foundation crate with error handling, data models, clock helpers, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealwave Core
//!
//! Foundation crate providing shared types and constants for the mealwave
//! engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Physiological and scheduling constants organized by domain
//! - **models**: Day history, meals, products, person profile, and macro budgets

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (day history, meals, catalog, profile, budgets)
pub mod models;
