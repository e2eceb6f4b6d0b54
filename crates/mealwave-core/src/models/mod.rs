// ABOUTME: Core data models shared across the mealwave workspace
// ABOUTME: Re-exports clock, catalog, history, profile and budget types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain records consumed by the computation core. The caller owns all of
//! them; the engine only reads.

/// Macro and calorie budgets
pub mod budget;
/// Product facts and the catalog lookup seam
pub mod catalog;
/// Clock time helpers
pub mod clock;
/// Day history records
pub mod history;
/// Person profile and phenotype
pub mod profile;

pub use budget::MacroBudget;
pub use catalog::{
    AlcoholLevel, EmptyCatalog, FoodForm, InsulinogenicType, ProductCatalog, ProductFacts,
    ProteinSource,
};
pub use clock::{format_clock, parse_clock, ClockTime};
pub use history::{DayRecord, Meal, MealItem, SleepQuality, Workout, WorkoutKind};
pub use profile::{
    CircadianType, Goal, MetabolicType, PersonProfile, Phenotype, SatietyType, Sex, StressType,
};
