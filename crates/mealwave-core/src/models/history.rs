// ABOUTME: Daily history records: meals, meal items, workouts and day-level physiology
// ABOUTME: Input shape shared by the wave model, the threshold engine and the planner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::catalog::ProductFacts;
use super::clock::ClockTime;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const fn default_grams() -> f64 {
    100.0
}

/// One product eaten as part of a meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealItem {
    /// Catalog key
    pub product_id: String,
    /// Eaten amount in grams
    #[serde(default = "default_grams")]
    pub grams: f64,
    /// Inline facts captured when the item was logged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<ProductFacts>,
}

impl MealItem {
    /// Item resolved from the catalog only
    #[must_use]
    pub fn new(product_id: impl Into<String>, grams: f64) -> Self {
        Self {
            product_id: product_id.into(),
            grams,
            snapshot: None,
        }
    }

    /// Attach an inline snapshot
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: ProductFacts) -> Self {
        self.snapshot = Some(snapshot);
        self
    }
}

/// A meal logged at a clock time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    /// Start time
    pub time: ClockTime,
    /// Eaten products
    #[serde(default)]
    pub items: Vec<MealItem>,
}

/// Workout classification for the postprandial multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    /// Running, cycling, swimming
    Cardio,
    /// Resistance training
    Strength,
    /// Walking, gardening, unclassified
    #[default]
    Hobby,
}

/// A workout with minutes spent in each heart-rate zone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// Start time
    pub time: ClockTime,
    /// Minutes in zones 1 to 4
    #[serde(default)]
    pub zone_minutes: [f64; 4],
    /// Workout classification
    #[serde(default)]
    pub kind: WorkoutKind,
}

impl Workout {
    /// Total minutes across all zones
    #[must_use]
    pub fn total_minutes(&self) -> f64 {
        self.zone_minutes.iter().sum()
    }

    /// Minutes in zones 3 and 4
    #[must_use]
    pub fn high_intensity_minutes(&self) -> f64 {
        self.zone_minutes[2] + self.zone_minutes[3]
    }

    /// Minutes in zones 1 and 2
    #[must_use]
    pub fn low_intensity_minutes(&self) -> f64 {
        self.zone_minutes[0] + self.zone_minutes[1]
    }

    /// End time
    #[must_use]
    pub fn end(&self) -> ClockTime {
        self.time.plus_minutes(self.total_minutes())
    }
}

/// Self-reported sleep quality
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    /// Restless or interrupted
    Poor,
    /// Below average
    Mediocre,
    /// Average
    Normal,
    /// Restorative
    Good,
}

/// Everything recorded for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayRecord {
    /// Calendar date
    pub date: NaiveDate,
    /// Meals in chronological order
    #[serde(default)]
    pub meals: Vec<Meal>,
    /// Total calories eaten, when tracked separately from items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eaten_kcal: Option<f64>,
    /// Hours slept the night before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Sleep quality the night before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<SleepQuality>,
    /// Water intake in ml
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_ml: Option<f64>,
    /// Step count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    /// Household and other incidental activity in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_minutes: Option<f64>,
    /// Workouts in chronological order
    #[serde(default)]
    pub workouts: Vec<Workout>,
    /// Average stress on a 1-10 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_avg: Option<f64>,
    /// Menstrual cycle day (1-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_day: Option<u8>,
    /// Bedtime check-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedtime: Option<ClockTime>,
}

impl DayRecord {
    /// Empty record for a date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            meals: Vec::new(),
            eaten_kcal: None,
            sleep_hours: None,
            sleep_quality: None,
            water_ml: None,
            steps: None,
            household_minutes: None,
            workouts: Vec::new(),
            stress_avg: None,
            cycle_day: None,
            bedtime: None,
        }
    }

    /// First meal of the day
    #[must_use]
    pub fn first_meal(&self) -> Option<&Meal> {
        self.meals
            .iter()
            .min_by(|a, b| a.time.hours().total_cmp(&b.time.hours()))
    }

    /// Last meal of the day
    #[must_use]
    pub fn last_meal(&self) -> Option<&Meal> {
        self.meals
            .iter()
            .max_by(|a, b| a.time.hours().total_cmp(&b.time.hours()))
    }

    /// Total workout minutes
    #[must_use]
    pub fn workout_minutes(&self) -> f64 {
        self.workouts.iter().map(Workout::total_minutes).sum()
    }
}
