// ABOUTME: Long-lived person attributes read by the wave model, thresholds and planner
// ABOUTME: PersonProfile, Goal, Sex, and the four-axis metabolic Phenotype
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::clock::ClockTime;
use serde::{Deserialize, Serialize};

/// Body-composition goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Calorie deficit
    #[serde(alias = "deficit", alias = "lose")]
    Cut,
    /// Maintenance
    #[default]
    #[serde(alias = "maintenance")]
    Maintain,
    /// Calorie surplus
    #[serde(alias = "surplus", alias = "gain")]
    Bulk,
}

impl Goal {
    /// Stable string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cut => "cut",
            Self::Maintain => "maintain",
            Self::Bulk => "bulk",
        }
    }
}

/// Biological sex
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Female
    Female,
    /// Male
    Male,
}

/// Insulin sensitivity axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MetabolicType {
    /// High insulin sensitivity
    InsulinSensitive,
    /// Reduced insulin sensitivity
    InsulinResistant,
    /// Elevated metabolic syndrome markers
    MetabolicSyndromeRisk,
    /// No classification
    #[default]
    Neutral,
}

/// Chronotype axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CircadianType {
    /// Early riser
    MorningType,
    /// Late sleeper
    EveningType,
    /// Adapts easily
    Flexible,
    /// No classification
    #[default]
    Neutral,
}

/// Appetite regulation axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SatietyType {
    /// Full quickly
    HighSatiety,
    /// Hungry again soon
    LowSatiety,
    /// Needs food volume
    VolumeEater,
    /// No classification
    #[default]
    Neutral,
}

/// Eating response to stress
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum StressType {
    /// Eats more under stress
    StressEater,
    /// Eats less under stress
    StressAnorexic,
    /// No classification
    #[default]
    Neutral,
}

/// Four-axis phenotype tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(default)]
pub struct Phenotype {
    /// Insulin sensitivity
    pub metabolic: MetabolicType,
    /// Chronotype
    pub circadian: CircadianType,
    /// Appetite regulation
    pub satiety: SatietyType,
    /// Stress response
    pub stress: StressType,
}

impl Phenotype {
    /// True when every axis is neutral
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// Person attributes owned by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersonProfile {
    /// Body weight in kg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Height in cm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Biological sex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// Body-composition goal
    pub goal: Goal,
    /// Personal baseline wave length, overriding the computed baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulin_wave_hours: Option<f64>,
    /// Usual bedtime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_target: Option<ClockTime>,
    /// Phenotype tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phenotype: Option<Phenotype>,
}

impl PersonProfile {
    /// Body mass index, when weight and height are known
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        let weight = self.weight_kg?;
        let height_m = self.height_cm? / 100.0;
        (height_m > 0.0).then(|| weight / (height_m * height_m))
    }
}
