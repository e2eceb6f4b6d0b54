// ABOUTME: Macro and calorie budget arithmetic for day targets and planned meals
// ABOUTME: Remaining-budget subtraction saturates at zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Protein, carbohydrate and fat grams plus energy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MacroBudget {
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Energy in kcal
    pub kcal: f64,
}

impl MacroBudget {
    /// Create a budget
    #[must_use]
    pub const fn new(protein: f64, carbs: f64, fat: f64, kcal: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
            kcal,
        }
    }

    /// What is left of `target` after `eaten`, never negative
    #[must_use]
    pub fn remaining(target: &Self, eaten: &Self) -> Self {
        Self {
            protein: (target.protein - eaten.protein).max(0.0),
            carbs: (target.carbs - eaten.carbs).max(0.0),
            fat: (target.fat - eaten.fat).max(0.0),
            kcal: (target.kcal - eaten.kcal).max(0.0),
        }
    }

    /// Every component multiplied by `ratio`
    #[must_use]
    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            protein: self.protein * ratio,
            carbs: self.carbs * ratio,
            fat: self.fat * ratio,
            kcal: self.kcal * ratio,
        }
    }

    /// Every component rounded to whole units
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            protein: self.protein.round(),
            carbs: self.carbs.round(),
            fat: self.fat.round(),
            kcal: self.kcal.round(),
        }
    }
}

impl Add for MacroBudget {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
            kcal: self.kcal + rhs.kcal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_saturates() {
        let target = MacroBudget::new(150.0, 200.0, 60.0, 2000.0);
        let eaten = MacroBudget::new(160.0, 100.0, 30.0, 1200.0);
        let left = MacroBudget::remaining(&target, &eaten);
        assert!(left.protein.abs() < f64::EPSILON);
        assert!((left.carbs - 100.0).abs() < f64::EPSILON);
        assert!((left.kcal - 800.0).abs() < f64::EPSILON);
    }
}
