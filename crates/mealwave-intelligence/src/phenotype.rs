// ABOUTME: Phenotype decorator over a computed ThresholdSet
// ABOUTME: Scales late-eating hour, protein per meal and fiber target by matching phenotype multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Phenotype overlay
//!
//! Cached threshold sets are stored undecorated; [`apply`] runs on every read
//! so a phenotype change never requires recomputation.

use crate::config::thresholds::{Limit, ThresholdLimits};
use crate::thresholds::{ThresholdName, ThresholdSet, ThresholdValue};
use mealwave_core::constants::thresholds::phenotype as multipliers;
use mealwave_core::models::{CircadianType, MetabolicType, Phenotype, SatietyType};
use tracing::debug;

fn late_hour_multiplier(phenotype: &Phenotype) -> f64 {
    let metabolic = match phenotype.metabolic {
        MetabolicType::InsulinResistant => multipliers::LATE_HOUR_INSULIN_RESISTANT,
        MetabolicType::MetabolicSyndromeRisk => multipliers::LATE_HOUR_METABOLIC_SYNDROME,
        MetabolicType::InsulinSensitive | MetabolicType::Neutral => 1.0,
    };
    let circadian = match phenotype.circadian {
        CircadianType::EveningType => multipliers::LATE_HOUR_EVENING_TYPE,
        CircadianType::MorningType => multipliers::LATE_HOUR_MORNING_TYPE,
        CircadianType::Flexible | CircadianType::Neutral => 1.0,
    };
    metabolic * circadian
}

fn protein_multiplier(phenotype: &Phenotype) -> f64 {
    let satiety = match phenotype.satiety {
        SatietyType::LowSatiety => multipliers::PROTEIN_LOW_SATIETY,
        SatietyType::HighSatiety => multipliers::PROTEIN_HIGH_SATIETY,
        SatietyType::VolumeEater => multipliers::PROTEIN_VOLUME_EATER,
        SatietyType::Neutral => 1.0,
    };
    let metabolic = if phenotype.metabolic == MetabolicType::InsulinResistant {
        multipliers::PROTEIN_INSULIN_RESISTANT
    } else {
        1.0
    };
    satiety * metabolic
}

fn fiber_multiplier(phenotype: &Phenotype) -> f64 {
    let metabolic = if phenotype.metabolic == MetabolicType::InsulinResistant {
        multipliers::FIBER_INSULIN_RESISTANT
    } else {
        1.0
    };
    let satiety = if phenotype.satiety == SatietyType::LowSatiety {
        multipliers::FIBER_LOW_SATIETY
    } else {
        1.0
    };
    metabolic * satiety
}

/// Combined multiplier for a threshold, `None` for thresholds the phenotype leaves alone
#[must_use]
pub fn multiplier_for(name: ThresholdName, phenotype: &Phenotype) -> Option<f64> {
    match name {
        ThresholdName::LateEatingHour => Some(late_hour_multiplier(phenotype)),
        ThresholdName::ProteinPerMealG => Some(protein_multiplier(phenotype)),
        ThresholdName::FiberTarget => Some(fiber_multiplier(phenotype)),
        _ => None,
    }
}

const fn limit_for(name: ThresholdName, limits: &ThresholdLimits) -> Option<Limit> {
    match name {
        ThresholdName::LateEatingHour => Some(limits.late_eating_hour),
        ThresholdName::ProteinPerMealG => Some(limits.protein_per_meal_g),
        ThresholdName::FiberTarget => Some(limits.fiber_target),
        _ => None,
    }
}

/// Decorate `set` with phenotype multipliers
///
/// Each adjusted value is rounded to one decimal and re-clamped to its limit.
/// A neutral phenotype returns the set unchanged apart from the flag.
#[must_use]
pub fn apply(set: &ThresholdSet, phenotype: &Phenotype, limits: &ThresholdLimits) -> ThresholdSet {
    let mut decorated = set.clone();
    decorated.phenotype_applied = true;
    if phenotype.is_neutral() {
        return decorated;
    }

    for (name, entry) in &mut decorated.thresholds {
        let (Some(multiplier), Some(limit)) = (multiplier_for(*name, phenotype), limit_for(*name, limits))
        else {
            continue;
        };
        if let ThresholdValue::Numeric(value) = entry.value {
            let adjusted = limit.clamp((value * multiplier * 10.0).round() / 10.0);
            debug!(threshold = %name, from = value, to = adjusted, multiplier, "Applied phenotype multiplier");
            entry.value = ThresholdValue::Numeric(adjusted);
        }
    }
    decorated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers_compose() {
        let phenotype = Phenotype {
            metabolic: MetabolicType::InsulinResistant,
            satiety: SatietyType::LowSatiety,
            ..Phenotype::default()
        };
        let protein = multiplier_for(ThresholdName::ProteinPerMealG, &phenotype).unwrap();
        assert!((protein - 1.2 * 1.15).abs() < 1e-12);
        let fiber = multiplier_for(ThresholdName::FiberTarget, &phenotype).unwrap();
        assert!((fiber - 1.2 * 1.3).abs() < 1e-12);
        assert!(multiplier_for(ThresholdName::GiOptimal, &phenotype).is_none());
    }
}
