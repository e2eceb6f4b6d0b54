// ABOUTME: Decomposition of a wave into rise, plateau and decline phases
// ABOUTME: Fiber slows the rise, protein and fat extend the plateau, activity speeds the decline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrients::NutrientProfile;
use crate::config::wave::PhaseConfig;
use serde::{Deserialize, Serialize};

/// Phase durations in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePhases {
    /// Rise to peak
    pub rise_min: f64,
    /// Plateau at peak
    pub plateau_min: f64,
    /// Decline to baseline
    pub decline_min: f64,
}

/// Split a wave of `wave_min` minutes into phases
#[must_use]
pub fn wave_phases(
    wave_min: f64,
    nutrients: &NutrientProfile,
    has_activity: bool,
    config: &PhaseConfig,
) -> WavePhases {
    let fiber_steps = (nutrients.fiber / 5.0).floor();
    let mut rise = fiber_steps.mul_add(config.rise_fiber_min_per_5g, config.rise_base_min);
    if nutrients.is_liquid {
        rise *= config.rise_liquid_factor;
    }
    let rise = rise.clamp(config.rise_bounds_min.0, config.rise_bounds_min.1);

    let remainder = (wave_min - rise).max(0.0);
    let protein_steps = (nutrients.protein / 20.0).floor();
    let fat_steps = (nutrients.fat / 15.0).floor();
    let share = fat_steps
        .mul_add(
            config.plateau_fat_share,
            protein_steps.mul_add(config.plateau_protein_share, config.plateau_base_share),
        )
        .min(config.plateau_max_share);
    let plateau = remainder * share;

    let mut decline = remainder - plateau;
    if has_activity {
        decline *= 1.0 + config.decline_activity_factor;
    }

    WavePhases {
        rise_min: rise,
        plateau_min: plateau,
        decline_min: decline.max(config.decline_min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiber_and_liquid_rise() {
        let config = PhaseConfig::default();
        let fibrous = NutrientProfile {
            fiber: 12.0,
            ..NutrientProfile::default()
        };
        assert!((wave_phases(180.0, &fibrous, false, &config).rise_min - 26.0).abs() < 1e-9);

        let shake = NutrientProfile {
            is_liquid: true,
            ..NutrientProfile::default()
        };
        assert!((wave_phases(180.0, &shake, false, &config).rise_min - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_plateau_share_capped() {
        let config = PhaseConfig::default();
        let heavy = NutrientProfile {
            protein: 80.0,
            fat: 60.0,
            ..NutrientProfile::default()
        };
        let phases = wave_phases(200.0, &heavy, false, &config);
        assert!((phases.plateau_min - 180.0 * 0.55).abs() < 1e-9);
    }
}
