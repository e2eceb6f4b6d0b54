// ABOUTME: Cosine circadian insulin-sensitivity multiplier and time-of-day period labels
// ABOUTME: The peak hour yields the minimum multiplier and the opposite phase the maximum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::wave::CircadianConfig;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Time-of-day period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CircadianPeriod {
    /// 22:00 to 05:00
    Night,
    /// 05:00 to 07:00
    EarlyMorning,
    /// 07:00 to 10:00
    PeakMorning,
    /// 10:00 to 14:00
    Midday,
    /// 14:00 to 18:00
    Afternoon,
    /// 18:00 to 21:00
    Evening,
    /// 21:00 to 22:00
    LateEvening,
}

impl CircadianPeriod {
    /// Period for an hour of day
    #[must_use]
    pub fn from_hour(hour: f64) -> Self {
        let hour = hour.rem_euclid(24.0);
        if !(5.0..22.0).contains(&hour) {
            Self::Night
        } else if hour < 7.0 {
            Self::EarlyMorning
        } else if hour < 10.0 {
            Self::PeakMorning
        } else if hour < 14.0 {
            Self::Midday
        } else if hour < 18.0 {
            Self::Afternoon
        } else if hour < 21.0 {
            Self::Evening
        } else {
            Self::LateEvening
        }
    }
}

/// Circadian contribution for one meal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircadianFactor {
    /// Wave multiplier
    pub multiplier: f64,
    /// Period label, shifted by chronotype
    pub period: CircadianPeriod,
}

/// Circadian multiplier at `hour`, with the peak moved by `shift_hours`
#[must_use]
pub fn circadian_multiplier(hour: f64, shift_hours: f64, config: &CircadianConfig) -> f64 {
    let center = (config.min_multiplier + config.max_multiplier) / 2.0;
    let amplitude = (config.max_multiplier - config.min_multiplier) / 2.0;
    let phase = 2.0 * PI * (hour - (config.peak_hour + shift_hours)) / 24.0;
    amplitude.mul_add(-phase.cos(), center)
}

/// Multiplier and period label for a meal hour
#[must_use]
pub fn circadian_factor(hour: f64, shift_hours: f64, config: &CircadianConfig) -> CircadianFactor {
    CircadianFactor {
        multiplier: circadian_multiplier(hour, shift_hours, config),
        period: CircadianPeriod::from_hour(hour - shift_hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_and_trough() {
        let config = CircadianConfig::default();
        assert!((circadian_multiplier(8.0, 0.0, &config) - 0.85).abs() < 1e-9);
        assert!((circadian_multiplier(20.0, 0.0, &config) - 1.20).abs() < 1e-9);
        assert!((circadian_multiplier(10.0, 2.0, &config) - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_periods() {
        assert_eq!(CircadianPeriod::from_hour(23.0), CircadianPeriod::Night);
        assert_eq!(CircadianPeriod::from_hour(4.99), CircadianPeriod::Night);
        assert_eq!(CircadianPeriod::from_hour(8.0), CircadianPeriod::PeakMorning);
        assert_eq!(CircadianPeriod::from_hour(21.5), CircadianPeriod::LateEvening);
    }
}
