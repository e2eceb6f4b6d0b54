// ABOUTME: Wall-clock time of day as decimal hours with "HH:MM" serialization
// ABOUTME: Parsing, wrapped formatting, and minute conversions used by every component
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Minutes in a day
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse an `"HH:MM"` string into decimal hours
///
/// Accepts `0..=23` hours and `0..=59` minutes; a bare `"HH"` is read as `HH:00`.
#[must_use]
pub fn parse_clock(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let (hours, minutes) = trimmed.split_once(':').unwrap_or((trimmed, "0"));
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(f64::from(hours) + f64::from(minutes) / 60.0)
}

/// Format decimal hours as `"HH:MM"`, wrapping values outside `[0, 24)`
#[must_use]
pub fn format_clock(hours: f64) -> String {
    if !hours.is_finite() {
        return "00:00".to_owned();
    }
    let total = ((hours * 60.0).round() as i64).rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Convert decimal hours to minutes
#[must_use]
pub fn hours_to_minutes(hours: f64) -> f64 {
    hours * 60.0
}

/// Convert minutes to decimal hours
#[must_use]
pub fn minutes_to_hours(minutes: f64) -> f64 {
    minutes / 60.0
}

/// Time of day stored as decimal hours
///
/// Values may exceed 24 when a schedule crosses midnight; formatting wraps
/// them back into the day.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ClockTime(f64);

impl ClockTime {
    /// Midnight
    pub const MIDNIGHT: Self = Self(0.0);

    /// Create from decimal hours
    #[must_use]
    pub const fn from_hours(hours: f64) -> Self {
        Self(hours)
    }

    /// Create from minutes since midnight
    #[must_use]
    pub fn from_minutes(minutes: f64) -> Self {
        Self(minutes_to_hours(minutes))
    }

    /// Decimal hours
    #[must_use]
    pub const fn hours(self) -> f64 {
        self.0
    }

    /// Minutes since midnight
    #[must_use]
    pub fn minutes(self) -> f64 {
        hours_to_minutes(self.0)
    }

    /// Hour of day in `[0, 24)`
    #[must_use]
    pub fn wrapped_hours(self) -> f64 {
        self.0.rem_euclid(24.0)
    }

    /// Integer hour of day
    #[must_use]
    pub fn whole_hour(self) -> u32 {
        self.wrapped_hours().floor() as u32
    }

    /// Shift by a number of hours
    #[must_use]
    pub fn plus_hours(self, hours: f64) -> Self {
        Self(self.0 + hours)
    }

    /// Shift by a number of minutes
    #[must_use]
    pub fn plus_minutes(self, minutes: f64) -> Self {
        self.plus_hours(minutes_to_hours(minutes))
    }

    /// Signed minutes from `self` to `later`
    #[must_use]
    pub fn minutes_until(self, later: Self) -> f64 {
        hours_to_minutes(later.0 - self.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_clock(self.0))
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock(s)
            .map(Self)
            .ok_or_else(|| format!("invalid clock time '{s}', expected HH:MM"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("20:00"), Some(20.0));
        assert_eq!(parse_clock("07:30"), Some(7.5));
        assert_eq!(parse_clock("9"), Some(9.0));
        assert_eq!(parse_clock("24:00"), None);
        assert_eq!(parse_clock("12:60"), None);
        assert_eq!(parse_clock("noon"), None);
    }

    #[test]
    fn test_format_clock_wraps() {
        assert_eq!(format_clock(20.5), "20:30");
        assert_eq!(format_clock(25.25), "01:15");
        assert_eq!(format_clock(-1.0), "23:00");
        assert_eq!(format_clock(f64::NAN), "00:00");
    }

    #[test]
    fn test_clock_time_serde() {
        let time: ClockTime = serde_json::from_str("\"18:45\"").unwrap();
        assert!((time.hours() - 18.75).abs() < 1e-9);
        assert_eq!(
            serde_json::to_string(&time.plus_hours(6.0)).unwrap(),
            "\"00:45\""
        );
        assert!(serde_json::from_str::<ClockTime>("\"late\"").is_err());
    }
}
