// ABOUTME: Sleep-target estimation for the meal planner
// ABOUTME: Bedtime check-ins, then last-meal pattern, profile, thresholds and a fixed fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::PlannerConfig;
use crate::stats::{mean, median};
use crate::thresholds::{ThresholdName, ThresholdSet};
use mealwave_core::constants::planner::{AFTER_MIDNIGHT_SLEEP_CUTOFF_HOUR, DAY_BOUNDARY_HOUR};
use mealwave_core::models::{ClockTime, DayRecord, PersonProfile};
use serde::{Deserialize, Serialize};

/// Where the sleep target came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SleepSource {
    /// Median of recent bedtime check-ins
    Bedtime,
    /// Average recent last meal plus a fixed gap
    LastMealPattern,
    /// Profile setting
    Profile,
    /// Reliable late-eating threshold plus a fixed gap
    Thresholds,
    /// Configured fallback hour
    Fallback,
}

/// Estimated sleep target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SleepEstimate {
    /// Target time, within `[0, 24)`
    pub target: ClockTime,
    /// Provenance
    pub source: SleepSource,
}

/// Map early-morning hours past 24 so evening and after-midnight times average correctly
fn evening_hours(hours: f64) -> f64 {
    let wrapped = hours.rem_euclid(24.0);
    if wrapped < AFTER_MIDNIGHT_SLEEP_CUTOFF_HOUR {
        wrapped + 24.0
    } else {
        wrapped
    }
}

fn recent<'a>(history: &'a [DayRecord], days: usize) -> Vec<&'a DayRecord> {
    let mut sorted: Vec<&DayRecord> = history.iter().collect();
    sorted.sort_by_key(|day| day.date);
    let skip = sorted.len().saturating_sub(days);
    sorted.split_off(skip)
}

fn target(hours: f64, source: SleepSource) -> SleepEstimate {
    SleepEstimate {
        target: ClockTime::from_hours(hours.rem_euclid(24.0)),
        source,
    }
}

/// Estimate tonight's sleep time
#[must_use]
pub fn estimate_sleep_target(
    history: &[DayRecord],
    profile: Option<&PersonProfile>,
    thresholds: Option<&ThresholdSet>,
    config: &PlannerConfig,
) -> SleepEstimate {
    let recent = recent(history, config.sleep_estimate_days);

    let bedtimes: Vec<f64> = recent
        .iter()
        .filter_map(|day| day.bedtime)
        .map(|time| evening_hours(time.hours()))
        .collect();
    if bedtimes.len() >= config.sleep_estimate_min_samples {
        if let Some(bedtime) = median(&bedtimes) {
            return target(bedtime, SleepSource::Bedtime);
        }
    }

    let last_meals: Vec<f64> = recent
        .iter()
        .filter_map(|day| day.last_meal())
        .map(|meal| evening_hours(meal.time.hours()))
        .collect();
    if last_meals.len() >= config.sleep_estimate_min_samples {
        if let Some(last_meal) = mean(&last_meals) {
            return target(
                last_meal + config.last_meal_to_sleep_hours,
                SleepSource::LastMealPattern,
            );
        }
    }

    if let Some(sleep) = profile.and_then(|p| p.sleep_target) {
        return target(sleep.hours(), SleepSource::Profile);
    }

    if let Some(late) =
        thresholds.and_then(|set| set.reliable_numeric(ThresholdName::LateEatingHour))
    {
        return target(
            late + config.last_meal_to_sleep_hours,
            SleepSource::Thresholds,
        );
    }

    target(config.fallback_sleep_hour, SleepSource::Fallback)
}

/// Sleep hour on the same timeline as `now`, rolling past midnight when needed
///
/// An after-midnight target belongs to the coming night once the planning
/// day has started at [`DAY_BOUNDARY_HOUR`].
#[must_use]
pub fn align_to_now(sleep: ClockTime, now: f64) -> f64 {
    let hours = sleep.wrapped_hours();
    if hours < AFTER_MIDNIGHT_SLEEP_CUTOFF_HOUR && now >= DAY_BOUNDARY_HOUR {
        hours + 24.0
    } else {
        hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bedtime_median_across_midnight() {
        let config = PlannerConfig::default();
        let history: Vec<DayRecord> = [23.5, 0.5, 23.0]
            .iter()
            .enumerate()
            .map(|(i, hour)| {
                let mut day = DayRecord::new(NaiveDate::from_ymd_opt(2025, 5, 1 + i as u32).unwrap());
                day.bedtime = Some(ClockTime::from_hours(*hour));
                day
            })
            .collect();
        let estimate = estimate_sleep_target(&history, None, None, &config);
        assert_eq!(estimate.source, SleepSource::Bedtime);
        assert!((estimate.target.hours() - 23.5).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_and_alignment() {
        let config = PlannerConfig::default();
        let estimate = estimate_sleep_target(&[], None, None, &config);
        assert_eq!(estimate.source, SleepSource::Fallback);
        assert!((align_to_now(ClockTime::from_hours(0.5), 21.0) - 24.5).abs() < 1e-9);
        assert!((align_to_now(ClockTime::from_hours(23.0), 21.0) - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_after_midnight_target_rolls_forward_in_the_morning() {
        let late = ClockTime::from_hours(0.5);
        assert!((align_to_now(late, 10.0) - 24.5).abs() < 1e-9);
        assert!((align_to_now(late, 3.0) - 24.5).abs() < 1e-9);
        // Still last night before the day boundary
        assert!((align_to_now(late, 1.0) - 0.5).abs() < 1e-9);
    }
}
