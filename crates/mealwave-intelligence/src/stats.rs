// ABOUTME: Descriptive statistics used by threshold personalization and stability scoring
// ABOUTME: Percentiles, median, mean, std, coefficient of variation, EMA and sigmoid
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Small statistics toolkit
//!
//! All functions accept unsorted slices and return `None` (or a neutral
//! value) for empty input instead of failing.

/// Linear-interpolated percentile, `p` in `[0, 100]`
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some((sorted[upper] - sorted[lower]).mul_add(fraction, sorted[lower]))
}

/// Median (50th percentile)
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 50.0)
}

/// Arithmetic mean
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Population standard deviation
#[must_use]
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values
        .iter()
        .map(|value| (value - avg).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}

/// Population variance
#[must_use]
pub fn variance(values: &[f64]) -> Option<f64> {
    std_dev(values).map(|std| std * std)
}

/// Coefficient of variation; 0 for fewer than two values or a zero mean
#[must_use]
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    match (mean(values), std_dev(values)) {
        (Some(avg), Some(std)) if avg.abs() > f64::EPSILON => std / avg.abs(),
        _ => 0.0,
    }
}

/// Exponential moving average series with `alpha = 2 / (span + 1)`
#[must_use]
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut smoothed = Vec::with_capacity(values.len());
    let mut previous: Option<f64> = None;
    for &value in values {
        let next = previous.map_or(value, |prev| alpha.mul_add(value, (1.0 - alpha) * prev));
        smoothed.push(next);
        previous = Some(next);
    }
    smoothed
}

/// Logistic sigmoid
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
