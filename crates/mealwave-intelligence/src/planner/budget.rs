// ABOUTME: Budget distribution across planned meal slots
// ABOUTME: Ratio tables, sleep and time-of-day re-weighting, monotone shares, protein floor and TEF
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::planner::TefConfig;
use crate::config::PlannerConfig;
use mealwave_core::constants::planner::{wave_estimate, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN_CARB};
use mealwave_core::models::MacroBudget;
use std::iter;

/// Ratio table row for `count` slots; equal shares when the table has no row
#[must_use]
pub fn base_ratios(count: usize, config: &PlannerConfig) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    config
        .budget_ratios
        .get(count - 1)
        .filter(|row| row.len() == count)
        .cloned()
        .unwrap_or_else(|| vec![1.0 / count as f64; count])
}

/// First slot's share of `remaining` when `count` slots are expected
#[must_use]
pub fn next_meal_budget(remaining: &MacroBudget, count: usize, config: &PlannerConfig) -> MacroBudget {
    let share = base_ratios(count.max(1), config).first().copied().unwrap_or(1.0);
    remaining.scaled(share)
}

/// Wave length of a planned meal from its macros, clamped to the estimate bounds
#[must_use]
pub fn estimate_wave_hours(
    budget: &MacroBudget,
    gi: Option<f64>,
    base_hours: f64,
    config: &PlannerConfig,
) -> f64 {
    let gi = gi.unwrap_or(wave_estimate::NEUTRAL_GI);
    let mut hours = base_hours;
    if gi > wave_estimate::HIGH_GI {
        hours *= wave_estimate::HIGH_GI_FACTOR;
    } else if gi < wave_estimate::LOW_GI {
        hours *= wave_estimate::LOW_GI_FACTOR;
    }
    if budget.fat > wave_estimate::HIGH_FAT_G {
        hours *= wave_estimate::HIGH_FAT_FACTOR;
    }
    if budget.protein > wave_estimate::HIGH_PROTEIN_G {
        hours *= wave_estimate::HIGH_PROTEIN_FACTOR;
    }
    let (min, max) = config.wave_estimate_bounds;
    hours.clamp(min, max)
}

/// Re-weight ratios by hours-to-sleep and time of day, then normalize
#[must_use]
pub fn reweight(ratios: &[f64], starts: &[f64], sleep: f64, config: &PlannerConfig) -> Vec<f64> {
    let weighted: Vec<f64> = ratios
        .iter()
        .zip(starts)
        .map(|(ratio, start)| {
            let hours_to_sleep = (sleep - start).max(0.0);
            let proximity = (hours_to_sleep / config.sleep_proximity_full_hours).min(1.0);
            let sleep_factor =
                config
                    .sleep_proximity_blend
                    .mul_add(proximity, 1.0 - config.sleep_proximity_blend);
            let daytime = (start.rem_euclid(24.0) - 6.0).clamp(0.0, 18.0) / 18.0;
            let time_factor = config
                .time_of_day_blend
                .mul_add(1.0 - daytime, 1.0 - config.time_of_day_blend);
            ratio * sleep_factor * time_factor
        })
        .collect();
    normalize(&weighted)
}

fn normalize(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return vec![1.0 / values.len().max(1) as f64; values.len()];
    }
    values.iter().map(|value| value / total).collect()
}

/// Pool adjacent violators so that shares never increase from one slot to the next
#[must_use]
pub fn non_increasing(shares: &[f64]) -> Vec<f64> {
    // (sum, count) blocks
    let mut blocks: Vec<(f64, usize)> = Vec::with_capacity(shares.len());
    for &share in shares {
        blocks.push((share, 1));
        while blocks.len() > 1 {
            let (last_sum, last_count) = blocks[blocks.len() - 1];
            let (prev_sum, prev_count) = blocks[blocks.len() - 2];
            if last_sum / last_count as f64 <= prev_sum / prev_count as f64 {
                break;
            }
            blocks.pop();
            let merged = blocks.len() - 1;
            blocks[merged] = (prev_sum + last_sum, prev_count + last_count);
        }
    }
    blocks
        .into_iter()
        .flat_map(|(sum, count)| iter::repeat(sum / count as f64).take(count))
        .collect()
}

/// Cap each share at `cap`, spreading the excess over uncapped slots in proportion
///
/// Left unchanged when the cap cannot hold the whole budget.
#[must_use]
pub fn cap_shares(shares: &[f64], cap: f64) -> Vec<f64> {
    if cap * (shares.len() as f64) < 1.0 {
        return shares.to_vec();
    }
    let mut capped = shares.to_vec();
    for _ in 0..shares.len() {
        let excess: f64 = capped.iter().map(|share| (share - cap).max(0.0)).sum();
        if excess <= f64::EPSILON {
            break;
        }
        let open: f64 = capped.iter().filter(|share| **share < cap).sum();
        for share in &mut capped {
            if *share >= cap {
                *share = cap;
            } else if open > 0.0 {
                *share += excess * *share / open;
            }
        }
    }
    capped
}

fn split_component(total: f64, shares: &[f64]) -> Vec<f64> {
    let mut parts: Vec<f64> = shares.iter().map(|share| (total * share).round()).collect();
    let residue = total.round() - parts.iter().sum::<f64>();
    if let Some(first) = parts.first_mut() {
        *first += residue;
    }
    parts
}

/// Split `total` by `shares`, rounding each component and putting the residue on the first slot
#[must_use]
pub fn split_budget(total: &MacroBudget, shares: &[f64]) -> Vec<MacroBudget> {
    let protein = split_component(total.protein, shares);
    let carbs = split_component(total.carbs, shares);
    let fat = split_component(total.fat, shares);
    let kcal = split_component(total.kcal, shares);
    (0..shares.len())
        .map(|i| MacroBudget::new(protein[i], carbs[i], fat[i], kcal[i]))
        .collect()
}

/// Per-meal protein floor from thresholds or body weight, capped
#[must_use]
pub fn protein_floor(
    threshold: Option<f64>,
    weight_kg: Option<f64>,
    config: &PlannerConfig,
) -> Option<f64> {
    threshold
        .or_else(|| weight_kg.map(|weight| weight * config.protein_floor_g_per_kg))
        .filter(|floor| *floor > 0.0)
        .map(|floor| floor.min(config.protein_floor_cap_g))
}

/// Move carbohydrate grams to protein where a slot falls short of `floor`
///
/// Energy is unchanged since both macros carry the same kcal per gram.
pub fn apply_protein_floor(budgets: &mut [MacroBudget], floor: f64) {
    for budget in budgets {
        let shift = (floor - budget.protein).clamp(0.0, budget.carbs);
        budget.protein += shift;
        budget.carbs -= shift;
    }
}

/// Recovery-oriented macro split of `kcal`
#[must_use]
pub fn recovery_split(kcal: f64, config: &PlannerConfig) -> MacroBudget {
    let fat_share = (1.0 - config.recovery_protein_share - config.recovery_carb_share).max(0.0);
    MacroBudget::new(
        (kcal * config.recovery_protein_share / KCAL_PER_G_PROTEIN_CARB).round(),
        (kcal * config.recovery_carb_share / KCAL_PER_G_PROTEIN_CARB).round(),
        (kcal * fat_share / KCAL_PER_G_FAT).round(),
        kcal,
    )
}

/// Energy left after the thermic effect of food
#[must_use]
pub fn effective_kcal(budget: &MacroBudget, tef: &TefConfig) -> f64 {
    let thermic = (budget.fat * KCAL_PER_G_FAT).mul_add(
        tef.fat,
        (budget.protein * KCAL_PER_G_PROTEIN_CARB)
            .mul_add(tef.protein, budget.carbs * KCAL_PER_G_PROTEIN_CARB * tef.carbs),
    );
    (budget.kcal - thermic).max(0.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_increasing_pools_violators() {
        let pooled = non_increasing(&[0.3, 0.4, 0.3]);
        assert!((pooled[0] - 0.35).abs() < 1e-12);
        assert!((pooled[1] - 0.35).abs() < 1e-12);
        assert!((pooled[2] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_cap_spreads_excess() {
        let capped = cap_shares(&[0.65, 0.35], 900.0 / 1465.0);
        assert!(capped[0] <= 900.0 / 1465.0 + 1e-12);
        assert!((capped.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_infeasible_cap_leaves_shares() {
        // Two slots capped at 0.4 cannot hold the whole budget
        let shares = [0.6, 0.4];
        assert_eq!(cap_shares(&shares, 0.4), shares.to_vec());
    }

    #[test]
    fn test_split_conserves_kcal() {
        let total = MacroBudget::new(101.0, 203.0, 55.0, 1465.0);
        let parts = split_budget(&total, &[0.45, 0.35, 0.2]);
        let kcal: f64 = parts.iter().map(|p| p.kcal).sum();
        assert!((kcal - 1465.0).abs() < 1e-9);
    }

    #[test]
    fn test_protein_floor_shifts_carbs() {
        let mut budgets = [MacroBudget::new(10.0, 50.0, 10.0, 330.0)];
        apply_protein_floor(&mut budgets, 25.0);
        assert!((budgets[0].protein - 25.0).abs() < 1e-12);
        assert!((budgets[0].carbs - 35.0).abs() < 1e-12);
        assert!((budgets[0].kcal - 330.0).abs() < 1e-12);
    }

    #[test]
    fn test_wave_estimate_clamped() {
        let config = PlannerConfig::default();
        let heavy = MacroBudget::new(50.0, 80.0, 40.0, 900.0);
        let hours = estimate_wave_hours(&heavy, Some(30.0), 4.5, &config);
        assert!((hours - 5.0).abs() < 1e-12);
    }
}
