// ABOUTME: Meal timeline planner scheduling the rest of the day's meals before sleep
// ABOUTME: Places slots after each wave plus a fat-burn margin and splits the remaining budget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Meal Timeline Planner
//!
//! Planning runs forward from the end of the last meal's insulin wave:
//!
//! 1. earliest start = max(now, last wave end + fat-burn margin)
//! 2. deadline = sleep target - pre-sleep buffer, shrunk by the hunger
//!    trade-off when a large budget would otherwise go unplanned
//! 3. slots are placed one wave apart until the deadline or the meal cap
//! 4. budgets above the single-meal ceiling force extra slots
//! 5. the remaining budget is split, floored for protein and tagged
//!
//! The planner is total: invalid input yields `MealPlan { available: false }`
//! with a [`PlanError`], never a panic.

/// Budget split helpers
pub mod budget;
/// Scenario tags and hints
pub mod scenario;
/// Sleep target estimation
pub mod sleep;

use crate::config::PlannerConfig;
use crate::thresholds::{ThresholdName, ThresholdSet};
use crate::wave::{WaveContext, WaveEstimator};
use budget::{
    apply_protein_floor, base_ratios, cap_shares, effective_kcal, estimate_wave_hours,
    next_meal_budget, non_increasing, protein_floor, recovery_split, reweight, split_budget,
};
use mealwave_core::models::{ClockTime, DayRecord, MacroBudget, Meal, PersonProfile, ProductCatalog};
use scenario::{
    classify, sleep_friendly_hint, target_gl_max, MealScenario, SleepFriendlyHint, SlotContext,
};
use serde::{Deserialize, Serialize};
use sleep::{align_to_now, estimate_sleep_target, SleepSource};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a plan could not be produced
#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanError {
    /// No current time supplied
    #[error("current time is required to plan meals")]
    MissingCurrentTime,
    /// Planner constructed without a wave model
    #[error("insulin wave model is unavailable")]
    WaveModelUnavailable,
}

/// Why a plan has no meals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanReason {
    /// No meal fits before the deadline
    NotEnoughTimeBeforeSleep,
    /// Remaining budget is negligible
    DayGoalPracticallyMet,
}

impl fmt::Display for PlanReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughTimeBeforeSleep => f.write_str("not enough time before sleep"),
            Self::DayGoalPracticallyMet => f.write_str("day goal practically met"),
        }
    }
}

/// Planner input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanRequest {
    /// Current time of day
    pub current_time: Option<ClockTime>,
    /// Most recent meal, if any today
    pub last_meal: Option<Meal>,
    /// Daily target
    pub day_target: MacroBudget,
    /// Eaten so far today
    pub day_eaten: MacroBudget,
    /// Person attributes
    pub profile: Option<PersonProfile>,
    /// Previous days, for sleep estimation
    pub history: Vec<DayRecord>,
    /// Today's record, for workouts and day factors
    pub today: Option<DayRecord>,
}

/// Clock window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeWindow {
    /// Start
    pub start: ClockTime,
    /// End
    pub end: ClockTime,
}

/// One scheduled meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedMeal {
    /// Position in the plan
    pub index: usize,
    /// Window start
    pub time_start: ClockTime,
    /// Window end
    pub time_end: ClockTime,
    /// Estimated end of this meal's wave
    pub estimated_wave_end: ClockTime,
    /// Wave end plus the fat-burn margin
    pub fat_burn_window: TimeWindow,
    /// Macro budget
    pub macros: MacroBudget,
    /// kcal after the thermic effect of food
    pub effective_kcal: f64,
    /// Scenario tag
    pub scenario: MealScenario,
    /// Hours from start to sleep
    pub hours_to_sleep: f64,
    /// The meal to act on next
    pub is_actionable: bool,
    /// Last meal of the plan
    pub is_last: bool,
    /// Glycemic-load ceiling
    pub target_gl_max: f64,
    /// Suggested food category near sleep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_friendly_hint: Option<SleepFriendlyHint>,
}

/// Totals and schedule boundaries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    /// Planned meal count
    pub total_meals: usize,
    /// First meal start
    pub timeline_start: Option<ClockTime>,
    /// Last meal window end
    pub timeline_end: Option<ClockTime>,
    /// Sum of planned macros
    pub total_macros: MacroBudget,
    /// Sleep target
    pub sleep_target: ClockTime,
    /// Where the sleep target came from
    pub sleep_source: SleepSource,
    /// Latest allowed meal start
    pub last_meal_deadline: ClockTime,
    /// Buffer actually used
    pub pre_sleep_buffer_hours: f64,
    /// The buffer was shrunk to fit a meal
    pub hunger_tradeoff_applied: bool,
    /// Extra slots were added for a large budget
    pub forced_split: bool,
    /// Why no meals were planned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PlanReason>,
}

/// Planner output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    /// Whether planning ran
    pub available: bool,
    /// Scheduled meals, non-decreasing in start time
    pub meals: Vec<PlannedMeal>,
    /// Present when planning ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PlanSummary>,
    /// Present when planning could not run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PlanError>,
}

impl MealPlan {
    fn unavailable(error: PlanError) -> Self {
        warn!(error = %error, "Meal planning unavailable");
        Self {
            available: false,
            meals: Vec::new(),
            summary: None,
            error: Some(error),
        }
    }
}

/// Schedule boundaries derived before slot placement
#[derive(Debug, Clone, Copy)]
struct Timeline {
    now: f64,
    earliest: f64,
    sleep: f64,
    sleep_source: SleepSource,
    buffer: f64,
    hunger_tradeoff: bool,
}

impl Timeline {
    fn deadline(&self) -> f64 {
        self.sleep - self.buffer
    }
}

/// Meal timeline planner
#[derive(Clone)]
pub struct MealPlanner {
    config: PlannerConfig,
    wave: Option<Arc<dyn WaveEstimator>>,
}

impl fmt::Debug for MealPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MealPlanner")
            .field("config", &self.config)
            .field("wave_model", &self.wave.is_some())
            .finish()
    }
}

impl MealPlanner {
    /// Create a planner backed by a wave model
    #[must_use]
    pub fn new(config: PlannerConfig, wave: Arc<dyn WaveEstimator>) -> Self {
        Self {
            config,
            wave: Some(wave),
        }
    }

    /// Create a planner with no wave model; every plan reports it unavailable
    #[must_use]
    pub const fn without_wave_model(config: PlannerConfig) -> Self {
        Self { config, wave: None }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan the remaining meals of the day
    #[must_use]
    pub fn plan(
        &self,
        request: &PlanRequest,
        thresholds: Option<&ThresholdSet>,
        catalog: &dyn ProductCatalog,
    ) -> MealPlan {
        let Some(now) = request.current_time else {
            return MealPlan::unavailable(PlanError::MissingCurrentTime);
        };
        let Some(wave) = self.wave.as_deref() else {
            return MealPlan::unavailable(PlanError::WaveModelUnavailable);
        };

        let remaining = MacroBudget::remaining(&request.day_target, &request.day_eaten);
        let mut timeline = self.timeline(now.hours(), request, thresholds, catalog, wave);

        if timeline.earliest >= timeline.deadline()
            && remaining.kcal >= self.config.hunger_tradeoff_kcal
        {
            self.apply_hunger_tradeoff(&mut timeline);
        }
        if timeline.earliest >= timeline.deadline() {
            info!(
                earliest = %ClockTime::from_hours(timeline.earliest),
                deadline = %ClockTime::from_hours(timeline.deadline()),
                "No meal fits before sleep"
            );
            return self.empty_plan(&timeline, PlanReason::NotEnoughTimeBeforeSleep);
        }
        if remaining.kcal < self.config.min_budget_kcal {
            info!(remaining_kcal = remaining.kcal, "Day goal practically met");
            return self.empty_plan(&timeline, PlanReason::DayGoalPracticallyMet);
        }

        let base_hours = request
            .profile
            .as_ref()
            .map_or(self.config.default_wave_estimate_hours, |profile| {
                wave.baseline_hours(Some(profile))
            });
        let gi = thresholds.and_then(|set| set.numeric(ThresholdName::GiOptimal));
        let mut starts = self.place_slots(&timeline, &remaining, base_hours, gi);
        let forced_split = self.force_split(&mut starts, &timeline, remaining.kcal);

        let budgets = self.distribute(&starts, &timeline, &remaining, request, thresholds);
        let post_workout = self.recent_workout_ended(request.today.as_ref(), timeline.now);
        let meals = self.build_meals(&starts, budgets, &timeline, post_workout, base_hours, gi);

        info!(
            meals = meals.len(),
            remaining_kcal = remaining.kcal,
            sleep = %ClockTime::from_hours(timeline.sleep),
            hunger_tradeoff = timeline.hunger_tradeoff,
            forced_split,
            "Planned remaining meals"
        );
        let summary = self.summary(&meals, &timeline, forced_split, None);
        MealPlan {
            available: true,
            meals,
            summary: Some(summary),
            error: None,
        }
    }

    fn timeline(
        &self,
        now: f64,
        request: &PlanRequest,
        thresholds: Option<&ThresholdSet>,
        catalog: &dyn ProductCatalog,
        wave: &dyn WaveEstimator,
    ) -> Timeline {
        let profile = request.profile.as_ref();
        let estimate = estimate_sleep_target(&request.history, profile, thresholds, &self.config);
        let sleep = align_to_now(estimate.target, now);

        let earliest = request.last_meal.as_ref().map_or(now, |meal| {
            let context = WaveContext {
                profile,
                day: request.today.as_ref(),
                previous: None,
                circadian_shift_hours: thresholds.map_or(0.0, ThresholdSet::circadian_shift),
            };
            let result = wave.wave_for_meal(meal, catalog, &context);
            let wave_hours = if result.wave_hours.is_finite() && result.wave_hours > 0.0 {
                result.wave_hours
            } else {
                self.config.fallback_wave_hours
            };
            let wave_end = meal.time.hours() + wave_hours;
            debug!(
                last_meal = %meal.time,
                wave_hours,
                wave_end = %ClockTime::from_hours(wave_end),
                "Last meal wave"
            );
            now.max(wave_end + self.config.fat_burn_window_min / 60.0)
        });

        Timeline {
            now,
            earliest,
            sleep,
            sleep_source: estimate.source,
            buffer: self.config.pre_sleep_buffer_hours,
            hunger_tradeoff: false,
        }
    }

    fn apply_hunger_tradeoff(&self, timeline: &mut Timeline) {
        let buffer = (timeline.sleep - timeline.earliest - self.config.meal_window_hours)
            .max(self.config.min_pre_sleep_buffer_hours);
        if buffer < timeline.buffer {
            debug!(
                from = timeline.buffer,
                to = buffer,
                "Shrinking pre-sleep buffer for hunger trade-off"
            );
            timeline.buffer = buffer;
            timeline.hunger_tradeoff = true;
        }
    }

    /// Slot starts, one estimated wave plus fat-burn margin apart
    fn place_slots(
        &self,
        timeline: &Timeline,
        remaining: &MacroBudget,
        base_hours: f64,
        gi: Option<f64>,
    ) -> Vec<f64> {
        let deadline = timeline.deadline();
        let fat_burn = self.config.fat_burn_window_min / 60.0;
        let mut starts = Vec::new();
        let mut cursor = timeline.earliest;

        while cursor < deadline && starts.len() < self.config.max_meals {
            let expected = self
                .config
                .lookahead_meals
                .min(self.config.max_meals - starts.len());
            let estimate = next_meal_budget(remaining, expected, &self.config);
            let fat_burn_end =
                cursor + estimate_wave_hours(&estimate, gi, base_hours, &self.config) + fat_burn;
            starts.push(cursor);

            let fits_another = fat_burn_end + self.config.min_next_meal_hours < deadline
                && timeline.sleep - fat_burn_end >= self.config.min_hours_to_sleep;
            if !fits_another {
                break;
            }
            cursor = fat_burn_end;
        }
        starts
    }

    /// Add slots at the tightened gap when one meal would exceed the ceiling
    fn force_split(&self, starts: &mut Vec<f64>, timeline: &Timeline, kcal: f64) -> bool {
        if kcal <= self.config.single_meal_ceiling_kcal {
            return false;
        }
        let required = ((kcal / self.config.single_meal_ceiling_kcal).ceil() as usize)
            .min(self.config.max_meals);
        let deadline = timeline.deadline();
        let mut forced = false;
        while starts.len() < required {
            let Some(last) = starts.last().copied() else {
                break;
            };
            let candidate = last + self.config.force_split_gap_hours;
            if candidate > deadline {
                break;
            }
            starts.push(candidate);
            forced = true;
        }
        if forced {
            debug!(
                slots = starts.len(),
                required, "Forced split of a budget above the single-meal ceiling"
            );
        }
        forced
    }

    fn distribute(
        &self,
        starts: &[f64],
        timeline: &Timeline,
        remaining: &MacroBudget,
        request: &PlanRequest,
        thresholds: Option<&ThresholdSet>,
    ) -> Vec<MacroBudget> {
        let ratios = base_ratios(starts.len(), &self.config);
        let shares = non_increasing(&reweight(&ratios, starts, timeline.sleep, &self.config));
        let shares = if remaining.kcal > 0.0 {
            cap_shares(&shares, self.config.single_meal_ceiling_kcal / remaining.kcal)
        } else {
            shares
        };
        let mut budgets = split_budget(remaining, &shares);

        let floor = protein_floor(
            thresholds.and_then(|set| set.numeric(ThresholdName::ProteinPerMealG)),
            request.profile.as_ref().and_then(|profile| profile.weight_kg),
            &self.config,
        );
        if let Some(floor) = floor {
            apply_protein_floor(&mut budgets, floor);
        }
        budgets
    }

    /// Whether a workout today ended inside the anabolic window before `now`
    fn recent_workout_ended(&self, today: Option<&DayRecord>, now: f64) -> bool {
        today.is_some_and(|day| {
            day.workouts.iter().any(|workout| {
                let since_end = now - workout.end().hours();
                (0.0..=self.config.anabolic_window_hours).contains(&since_end)
            })
        })
    }

    fn build_meals(
        &self,
        starts: &[f64],
        mut budgets: Vec<MacroBudget>,
        timeline: &Timeline,
        post_workout: bool,
        base_hours: f64,
        gi: Option<f64>,
    ) -> Vec<PlannedMeal> {
        if post_workout {
            if let Some(first) = budgets.first_mut() {
                *first = recovery_split(first.kcal, &self.config);
            }
        }
        let fat_burn = self.config.fat_burn_window_min / 60.0;
        let count = starts.len();

        starts
            .iter()
            .zip(budgets)
            .enumerate()
            .map(|(index, (&start, macros))| {
                let hours_to_sleep = timeline.sleep - start;
                let slot = SlotContext {
                    is_last: index + 1 == count,
                    post_workout: post_workout && index == 0,
                    hours_to_sleep,
                    pre_sleep_buffer_hours: self.config.pre_sleep_buffer_hours,
                };
                let scenario = classify(&macros, &slot, &self.config.scenario);
                let wave_end = start + estimate_wave_hours(&macros, gi, base_hours, &self.config);
                let near_sleep = scenario == MealScenario::PreSleep
                    || hours_to_sleep < self.config.pre_sleep_buffer_hours;

                PlannedMeal {
                    index,
                    time_start: ClockTime::from_hours(start),
                    time_end: ClockTime::from_hours(start + self.config.meal_window_hours),
                    estimated_wave_end: ClockTime::from_hours(wave_end),
                    fat_burn_window: TimeWindow {
                        start: ClockTime::from_hours(wave_end),
                        end: ClockTime::from_hours(wave_end + fat_burn),
                    },
                    effective_kcal: effective_kcal(&macros, &self.config.tef),
                    scenario,
                    hours_to_sleep,
                    is_actionable: index == 0,
                    is_last: slot.is_last,
                    target_gl_max: target_gl_max(scenario, gi, &self.config.scenario),
                    sleep_friendly_hint: near_sleep.then(|| sleep_friendly_hint(&macros)),
                    macros,
                }
            })
            .collect()
    }

    fn empty_plan(&self, timeline: &Timeline, reason: PlanReason) -> MealPlan {
        MealPlan {
            available: true,
            meals: Vec::new(),
            summary: Some(self.summary(&[], timeline, false, Some(reason))),
            error: None,
        }
    }

    fn summary(
        &self,
        meals: &[PlannedMeal],
        timeline: &Timeline,
        forced_split: bool,
        reason: Option<PlanReason>,
    ) -> PlanSummary {
        PlanSummary {
            total_meals: meals.len(),
            timeline_start: meals.first().map(|meal| meal.time_start),
            timeline_end: meals.last().map(|meal| meal.time_end),
            total_macros: meals
                .iter()
                .fold(MacroBudget::default(), |total, meal| total + meal.macros),
            sleep_target: ClockTime::from_hours(timeline.sleep),
            sleep_source: timeline.sleep_source,
            last_meal_deadline: ClockTime::from_hours(timeline.deadline()),
            pre_sleep_buffer_hours: timeline.buffer,
            hunger_tradeoff_applied: timeline.hunger_tradeoff,
            forced_split,
            reason,
        }
    }
}
