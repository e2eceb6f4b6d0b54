// ABOUTME: Per-meal nutrient aggregation from meal items, catalog facts and inline snapshots
// ABOUTME: Carb-weighted GI, insulin-index boosted glycemic load, liquid ratio and category flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::wave::{GlycemicConfig, InsulinIndexConfig, NutrientBonusConfig};
use crate::config::WaveModelConfig;
use mealwave_core::constants::wave::glycemic::NEUTRAL_GI;
use mealwave_core::models::{
    AlcoholLevel, FoodForm, InsulinogenicType, Meal, MealItem, ProductCatalog, ProductFacts,
    ProteinSource,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate nutrients of one meal
///
/// Built once from the meal's items and never mutated; rebuild it when the
/// item list changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientProfile {
    /// Sum of item grams
    pub total_grams: f64,
    /// Simple carbohydrates in grams
    pub simple_carbs: f64,
    /// Complex carbohydrates in grams
    pub complex_carbs: f64,
    /// Total carbohydrates in grams
    pub carbs: f64,
    /// Protein in grams
    pub protein: f64,
    /// Total fat in grams, trans fat included
    pub fat: f64,
    /// Trans fat in grams
    pub trans_fat: f64,
    /// Fiber in grams
    pub fiber: f64,
    /// Energy in kcal
    pub kcal: f64,
    /// Carbohydrate-weighted glycemic index
    pub avg_gi: f64,
    /// Insulin-index boosted glycemic load
    pub glycemic_load: f64,
    /// Share of grams coming from liquid items
    pub liquid_ratio: f64,
    /// Whether the meal counts as liquid
    pub is_liquid: bool,
    /// Largest insulinogenic bonus among items
    ///
    /// Informational: the wave itself sees insulinogenic foods only through
    /// the insulin-index boost already applied to `glycemic_load`.
    pub insulinogenic_bonus: f64,
    /// Any spicy item
    pub spicy: bool,
    /// Strongest alcohol level among items
    pub alcohol: Option<AlcoholLevel>,
    /// Any caffeinated item
    pub caffeine: bool,
    /// Food form carrying the most grams
    pub food_form: Option<FoodForm>,
    /// Protein source carrying the most protein
    pub protein_source: ProteinSource,
    /// Share of carbohydrates that are simple
    pub simple_sugar_ratio: f64,
}

impl Default for NutrientProfile {
    fn default() -> Self {
        Self {
            total_grams: 0.0,
            simple_carbs: 0.0,
            complex_carbs: 0.0,
            carbs: 0.0,
            protein: 0.0,
            fat: 0.0,
            trans_fat: 0.0,
            fiber: 0.0,
            kcal: 0.0,
            avg_gi: NEUTRAL_GI,
            glycemic_load: 0.0,
            liquid_ratio: 0.0,
            is_liquid: false,
            insulinogenic_bonus: 0.0,
            spicy: false,
            alcohol: None,
            caffeine: false,
            food_form: None,
            protein_source: ProteinSource::Mixed,
            simple_sugar_ratio: 0.0,
        }
    }
}

/// Field lookup with catalog first and snapshot second
struct ResolvedFacts<'a> {
    catalog: Option<&'a ProductFacts>,
    snapshot: Option<&'a ProductFacts>,
}

impl<'a> ResolvedFacts<'a> {
    fn new(item: &'a MealItem, catalog: &'a dyn ProductCatalog) -> Self {
        Self {
            catalog: catalog.lookup(&item.product_id),
            snapshot: item.snapshot.as_ref(),
        }
    }

    fn pick<T>(&self, field: impl Fn(&ProductFacts) -> Option<T>) -> Option<T> {
        self.catalog
            .and_then(&field)
            .or_else(|| self.snapshot.and_then(&field))
    }

    fn grams(&self, field: impl Fn(&ProductFacts) -> Option<f64>) -> f64 {
        self.pick(field).unwrap_or(0.0).max(0.0)
    }
}

/// Macros of one item scaled to its grams
#[derive(Debug, Clone, Copy)]
struct ItemMacros {
    simple: f64,
    complex: f64,
    carbs: f64,
    protein: f64,
    trans: f64,
    fat: f64,
    fiber: f64,
    kcal: f64,
}

impl ItemMacros {
    fn resolve(facts: &ResolvedFacts<'_>, grams: f64) -> Self {
        let factor = grams / 100.0;
        let simple = facts.grams(|f| f.simple_carbs) * factor;
        let complex = facts.grams(|f| f.complex_carbs) * factor;
        let carbs = if simple + complex > 0.0 {
            simple + complex
        } else {
            facts.grams(|f| f.carbs) * factor
        };
        let protein = facts.grams(|f| f.protein) * factor;
        let trans = facts.grams(|f| f.trans_fat) * factor;
        let fat = (facts.grams(|f| f.bad_fat) + facts.grams(|f| f.good_fat)) * factor + trans;
        let kcal = facts.pick(|f| f.kcal).map_or_else(
            || 4.0f64.mul_add(protein + carbs, 9.0 * fat),
            |per_100g| per_100g * factor,
        );
        Self {
            simple,
            complex,
            carbs,
            protein,
            trans,
            fat,
            fiber: facts.grams(|f| f.fiber) * factor,
            kcal,
        }
    }
}

/// Energy of a meal in kcal, resolved like [`NutrientProfile::from_meal`]
#[must_use]
pub fn meal_kcal(meal: &Meal, catalog: &dyn ProductCatalog) -> f64 {
    meal.items
        .iter()
        .map(|item| {
            let facts = ResolvedFacts::new(item, catalog);
            ItemMacros::resolve(&facts, item.grams.max(0.0)).kcal
        })
        .sum()
}

/// Running sums while walking the items of a meal
#[derive(Default)]
struct Accumulator {
    profile: NutrientProfile,
    gi_weighted: f64,
    liquid_grams: f64,
    form_grams: BTreeMap<FoodForm, f64>,
    source_protein: BTreeMap<ProteinSource, f64>,
}

impl NutrientProfile {
    /// Aggregate a meal's items
    ///
    /// Each field falls back from the catalog entry to the item snapshot and
    /// finally to a neutral default, so unknown products never fail.
    #[must_use]
    pub fn from_meal(meal: &Meal, catalog: &dyn ProductCatalog, config: &WaveModelConfig) -> Self {
        let mut acc = Accumulator::default();
        acc.profile.avg_gi = config.glycemic.neutral_gi;

        for item in &meal.items {
            acc.add_item(item, catalog, config);
        }
        acc.finish(&config.glycemic, &config.nutrients)
    }
}

impl Accumulator {
    fn add_item(&mut self, item: &MealItem, catalog: &dyn ProductCatalog, config: &WaveModelConfig) {
        let facts = ResolvedFacts::new(item, catalog);
        let grams = item.grams.max(0.0);
        let macros = ItemMacros::resolve(&facts, grams);
        let gi = facts
            .pick(|f| f.gi)
            .unwrap_or(config.glycemic.neutral_gi)
            .max(0.0);

        let insulinogenic = facts.pick(|f| f.insulinogenic);
        let base_gl = gi * macros.carbs / 100.0;
        let item_gl = insulinogenic.map_or(base_gl, |kind| {
            boosted_gl(base_gl, kind, &config.insulin_index)
        });

        let profile = &mut self.profile;
        profile.total_grams += grams;
        profile.simple_carbs += macros.simple;
        profile.complex_carbs += macros.complex;
        profile.carbs += macros.carbs;
        profile.protein += macros.protein;
        profile.fat += macros.fat;
        profile.trans_fat += macros.trans;
        profile.fiber += macros.fiber;
        profile.kcal += macros.kcal;
        profile.glycemic_load += item_gl;
        self.gi_weighted += gi * macros.carbs;

        if let Some(kind) = insulinogenic {
            profile.insulinogenic_bonus = profile
                .insulinogenic_bonus
                .max(insulinogenic_bonus(kind, &config.insulin_index));
        }
        if facts.pick(|f| f.is_liquid).unwrap_or(false) {
            self.liquid_grams += grams;
        }
        profile.spicy |= facts.pick(|f| f.spicy).unwrap_or(false);
        profile.caffeine |= facts.pick(|f| f.caffeine).unwrap_or(false);
        if let Some(level) = facts.pick(|f| f.alcohol) {
            profile.alcohol = Some(profile.alcohol.map_or(level, |current| current.max(level)));
        }
        if let Some(form) = facts.pick(|f| f.food_form) {
            *self.form_grams.entry(form).or_default() += grams;
        }
        let source = facts.pick(|f| f.protein_source).unwrap_or_default();
        *self.source_protein.entry(source).or_default() += macros.protein;
    }

    fn finish(self, glycemic: &GlycemicConfig, nutrients: &NutrientBonusConfig) -> NutrientProfile {
        let mut profile = self.profile;
        if profile.carbs > 0.0 {
            profile.avg_gi = self.gi_weighted / profile.carbs;
            profile.simple_sugar_ratio = profile.simple_carbs / profile.carbs;
        } else {
            profile.avg_gi = glycemic.neutral_gi;
        }
        profile.glycemic_load = profile.glycemic_load.max(0.0);
        if profile.total_grams > 0.0 {
            profile.liquid_ratio = self.liquid_grams / profile.total_grams;
        }
        profile.is_liquid = profile.liquid_ratio > nutrients.liquid_ratio_threshold;
        profile.food_form = dominant(self.form_grams);
        profile.protein_source = dominant(self.source_protein).unwrap_or_default();
        profile
    }
}

/// Key holding the largest positive amount
///
/// Ties go to the key declared first.
fn dominant<K: Copy + Ord>(amounts: BTreeMap<K, f64>) -> Option<K> {
    amounts
        .into_iter()
        .filter(|(_, amount)| *amount > 0.0)
        .fold(None, |best: Option<(K, f64)>, (key, amount)| match best {
            Some((_, top)) if top >= amount => best,
            _ => Some((key, amount)),
        })
        .map(|(key, _)| key)
}

/// Item GL raised by its insulin index, capped at `(1 + max_gl_boost)` times the base
fn boosted_gl(base_gl: f64, kind: InsulinogenicType, config: &InsulinIndexConfig) -> f64 {
    let boost = match kind {
        InsulinogenicType::LiquidDairy => config.liquid_dairy_gl_boost,
        InsulinogenicType::SoftDairy => config.soft_dairy_gl_boost,
        InsulinogenicType::HardDairy => config.hard_dairy_gl_boost,
        InsulinogenicType::Protein => config.protein_gl_boost,
    };
    (base_gl * boost).min(base_gl.mul_add(config.max_gl_boost, base_gl))
}

fn insulinogenic_bonus(kind: InsulinogenicType, config: &InsulinIndexConfig) -> f64 {
    match kind {
        InsulinogenicType::LiquidDairy => config.liquid_dairy_bonus,
        InsulinogenicType::SoftDairy => config.soft_dairy_bonus,
        InsulinogenicType::HardDairy => config.hard_dairy_bonus,
        InsulinogenicType::Protein => config.protein_bonus,
    }
}
