// ABOUTME: Product nutrient facts per 100 g and the read-only catalog lookup seam
// ABOUTME: Category flags (insulinogenic type, food form, alcohol, protein source) live here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dairy and protein foods that raise insulin beyond their glycemic load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InsulinogenicType {
    /// Milk, kefir, drinkable yogurt
    LiquidDairy,
    /// Yogurt, cottage cheese, cream
    SoftDairy,
    /// Hard cheeses
    HardDairy,
    /// Meat, fish, eggs
    Protein,
}

/// Alcohol strength of a product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholLevel {
    /// Light drinks (cider, light beer)
    Light,
    /// Wine, beer
    Medium,
    /// Spirits
    Strong,
}

/// Processing level of a product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FoodForm {
    /// Drinks and purees
    Liquid,
    /// Refined or ultra-processed
    Processed,
    /// Whole foods
    Whole,
}

/// Dominant protein origin
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ProteinSource {
    /// Meat, fish, eggs, dairy
    Animal,
    /// Legumes, grains, soy
    Plant,
    /// Whey isolates and concentrates
    Whey,
    /// Mixed or unknown
    #[default]
    Mixed,
}

/// Nutrient facts for one product, per 100 g
///
/// Every field is optional so that a catalog entry and an inline item
/// snapshot can complement each other field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductFacts {
    /// Energy in kcal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kcal: Option<f64>,
    /// Glycemic index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gi: Option<f64>,
    /// Simple carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_carbs: Option<f64>,
    /// Complex carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complex_carbs: Option<f64>,
    /// Total carbohydrates in grams, used when the split is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Fiber in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Saturated fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bad_fat: Option<f64>,
    /// Unsaturated fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub good_fat: Option<f64>,
    /// Trans fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_fat: Option<f64>,
    /// Whether the product is a drink
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liquid: Option<bool>,
    /// Insulin index category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulinogenic: Option<InsulinogenicType>,
    /// Contains capsaicin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spicy: Option<bool>,
    /// Alcohol strength
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<AlcoholLevel>,
    /// Contains caffeine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caffeine: Option<bool>,
    /// Processing level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_form: Option<FoodForm>,
    /// Dominant protein origin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_source: Option<ProteinSource>,
}

/// Read-only product lookup consulted when resolving meal items
pub trait ProductCatalog: Send + Sync {
    /// Facts for a product id, if known
    fn lookup(&self, product_id: &str) -> Option<&ProductFacts>;
}

impl ProductCatalog for HashMap<String, ProductFacts> {
    fn lookup(&self, product_id: &str) -> Option<&ProductFacts> {
        self.get(product_id)
    }
}

/// Catalog with no entries; items resolve from their snapshots only
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl ProductCatalog for EmptyCatalog {
    fn lookup(&self, _product_id: &str) -> Option<&ProductFacts> {
        None
    }
}
