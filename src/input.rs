// ABOUTME: JSON input documents accepted by mealwave-cli for plan, wave and thresholds
// ABOUTME: Async file loading that maps I/O and parse failures onto AppError codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mealwave_core::errors::{AppError, AppResult, ErrorCode};
use mealwave_core::models::{DayRecord, PersonProfile, ProductCatalog, ProductFacts};
use mealwave_intelligence::PlanRequest;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

/// Product facts keyed by product id
pub type CatalogInput = HashMap<String, ProductFacts>;

fn into_catalog(catalog: CatalogInput) -> Arc<dyn ProductCatalog> {
    Arc::new(catalog)
}

/// Input for `mealwave-cli plan`
///
/// Planner fields sit at the top level next to the optional person id and
/// product catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanInput {
    /// Person whose thresholds are used; a random id when absent
    #[serde(default)]
    pub person_id: Option<Uuid>,
    /// Planner request
    #[serde(flatten)]
    pub request: PlanRequest,
    /// Products referenced by meal items
    #[serde(default)]
    pub catalog: CatalogInput,
}

impl PlanInput {
    /// Person id, generated when the input has none
    #[must_use]
    pub fn person_id(&self) -> Uuid {
        self.person_id.unwrap_or_else(Uuid::new_v4)
    }

    /// Shared catalog built from the input
    #[must_use]
    pub fn catalog(&self) -> Arc<dyn ProductCatalog> {
        into_catalog(self.catalog.clone())
    }
}

/// Input for `mealwave-cli wave`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveInput {
    /// Day whose meals are modelled in order
    pub day: DayRecord,
    /// Person attributes
    #[serde(default)]
    pub profile: Option<PersonProfile>,
    /// Chronotype shift of the circadian peak in hours
    #[serde(default)]
    pub circadian_shift_hours: f64,
    /// Products referenced by meal items
    #[serde(default)]
    pub catalog: CatalogInput,
}

/// Input for `mealwave-cli thresholds`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThresholdsInput {
    /// Person id; a random id when absent
    #[serde(default)]
    pub person_id: Option<Uuid>,
    /// Day history
    #[serde(default)]
    pub history: Vec<DayRecord>,
    /// Person attributes
    #[serde(default)]
    pub profile: Option<PersonProfile>,
    /// Products referenced by meal items
    #[serde(default)]
    pub catalog: CatalogInput,
}

impl ThresholdsInput {
    /// Person id, generated when the input has none
    #[must_use]
    pub fn person_id(&self) -> Uuid {
        self.person_id.unwrap_or_else(Uuid::new_v4)
    }

    /// Shared catalog built from the input
    #[must_use]
    pub fn catalog(&self) -> Arc<dyn ProductCatalog> {
        into_catalog(self.catalog.clone())
    }
}

/// Read and parse a JSON input document
///
/// # Errors
///
/// Returns `INVALID_INPUT` if the file cannot be read and `INVALID_FORMAT`
/// if its content does not match `T`
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read input file {}", path.display()))
            .with_details(json!({ "path": path.display().to_string() }))
            .with_source(e)
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "Loaded input file");
    serde_json::from_str(&raw).map_err(|e| {
        AppError::new(
            ErrorCode::InvalidFormat,
            format!("Invalid input document: {e}"),
        )
        .with_details(json!({
            "path": path.display().to_string(),
            "line": e.line(),
            "column": e.column(),
        }))
    })
}
