// ABOUTME: Planning service resolving cached thresholds before running the meal planner
// ABOUTME: Wires the wave model, threshold service and planner from one configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::ThresholdStore;
use crate::config::MealwaveConfig;
use crate::thresholds_service::ThresholdService;
use mealwave_core::models::ProductCatalog;
use mealwave_intelligence::{MealPlan, MealPlanner, PlanRequest, ThresholdEngine, WaveModel};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Plans a person's remaining meals using their cached thresholds
#[derive(Clone)]
pub struct PlanningService {
    thresholds: ThresholdService,
    planner: Arc<MealPlanner>,
    catalog: Arc<dyn ProductCatalog>,
}

impl PlanningService {
    /// Create a service from its parts
    #[must_use]
    pub fn new(
        thresholds: ThresholdService,
        planner: MealPlanner,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self {
            thresholds,
            planner: Arc::new(planner),
            catalog,
        }
    }

    /// Build the wave model, threshold engine and planner from `config`
    #[must_use]
    pub fn from_config(
        config: &MealwaveConfig,
        store: Arc<dyn ThresholdStore>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        let intelligence = &config.intelligence;
        let wave = Arc::new(WaveModel::new(intelligence.wave.clone()));
        let engine = ThresholdEngine::new(intelligence.thresholds.clone(), intelligence.wave.clone());
        let thresholds = ThresholdService::new(engine, store, Arc::clone(&catalog));
        let planner = MealPlanner::new(intelligence.planner.clone(), wave);
        Self::new(thresholds, planner, catalog)
    }

    /// Threshold service used for lookups
    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdService {
        &self.thresholds
    }

    /// Plan the rest of the day for `person_id`
    ///
    /// Threshold lookup failures degrade to planning without thresholds.
    pub async fn plan(&self, person_id: Uuid, request: &PlanRequest) -> MealPlan {
        let thresholds = match self
            .thresholds
            .get_thresholds(person_id, &request.history, request.profile.as_ref())
            .await
        {
            Ok(set) => {
                debug!(person_id = %person_id, tier = ?set.tier, "Resolved thresholds for planning");
                Some(set)
            }
            Err(e) => {
                warn!(person_id = %person_id, error = %e, "Planning without thresholds");
                None
            }
        };
        self.planner
            .plan(request, thresholds.as_ref(), self.catalog.as_ref())
    }
}
