// ABOUTME: Stale-while-revalidate threshold service over a pluggable threshold store
// ABOUTME: Coalesces background recomputation per person and broadcasts update events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Threshold Service
//!
//! Resolves a person's [`ThresholdSet`] through the cache:
//!
//! | cached entry                         | action                                  |
//! |--------------------------------------|-----------------------------------------|
//! | none                                 | compute, store, return                  |
//! | significant change since its snapshot| recompute synchronously, replace        |
//! | fresh and covering the history       | return                                  |
//! | expired or not covering the history  | return stale, recompute in background   |
//!
//! Background recomputation runs on a tokio task. A per-person in-flight
//! guard skips a second recomputation while the first is still running.
//! When it completes, a [`ThresholdEvent::Updated`] is broadcast.
//!
//! Sets are stored undecorated; the phenotype decorator runs on every read.

use crate::cache::{ThresholdCacheKey, ThresholdStore};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mealwave_core::constants::cache::EVENT_CHANNEL_CAPACITY;
use mealwave_core::errors::{AppError, AppResult};
use mealwave_core::models::{DayRecord, PersonProfile, ProductCatalog};
use mealwave_intelligence::phenotype;
use mealwave_intelligence::thresholds::cache_policy::{
    covers_history, should_overwrite, significant_change,
};
use mealwave_intelligence::thresholds::{
    CachedThresholds, ChangeEvent, ThresholdEngine, ThresholdSet, ThresholdTier,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast::{self, Receiver, Sender};
use tokio::task;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Notification published after a background recomputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ThresholdEvent {
    /// A person's cached thresholds were replaced
    Updated {
        /// Person whose thresholds changed
        person_id: Uuid,
        /// Tier of the new set
        tier: ThresholdTier,
        /// Overall confidence of the new set
        overall_confidence: f64,
        /// Days of history the new set used
        days_used: usize,
    },
}

/// How a lookup was answered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CacheStatus {
    /// Served from a fresh cache entry
    Fresh,
    /// No entry existed; computed synchronously
    Computed,
    /// Entry invalidated by a significant change; recomputed synchronously
    Invalidated {
        /// Most severe change detected
        change: ChangeEvent,
    },
    /// Stale entry served; background recomputation requested
    Stale {
        /// False when a recomputation for this person was already running
        revalidation_spawned: bool,
    },
}

/// Result of a threshold lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdLookup {
    /// Thresholds, decorated with the person's phenotype when known
    pub set: ThresholdSet,
    /// Cache path taken
    pub status: CacheStatus,
}

/// Stale-while-revalidate threshold service
#[derive(Clone)]
pub struct ThresholdService {
    engine: Arc<ThresholdEngine>,
    store: Arc<dyn ThresholdStore>,
    catalog: Arc<dyn ProductCatalog>,
    in_flight: Arc<DashMap<Uuid, Instant>>,
    events: Sender<ThresholdEvent>,
}

impl ThresholdService {
    /// Create a service over `store`; `catalog` resolves meal items in history
    #[must_use]
    pub fn new(
        engine: ThresholdEngine,
        store: Arc<dyn ThresholdStore>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            engine: Arc::new(engine),
            store,
            catalog,
            in_flight: Arc::new(DashMap::new()),
            events,
        }
    }

    /// Threshold engine used for computation
    #[must_use]
    pub fn engine(&self) -> &ThresholdEngine {
        &self.engine
    }

    /// Subscribe to update events
    #[must_use]
    pub fn subscribe(&self) -> Receiver<ThresholdEvent> {
        self.events.subscribe()
    }

    /// Whether a background recomputation is running for `person_id`
    #[must_use]
    pub fn is_revalidating(&self, person_id: Uuid) -> bool {
        self.in_flight.contains_key(&person_id)
    }

    /// Thresholds for a person
    ///
    /// # Errors
    ///
    /// Returns an error only if a freshly computed set cannot be stored
    pub async fn get_thresholds(
        &self,
        person_id: Uuid,
        history: &[DayRecord],
        profile: Option<&PersonProfile>,
    ) -> AppResult<ThresholdSet> {
        Ok(self.lookup(person_id, history, profile).await?.set)
    }

    /// Thresholds for a person together with the cache path taken
    ///
    /// A store read failure is treated as a miss.
    ///
    /// # Errors
    ///
    /// Returns an error only if a freshly computed set cannot be stored
    pub async fn lookup(
        &self,
        person_id: Uuid,
        history: &[DayRecord],
        profile: Option<&PersonProfile>,
    ) -> AppResult<ThresholdLookup> {
        let key = ThresholdCacheKey::new(person_id);
        let cached = self.store.get(&key).await.unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "Threshold store read failed, treating as miss");
            None
        });

        let (set, status) = match cached {
            None => {
                info!(key = %key, "Threshold cache miss");
                (
                    self.compute_and_store(&key, history, profile).await?,
                    CacheStatus::Computed,
                )
            }
            Some(entry) => self.resolve_cached(&key, entry, history, profile).await?,
        };

        Ok(ThresholdLookup {
            set: self.decorate(set, profile),
            status,
        })
    }

    async fn resolve_cached(
        &self,
        key: &ThresholdCacheKey,
        entry: CachedThresholds,
        history: &[DayRecord],
        profile: Option<&PersonProfile>,
    ) -> AppResult<(ThresholdSet, CacheStatus)> {
        let config = &self.engine.config().invalidation;
        let catalog = self.catalog.as_ref();
        let change = significant_change(&entry.set.snapshot, history, profile, catalog, config);
        if let Some(change) = change {
            info!(key = %key, change = ?change, "Significant change, recomputing thresholds");
            let set = self.compute_and_store(key, history, profile).await?;
            return Ok((set, CacheStatus::Invalidated { change }));
        }

        if entry.is_fresh(Utc::now()) && covers_history(&entry.set, history) {
            debug!(key = %key, expires_at = %entry.expires_at, "Threshold cache hit");
            return Ok((entry.set, CacheStatus::Fresh));
        }

        info!(
            key = %key,
            expired = !entry.is_fresh(Utc::now()),
            "Serving stale thresholds while revalidating"
        );
        let revalidation_spawned =
            self.spawn_revalidation(key.person_id, history.to_vec(), profile.cloned());
        Ok((entry.set, CacheStatus::Stale { revalidation_spawned }))
    }

    /// Remove a person's cached thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if the store delete fails
    pub async fn invalidate(&self, person_id: Uuid) -> AppResult<()> {
        let key = ThresholdCacheKey::new(person_id);
        info!(key = %key, "Invalidating cached thresholds");
        self.store.delete(&key).await
    }

    fn decorate(&self, set: ThresholdSet, profile: Option<&PersonProfile>) -> ThresholdSet {
        match profile.and_then(|p| p.phenotype.as_ref()) {
            Some(phenotype) => phenotype::apply(&set, phenotype, &self.engine.config().limits),
            None => set,
        }
    }

    async fn compute_and_store(
        &self,
        key: &ThresholdCacheKey,
        history: &[DayRecord],
        profile: Option<&PersonProfile>,
    ) -> AppResult<ThresholdSet> {
        let set = self
            .engine
            .compute_at(history, profile, self.catalog.as_ref(), Utc::now());
        self.store_if_better(key, &set, history, None).await?;
        Ok(set)
    }

    async fn store_if_better(
        &self,
        key: &ThresholdCacheKey,
        set: &ThresholdSet,
        history: &[DayRecord],
        existing: Option<&ThresholdSet>,
    ) -> AppResult<bool> {
        if !should_overwrite(existing, set) {
            debug!(key = %key, days_used = set.days_used, "Kept richer cached thresholds");
            return Ok(false);
        }
        let cached = CachedThresholds::new(
            set.clone(),
            history,
            self.catalog.as_ref(),
            &self.engine.config().ttl,
            Utc::now(),
        );
        info!(
            key = %key,
            tier = ?set.tier,
            ttl_hours = cached.ttl_hours,
            stability = cached.stability,
            "Caching thresholds"
        );
        self.store.set(key, &cached).await?;
        Ok(true)
    }

    /// Start a background recomputation unless one is already running
    fn spawn_revalidation(
        &self,
        person_id: Uuid,
        history: Vec<DayRecord>,
        profile: Option<PersonProfile>,
    ) -> bool {
        match self.in_flight.entry(person_id) {
            Entry::Occupied(_) => {
                debug!(person_id = %person_id, "Revalidation already in flight, coalescing");
                return false;
            }
            Entry::Vacant(slot) => {
                slot.insert(Instant::now());
            }
        }

        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.revalidate(person_id, history, profile).await {
                warn!(person_id = %person_id, error = %e, "Threshold revalidation failed");
            }
            if let Some((_, started)) = service.in_flight.remove(&person_id) {
                debug!(
                    person_id = %person_id,
                    elapsed_ms = started.elapsed().as_millis(),
                    "Revalidation finished"
                );
            }
        });
        true
    }

    async fn revalidate(
        &self,
        person_id: Uuid,
        history: Vec<DayRecord>,
        profile: Option<PersonProfile>,
    ) -> AppResult<()> {
        let engine = Arc::clone(&self.engine);
        let catalog = Arc::clone(&self.catalog);
        let (set, history) = task::spawn_blocking(move || {
            let set = engine.compute_at(&history, profile.as_ref(), catalog.as_ref(), Utc::now());
            (set, history)
        })
        .await
        .map_err(|e| AppError::internal(format!("Threshold recomputation panicked: {e}")))?;

        let key = ThresholdCacheKey::new(person_id);
        let existing = self.store.get(&key).await.ok().flatten().map(|entry| entry.set);
        if self
            .store_if_better(&key, &set, &history, existing.as_ref())
            .await?
        {
            self.publish(person_id, &set);
        }
        Ok(())
    }

    fn publish(&self, person_id: Uuid, set: &ThresholdSet) {
        let event = ThresholdEvent::Updated {
            person_id,
            tier: set.tier,
            overall_confidence: set.overall_confidence,
            days_used: set.days_used,
        };
        match self.events.send(event) {
            Ok(receivers) => debug!(person_id = %person_id, receivers, "Published thresholds update"),
            Err(_) => debug!(person_id = %person_id, "No subscribers for thresholds update"),
        }
    }
}
