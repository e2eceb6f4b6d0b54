// ABOUTME: In-memory threshold store with LRU eviction and retention expiry
// ABOUTME: Includes background cleanup task for entries past their retention
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, ThresholdCacheKey, ThresholdStore};
use async_trait::async_trait;
use lru::LruCache;
use mealwave_core::errors::AppResult;
use mealwave_intelligence::thresholds::CachedThresholds;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, Sender};
use tokio::sync::RwLock;
use tokio::time;
use tracing::debug;

type Store = Arc<RwLock<LruCache<ThresholdCacheKey, StoredEntry>>>;

/// Serialized snapshot with its retention deadline
#[derive(Debug, Clone)]
struct StoredEntry {
    data: Vec<u8>,
    retained_until: Instant,
}

impl StoredEntry {
    fn new(data: Vec<u8>, retention: Duration) -> Self {
        Self {
            data,
            retained_until: Instant::now() + retention,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.retained_until
    }
}

/// In-memory threshold store with LRU eviction and background cleanup
///
/// Uses `Arc<RwLock<LruCache>>` because the cleanup task spawned in [`Self::new`]
/// shares ownership of the entries. Retention is independent of the adaptive
/// TTL carried inside each [`CachedThresholds`]: an entry past its TTL is
/// stale but still served, an entry past its retention is gone.
#[derive(Clone)]
pub struct InMemoryThresholdStore {
    store: Store,
    retention: Duration,
    shutdown_tx: Option<Arc<Sender<()>>>,
}

impl InMemoryThresholdStore {
    /// Capacity used when the configuration asks for zero entries
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a store, spawning the cleanup task when enabled
    ///
    /// The cleanup task needs a running tokio runtime.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        let store: Store = Arc::new(RwLock::new(LruCache::new(capacity)));

        let shutdown_tx = config
            .enable_background_cleanup
            .then(|| Self::spawn_cleanup(store.clone(), config.cleanup_interval));

        Self {
            store,
            retention: config.retention,
            shutdown_tx,
        }
    }

    fn spawn_cleanup(store: Store, cleanup_interval: Duration) -> Arc<Sender<()>> {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        tokio::spawn(async move {
            let mut interval = time::interval(cleanup_interval);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        Self::cleanup_expired(&store).await;
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Threshold store cleanup task received shutdown signal");
                        break;
                    }
                }
            }
        });
        Arc::new(shutdown_tx)
    }

    /// Remove all entries past their retention
    async fn cleanup_expired(store: &Store) {
        let mut guard = store.write().await;
        let expired: Vec<ThresholdCacheKey> = guard
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| *key)
            .collect();
        for key in &expired {
            guard.pop(key);
        }
        drop(guard);
        if !expired.is_empty() {
            debug!("Cleaned up {} expired threshold snapshots", expired.len());
        }
    }

    /// Number of entries currently held, including expired ones not yet cleaned
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl ThresholdStore for InMemoryThresholdStore {
    async fn get(&self, key: &ThresholdCacheKey) -> AppResult<Option<CachedThresholds>> {
        let mut store = self.store.write().await;

        // LruCache::get is mutable (updates access order for LRU)
        let Some(entry) = store.get(key) else {
            return Ok(None);
        };
        if entry.is_expired() {
            store.pop(key);
            return Ok(None);
        }
        let cached: CachedThresholds = serde_json::from_slice(&entry.data)?;
        drop(store);
        Ok(Some(cached))
    }

    async fn set(&self, key: &ThresholdCacheKey, value: &CachedThresholds) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        let entry = StoredEntry::new(serialized, self.retention);

        // LruCache handles eviction automatically on push
        self.store.write().await.push(*key, entry);
        debug!(key = %key, "Stored threshold snapshot");
        Ok(())
    }

    async fn delete(&self, key: &ThresholdCacheKey) -> AppResult<()> {
        self.store.write().await.pop(key);
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.store.write().await.clear();
        Ok(())
    }
}

impl Drop for InMemoryThresholdStore {
    fn drop(&mut self) {
        // Only the last clone holds the final Arc; earlier sends are harmless
        if let Some(tx) = &self.shutdown_tx {
            if Arc::strong_count(tx) == 1 {
                if let Err(e) = tx.try_send(()) {
                    debug!(error = ?e, "Threshold store shutdown signal send failed");
                }
            }
        }
    }
}
