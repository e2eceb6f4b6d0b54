// ABOUTME: Threshold store abstraction keyed by person with pluggable backends
// ABOUTME: Defines the async ThresholdStore trait, its configuration and the cache key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory threshold store
pub mod memory;

use mealwave_core::constants::cache::{
    CACHE_KEY_PREFIX, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS,
    DEFAULT_RETENTION_SECS,
};
use mealwave_core::errors::AppResult;
use mealwave_intelligence::thresholds::CachedThresholds;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Get/set/delete store for per-person threshold snapshots
///
/// The threshold service only relies on these four operations, so any
/// key-value backend can implement it. Entries are kept past their adaptive
/// TTL (up to the store's retention) so that stale snapshots stay readable.
///
/// # Examples
///
/// ```rust,no_run
/// use mealwave::cache::memory::InMemoryThresholdStore;
/// use mealwave::cache::{CacheConfig, ThresholdCacheKey, ThresholdStore};
/// use uuid::Uuid;
/// # async fn example() -> mealwave_core::errors::AppResult<()> {
/// let store = InMemoryThresholdStore::new(&CacheConfig {
///     enable_background_cleanup: false,
///     ..Default::default()
/// });
/// let key = ThresholdCacheKey::new(Uuid::new_v4());
/// if store.get(&key).await?.is_none() {
///     println!("No thresholds cached for {key}");
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait ThresholdStore: Send + Sync {
    /// Retrieve the snapshot for a person
    ///
    /// # Errors
    ///
    /// Returns an error if the stored entry cannot be read back
    async fn get(&self, key: &ThresholdCacheKey) -> AppResult<Option<CachedThresholds>>;

    /// Store or replace the snapshot for a person
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn set(&self, key: &ThresholdCacheKey, value: &CachedThresholds) -> AppResult<()>;

    /// Remove the snapshot for a person
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails
    async fn delete(&self, key: &ThresholdCacheKey) -> AppResult<()>;

    /// Remove every snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the clear operation fails
    async fn clear(&self) -> AppResult<()>;
}

/// Threshold store configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of persons held in memory
    pub max_entries: usize,
    /// How long a snapshot is kept regardless of its adaptive TTL
    pub retention: Duration,
    /// Cleanup interval for expired entries
    pub cleanup_interval: Duration,
    /// Enable background cleanup task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            retention: Duration::from_secs(DEFAULT_RETENTION_SECS),
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
        }
    }
}

/// Cache key for one person's thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThresholdCacheKey {
    /// Person the thresholds belong to
    pub person_id: Uuid,
}

impl ThresholdCacheKey {
    /// Create new cache key
    #[must_use]
    pub const fn new(person_id: Uuid) -> Self {
        Self { person_id }
    }
}

impl fmt::Display for ThresholdCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CACHE_KEY_PREFIX}{}", self.person_id)
    }
}
