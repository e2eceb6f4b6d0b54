// ABOUTME: Unit tests for the in-memory threshold store
// ABOUTME: Tests retention expiry, capacity limits, deletion and background cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::Utc;
use common::steady_history;
use mealwave::cache::memory::InMemoryThresholdStore;
use mealwave::cache::{CacheConfig, ThresholdCacheKey, ThresholdStore};
use mealwave::intelligence::config::thresholds::TtlConfig;
use mealwave::intelligence::thresholds::CachedThresholds;
use mealwave::intelligence::ThresholdEngine;
use mealwave::models::EmptyCatalog;
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

/// Helper: Create a snapshot computed from `days` of steady history
fn snapshot(days: u64) -> CachedThresholds {
    let history = steady_history(days);
    let set = ThresholdEngine::default().compute(&history, None, &EmptyCatalog);
    CachedThresholds::new(set, &history, &EmptyCatalog, &TtlConfig::default(), Utc::now())
}

/// Helper: Create in-memory store with custom capacity and retention
fn create_test_store(max_entries: usize, retention: Duration) -> InMemoryThresholdStore {
    InMemoryThresholdStore::new(&CacheConfig {
        max_entries,
        retention,
        cleanup_interval: Duration::from_secs(300),
        enable_background_cleanup: false, // Disable in tests to avoid tokio runtime conflicts
    })
}

fn key() -> ThresholdCacheKey {
    ThresholdCacheKey::new(Uuid::new_v4())
}

#[tokio::test]
async fn test_store_set_and_get() -> Result<()> {
    let store = create_test_store(100, Duration::from_secs(60));
    let key = key();
    let cached = snapshot(10);

    store.set(&key, &cached).await?;

    let retrieved = store.get(&key).await?.unwrap();
    assert_eq!(retrieved.set.days_used, 10);
    assert_eq!(retrieved.set.tier, cached.set.tier);
    assert_eq!(retrieved.expires_at, cached.expires_at);
    Ok(())
}

#[tokio::test]
async fn test_missing_key_is_none() -> Result<()> {
    let store = create_test_store(100, Duration::from_secs(60));
    assert!(store.get(&key()).await?.is_none());
    assert!(store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_retention_expiry() -> Result<()> {
    let store = create_test_store(100, Duration::from_millis(200));
    let key = key();

    store.set(&key, &snapshot(3)).await?;
    assert!(store.get(&key).await?.is_some());

    sleep(Duration::from_millis(300)).await;

    assert!(store.get(&key).await?.is_none());
    assert!(store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_lru_eviction_at_capacity() -> Result<()> {
    let store = create_test_store(2, Duration::from_secs(60));
    let (first, second, third) = (key(), key(), key());
    let cached = snapshot(3);

    store.set(&first, &cached).await?;
    store.set(&second, &cached).await?;
    // Touch the first entry so the second becomes least recently used
    store.get(&first).await?;
    store.set(&third, &cached).await?;

    assert_eq!(store.len().await, 2);
    assert!(store.get(&first).await?.is_some());
    assert!(store.get(&second).await?.is_none());
    assert!(store.get(&third).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_delete_and_clear() -> Result<()> {
    let store = create_test_store(100, Duration::from_secs(60));
    let (first, second) = (key(), key());
    let cached = snapshot(3);

    store.set(&first, &cached).await?;
    store.set(&second, &cached).await?;

    store.delete(&first).await?;
    assert!(store.get(&first).await?.is_none());
    assert_eq!(store.len().await, 1);

    store.clear().await?;
    assert!(store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_background_cleanup_removes_expired() -> Result<()> {
    let store = InMemoryThresholdStore::new(&CacheConfig {
        max_entries: 100,
        retention: Duration::from_millis(100),
        cleanup_interval: Duration::from_millis(50),
        enable_background_cleanup: true,
    });
    store.set(&key(), &snapshot(3)).await?;
    assert_eq!(store.len().await, 1);

    sleep(Duration::from_millis(400)).await;

    assert!(store.is_empty().await);
    Ok(())
}
