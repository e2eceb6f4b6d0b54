// ABOUTME: Cache-related constants for threshold retention, capacity, and cleanup intervals
// ABOUTME: Defaults for the in-memory threshold store and its background cleanup task
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default maximum number of persons held in the in-memory threshold store
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Default cleanup interval in seconds for expired entries
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes

/// How long a threshold snapshot is retained in the store (7 days).
///
/// Must exceed the maximum adaptive TTL so that expired snapshots remain
/// readable for stale-while-revalidate.
pub const DEFAULT_RETENTION_SECS: u64 = 604_800;

/// Capacity of the "thresholds updated" broadcast channel
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Cache key prefix for namespacing
pub const CACHE_KEY_PREFIX: &str = "thresholds:person:";
