// ABOUTME: Snapshot cache abstraction with per-user TTL-bound entries
// ABOUTME: Pluggable backend trait plus the atomic hit/miss metrics the engine owns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Snapshot Cache
//!
//! Per-user cache of the last computed [`InsightsSnapshot`]. At most one
//! non-expired entry exists per user; a `put` is delete-then-insert, so a new
//! computation atomically supersedes the previous snapshot. Hit/miss counting
//! lives in [`CacheMetrics`], an explicit value owned by the engine instance
//! and updated with atomic increments, so concurrent requests never lose
//! updates.

/// In-memory cache implementation
pub mod memory;

use crate::constants::cache::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS};
use crate::errors::AppResult;
use crate::intelligence::InsightsSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// Cache provider trait for pluggable backend implementations
#[async_trait::async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Retrieve the cached snapshot for a user
    ///
    /// Returns only non-expired entries; when more than one entry survives for
    /// a user, the most recently generated wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails. Callers treat a read
    /// failure as a miss, never as a hard error.
    async fn get(&self, user_id: Uuid) -> AppResult<Option<InsightsSnapshot>>;

    /// Store a freshly computed snapshot with a TTL
    ///
    /// Write semantics are delete-then-insert: all existing entries for the
    /// user are removed before the new one lands. A crash between the two
    /// steps leaves the user uncached, which the next read treats as a miss.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn put(
        &self,
        user_id: Uuid,
        snapshot: InsightsSnapshot,
        ttl: Duration,
    ) -> AppResult<()>;

    /// Remove all cached entries for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the backend delete fails; unlike reads and writes
    /// this failure is surfaced to the caller.
    async fn clear(&self, user_id: Uuid) -> AppResult<()>;
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached users
    pub max_entries: usize,
    /// Interval between background expiry sweeps
    pub cleanup_interval: Duration,
    /// Enable background cleanup task (disable in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
        }
    }
}

/// Atomic hit/miss counters for cache instrumentation
///
/// Owned by the engine instance rather than living as process-wide statics;
/// increments are atomic so concurrent requests from different users never
/// lose updates.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Current counter values as an immutable stats view
    #[must_use]
    pub fn snapshot(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        CacheStats::new(hits, misses)
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Immutable view of the hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub total: u64,
    /// Fraction of lookups served from cache, 0.0 when no lookups occurred
    pub hit_rate: f64,
}

impl CacheStats {
    #[must_use]
    pub fn new(hits: u64, misses: u64) -> Self {
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        Self {
            hits,
            misses,
            total,
            hit_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_counting() {
        let metrics = CacheMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();

        let stats = metrics.snapshot();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total, 3);
        assert!((stats.hit_rate - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = CacheMetrics::new();
        metrics.record_miss();
        metrics.reset();

        let stats = metrics.snapshot();
        assert_eq!(stats.total, 0);
        assert!((stats.hit_rate - 0.0).abs() < f64::EPSILON);
    }
}
