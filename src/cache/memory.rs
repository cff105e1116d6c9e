// ABOUTME: In-memory snapshot cache with LRU eviction and clock-driven TTL
// ABOUTME: Includes optional background cleanup task for expired entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

use super::{CacheConfig, SnapshotCache};
use crate::clock::Clock;
use crate::errors::AppResult;
use crate::intelligence::InsightsSnapshot;
use chrono::{DateTime, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored snapshot with its expiry stamp
#[derive(Debug, Clone)]
struct StoredEntry {
    snapshot: InsightsSnapshot,
    generated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl StoredEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

type Store = Arc<RwLock<LruCache<Uuid, Vec<StoredEntry>>>>;

/// In-memory snapshot cache with LRU eviction and background cleanup
///
/// Keyed by user id; each slot holds the entries for that user (normally one,
/// since writes are delete-then-insert). The injected clock drives expiry so
/// tests can advance time without sleeping. `Arc<RwLock<LruCache>>` is shared
/// with the cleanup task, which sweeps expired entries concurrently.
#[derive(Clone)]
pub struct InMemorySnapshotCache {
    store: Store,
    clock: Arc<dyn Clock>,
    shutdown_tx: Option<Arc<tokio::sync::mpsc::Sender<()>>>,
}

impl InMemorySnapshotCache {
    /// Fallback capacity when config specifies zero entries
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a new in-memory cache with optional background cleanup task
    #[must_use]
    pub fn new(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        let store: Store = Arc::new(RwLock::new(LruCache::new(capacity)));

        let shutdown_tx = if config.enable_background_cleanup {
            let (shutdown_tx, mut shutdown_rx) = tokio::sync::mpsc::channel::<()>(1);
            let store_clone = store.clone();
            let clock_clone = clock.clone();
            let cleanup_interval = config.cleanup_interval;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(cleanup_interval);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            Self::cleanup_expired(&store_clone, clock_clone.now()).await;
                        }
                        _ = shutdown_rx.recv() => {
                            tracing::debug!("snapshot cache cleanup task received shutdown signal");
                            break;
                        }
                    }
                }
            });

            Some(Arc::new(shutdown_tx))
        } else {
            None
        };

        Self {
            store,
            clock,
            shutdown_tx,
        }
    }

    /// Remove all expired entries from the cache
    async fn cleanup_expired(store: &Store, now: DateTime<Utc>) {
        let mut store_guard = store.write().await;

        // Collect affected keys first (can't modify while iterating)
        let affected: Vec<Uuid> = store_guard
            .iter()
            .filter_map(|(user_id, entries)| {
                if entries.iter().any(|e| e.is_expired(now)) {
                    Some(*user_id)
                } else {
                    None
                }
            })
            .collect();

        let mut removed = 0usize;
        for user_id in &affected {
            if let Some(entries) = store_guard.get_mut(user_id) {
                let before = entries.len();
                entries.retain(|e| !e.is_expired(now));
                removed += before - entries.len();
                if entries.is_empty() {
                    store_guard.pop(user_id);
                }
            }
        }
        drop(store_guard);

        if removed > 0 {
            tracing::debug!(removed, "cleaned up expired snapshot cache entries");
        }
    }
}

#[async_trait::async_trait]
impl SnapshotCache for InMemorySnapshotCache {
    async fn get(&self, user_id: Uuid) -> AppResult<Option<InsightsSnapshot>> {
        let now = self.clock.now();
        let mut store = self.store.write().await;

        // LruCache::get is mutable (updates access order for LRU)
        let Some(entries) = store.get_mut(&user_id) else {
            return Ok(None);
        };

        entries.retain(|e| !e.is_expired(now));
        if entries.is_empty() {
            store.pop(&user_id);
            return Ok(None);
        }

        // Most-recently-generated entry wins if more than one survives
        let newest = entries
            .iter()
            .max_by_key(|e| e.generated_at)
            .map(|e| e.snapshot.clone());
        drop(store);

        Ok(newest)
    }

    async fn put(
        &self,
        user_id: Uuid,
        snapshot: InsightsSnapshot,
        ttl: Duration,
    ) -> AppResult<()> {
        let now = self.clock.now();
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| crate::errors::AppError::invalid_input(format!("cache TTL out of range: {e}")))?;
        let entry = StoredEntry {
            generated_at: snapshot.metadata.generated_at,
            expires_at: now + ttl,
            snapshot,
        };

        let mut store = self.store.write().await;
        // Delete-then-insert: the new entry supersedes any prior one for this user
        store.pop(&user_id);
        store.push(user_id, vec![entry]);
        drop(store);

        Ok(())
    }

    async fn clear(&self, user_id: Uuid) -> AppResult<()> {
        self.store.write().await.pop(&user_id);
        Ok(())
    }
}

impl Drop for InMemorySnapshotCache {
    fn drop(&mut self) {
        // Signal the background cleanup task to shut down when the last
        // clone of the sender goes away
        if let Some(tx) = &self.shutdown_tx {
            if let Err(e) = tx.try_send(()) {
                tracing::debug!(error = ?e, "cache shutdown signal send failed (channel likely closed)");
            }
        }
    }
}
