// ABOUTME: Unit tests for the in-memory snapshot cache
// ABOUTME: Tests TTL expiry via a fixed clock, delete-then-insert writes, and eviction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use meridian_insights::cache::{memory::InMemorySnapshotCache, CacheConfig, SnapshotCache};
use meridian_insights::clock::Clock;
use meridian_insights::intelligence::{
    HealthScoreResult, HealthSummary, InsightsSnapshot, OverallStatus, QuickStats, ScoreCategory,
    SnapshotMetadata,
};
use meridian_insights::test_utils::FixedClock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use uuid::Uuid;

/// Minimal snapshot stamped at `generated_at`
fn snapshot_at(user_id: Uuid, generated_at: DateTime<Utc>) -> InsightsSnapshot {
    InsightsSnapshot {
        summary: HealthSummary {
            overall_status: OverallStatus::Fair,
            text: "test".into(),
            positive: vec![],
            concerning: vec![],
            confidence: 0.3,
        },
        insights: vec![],
        health_score: HealthScoreResult {
            score: 50,
            category: ScoreCategory::Fair,
            category_label: "Fair".into(),
            previous_score: 50,
            change: 0,
            change_direction: meridian_insights::intelligence::ChangeDirection::Stable,
            components: BTreeMap::new(),
        },
        quick_stats: QuickStats::default(),
        recommendations: vec![],
        trends: vec![],
        metadata: SnapshotMetadata {
            user_id,
            generated_at,
            data_points_analyzed: 0,
            analysis_period_days: 30,
            cache_expiry: generated_at + Duration::hours(1),
        },
    }
}

fn test_cache() -> (InMemorySnapshotCache, Arc<FixedClock>) {
    test_cache_with_capacity(100)
}

fn test_cache_with_capacity(max_entries: usize) -> (InMemorySnapshotCache, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(FixedClock::default_base()));
    let cache = InMemorySnapshotCache::new(
        CacheConfig {
            max_entries,
            enable_background_cleanup: false, // avoid tokio runtime conflicts in tests
            ..CacheConfig::default()
        },
        clock.clone() as Arc<dyn Clock>,
    );
    (cache, clock)
}

#[tokio::test]
async fn test_put_then_get_returns_same_snapshot() -> Result<()> {
    let (cache, clock) = test_cache();
    let user_id = Uuid::new_v4();
    let snapshot = snapshot_at(user_id, clock.now());

    cache
        .put(user_id, snapshot.clone(), StdDuration::from_secs(3600))
        .await?;

    let cached = cache.get(user_id).await?.expect("cache hit");
    assert_eq!(cached, snapshot);
    Ok(())
}

#[tokio::test]
async fn test_get_unknown_user_is_miss() -> Result<()> {
    let (cache, _clock) = test_cache();
    assert!(cache.get(Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_entry_expires_without_explicit_delete() -> Result<()> {
    let (cache, clock) = test_cache();
    let user_id = Uuid::new_v4();
    let snapshot = snapshot_at(user_id, clock.now());

    cache
        .put(user_id, snapshot, StdDuration::from_secs(60))
        .await?;
    assert!(cache.get(user_id).await?.is_some());

    clock.advance(Duration::seconds(61));
    assert!(cache.get(user_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_put_supersedes_previous_entry() -> Result<()> {
    let (cache, clock) = test_cache();
    let user_id = Uuid::new_v4();

    let first = snapshot_at(user_id, clock.now());
    cache
        .put(user_id, first.clone(), StdDuration::from_secs(3600))
        .await?;

    clock.advance(Duration::seconds(30));
    let second = snapshot_at(user_id, clock.now());
    cache
        .put(user_id, second.clone(), StdDuration::from_secs(3600))
        .await?;

    let cached = cache.get(user_id).await?.expect("cache hit");
    assert_eq!(cached.metadata.generated_at, second.metadata.generated_at);
    assert_ne!(cached.metadata.generated_at, first.metadata.generated_at);
    Ok(())
}

#[tokio::test]
async fn test_clear_removes_entry() -> Result<()> {
    let (cache, clock) = test_cache();
    let user_id = Uuid::new_v4();

    cache
        .put(
            user_id,
            snapshot_at(user_id, clock.now()),
            StdDuration::from_secs(3600),
        )
        .await?;
    cache.clear(user_id).await?;

    assert!(cache.get(user_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_clear_unknown_user_is_ok() -> Result<()> {
    let (cache, _clock) = test_cache();
    cache.clear(Uuid::new_v4()).await?;
    Ok(())
}

#[tokio::test]
async fn test_lru_eviction_at_capacity() -> Result<()> {
    let (cache, clock) = test_cache_with_capacity(2);
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let third = Uuid::new_v4();

    for user_id in [first, second, third] {
        cache
            .put(
                user_id,
                snapshot_at(user_id, clock.now()),
                StdDuration::from_secs(3600),
            )
            .await?;
    }

    // Capacity 2: the least recently used entry is gone
    assert!(cache.get(first).await?.is_none());
    assert!(cache.get(second).await?.is_some());
    assert!(cache.get(third).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_entries_are_isolated_per_user() -> Result<()> {
    let (cache, clock) = test_cache();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    cache
        .put(
            alice,
            snapshot_at(alice, clock.now()),
            StdDuration::from_secs(3600),
        )
        .await?;

    assert!(cache.get(alice).await?.is_some());
    assert!(cache.get(bob).await?.is_none());

    cache.clear(alice).await?;
    assert!(cache.get(alice).await?.is_none());
    Ok(())
}
