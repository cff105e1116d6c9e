// ABOUTME: The get_insights orchestrator sequencing cache, fetch, fan-out, and assembly
// ABOUTME: Owns the cache hit/miss metrics and phase timing telemetry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Insights Engine
//!
//! The single entry point of the crate. One `get_insights` call sequences:
//! cache lookup, a windowed data fetch, a five-way concurrent fan-out
//! (summary, insights, health score, quick stats, trends; independent of
//! each other, each re-deriving its own window from read-only storage),
//! recommendation generation after the join, assembly, and a cache write.
//!
//! The engine is stateless apart from the snapshot cache and its hit/miss
//! counters, so concurrent calls for different users are fully independent.
//! There is no retry or timeout here: a storage failure aborts the call and
//! surfaces as a single `INSIGHT_GENERATION_FAILED` error with the cause
//! logged and chained.

use crate::cache::{CacheMetrics, CacheStats, SnapshotCache};
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::constants::analysis::{PREVIOUS_SCORE_OFFSET_DAYS, PREVIOUS_SCORE_WINDOW_DAYS};
use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    insights, recommendation_engine, scoring, stats, summary, trends, HealthScoreResult, Insight,
    InsightKind, InsightPriority, InsightsSnapshot, OverallStatus, QuickStats, SnapshotMetadata,
    Trend, WindowFetcher,
};
use crate::models::{DateRange, HealthDataSnapshot};
use crate::providers::HealthStore;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// The health insights engine
///
/// Constructed once with its dependencies injected; cheap to clone via the
/// inner `Arc`s if the embedding application needs to share it.
pub struct InsightsEngine {
    fetcher: WindowFetcher,
    cache: Arc<dyn SnapshotCache>,
    metrics: Arc<CacheMetrics>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl InsightsEngine {
    /// Create an engine over a storage adapter, cache, and clock
    #[must_use]
    pub fn new(
        store: Arc<dyn HealthStore>,
        cache: Arc<dyn SnapshotCache>,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Self {
        Self {
            fetcher: WindowFetcher::new(store),
            cache,
            metrics: Arc::new(CacheMetrics::new()),
            clock,
            config,
        }
    }

    /// Compute (or return the cached) insights snapshot for a user
    ///
    /// # Errors
    ///
    /// Returns `INSIGHT_GENERATION_FAILED` when the storage adapter is
    /// unreachable. An insufficient-data window is not an error; it produces
    /// a distinct, valid snapshot shape.
    pub async fn get_insights(&self, user_id: Uuid) -> AppResult<InsightsSnapshot> {
        match self.cache.get(user_id).await {
            Ok(Some(snapshot)) => {
                self.metrics.record_hit();
                debug!(user_id = %user_id, "insights served from cache");
                return Ok(snapshot);
            }
            Ok(None) => self.metrics.record_miss(),
            Err(e) => {
                // Cache read failures degrade to a miss, never to an error
                warn!(user_id = %user_id, error = %e, "cache read failed, treating as miss");
                self.metrics.record_miss();
            }
        }

        let now = self.clock.now();
        let fetch_started = Instant::now();
        let range = DateRange::ending_at(now, self.config.analysis_window_days);
        let snapshot = self
            .fetcher
            .fetch_window(user_id, range)
            .await
            .map_err(|e| self.fetch_failed(user_id, e))?;
        let fetch_elapsed = fetch_started.elapsed();

        let data_points = snapshot.data_points();
        if data_points < self.config.min_data_points {
            debug!(
                user_id = %user_id,
                data_points,
                min = self.config.min_data_points,
                "insufficient data for full insight generation"
            );
            // Cheap to recompute and idempotent, so deliberately not cached
            return Ok(self.insufficient_data_snapshot(&snapshot, now));
        }

        let process_started = Instant::now();
        let (health_score, quick_stats, trend_list, health_summary, insight_list) = tokio::join!(
            self.compute_health_score(user_id, &snapshot, now),
            self.compute_quick_stats(user_id, now),
            self.compute_trends(user_id, now),
            async { summary::compose_summary(&snapshot) },
            async { insights::generate_insights(&snapshot, now) },
        );
        let health_score = health_score.map_err(|e| self.fetch_failed(user_id, e))?;
        let quick_stats = quick_stats.map_err(|e| self.fetch_failed(user_id, e))?;
        let trend_list = trend_list.map_err(|e| self.fetch_failed(user_id, e))?;

        let recommendations =
            recommendation_engine::generate_recommendations(&insight_list, &snapshot);
        let process_elapsed = process_started.elapsed();

        let result = InsightsSnapshot {
            summary: health_summary,
            insights: insight_list,
            health_score,
            quick_stats,
            recommendations,
            trends: trend_list,
            metadata: SnapshotMetadata {
                user_id,
                generated_at: now,
                data_points_analyzed: data_points,
                analysis_period_days: self.config.analysis_window_days,
                cache_expiry: now + ChronoDuration::from_std(self.config.cache_ttl())
                    .unwrap_or_else(|_| ChronoDuration::seconds(0)),
            },
        };

        let cache_started = Instant::now();
        if let Err(e) = self
            .cache
            .put(user_id, result.clone(), self.config.cache_ttl())
            .await
        {
            // The fresh snapshot is still returned; the next call recomputes
            warn!(user_id = %user_id, error = %e, "cache write failed, returning uncached snapshot");
        }
        let cache_elapsed = cache_started.elapsed();

        info!(
            user_id = %user_id,
            data_points,
            fetch_ms = fetch_elapsed.as_millis() as u64,
            process_ms = process_elapsed.as_millis() as u64,
            cache_write_ms = cache_elapsed.as_millis() as u64,
            score = result.health_score.score,
            "insights snapshot computed"
        );

        Ok(result)
    }

    /// Remove the cached snapshot for a user
    ///
    /// # Errors
    ///
    /// Unlike reads and writes, clear failures are surfaced: an explicit
    /// user-initiated clear must be observable.
    pub async fn clear_cache(&self, user_id: Uuid) -> AppResult<()> {
        self.cache.clear(user_id).await.map_err(|e| {
            AppError::cache(format!("failed to clear cached insights for user {user_id}"))
                .with_user_id(user_id)
                .with_source(e)
        })
    }

    /// Current hit/miss counters
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.metrics.snapshot()
    }

    /// Zero the hit/miss counters
    pub fn reset_cache_stats(&self) {
        self.metrics.reset();
    }

    /// Composite score with the previous-period comparison
    ///
    /// The previous composite is recomputed over the 7-day span ending 7 days
    /// before the current window start.
    async fn compute_health_score(
        &self,
        user_id: Uuid,
        current: &HealthDataSnapshot,
        now: DateTime<Utc>,
    ) -> AppResult<HealthScoreResult> {
        let current_start = now - ChronoDuration::days(self.config.analysis_window_days);
        let previous_end = current_start - ChronoDuration::days(PREVIOUS_SCORE_OFFSET_DAYS);
        let previous_range = DateRange::ending_at(previous_end, PREVIOUS_SCORE_WINDOW_DAYS);

        let previous = self.fetcher.fetch_window(user_id, previous_range).await?;
        Ok(scoring::compose_health_score(current, &previous))
    }

    /// Quick stats over their own short window
    async fn compute_quick_stats(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<QuickStats> {
        let range = DateRange::ending_at(now, self.config.quick_stats_window_days);
        let snapshot = self.fetcher.fetch_window(user_id, range).await?;
        Ok(stats::compute_quick_stats(&snapshot))
    }

    /// Trends over a double-length window partitioned at the period cutoff
    async fn compute_trends(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<Vec<Trend>> {
        let period = self.config.trend_window_days;
        let double_range = DateRange::ending_at(now, period * 2);
        let double_window = self.fetcher.fetch_window(user_id, double_range).await?;
        let cutoff = now - ChronoDuration::days(period);
        Ok(trends::analyze_trends(&double_window, cutoff))
    }

    /// The fixed response for users without enough recorded data
    ///
    /// A valid success shape, distinct from an error, and never cached.
    fn insufficient_data_snapshot(
        &self,
        snapshot: &HealthDataSnapshot,
        now: DateTime<Utc>,
    ) -> InsightsSnapshot {
        let components = scoring::score_components(snapshot)
            .into_iter()
            .map(|(metric, mut component)| {
                component.score = 0;
                (metric, component)
            })
            .collect();

        let health_score = HealthScoreResult {
            score: 0,
            category: scoring::ScoreCategory::Poor,
            category_label: scoring::ScoreCategory::Poor.label().to_owned(),
            previous_score: 0,
            change: 0,
            change_direction: scoring::ChangeDirection::Stable,
            components,
        };

        let insight = Insight {
            id: format!("info-tracking-{}", now.timestamp_millis()),
            kind: InsightKind::Info,
            priority: InsightPriority::Medium,
            icon: "clipboard".to_owned(),
            title: "Not Enough Data Yet".to_owned(),
            description: format!(
                "There is not enough recorded health data in the last {} days to generate insights. Log a few vitals, sleep, or exercise entries to get started.",
                self.config.analysis_window_days
            ),
            action_text: "Add Health Data".to_owned(),
            action_link: "/health/records".to_owned(),
            related_metrics: Vec::new(),
            generated_at: now,
        };

        InsightsSnapshot {
            summary: crate::intelligence::HealthSummary {
                overall_status: OverallStatus::Fair,
                text: "Not enough health data has been recorded yet to assess your health. Start logging to see your personalized insights.".to_owned(),
                positive: Vec::new(),
                concerning: Vec::new(),
                confidence: summary::confidence_for(snapshot.data_points()),
            },
            insights: vec![insight],
            health_score,
            quick_stats: stats::compute_quick_stats(snapshot),
            recommendations: vec![recommendation_engine::data_entry_recommendation()],
            trends: Vec::new(),
            metadata: SnapshotMetadata {
                user_id: snapshot.user_id,
                generated_at: now,
                data_points_analyzed: snapshot.data_points(),
                analysis_period_days: self.config.analysis_window_days,
                cache_expiry: now
                    + ChronoDuration::from_std(self.config.insufficient_data_ttl())
                        .unwrap_or_else(|_| ChronoDuration::seconds(0)),
            },
        }
    }

    /// Wrap and log an upstream fetch failure
    fn fetch_failed(&self, user_id: Uuid, cause: AppError) -> AppError {
        error!(
            user_id = %user_id,
            error = %cause,
            "health data fetch failed during insight generation"
        );
        AppError::insight_generation("failed to generate insights")
            .with_user_id(user_id)
            .with_source(cause)
    }
}
