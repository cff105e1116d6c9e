// ABOUTME: Health intelligence module: scoring, insights, summaries, trends, recommendations
// ABOUTME: Defines the assembled InsightsSnapshot the engine computes and caches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Intelligence Module
//!
//! The analysis layer of the insights engine. Data flows one way: raw
//! records become a window snapshot, the snapshot feeds the scorers, insight
//! generator, summary composer, and trend analyzer, and their outputs feed
//! the recommendation generator before everything is assembled into an
//! [`InsightsSnapshot`].

/// Per-metric rule evaluation producing typed, prioritized insights
pub mod insights;
/// Ordered, deduplicated, capped action items
pub mod recommendation_engine;
/// Metric scorers and the weighted composite aggregator
pub mod scoring;
/// Window fetch and snapshot assembly
pub mod snapshot;
/// Quick at-a-glance stats over a short window
pub mod stats;
/// Natural-language summary composition
pub mod summary;
/// Banded thresholds and ideal reference values
pub mod thresholds;
/// Period-over-period trend analysis
pub mod trends;

pub use insights::{Insight, InsightKind, InsightPriority};
pub use recommendation_engine::{Recommendation, RecommendationCategory};
pub use scoring::{ChangeDirection, HealthScoreResult, MetricScore, ScoreCategory};
pub use snapshot::WindowFetcher;
pub use stats::QuickStats;
pub use summary::{HealthSummary, OverallStatus};
pub use trends::{Trend, TrendPoint};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bookkeeping attached to every computed snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub user_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Total data points the analysis window contained
    pub data_points_analyzed: usize,
    /// Length of the analysis window in days
    pub analysis_period_days: i64,
    /// Instant after which the cached copy is stale
    pub cache_expiry: DateTime<Utc>,
}

/// The full result of one `get_insights` computation, and the unit the
/// snapshot cache stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSnapshot {
    pub summary: HealthSummary,
    pub insights: Vec<Insight>,
    pub health_score: HealthScoreResult,
    pub quick_stats: QuickStats,
    pub recommendations: Vec<Recommendation>,
    pub trends: Vec<Trend>,
    pub metadata: SnapshotMetadata,
}
