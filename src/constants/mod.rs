// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Groups cache, analysis-window, and confidence constants by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! Constants module
//!
//! Application constants organized by domain. Metric scoring thresholds live
//! next to the scorers in `intelligence::thresholds`; this module holds the
//! engine-level values (cache lifetimes, analysis windows, confidence bands).

/// Snapshot cache configuration defaults
pub mod cache {
    /// Default TTL for a computed insights snapshot (seconds)
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600; // 1 hour

    /// TTL stamped on the insufficient-data response (seconds)
    pub const INSUFFICIENT_DATA_TTL_SECS: u64 = 604_800; // 7 days

    /// Default maximum number of cached users
    pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1000;

    /// Default interval between background expiry sweeps (seconds)
    pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes
}

/// Analysis window configuration defaults
pub mod analysis {
    /// Default day-window for the main insights computation
    pub const DEFAULT_ANALYSIS_WINDOW_DAYS: i64 = 30;

    /// Day-window for the quick-stats side computation
    pub const DEFAULT_QUICK_STATS_WINDOW_DAYS: i64 = 7;

    /// Day-window for trend comparison (previous window is the same length again)
    pub const DEFAULT_TREND_WINDOW_DAYS: i64 = 30;

    /// Length of the shifted window used for the previous composite score (days)
    pub const PREVIOUS_SCORE_WINDOW_DAYS: i64 = 7;

    /// Gap between the current window start and the previous-score window end (days)
    pub const PREVIOUS_SCORE_OFFSET_DAYS: i64 = 7;

    /// Minimum total data points before the engine computes a full snapshot
    pub const DEFAULT_MIN_DATA_POINTS: usize = 3;

    /// Most recent raw data points emitted per trend for charting
    pub const MAX_TREND_POINTS: usize = 10;

    /// Upper bound on the returned recommendation list
    pub const MAX_RECOMMENDATIONS: usize = 5;
}

/// Summary confidence as a step function of analyzed data points
pub mod confidence {
    pub const HIGH_POINTS: usize = 20;
    pub const MEDIUM_POINTS: usize = 10;
    pub const LOW_POINTS: usize = 5;

    pub const HIGH: f64 = 0.9;
    pub const MEDIUM: f64 = 0.7;
    pub const LOW: f64 = 0.5;
    pub const MINIMAL: f64 = 0.3;
}
