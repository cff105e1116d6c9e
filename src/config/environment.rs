// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses cache TTLs, analysis windows, and data-point minimums with safe defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! Environment-based configuration management
//!
//! All knobs have production defaults; unparseable values fall back rather
//! than aborting startup. `validate()` rejects configurations the engine
//! cannot run with (zero-length windows).

use crate::constants::{analysis, cache};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Engine configuration with environment-style defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// TTL for cached insights snapshots (seconds)
    pub cache_ttl_secs: u64,
    /// TTL stamped on insufficient-data responses (seconds)
    pub insufficient_data_ttl_secs: u64,
    /// Minimum total data points before a full snapshot is computed
    pub min_data_points: usize,
    /// Day-window for the main insights computation
    pub analysis_window_days: i64,
    /// Day-window for the quick-stats side computation
    pub quick_stats_window_days: i64,
    /// Day-window for trend comparison
    pub trend_window_days: i64,
    /// Maximum number of users held in the snapshot cache
    pub cache_max_entries: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: cache::DEFAULT_CACHE_TTL_SECS,
            insufficient_data_ttl_secs: cache::INSUFFICIENT_DATA_TTL_SECS,
            min_data_points: analysis::DEFAULT_MIN_DATA_POINTS,
            analysis_window_days: analysis::DEFAULT_ANALYSIS_WINDOW_DAYS,
            quick_stats_window_days: analysis::DEFAULT_QUICK_STATS_WINDOW_DAYS,
            trend_window_days: analysis::DEFAULT_TREND_WINDOW_DAYS,
            cache_max_entries: cache::DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            cache_ttl_secs: env_parse("CACHE_TTL_SECONDS", cache::DEFAULT_CACHE_TTL_SECS),
            insufficient_data_ttl_secs: env_parse(
                "INSUFFICIENT_DATA_TTL_SECONDS",
                cache::INSUFFICIENT_DATA_TTL_SECS,
            ),
            min_data_points: env_parse("MIN_DATA_POINTS", analysis::DEFAULT_MIN_DATA_POINTS),
            analysis_window_days: env_parse(
                "ANALYSIS_WINDOW_DAYS",
                analysis::DEFAULT_ANALYSIS_WINDOW_DAYS,
            ),
            quick_stats_window_days: env_parse(
                "QUICK_STATS_WINDOW_DAYS",
                analysis::DEFAULT_QUICK_STATS_WINDOW_DAYS,
            ),
            trend_window_days: env_parse("TREND_WINDOW_DAYS", analysis::DEFAULT_TREND_WINDOW_DAYS),
            cache_max_entries: env_parse("CACHE_MAX_ENTRIES", cache::DEFAULT_CACHE_MAX_ENTRIES),
        }
    }

    /// Reject configurations the engine cannot run with
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when any analysis window is zero or negative
    pub fn validate(&self) -> AppResult<()> {
        if self.analysis_window_days <= 0 {
            return Err(AppError::new(
                crate::errors::ErrorCode::ConfigInvalid,
                format!(
                    "ANALYSIS_WINDOW_DAYS must be positive, got {}",
                    self.analysis_window_days
                ),
            ));
        }
        if self.quick_stats_window_days <= 0 {
            return Err(AppError::new(
                crate::errors::ErrorCode::ConfigInvalid,
                format!(
                    "QUICK_STATS_WINDOW_DAYS must be positive, got {}",
                    self.quick_stats_window_days
                ),
            ));
        }
        if self.trend_window_days <= 0 {
            return Err(AppError::new(
                crate::errors::ErrorCode::ConfigInvalid,
                format!(
                    "TREND_WINDOW_DAYS must be positive, got {}",
                    self.trend_window_days
                ),
            ));
        }
        Ok(())
    }

    /// Snapshot cache TTL as a `Duration`
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Insufficient-data TTL as a `Duration`
    #[must_use]
    pub const fn insufficient_data_ttl(&self) -> Duration {
        Duration::from_secs(self.insufficient_data_ttl_secs)
    }
}

/// Parse an environment variable, falling back to the default on absence or parse failure
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.min_data_points, 3);
        assert_eq!(config.analysis_window_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = EngineConfig {
            analysis_window_days: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_ttl_duration() {
        let config = EngineConfig::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(
            config.insufficient_data_ttl(),
            Duration::from_secs(604_800)
        );
    }
}
