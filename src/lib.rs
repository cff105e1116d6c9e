// ABOUTME: Main library entry point for the Meridian health insights engine
// ABOUTME: Computes composite health scores, trends, insights, and recommendations from raw records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

#![deny(unsafe_code)]

//! # Meridian Insights
//!
//! An in-process health insights engine. Given a window of raw, heterogeneous
//! health records (vitals, sleep, exercise, stress, journal measurements) it
//! produces a cached, composite health score, ranked insights, period-over-period
//! trend comparisons, and a prioritized set of recommendations.
//!
//! ## Architecture
//!
//! - **Providers**: the `HealthStore` trait the engine reads raw records through
//! - **Models**: tagged-union record types and the immutable window snapshot
//! - **Intelligence**: metric scorers, insight/summary/trend/recommendation generators
//! - **Cache**: per-user, TTL-bound snapshot cache with hit/miss instrumentation
//! - **Engine**: the `get_insights` orchestrator tying all of the above together
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use meridian_insights::cache::{memory::InMemorySnapshotCache, CacheConfig};
//! use meridian_insights::clock::SystemClock;
//! use meridian_insights::config::EngineConfig;
//! use meridian_insights::engine::InsightsEngine;
//! # use meridian_insights::providers::HealthStore;
//! # async fn example(store: Arc<dyn HealthStore>) -> Result<(), meridian_insights::errors::AppError> {
//! let clock = Arc::new(SystemClock);
//! let cache = Arc::new(InMemorySnapshotCache::new(CacheConfig::default(), clock.clone()));
//! let engine = InsightsEngine::new(store, cache, clock, EngineConfig::from_env());
//!
//! let snapshot = engine.get_insights(uuid::Uuid::new_v4()).await?;
//! println!("health score: {}", snapshot.health_score.score);
//! # Ok(())
//! # }
//! ```

/// Per-user snapshot cache with pluggable backends
pub mod cache;

/// Clock abstraction for deterministic time in tests
pub mod clock;

/// Environment-based engine configuration
pub mod config;

/// Application constants organized by domain
pub mod constants;

/// The `get_insights` orchestrator
pub mod engine;

/// Unified error handling with standard error codes and HTTP mapping
pub mod errors;

/// Health intelligence: scorers, insights, summaries, trends, recommendations
pub mod intelligence;

/// Production logging and structured output
pub mod logging;

/// Core record and snapshot data models
pub mod models;

/// Storage adapter trait the engine consumes raw records through
pub mod providers;

/// Test utilities for creating consistent test data
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use engine::InsightsEngine;
pub use intelligence::{InsightsSnapshot, SnapshotMetadata};
