// ABOUTME: Storage adapter trait the insights engine reads raw health records through
// ABOUTME: Implementations live in the persistence layer; the engine only consumes this contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Health Record Providers
//!
//! The engine is persistence-agnostic: it consumes raw records through the
//! [`HealthStore`] trait and never writes health data. Retries, pooling, and
//! transport concerns belong to the implementation, not to the engine. A
//! fetch failure here propagates and aborts the whole insights computation.

use crate::errors::AppResult;
use crate::models::{DateRange, JournalRecord, VitalSignRecord};
use uuid::Uuid;

/// Read contract against the health record store
///
/// Implementations must return empty vectors rather than erroring for users
/// or windows with no data, and must return an error when storage is
/// unreachable. Records outside `range` may be returned; the snapshot builder
/// filters defensively.
#[async_trait::async_trait]
pub trait HealthStore: Send + Sync {
    /// Fetch vital-sign records for a user within a time range
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage is unreachable or the
    /// query fails
    async fn vital_signs(
        &self,
        user_id: Uuid,
        range: &DateRange,
    ) -> AppResult<Vec<VitalSignRecord>>;

    /// Fetch health-journal records for a user within a time range
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage is unreachable or the
    /// query fails
    async fn journal_records(
        &self,
        user_id: Uuid,
        range: &DateRange,
    ) -> AppResult<Vec<JournalRecord>>;
}
