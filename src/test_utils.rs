// ABOUTME: Test utilities for creating consistent test data
// ABOUTME: Canned in-memory health store, fixed clock, and record builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! Shared helpers for unit and integration tests
//!
//! `FixedClock` and `StaticHealthStore` make engine behavior deterministic:
//! tests advance time explicitly instead of sleeping, and assert on upstream
//! fetch counts instead of guessing at cache behavior.

use crate::clock::Clock;
use crate::errors::{AppError, AppResult};
use crate::models::{
    DateRange, ExerciseSession, JournalPayload, JournalRecord, VitalSign, VitalSignRecord,
};
use crate::providers::HealthStore;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

/// A clock that only moves when told to
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// A fixed, arbitrary base instant for tests
    #[must_use]
    pub fn default_base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    /// Move the clock forward
    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.write().unwrap();
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}

/// An in-memory store of canned records with call counting and failure injection
#[derive(Default)]
pub struct StaticHealthStore {
    vitals: Vec<VitalSignRecord>,
    journal: Vec<JournalRecord>,
    fetch_count: AtomicUsize,
    fail: AtomicBool,
}

impl StaticHealthStore {
    #[must_use]
    pub fn new(vitals: Vec<VitalSignRecord>, journal: Vec<JournalRecord>) -> Self {
        Self {
            vitals,
            journal,
            fetch_count: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    /// Total storage calls made so far (both record kinds)
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail as unreachable storage
    pub fn fail_next_fetches(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::storage_unavailable("injected storage failure"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl HealthStore for StaticHealthStore {
    async fn vital_signs(
        &self,
        _user_id: Uuid,
        range: &DateRange,
    ) -> AppResult<Vec<VitalSignRecord>> {
        self.check_available()?;
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .vitals
            .iter()
            .filter(|r| range.contains(r.recorded_at))
            .cloned()
            .collect())
    }

    async fn journal_records(
        &self,
        _user_id: Uuid,
        range: &DateRange,
    ) -> AppResult<Vec<JournalRecord>> {
        self.check_available()?;
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .journal
            .iter()
            .filter(|r| range.contains(r.recorded_at))
            .cloned()
            .collect())
    }
}

/// Blood pressure record at an instant
#[must_use]
pub fn bp_record(recorded_at: DateTime<Utc>, systolic: f64, diastolic: f64) -> VitalSignRecord {
    VitalSignRecord {
        recorded_at,
        sign: VitalSign::BloodPressure {
            systolic,
            diastolic,
        },
    }
}

/// Heart rate record at an instant
#[must_use]
pub fn hr_record(recorded_at: DateTime<Utc>, bpm: f64) -> VitalSignRecord {
    VitalSignRecord {
        recorded_at,
        sign: VitalSign::HeartRate { bpm },
    }
}

/// Sleep journal record at an instant
#[must_use]
pub fn sleep_record(recorded_at: DateTime<Utc>, duration_hours: f64) -> JournalRecord {
    JournalRecord {
        recorded_at,
        payload: JournalPayload::Sleep {
            duration_hours,
            quality: None,
            notes: None,
        },
    }
}

/// Single-session exercise journal record at an instant
#[must_use]
pub fn exercise_record(recorded_at: DateTime<Utc>, duration_minutes: f64) -> JournalRecord {
    JournalRecord {
        recorded_at,
        payload: JournalPayload::Exercise {
            sessions: vec![ExerciseSession {
                activity: "walk".to_owned(),
                duration_minutes,
                intensity: None,
                calories: None,
            }],
        },
    }
}

/// Stress journal record at an instant
#[must_use]
pub fn stress_record(recorded_at: DateTime<Utc>, level: u8) -> JournalRecord {
    JournalRecord {
        recorded_at,
        payload: JournalPayload::Stress {
            level,
            triggers: Vec::new(),
        },
    }
}
