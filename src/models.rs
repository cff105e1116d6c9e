// ABOUTME: Core data models for raw health records and the windowed snapshot
// ABOUTME: Defines tagged-union vital/journal record types and aggregation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Data Models
//!
//! Core data structures used throughout the insights engine.
//!
//! ## Design Principles
//!
//! - **Tagged unions over discriminant strings**: raw record shapes are sum
//!   types, so the snapshot builder performs exhaustive, compiler-checked
//!   matching instead of string comparisons
//! - **Immutable snapshots**: a `HealthDataSnapshot` is built fresh per
//!   request for a `(user, window)` pair and never mutated after construction
//! - **Serializable**: all models support JSON serialization so the
//!   controller layer can return engine output verbatim

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// A single vital-sign measurement, discriminated by kind
///
/// Only one channel is populated per record; the snapshot builder demultiplexes
/// these into the snapshot's five optional vital channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VitalSign {
    BloodPressure { systolic: f64, diastolic: f64 },
    HeartRate { bpm: f64 },
    Temperature { degrees_celsius: f64 },
    RespiratoryRate { breaths_per_minute: f64 },
    OxygenSaturation { percent: f64 },
}

/// A timestamped vital-sign record as returned by storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSignRecord {
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub sign: VitalSign,
}

/// Self-reported sleep quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Self-reported exercise intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

/// One exercise session inside a journal record
///
/// Exercise is a list per day: a single journal record may carry several
/// sessions, each of which becomes its own snapshot entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    pub activity: String,
    pub duration_minutes: f64,
    pub intensity: Option<Intensity>,
    pub calories: Option<f64>,
}

/// Payload of a health-journal record, discriminated by kind
///
/// `Unknown` absorbs record shapes this engine version does not understand;
/// the snapshot builder skips them rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalPayload {
    Sleep {
        duration_hours: f64,
        quality: Option<SleepQuality>,
        notes: Option<String>,
    },
    Exercise {
        sessions: Vec<ExerciseSession>,
    },
    Stress {
        /// Self-reported level, 0-10
        level: u8,
        #[serde(default)]
        triggers: Vec<String>,
    },
    Measurement {
        weight_kg: Option<f64>,
        height_cm: Option<f64>,
        bmi: Option<f64>,
        glucose_mg_dl: Option<f64>,
        notes: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// A timestamped health-journal record as returned by storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: JournalPayload,
}

/// A contiguous range of time ending "now", inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Range covering `window_days` days ending at `end`
    #[must_use]
    pub fn ending_at(end: DateTime<Utc>, window_days: i64) -> Self {
        Self {
            start: end - Duration::days(window_days),
            end,
        }
    }

    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Length of the range in whole days
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// The five scored health dimensions plus the hydration trend stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthMetric {
    BloodPressure,
    HeartRate,
    Sleep,
    Exercise,
    Stress,
    Hydration,
}

impl HealthMetric {
    /// Human-readable label for trend cards and summaries
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BloodPressure => "Blood Pressure",
            Self::HeartRate => "Heart Rate",
            Self::Sleep => "Sleep Duration",
            Self::Exercise => "Exercise",
            Self::Stress => "Stress Level",
            Self::Hydration => "Hydration",
        }
    }
}

impl Display for HealthMetric {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::BloodPressure => "blood_pressure",
            Self::HeartRate => "heart_rate",
            Self::Sleep => "sleep",
            Self::Exercise => "exercise",
            Self::Stress => "stress",
            Self::Hydration => "hydration",
        };
        write!(f, "{name}")
    }
}

/// A paired blood-pressure reading inside the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    pub recorded_at: DateTime<Utc>,
    pub systolic: f64,
    pub diastolic: f64,
}

/// A heart-rate reading inside the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateReading {
    pub recorded_at: DateTime<Utc>,
    pub bpm: f64,
}

/// A body-temperature reading inside the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub recorded_at: DateTime<Utc>,
    pub degrees_celsius: f64,
}

/// A respiratory-rate reading inside the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespiratoryReading {
    pub recorded_at: DateTime<Utc>,
    pub breaths_per_minute: f64,
}

/// An oxygen-saturation reading inside the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OxygenReading {
    pub recorded_at: DateTime<Utc>,
    pub percent: f64,
}

/// A generic measurement entry (weight/height/BMI/glucose/notes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub recorded_at: DateTime<Utc>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub bmi: Option<f64>,
    pub glucose_mg_dl: Option<f64>,
    pub notes: Option<String>,
}

/// A nightly sleep entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    pub recorded_at: DateTime<Utc>,
    pub duration_hours: f64,
    pub quality: Option<SleepQuality>,
    pub notes: Option<String>,
}

/// A single exercise session entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub recorded_at: DateTime<Utc>,
    pub activity: String,
    pub duration_minutes: f64,
    pub intensity: Option<Intensity>,
    pub calories: Option<f64>,
}

/// A stress journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressEntry {
    pub recorded_at: DateTime<Utc>,
    /// Self-reported level, 0-10
    pub level: u8,
    pub triggers: Vec<String>,
}

/// Immutable, time-scoped view of one user's raw health signals
///
/// Built fresh per request by the snapshot builder; channels are always
/// present (empty rather than absent) and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDataSnapshot {
    pub user_id: Uuid,
    pub range: DateRange,
    pub blood_pressure: Vec<BloodPressureReading>,
    pub heart_rate: Vec<HeartRateReading>,
    pub temperature: Vec<TemperatureReading>,
    pub respiratory_rate: Vec<RespiratoryReading>,
    pub oxygen_saturation: Vec<OxygenReading>,
    pub measurements: Vec<MeasurementEntry>,
    pub sleep: Vec<SleepEntry>,
    pub exercise: Vec<ExerciseEntry>,
    pub stress: Vec<StressEntry>,
}

impl HealthDataSnapshot {
    /// Empty snapshot for a user and window
    #[must_use]
    pub const fn empty(user_id: Uuid, range: DateRange) -> Self {
        Self {
            user_id,
            range,
            blood_pressure: Vec::new(),
            heart_rate: Vec::new(),
            temperature: Vec::new(),
            respiratory_rate: Vec::new(),
            oxygen_saturation: Vec::new(),
            measurements: Vec::new(),
            sleep: Vec::new(),
            exercise: Vec::new(),
            stress: Vec::new(),
        }
    }

    /// Total data-point count: vitals plus measurements plus sleep, exercise,
    /// and stress entries
    #[must_use]
    pub fn data_points(&self) -> usize {
        self.vital_count()
            + self.measurements.len()
            + self.sleep.len()
            + self.exercise.len()
            + self.stress.len()
    }

    /// Count across all five vital channels
    #[must_use]
    pub fn vital_count(&self) -> usize {
        self.blood_pressure.len()
            + self.heart_rate.len()
            + self.temperature.len()
            + self.respiratory_rate.len()
            + self.oxygen_saturation.len()
    }

    /// Average systolic/diastolic over all paired readings
    #[must_use]
    pub fn average_blood_pressure(&self) -> Option<(f64, f64)> {
        if self.blood_pressure.is_empty() {
            return None;
        }
        let n = self.blood_pressure.len() as f64;
        let (sys, dia) = self
            .blood_pressure
            .iter()
            .fold((0.0, 0.0), |(s, d), r| (s + r.systolic, d + r.diastolic));
        Some((sys / n, dia / n))
    }

    /// Average resting heart rate in bpm
    #[must_use]
    pub fn average_heart_rate(&self) -> Option<f64> {
        average(self.heart_rate.iter().map(|r| r.bpm))
    }

    /// Average nightly sleep duration in hours
    #[must_use]
    pub fn average_sleep_hours(&self) -> Option<f64> {
        average(self.sleep.iter().map(|e| e.duration_hours))
    }

    /// Average self-reported stress level (0-10)
    #[must_use]
    pub fn average_stress_level(&self) -> Option<f64> {
        average(self.stress.iter().map(|e| f64::from(e.level)))
    }

    /// Total exercise minutes over the window
    #[must_use]
    pub fn total_exercise_minutes(&self) -> f64 {
        self.exercise.iter().map(|e| e.duration_minutes).sum()
    }

    /// Days spanned by the exercise entries, never less than one
    #[must_use]
    pub fn exercise_days_covered(&self) -> i64 {
        let dates: Vec<_> = self.exercise.iter().map(|e| e.recorded_at.date_naive()).collect();
        match (dates.iter().min(), dates.iter().max()) {
            (Some(first), Some(last)) => ((*last - *first).num_days() + 1).max(1),
            _ => 1,
        }
    }

    /// Exercise minutes normalized to a weekly rate
    ///
    /// `None` when no exercise was recorded at all; absence is scored
    /// separately from a low rate.
    #[must_use]
    pub fn weekly_exercise_minutes(&self) -> Option<f64> {
        if self.exercise.is_empty() {
            return None;
        }
        let days = self.exercise_days_covered() as f64;
        Some(self.total_exercise_minutes() / days * 7.0)
    }
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
