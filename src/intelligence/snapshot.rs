// ABOUTME: Window fetch and snapshot assembly from raw storage records
// ABOUTME: Demultiplexes tagged vital and journal records into typed snapshot channels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Snapshot Builder
//!
//! `WindowFetcher` is the single windowed-read primitive the rest of the
//! engine goes through; every shifted-window recomputation (previous score,
//! quick stats, trends) re-derives its own snapshot from here, which keeps
//! call sites independent and leaves room to cache overlapping windows later
//! without changing them.
//!
//! Assembly is a pure read-and-transform: records are matched exhaustively
//! into channels, one exercise journal record fans out to one entry per
//! session, and unknown journal shapes are skipped rather than erroring.
//! Storage failures propagate untouched; retries are the storage adapter's
//! concern.

use crate::errors::AppResult;
use crate::models::{
    BloodPressureReading, DateRange, ExerciseEntry, HealthDataSnapshot, HeartRateReading,
    JournalPayload, JournalRecord, MeasurementEntry, OxygenReading, RespiratoryReading,
    SleepEntry, StressEntry, TemperatureReading, VitalSign, VitalSignRecord,
};
use crate::providers::HealthStore;
use std::sync::Arc;
use uuid::Uuid;

/// The engine's windowed-read primitive over the storage adapter
#[derive(Clone)]
pub struct WindowFetcher {
    store: Arc<dyn HealthStore>,
}

impl WindowFetcher {
    #[must_use]
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self { store }
    }

    /// Fetch and assemble the snapshot for one user and window
    ///
    /// # Errors
    ///
    /// Propagates storage errors untouched
    pub async fn fetch_window(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> AppResult<HealthDataSnapshot> {
        let vitals = self.store.vital_signs(user_id, &range).await?;
        let journal = self.store.journal_records(user_id, &range).await?;
        Ok(build_snapshot(user_id, range, vitals, journal))
    }
}

/// Assemble a snapshot from raw records, filtering to the window
///
/// Pure function; storage may over-fetch and anything outside `range` is
/// dropped here.
#[must_use]
pub fn build_snapshot(
    user_id: Uuid,
    range: DateRange,
    vitals: Vec<VitalSignRecord>,
    journal: Vec<JournalRecord>,
) -> HealthDataSnapshot {
    let mut snapshot = HealthDataSnapshot::empty(user_id, range);

    for record in vitals {
        if !range.contains(record.recorded_at) {
            continue;
        }
        match record.sign {
            VitalSign::BloodPressure {
                systolic,
                diastolic,
            } => snapshot.blood_pressure.push(BloodPressureReading {
                recorded_at: record.recorded_at,
                systolic,
                diastolic,
            }),
            VitalSign::HeartRate { bpm } => snapshot.heart_rate.push(HeartRateReading {
                recorded_at: record.recorded_at,
                bpm,
            }),
            VitalSign::Temperature { degrees_celsius } => {
                snapshot.temperature.push(TemperatureReading {
                    recorded_at: record.recorded_at,
                    degrees_celsius,
                });
            }
            VitalSign::RespiratoryRate {
                breaths_per_minute,
            } => snapshot.respiratory_rate.push(RespiratoryReading {
                recorded_at: record.recorded_at,
                breaths_per_minute,
            }),
            VitalSign::OxygenSaturation { percent } => {
                snapshot.oxygen_saturation.push(OxygenReading {
                    recorded_at: record.recorded_at,
                    percent,
                });
            }
        }
    }

    for record in journal {
        if !range.contains(record.recorded_at) {
            continue;
        }
        match record.payload {
            JournalPayload::Sleep {
                duration_hours,
                quality,
                notes,
            } => snapshot.sleep.push(SleepEntry {
                recorded_at: record.recorded_at,
                duration_hours,
                quality,
                notes,
            }),
            JournalPayload::Exercise { sessions } => {
                // One journal record per day, one snapshot entry per session
                for session in sessions {
                    snapshot.exercise.push(ExerciseEntry {
                        recorded_at: record.recorded_at,
                        activity: session.activity,
                        duration_minutes: session.duration_minutes,
                        intensity: session.intensity,
                        calories: session.calories,
                    });
                }
            }
            JournalPayload::Stress { level, triggers } => snapshot.stress.push(StressEntry {
                recorded_at: record.recorded_at,
                level,
                triggers,
            }),
            JournalPayload::Measurement {
                weight_kg,
                height_cm,
                bmi,
                glucose_mg_dl,
                notes,
            } => snapshot.measurements.push(MeasurementEntry {
                recorded_at: record.recorded_at,
                weight_kg,
                height_cm,
                bmi,
                glucose_mg_dl,
                notes,
            }),
            JournalPayload::Unknown => {
                tracing::debug!(
                    recorded_at = %record.recorded_at,
                    "skipping unrecognized journal record shape"
                );
            }
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseSession;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_vitals_demultiplex_into_channels() {
        let range = DateRange::ending_at(now(), 30);
        let vitals = vec![
            VitalSignRecord {
                recorded_at: now() - Duration::days(1),
                sign: VitalSign::BloodPressure {
                    systolic: 118.0,
                    diastolic: 76.0,
                },
            },
            VitalSignRecord {
                recorded_at: now() - Duration::days(2),
                sign: VitalSign::HeartRate { bpm: 64.0 },
            },
            VitalSignRecord {
                recorded_at: now() - Duration::days(3),
                sign: VitalSign::OxygenSaturation { percent: 98.0 },
            },
        ];

        let snapshot = build_snapshot(Uuid::new_v4(), range, vitals, vec![]);
        assert_eq!(snapshot.blood_pressure.len(), 1);
        assert_eq!(snapshot.heart_rate.len(), 1);
        assert_eq!(snapshot.oxygen_saturation.len(), 1);
        assert_eq!(snapshot.data_points(), 3);
    }

    #[test]
    fn test_exercise_record_fans_out_per_session() {
        let range = DateRange::ending_at(now(), 30);
        let journal = vec![JournalRecord {
            recorded_at: now() - Duration::days(1),
            payload: JournalPayload::Exercise {
                sessions: vec![
                    ExerciseSession {
                        activity: "run".into(),
                        duration_minutes: 30.0,
                        intensity: None,
                        calories: Some(250.0),
                    },
                    ExerciseSession {
                        activity: "yoga".into(),
                        duration_minutes: 20.0,
                        intensity: None,
                        calories: None,
                    },
                ],
            },
        }];

        let snapshot = build_snapshot(Uuid::new_v4(), range, vec![], journal);
        assert_eq!(snapshot.exercise.len(), 2);
        assert!((snapshot.total_exercise_minutes() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_window_records_are_dropped() {
        let range = DateRange::ending_at(now(), 30);
        let vitals = vec![VitalSignRecord {
            recorded_at: now() - Duration::days(45),
            sign: VitalSign::HeartRate { bpm: 70.0 },
        }];

        let snapshot = build_snapshot(Uuid::new_v4(), range, vitals, vec![]);
        assert!(snapshot.heart_rate.is_empty());
    }

    #[test]
    fn test_unknown_journal_shapes_are_skipped() {
        let range = DateRange::ending_at(now(), 30);
        let journal = vec![
            JournalRecord {
                recorded_at: now() - Duration::days(1),
                payload: JournalPayload::Unknown,
            },
            JournalRecord {
                recorded_at: now() - Duration::days(1),
                payload: JournalPayload::Stress {
                    level: 4,
                    triggers: vec!["work".into()],
                },
            },
        ];

        let snapshot = build_snapshot(Uuid::new_v4(), range, vec![], journal);
        assert_eq!(snapshot.data_points(), 1);
        assert_eq!(snapshot.stress.len(), 1);
    }
}
