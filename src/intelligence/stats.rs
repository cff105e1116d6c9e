// ABOUTME: Quick-stats side computation over a short recent window
// ABOUTME: Compact per-metric averages for dashboard tiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

use crate::models::HealthDataSnapshot;
use serde::{Deserialize, Serialize};

/// Compact at-a-glance numbers computed over the short (default 7-day) window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickStats {
    /// Average systolic over the window, rounded to whole mmHg
    pub avg_systolic: Option<f64>,
    /// Average diastolic over the window, rounded to whole mmHg
    pub avg_diastolic: Option<f64>,
    /// Average resting heart rate, rounded to whole bpm
    pub avg_heart_rate: Option<f64>,
    /// Average nightly sleep, one decimal
    pub avg_sleep_hours: Option<f64>,
    /// Total exercise minutes in the window
    pub exercise_minutes: f64,
    /// Average self-reported stress level, one decimal
    pub avg_stress_level: Option<f64>,
    /// Data points contributing to these numbers
    pub data_points: usize,
}

/// Compute quick stats for a window snapshot
#[must_use]
pub fn compute_quick_stats(snapshot: &HealthDataSnapshot) -> QuickStats {
    let (avg_systolic, avg_diastolic) = match snapshot.average_blood_pressure() {
        Some((sys, dia)) => (Some(sys.round()), Some(dia.round())),
        None => (None, None),
    };

    QuickStats {
        avg_systolic,
        avg_diastolic,
        avg_heart_rate: snapshot.average_heart_rate().map(f64::round),
        avg_sleep_hours: snapshot.average_sleep_hours().map(round_one_decimal),
        exercise_minutes: snapshot.total_exercise_minutes(),
        avg_stress_level: snapshot.average_stress_level().map(round_one_decimal),
        data_points: snapshot.data_points(),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodPressureReading, DateRange, SleepEntry};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_snapshot_quick_stats() {
        let snapshot = HealthDataSnapshot::empty(Uuid::new_v4(), DateRange::ending_at(now(), 7));
        let stats = compute_quick_stats(&snapshot);
        assert_eq!(stats, QuickStats::default());
    }

    #[test]
    fn test_rounding() {
        let mut snapshot =
            HealthDataSnapshot::empty(Uuid::new_v4(), DateRange::ending_at(now(), 7));
        snapshot.blood_pressure.push(BloodPressureReading {
            recorded_at: now() - Duration::days(1),
            systolic: 117.0,
            diastolic: 76.0,
        });
        snapshot.blood_pressure.push(BloodPressureReading {
            recorded_at: now() - Duration::days(2),
            systolic: 120.0,
            diastolic: 79.0,
        });
        snapshot.sleep.push(SleepEntry {
            recorded_at: now() - Duration::days(1),
            duration_hours: 7.25,
            quality: None,
            notes: None,
        });
        snapshot.sleep.push(SleepEntry {
            recorded_at: now() - Duration::days(2),
            duration_hours: 6.5,
            quality: None,
            notes: None,
        });

        let stats = compute_quick_stats(&snapshot);
        assert_eq!(stats.avg_systolic, Some(119.0)); // 118.5 rounds up
        assert_eq!(stats.avg_diastolic, Some(78.0)); // 77.5 rounds up
        assert_eq!(stats.avg_sleep_hours, Some(6.9)); // 6.875 -> one decimal
        assert_eq!(stats.data_points, 4);
    }
}
