// ABOUTME: Period-over-period trend analysis per metric with charting data points
// ABOUTME: Classifies change direction against sensitivity thresholds and improvement per metric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Trend Analyzer
//!
//! Compares the current window against the equal-length window immediately
//! before it, per metric. The caller fetches one double-length snapshot and
//! this module partitions it at the cutoff. When the previous window is empty
//! the previous value mirrors the current one, so the change is zero and the
//! direction is forced to stable. A synthetic hydration trend is always
//! emitted as a placeholder until hydration tracking lands; metrics with no
//! current-window data are omitted entirely.

use super::scoring::ChangeDirection;
use super::thresholds::{blood_pressure as bp, heart_rate as hr, sleep, trend};
use crate::constants::analysis::MAX_TREND_POINTS;
use crate::models::{HealthDataSnapshot, HealthMetric};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw charting point inside a trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// Period-over-period comparison for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub metric: HealthMetric,
    pub label: String,
    pub current_value: f64,
    pub previous_value: f64,
    /// Percent change vs the previous window, 0 when previous is 0
    pub change_percent: f64,
    pub change_direction: ChangeDirection,
    pub is_improving: bool,
    /// The most recent raw points, ascending by date, capped at 10
    pub data_points: Vec<TrendPoint>,
}

/// How improvement is judged for a metric
enum ImprovementRule {
    /// Distance to an ideal reference value shrank
    TowardIdeal(f64),
    /// Total volume increased
    TotalIncreased,
    /// Average decreased
    AverageDecreased,
}

/// Analyze all metric trends from a double-length window snapshot
///
/// `cutoff` splits the snapshot into the previous window (before) and the
/// current window (at or after).
#[must_use]
pub fn analyze_trends(double_window: &HealthDataSnapshot, cutoff: DateTime<Utc>) -> Vec<Trend> {
    let mut trends = Vec::new();

    let bp_points: Vec<TrendPoint> = double_window
        .blood_pressure
        .iter()
        .map(|r| TrendPoint {
            date: r.recorded_at,
            value: (r.systolic + r.diastolic) / 2.0,
        })
        .collect();
    trends.extend(metric_trend(
        HealthMetric::BloodPressure,
        bp_points,
        cutoff,
        trend::BLOOD_PRESSURE_SENSITIVITY_PCT,
        &ImprovementRule::TowardIdeal(bp::IDEAL_MEAN_PRESSURE),
    ));

    let hr_points: Vec<TrendPoint> = double_window
        .heart_rate
        .iter()
        .map(|r| TrendPoint {
            date: r.recorded_at,
            value: r.bpm,
        })
        .collect();
    trends.extend(metric_trend(
        HealthMetric::HeartRate,
        hr_points,
        cutoff,
        trend::HEART_RATE_SENSITIVITY_PCT,
        &ImprovementRule::TowardIdeal(hr::IDEAL_BPM),
    ));

    let sleep_points: Vec<TrendPoint> = double_window
        .sleep
        .iter()
        .map(|e| TrendPoint {
            date: e.recorded_at,
            value: e.duration_hours,
        })
        .collect();
    trends.extend(metric_trend(
        HealthMetric::Sleep,
        sleep_points,
        cutoff,
        trend::SLEEP_SENSITIVITY_PCT,
        &ImprovementRule::TowardIdeal(sleep::IDEAL_HOURS),
    ));

    let exercise_points: Vec<TrendPoint> = double_window
        .exercise
        .iter()
        .map(|e| TrendPoint {
            date: e.recorded_at,
            value: e.duration_minutes,
        })
        .collect();
    trends.extend(metric_trend(
        HealthMetric::Exercise,
        exercise_points,
        cutoff,
        trend::EXERCISE_SENSITIVITY_PCT,
        &ImprovementRule::TotalIncreased,
    ));

    let stress_points: Vec<TrendPoint> = double_window
        .stress
        .iter()
        .map(|e| TrendPoint {
            date: e.recorded_at,
            value: f64::from(e.level),
        })
        .collect();
    trends.extend(metric_trend(
        HealthMetric::Stress,
        stress_points,
        cutoff,
        trend::STRESS_SENSITIVITY_PCT,
        &ImprovementRule::AverageDecreased,
    ));

    // Hydration tracking is not wired up yet; emit a fixed placeholder so the
    // chart grid stays shape-stable for clients
    trends.push(hydration_placeholder());

    trends
}

/// Build the trend for one metric, or `None` when the current window is empty
fn metric_trend(
    metric: HealthMetric,
    mut points: Vec<TrendPoint>,
    cutoff: DateTime<Utc>,
    sensitivity_pct: f64,
    rule: &ImprovementRule,
) -> Option<Trend> {
    points.sort_by_key(|p| p.date);
    let (previous, current): (Vec<&TrendPoint>, Vec<&TrendPoint>) =
        points.iter().partition(|p| p.date < cutoff);

    if current.is_empty() {
        return None;
    }

    let current_avg = mean(&current);
    let current_total: f64 = current.iter().map(|p| p.value).sum();

    let has_previous = !previous.is_empty();
    let (previous_avg, previous_total) = if has_previous {
        (mean(&previous), previous.iter().map(|p| p.value).sum())
    } else {
        // No prior data: mirror the current values so change reads as zero
        (current_avg, current_total)
    };

    let change_percent = if previous_avg == 0.0 {
        0.0
    } else {
        (current_avg - previous_avg) / previous_avg * 100.0
    };

    let change_direction = if !has_previous || change_percent.abs() <= sensitivity_pct {
        ChangeDirection::Stable
    } else if change_percent > 0.0 {
        ChangeDirection::Up
    } else {
        ChangeDirection::Down
    };

    let is_improving = match rule {
        ImprovementRule::TowardIdeal(ideal) => {
            (current_avg - ideal).abs() < (previous_avg - ideal).abs()
        }
        ImprovementRule::TotalIncreased => current_total > previous_total,
        ImprovementRule::AverageDecreased => current_avg < previous_avg,
    };

    let data_points: Vec<TrendPoint> = current
        .iter()
        .rev()
        .take(MAX_TREND_POINTS)
        .rev()
        .map(|p| (*p).clone())
        .collect();

    Some(Trend {
        metric,
        label: metric.label().to_owned(),
        current_value: current_avg,
        previous_value: previous_avg,
        change_percent,
        change_direction,
        is_improving,
        data_points,
    })
}

/// Fixed no-data hydration stub
fn hydration_placeholder() -> Trend {
    Trend {
        metric: HealthMetric::Hydration,
        label: HealthMetric::Hydration.label().to_owned(),
        current_value: 0.0,
        previous_value: 0.0,
        change_percent: 0.0,
        change_direction: ChangeDirection::Stable,
        is_improving: false,
        data_points: Vec::new(),
    }
}

fn mean(points: &[&TrendPoint]) -> f64 {
    points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, HeartRateReading, SleepEntry, StressEntry};
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    fn double_window() -> HealthDataSnapshot {
        HealthDataSnapshot::empty(Uuid::new_v4(), DateRange::ending_at(now(), 60))
    }

    fn cutoff() -> DateTime<Utc> {
        now() - Duration::days(30)
    }

    fn hr_reading(days_ago: i64, bpm: f64) -> HeartRateReading {
        HeartRateReading {
            recorded_at: now() - Duration::days(days_ago),
            bpm,
        }
    }

    #[test]
    fn test_empty_window_emits_only_hydration() {
        let trends = analyze_trends(&double_window(), cutoff());
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].metric, HealthMetric::Hydration);
        assert_eq!(trends[0].change_direction, ChangeDirection::Stable);
        assert!(!trends[0].is_improving);
        assert!(trends[0].data_points.is_empty());
    }

    #[test]
    fn test_no_previous_data_forces_stable() {
        let mut snapshot = double_window();
        // All readings inside the current window; previous window empty
        snapshot.heart_rate.push(hr_reading(5, 90.0));
        snapshot.heart_rate.push(hr_reading(3, 70.0));

        let trends = analyze_trends(&snapshot, cutoff());
        let hr_trend = trends
            .iter()
            .find(|t| t.metric == HealthMetric::HeartRate)
            .unwrap();

        assert!((hr_trend.current_value - hr_trend.previous_value).abs() < f64::EPSILON);
        assert!((hr_trend.change_percent - 0.0).abs() < f64::EPSILON);
        assert_eq!(hr_trend.change_direction, ChangeDirection::Stable);
        assert!(!hr_trend.is_improving);
    }

    #[test]
    fn test_identical_windows_are_stable() {
        let mut snapshot = double_window();
        snapshot.heart_rate.push(hr_reading(40, 72.0));
        snapshot.heart_rate.push(hr_reading(5, 72.0));

        let trends = analyze_trends(&snapshot, cutoff());
        let hr_trend = trends
            .iter()
            .find(|t| t.metric == HealthMetric::HeartRate)
            .unwrap();
        assert_eq!(hr_trend.change_direction, ChangeDirection::Stable);
    }

    #[test]
    fn test_direction_respects_sensitivity() {
        let mut snapshot = double_window();
        // Previous avg 80, current avg 81: 1.25% change, below the 2% threshold
        snapshot.heart_rate.push(hr_reading(40, 80.0));
        snapshot.heart_rate.push(hr_reading(5, 81.0));

        let trends = analyze_trends(&snapshot, cutoff());
        let hr_trend = trends
            .iter()
            .find(|t| t.metric == HealthMetric::HeartRate)
            .unwrap();
        assert_eq!(hr_trend.change_direction, ChangeDirection::Stable);

        // Previous 80, current 90: 12.5% -> up
        let mut snapshot = double_window();
        snapshot.heart_rate.push(hr_reading(40, 80.0));
        snapshot.heart_rate.push(hr_reading(5, 90.0));
        let trends = analyze_trends(&snapshot, cutoff());
        let hr_trend = trends
            .iter()
            .find(|t| t.metric == HealthMetric::HeartRate)
            .unwrap();
        assert_eq!(hr_trend.change_direction, ChangeDirection::Up);
    }

    #[test]
    fn test_heart_rate_improvement_is_toward_ideal() {
        let mut snapshot = double_window();
        // Previous avg 90, current avg 75: closer to the 70 bpm ideal
        snapshot.heart_rate.push(hr_reading(40, 90.0));
        snapshot.heart_rate.push(hr_reading(5, 75.0));

        let trends = analyze_trends(&snapshot, cutoff());
        let hr_trend = trends
            .iter()
            .find(|t| t.metric == HealthMetric::HeartRate)
            .unwrap();
        assert!(hr_trend.is_improving);
        assert_eq!(hr_trend.change_direction, ChangeDirection::Down);
    }

    #[test]
    fn test_stress_improvement_is_average_decrease() {
        let mut snapshot = double_window();
        snapshot.stress.push(StressEntry {
            recorded_at: now() - Duration::days(40),
            level: 8,
            triggers: vec![],
        });
        snapshot.stress.push(StressEntry {
            recorded_at: now() - Duration::days(4),
            level: 4,
            triggers: vec![],
        });

        let trends = analyze_trends(&snapshot, cutoff());
        let stress_trend = trends
            .iter()
            .find(|t| t.metric == HealthMetric::Stress)
            .unwrap();
        assert!(stress_trend.is_improving);
    }

    #[test]
    fn test_data_points_capped_at_ten_most_recent() {
        let mut snapshot = double_window();
        for day in 1..=15 {
            snapshot.sleep.push(SleepEntry {
                recorded_at: now() - Duration::days(day),
                duration_hours: 7.0,
                quality: None,
                notes: None,
            });
        }

        let trends = analyze_trends(&snapshot, cutoff());
        let sleep_trend = trends
            .iter()
            .find(|t| t.metric == HealthMetric::Sleep)
            .unwrap();
        assert_eq!(sleep_trend.data_points.len(), 10);
        // Ascending by date, ending with the newest reading
        assert!(sleep_trend
            .data_points
            .windows(2)
            .all(|w| w[0].date <= w[1].date));
        assert_eq!(
            sleep_trend.data_points.last().unwrap().date,
            now() - Duration::days(1)
        );
    }
}
