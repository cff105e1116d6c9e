// ABOUTME: Natural-language synthesis of positive and concerning findings
// ABOUTME: Composes the summary sentence, overall status, and confidence estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Summary Composer
//!
//! Re-evaluates the five metrics with coarser thresholds tuned for prose and
//! builds two phrase lists, `positive` and `concerning`. Missing sleep or
//! exercise data is itself a concerning line; missing heart-rate, blood
//! pressure, or stress data is not. That asymmetry is deliberate: absence of
//! habit tracking reads differently to a user than absence of spot
//! measurements, and the insight generator already stays silent there.

use super::thresholds::{blood_pressure as bp, exercise, heart_rate as hr, sleep, stress};
use crate::constants::confidence;
use crate::models::HealthDataSnapshot;
use serde::{Deserialize, Serialize};

/// Overall status derived from the positive/concerning balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    VeryGood,
    Good,
    Fair,
    NeedsAttention,
}

impl OverallStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryGood => "very good",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsAttention => "needs attention",
        }
    }
}

/// The composed natural-language summary with its confidence estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub overall_status: OverallStatus,
    pub text: String,
    pub positive: Vec<String>,
    pub concerning: Vec<String>,
    /// Step function of the analyzed data-point count, 0.3-0.9
    pub confidence: f64,
}

/// Compose the summary for a window snapshot
#[must_use]
pub fn compose_summary(snapshot: &HealthDataSnapshot) -> HealthSummary {
    let mut positive = Vec::new();
    let mut concerning = Vec::new();

    if let Some((avg_systolic, avg_diastolic)) = snapshot.average_blood_pressure() {
        if avg_systolic > bp::STAGE1_SYSTOLIC || avg_diastolic > bp::STAGE1_DIASTOLIC {
            concerning.push(format!(
                "blood pressure is high (averaging {:.0}/{:.0} mmHg)",
                avg_systolic.round(),
                avg_diastolic.round()
            ));
        } else if avg_systolic <= bp::OPTIMAL_SYSTOLIC && avg_diastolic <= bp::OPTIMAL_DIASTOLIC {
            positive.push("blood pressure is in a healthy range".to_owned());
        } else {
            concerning.push("blood pressure is slightly elevated".to_owned());
        }
    }

    if let Some(avg) = snapshot.average_heart_rate() {
        if (hr::IDEAL_LOW..=hr::IDEAL_HIGH).contains(&avg) {
            positive.push("resting heart rate is in a healthy range".to_owned());
        } else if avg > hr::GOOD_HIGH {
            concerning.push(format!(
                "resting heart rate is elevated (averaging {:.0} bpm)",
                avg.round()
            ));
        } else if avg < hr::LOW_RESTING {
            concerning.push(format!(
                "resting heart rate is low (averaging {:.0} bpm)",
                avg.round()
            ));
        }
    }

    match snapshot.average_sleep_hours() {
        Some(avg) if (sleep::IDEAL_LOW..=sleep::IDEAL_HIGH).contains(&avg) => {
            positive.push(format!("sleep is on target at {avg:.1} hours per night"));
        }
        Some(avg) if avg < sleep::SHORT_SLEEP => {
            concerning.push(format!(
                "sleep is running short at {avg:.1} hours per night"
            ));
        }
        Some(avg) if avg > sleep::LONG_SLEEP => {
            concerning.push(format!(
                "sleep is running long at {avg:.1} hours per night"
            ));
        }
        Some(_) => {}
        None => concerning.push("no sleep data recorded".to_owned()),
    }

    match snapshot.weekly_exercise_minutes() {
        Some(weekly) if weekly >= exercise::WEEKLY_TARGET_MINUTES => {
            positive.push("exercise is meeting the recommended 150 minutes per week".to_owned());
        }
        Some(weekly) => {
            concerning.push(format!(
                "exercise is below the recommended level at {:.0} minutes per week",
                weekly.round()
            ));
        }
        None => concerning.push("no exercise data recorded".to_owned()),
    }

    if let Some(avg) = snapshot.average_stress_level() {
        if avg <= stress::LOW_LEVEL {
            positive.push("stress levels are low".to_owned());
        } else if avg > stress::HIGH_LEVEL {
            concerning.push(format!("stress levels are high (averaging {avg:.1}/10)"));
        } else if avg > stress::MODERATE_LEVEL {
            concerning.push(format!("stress levels are elevated (averaging {avg:.1}/10)"));
        }
    }

    let overall_status = status_for(positive.len(), concerning.len());
    let text = summary_text(overall_status, &positive, &concerning);
    let confidence = confidence_for(snapshot.data_points());

    HealthSummary {
        overall_status,
        text,
        positive,
        concerning,
        confidence,
    }
}

/// Status from the positive/concerning counts; equal counts (including 0/0)
/// read as fair
const fn status_for(positive_count: usize, concerning_count: usize) -> OverallStatus {
    if positive_count > 2 * concerning_count {
        OverallStatus::VeryGood
    } else if positive_count > concerning_count {
        OverallStatus::Good
    } else if positive_count == concerning_count {
        OverallStatus::Fair
    } else {
        OverallStatus::NeedsAttention
    }
}

/// Fixed template plus the first two items of each list
fn summary_text(status: OverallStatus, positive: &[String], concerning: &[String]) -> String {
    let mut text = format!("Your overall health is looking {}.", status.label());

    let highlights: Vec<&str> = positive.iter().take(2).map(String::as_str).collect();
    if !highlights.is_empty() {
        text.push_str(&format!(" Going well: {}.", highlights.join("; ")));
    }

    let watch: Vec<&str> = concerning.iter().take(2).map(String::as_str).collect();
    if !watch.is_empty() {
        text.push_str(&format!(" Worth attention: {}.", watch.join("; ")));
    }

    text
}

/// Confidence as a step function of the data-point count
#[must_use]
pub const fn confidence_for(data_points: usize) -> f64 {
    if data_points >= confidence::HIGH_POINTS {
        confidence::HIGH
    } else if data_points >= confidence::MEDIUM_POINTS {
        confidence::MEDIUM
    } else if data_points >= confidence::LOW_POINTS {
        confidence::LOW
    } else {
        confidence::MINIMAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BloodPressureReading, DateRange, ExerciseEntry, HeartRateReading, SleepEntry, StressEntry,
    };
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    fn empty_snapshot() -> HealthDataSnapshot {
        HealthDataSnapshot::empty(Uuid::new_v4(), DateRange::ending_at(now(), 30))
    }

    #[test]
    fn test_empty_snapshot_is_fair_with_missing_data_lines() {
        let summary = compose_summary(&empty_snapshot());

        // Only sleep and exercise absence produce concerning lines
        assert_eq!(summary.concerning.len(), 2);
        assert!(summary.concerning.iter().any(|c| c.contains("sleep")));
        assert!(summary.concerning.iter().any(|c| c.contains("exercise")));
        assert!(summary.positive.is_empty());
        assert_eq!(summary.overall_status, OverallStatus::NeedsAttention);
        assert!((summary.confidence - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_heart_rate_produces_no_line() {
        let mut snapshot = empty_snapshot();
        snapshot.sleep.push(SleepEntry {
            recorded_at: now() - Duration::days(1),
            duration_hours: 8.0,
            quality: None,
            notes: None,
        });
        let summary = compose_summary(&snapshot);
        assert!(!summary
            .concerning
            .iter()
            .any(|c| c.contains("heart") || c.contains("blood pressure") || c.contains("stress")));
    }

    #[test]
    fn test_slightly_elevated_blood_pressure_phrase() {
        let mut snapshot = empty_snapshot();
        snapshot.blood_pressure.push(BloodPressureReading {
            recorded_at: now() - Duration::days(1),
            systolic: 126.0,
            diastolic: 82.0,
        });
        let summary = compose_summary(&snapshot);
        assert!(summary
            .concerning
            .iter()
            .any(|c| c.contains("slightly elevated")));
    }

    #[test]
    fn test_status_balance() {
        assert_eq!(status_for(0, 0), OverallStatus::Fair);
        assert_eq!(status_for(3, 1), OverallStatus::VeryGood);
        assert_eq!(status_for(2, 1), OverallStatus::Good);
        assert_eq!(status_for(2, 2), OverallStatus::Fair);
        assert_eq!(status_for(1, 2), OverallStatus::NeedsAttention);
    }

    #[test]
    fn test_summary_text_takes_first_two_of_each() {
        let mut snapshot = empty_snapshot();
        snapshot.blood_pressure.push(BloodPressureReading {
            recorded_at: now() - Duration::days(1),
            systolic: 115.0,
            diastolic: 74.0,
        });
        snapshot.heart_rate.push(HeartRateReading {
            recorded_at: now() - Duration::days(1),
            bpm: 66.0,
        });
        snapshot.sleep.push(SleepEntry {
            recorded_at: now() - Duration::days(1),
            duration_hours: 8.0,
            quality: None,
            notes: None,
        });
        snapshot.stress.push(StressEntry {
            recorded_at: now() - Duration::days(1),
            level: 2,
            triggers: vec![],
        });
        snapshot.exercise.push(ExerciseEntry {
            recorded_at: now() - Duration::days(1),
            activity: "run".into(),
            duration_minutes: 180.0,
            intensity: None,
            calories: None,
        });

        let summary = compose_summary(&snapshot);
        assert_eq!(summary.positive.len(), 5);
        assert_eq!(summary.overall_status, OverallStatus::VeryGood);
        // Template carries at most the first two highlights
        assert!(summary.text.contains("blood pressure is in a healthy range"));
        assert!(summary.text.contains("resting heart rate is in a healthy range"));
        assert!(!summary.text.contains("stress levels are low"));
    }

    #[test]
    fn test_confidence_steps() {
        assert!((confidence_for(25) - 0.9).abs() < f64::EPSILON);
        assert!((confidence_for(20) - 0.9).abs() < f64::EPSILON);
        assert!((confidence_for(12) - 0.7).abs() < f64::EPSILON);
        assert!((confidence_for(5) - 0.5).abs() < f64::EPSILON);
        assert!((confidence_for(2) - 0.3).abs() < f64::EPSILON);
    }
}
