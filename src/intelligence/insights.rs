// ABOUTME: Per-metric rule evaluation producing typed, prioritized insight records
// ABOUTME: Emits at most one insight per metric per run, sorted by priority rank
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Insight Generation
//!
//! Evaluates ordered rule branches per metric against the raw aggregated
//! averages (not the 0-100 sub-scores) and emits at most one insight per
//! metric. Evaluation order is fixed (blood pressure, heart rate, sleep,
//! exercise, stress) and the final list is stably sorted by priority rank, so
//! output ordering is deterministic. Metrics with no data stay silent, with
//! one exception: an empty exercise log is itself worth surfacing.

use super::thresholds::{blood_pressure as bp, exercise, heart_rate as hr, sleep, stress};
use crate::models::{HealthDataSnapshot, HealthMetric};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Insight severity classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Alert,
    Warning,
    Positive,
    Info,
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Alert => "alert",
            Self::Warning => "warning",
            Self::Positive => "positive",
            Self::Info => "info",
        };
        write!(f, "{name}")
    }
}

/// Insight priority with a stable sort rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

impl InsightPriority {
    /// Sort rank: high sorts first
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// A single generated observation with severity and action metadata
///
/// Produced fresh each run; never persisted individually, only inside the
/// cached snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub kind: InsightKind,
    pub priority: InsightPriority,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub action_text: String,
    pub action_link: String,
    pub related_metrics: Vec<HealthMetric>,
    pub generated_at: DateTime<Utc>,
}

impl Insight {
    #[allow(clippy::too_many_arguments)]
    fn new(
        kind: InsightKind,
        priority: InsightPriority,
        metric: HealthMetric,
        icon: &str,
        title: impl Into<String>,
        description: impl Into<String>,
        action_text: &str,
        action_link: &str,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("{kind}-{metric}-{}", generated_at.timestamp_millis()),
            kind,
            priority,
            icon: icon.to_owned(),
            title: title.into(),
            description: description.into(),
            action_text: action_text.to_owned(),
            action_link: action_link.to_owned(),
            related_metrics: vec![metric],
            generated_at,
        }
    }
}

/// Evaluate all five metrics and return the priority-sorted insight list
#[must_use]
pub fn generate_insights(snapshot: &HealthDataSnapshot, now: DateTime<Utc>) -> Vec<Insight> {
    let mut insights: Vec<Insight> = [
        analyze_blood_pressure(snapshot, now),
        analyze_heart_rate(snapshot, now),
        analyze_sleep(snapshot, now),
        analyze_exercise(snapshot, now),
        analyze_stress(snapshot, now),
    ]
    .into_iter()
    .flatten()
    .collect();

    // Stable: insertion order is preserved within equal priority
    insights.sort_by_key(|i| i.priority.rank());
    insights
}

/// Blood pressure rules over the paired averages
#[must_use]
pub fn analyze_blood_pressure(
    snapshot: &HealthDataSnapshot,
    now: DateTime<Utc>,
) -> Option<Insight> {
    let (avg_systolic, avg_diastolic) = snapshot.average_blood_pressure()?;
    let systolic = avg_systolic.round();
    let diastolic = avg_diastolic.round();

    if avg_systolic > bp::STAGE1_SYSTOLIC || avg_diastolic > bp::STAGE1_DIASTOLIC {
        Some(Insight::new(
            InsightKind::Alert,
            InsightPriority::High,
            HealthMetric::BloodPressure,
            "heart-pulse",
            "High Blood Pressure Detected",
            format!(
                "Your average blood pressure over this period is {systolic:.0}/{diastolic:.0} mmHg, which is in the high range. Consider discussing this with your healthcare provider."
            ),
            "Review Readings",
            "/health/vitals",
            now,
        ))
    } else if avg_systolic > bp::ELEVATED_SYSTOLIC || avg_diastolic > bp::ELEVATED_DIASTOLIC {
        Some(Insight::new(
            InsightKind::Warning,
            InsightPriority::Medium,
            HealthMetric::BloodPressure,
            "heart-pulse",
            "Elevated Blood Pressure",
            format!(
                "Your average blood pressure is {systolic:.0}/{diastolic:.0} mmHg, slightly above the optimal range. Small lifestyle changes can help bring it down."
            ),
            "See Tips",
            "/health/vitals",
            now,
        ))
    } else if avg_systolic <= bp::OPTIMAL_SYSTOLIC && avg_diastolic <= bp::OPTIMAL_DIASTOLIC {
        Some(Insight::new(
            InsightKind::Positive,
            InsightPriority::Low,
            HealthMetric::BloodPressure,
            "heart-pulse",
            "Healthy Blood Pressure",
            format!(
                "Your average blood pressure of {systolic:.0}/{diastolic:.0} mmHg is in the healthy range. Keep it up!"
            ),
            "View History",
            "/health/vitals",
            now,
        ))
    } else {
        None
    }
}

/// Resting heart rate rules over the bpm average
#[must_use]
pub fn analyze_heart_rate(snapshot: &HealthDataSnapshot, now: DateTime<Utc>) -> Option<Insight> {
    let avg = snapshot.average_heart_rate()?;
    let bpm = avg.round();

    if avg > hr::HIGH_RESTING {
        Some(Insight::new(
            InsightKind::Alert,
            InsightPriority::High,
            HealthMetric::HeartRate,
            "heart",
            "High Resting Heart Rate",
            format!(
                "Your average resting heart rate of {bpm:.0} bpm is above the typical range. Persistent elevation is worth a conversation with your doctor."
            ),
            "Review Readings",
            "/health/vitals",
            now,
        ))
    } else if avg < hr::LOW_RESTING {
        Some(Insight::new(
            InsightKind::Alert,
            InsightPriority::High,
            HealthMetric::HeartRate,
            "heart",
            "Low Resting Heart Rate",
            format!(
                "Your average resting heart rate of {bpm:.0} bpm is below the typical range. Unless you train regularly, consider checking in with your doctor."
            ),
            "Review Readings",
            "/health/vitals",
            now,
        ))
    } else if (hr::IDEAL_LOW..=hr::IDEAL_HIGH).contains(&avg) {
        Some(Insight::new(
            InsightKind::Positive,
            InsightPriority::Low,
            HealthMetric::HeartRate,
            "heart",
            "Healthy Resting Heart Rate",
            format!("Your average resting heart rate of {bpm:.0} bpm is right where it should be."),
            "View History",
            "/health/vitals",
            now,
        ))
    } else {
        None
    }
}

/// Sleep duration rules over the nightly average
#[must_use]
pub fn analyze_sleep(snapshot: &HealthDataSnapshot, now: DateTime<Utc>) -> Option<Insight> {
    let avg = snapshot.average_sleep_hours()?;

    if avg < sleep::SHORT_SLEEP {
        Some(Insight::new(
            InsightKind::Warning,
            InsightPriority::Medium,
            HealthMetric::Sleep,
            "moon",
            "Insufficient Sleep",
            format!(
                "You are averaging {avg:.1} hours of sleep per night, below the recommended 7-9 hours. A consistent bedtime can make a big difference."
            ),
            "Sleep Tips",
            "/health/sleep",
            now,
        ))
    } else if avg > sleep::LONG_SLEEP {
        Some(Insight::new(
            InsightKind::Warning,
            InsightPriority::Medium,
            HealthMetric::Sleep,
            "moon",
            "Excessive Sleep",
            format!(
                "You are averaging {avg:.1} hours of sleep per night, above the typical range. Consistently long sleep can signal poor sleep quality."
            ),
            "Sleep Tips",
            "/health/sleep",
            now,
        ))
    } else if (sleep::IDEAL_LOW..=sleep::IDEAL_HIGH).contains(&avg) {
        Some(Insight::new(
            InsightKind::Positive,
            InsightPriority::Low,
            HealthMetric::Sleep,
            "moon",
            "Great Sleep Habits",
            format!("You are averaging {avg:.1} hours of sleep per night, right in the recommended range."),
            "View History",
            "/health/sleep",
            now,
        ))
    } else {
        None
    }
}

/// Exercise rules over the weekly-normalized volume
///
/// Unlike the other metrics, an empty exercise log emits a warning rather
/// than staying silent.
#[must_use]
pub fn analyze_exercise(snapshot: &HealthDataSnapshot, now: DateTime<Utc>) -> Option<Insight> {
    let Some(weekly_minutes) = snapshot.weekly_exercise_minutes() else {
        return Some(Insight::new(
            InsightKind::Warning,
            InsightPriority::Medium,
            HealthMetric::Exercise,
            "activity",
            "No Exercise Records",
            "No exercise has been recorded in this period. Even light activity a few times a week has measurable benefits.",
            "Log Exercise",
            "/health/exercise",
            now,
        ));
    };
    let minutes = weekly_minutes.round();

    if weekly_minutes < exercise::WEEKLY_TARGET_MINUTES {
        Some(Insight::new(
            InsightKind::Warning,
            InsightPriority::Medium,
            HealthMetric::Exercise,
            "activity",
            "Below Recommended Activity Level",
            format!(
                "You are averaging {minutes:.0} minutes of exercise per week, below the recommended 150 minutes."
            ),
            "Plan Workouts",
            "/health/exercise",
            now,
        ))
    } else {
        Some(Insight::new(
            InsightKind::Positive,
            InsightPriority::Low,
            HealthMetric::Exercise,
            "activity",
            "Meeting Activity Goals",
            format!(
                "You are averaging {minutes:.0} minutes of exercise per week, meeting the recommended target. Well done!"
            ),
            "View History",
            "/health/exercise",
            now,
        ))
    }
}

/// Stress rules over the self-reported 0-10 average; silent with no entries
#[must_use]
pub fn analyze_stress(snapshot: &HealthDataSnapshot, now: DateTime<Utc>) -> Option<Insight> {
    let avg = snapshot.average_stress_level()?;

    if avg > stress::HIGH_LEVEL {
        Some(Insight::new(
            InsightKind::Alert,
            InsightPriority::High,
            HealthMetric::Stress,
            "zap",
            "High Stress Levels",
            format!(
                "Your average stress level of {avg:.1}/10 is high. Consider building short relaxation breaks into your day."
            ),
            "Stress Management",
            "/health/stress",
            now,
        ))
    } else if avg > stress::MODERATE_LEVEL {
        Some(Insight::new(
            InsightKind::Warning,
            InsightPriority::Medium,
            HealthMetric::Stress,
            "zap",
            "Elevated Stress",
            format!(
                "Your average stress level of {avg:.1}/10 is elevated. Identifying your main triggers is a good first step."
            ),
            "Stress Management",
            "/health/stress",
            now,
        ))
    } else {
        Some(Insight::new(
            InsightKind::Positive,
            InsightPriority::Low,
            HealthMetric::Stress,
            "zap",
            "Stress Under Control",
            format!("Your average stress level of {avg:.1}/10 is in a healthy range."),
            "View History",
            "/health/stress",
            now,
        ))
    }
}
