// ABOUTME: Derives an ordered, deduplicated, capped set of action items
// ABOUTME: Maps high-priority insights and data gaps to templated recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Recommendation Engine
//!
//! Walks the high-priority insights in generation order, mapping blood
//! pressure, heart rate, and stress findings to templated action items, then
//! adds at most one sleep item and at most one exercise item from the raw
//! data, and finally pads with a fixed two-entry filler pool (hydration,
//! nutrition) until five items exist or the pool runs dry. Priorities are
//! sequential integers in insertion order; the final list is sorted by them
//! and truncated to five.

use super::insights::{Insight, InsightPriority};
use super::thresholds::{exercise, sleep};
use crate::constants::analysis::MAX_RECOMMENDATIONS;
use crate::models::{HealthDataSnapshot, HealthMetric};
use serde::{Deserialize, Serialize};

/// Action item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Nutrition,
    Stress,
    Sleep,
    Exercise,
    Hydration,
    Tracking,
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Nutrition => "nutrition",
            Self::Stress => "stress",
            Self::Sleep => "sleep",
            Self::Exercise => "exercise",
            Self::Hydration => "hydration",
            Self::Tracking => "tracking",
        };
        write!(f, "{name}")
    }
}

/// A single prioritized action item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub category: RecommendationCategory,
    /// Ascending rank; the returned list is sorted by this
    pub priority: u8,
}

impl Recommendation {
    fn new(
        priority: u8,
        category: RecommendationCategory,
        icon: &str,
        title: &str,
        description: &str,
    ) -> Self {
        Self {
            id: format!("rec-{category}-{priority}"),
            icon: icon.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            category,
            priority,
        }
    }
}

/// Generate the capped, ordered recommendation list
///
/// The result always holds between one and five items: the filler pool
/// guarantees the lower bound even when nothing else fires.
#[must_use]
pub fn generate_recommendations(
    insights: &[Insight],
    snapshot: &HealthDataSnapshot,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let mut next_priority = sequence_from(1);

    for insight in insights
        .iter()
        .filter(|i| i.priority == InsightPriority::High)
    {
        if insight.related_metrics.contains(&HealthMetric::BloodPressure) {
            recommendations.push(Recommendation::new(
                next_priority(),
                RecommendationCategory::Nutrition,
                "utensils",
                "Cut Back on Sodium",
                "A lower-sodium diet with more vegetables and whole grains helps bring blood pressure down over time.",
            ));
        } else if insight.related_metrics.contains(&HealthMetric::HeartRate) {
            recommendations.push(Recommendation::new(
                next_priority(),
                RecommendationCategory::Stress,
                "wind",
                "Practice Daily Breathing Exercises",
                "Five minutes of slow, deep breathing each day can help bring your resting heart rate toward a healthy range.",
            ));
        } else if insight.related_metrics.contains(&HealthMetric::Stress) {
            recommendations.push(Recommendation::new(
                next_priority(),
                RecommendationCategory::Stress,
                "wind",
                "Schedule Wind-Down Time",
                "Blocking out a short daily wind-down period reliably lowers self-reported stress within a few weeks.",
            ));
        }
    }

    match snapshot.average_sleep_hours() {
        Some(avg) if avg < sleep::RECOMMEND_BELOW_HOURS => {
            recommendations.push(Recommendation::new(
                next_priority(),
                RecommendationCategory::Sleep,
                "moon",
                "Improve Your Sleep Routine",
                "Aim for 7-9 hours per night. A fixed bedtime and a screen-free wind-down hour are the highest-leverage changes.",
            ));
        }
        None => {
            recommendations.push(Recommendation::new(
                next_priority(),
                RecommendationCategory::Sleep,
                "moon",
                "Start Tracking Your Sleep",
                "Logging your sleep for a couple of weeks gives the engine enough signal to spot patterns and tailor advice.",
            ));
        }
        Some(_) => {}
    }

    match snapshot.weekly_exercise_minutes() {
        None => {
            recommendations.push(Recommendation::new(
                next_priority(),
                RecommendationCategory::Exercise,
                "activity",
                "Start Exercising",
                "Begin with two or three short walks a week and build from there. Any recorded activity counts.",
            ));
        }
        Some(weekly) if weekly < exercise::WEEKLY_TARGET_MINUTES => {
            recommendations.push(Recommendation::new(
                next_priority(),
                RecommendationCategory::Exercise,
                "activity",
                "Increase Your Activity",
                "You are below the recommended 150 minutes per week. Adding one more session is usually the easiest path.",
            ));
        }
        Some(_) => {}
    }

    // Fixed filler pool, in order, until five items or the pool is exhausted
    if recommendations.len() < MAX_RECOMMENDATIONS {
        recommendations.push(Recommendation::new(
            next_priority(),
            RecommendationCategory::Hydration,
            "droplet",
            "Stay Hydrated",
            "Aim for around two liters of water spread over the day; more on exercise days.",
        ));
    }
    if recommendations.len() < MAX_RECOMMENDATIONS {
        recommendations.push(Recommendation::new(
            next_priority(),
            RecommendationCategory::Nutrition,
            "utensils",
            "Eat More Whole Foods",
            "Building meals around vegetables, lean protein, and whole grains supports every metric this engine tracks.",
        ));
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// The fixed item returned on the insufficient-data path
#[must_use]
pub fn data_entry_recommendation() -> Recommendation {
    Recommendation::new(
        1,
        RecommendationCategory::Tracking,
        "clipboard",
        "Start Logging Your Health Data",
        "Record a few vitals, sleep, or exercise entries so the engine has enough signal to generate insights.",
    )
}

/// Sequential integer priorities starting at `start`
fn sequence_from(start: u8) -> impl FnMut() -> u8 {
    let mut next = start;
    move || {
        let current = next;
        next += 1;
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::insights::generate_insights;
    use crate::models::{BloodPressureReading, DateRange, ExerciseEntry, SleepEntry, StressEntry};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    fn empty_snapshot() -> HealthDataSnapshot {
        HealthDataSnapshot::empty(Uuid::new_v4(), DateRange::ending_at(now(), 30))
    }

    fn assert_bounds_and_order(recommendations: &[Recommendation]) {
        assert!(!recommendations.is_empty());
        assert!(recommendations.len() <= 5);
        assert!(recommendations
            .windows(2)
            .all(|w| w[0].priority <= w[1].priority));
    }

    #[test]
    fn test_empty_snapshot_still_yields_recommendations() {
        let recommendations = generate_recommendations(&[], &empty_snapshot());

        // Sleep tracking + exercise start + two fillers
        assert_eq!(recommendations.len(), 4);
        assert_bounds_and_order(&recommendations);
        assert!(recommendations
            .iter()
            .any(|r| r.category == RecommendationCategory::Sleep));
        assert!(recommendations
            .iter()
            .any(|r| r.title == "Start Exercising"));
        assert!(recommendations
            .iter()
            .any(|r| r.category == RecommendationCategory::Hydration));
    }

    #[test]
    fn test_healthy_user_gets_only_fillers() {
        let mut snapshot = empty_snapshot();
        snapshot.sleep.push(SleepEntry {
            recorded_at: now() - Duration::days(1),
            duration_hours: 8.0,
            quality: None,
            notes: None,
        });
        snapshot.exercise.push(ExerciseEntry {
            recorded_at: now() - Duration::days(1),
            activity: "run".into(),
            duration_minutes: 180.0,
            intensity: None,
            calories: None,
        });

        let recommendations = generate_recommendations(&[], &snapshot);
        assert_eq!(recommendations.len(), 2);
        assert_eq!(
            recommendations[0].category,
            RecommendationCategory::Hydration
        );
        assert_eq!(
            recommendations[1].category,
            RecommendationCategory::Nutrition
        );
        assert_bounds_and_order(&recommendations);
    }

    #[test]
    fn test_high_priority_insights_map_to_categories() {
        let mut snapshot = empty_snapshot();
        snapshot.blood_pressure.push(BloodPressureReading {
            recorded_at: now() - Duration::days(1),
            systolic: 155.0,
            diastolic: 95.0,
        });
        snapshot.stress.push(StressEntry {
            recorded_at: now() - Duration::days(1),
            level: 9,
            triggers: vec![],
        });

        let insights = generate_insights(&snapshot, now());
        let recommendations = generate_recommendations(&insights, &snapshot);

        assert_bounds_and_order(&recommendations);
        // Blood pressure alert -> nutrition item, stress alert -> stress item
        assert_eq!(
            recommendations[0].category,
            RecommendationCategory::Nutrition
        );
        assert!(recommendations
            .iter()
            .any(|r| r.category == RecommendationCategory::Stress));
    }

    #[test]
    fn test_list_capped_at_five() {
        let mut snapshot = empty_snapshot();
        // Fire everything: BP alert, stress alert, short sleep, low exercise
        snapshot.blood_pressure.push(BloodPressureReading {
            recorded_at: now() - Duration::days(1),
            systolic: 165.0,
            diastolic: 102.0,
        });
        snapshot.stress.push(StressEntry {
            recorded_at: now() - Duration::days(1),
            level: 9,
            triggers: vec![],
        });
        snapshot.sleep.push(SleepEntry {
            recorded_at: now() - Duration::days(1),
            duration_hours: 5.0,
            quality: None,
            notes: None,
        });
        snapshot.exercise.push(ExerciseEntry {
            recorded_at: now() - Duration::days(1),
            activity: "walk".into(),
            duration_minutes: 10.0,
            intensity: None,
            calories: None,
        });

        let insights = generate_insights(&snapshot, now());
        let recommendations = generate_recommendations(&insights, &snapshot);
        assert_eq!(recommendations.len(), 5);
        assert_bounds_and_order(&recommendations);
    }

    #[test]
    fn test_sufficient_exercise_adds_no_exercise_item() {
        let mut snapshot = empty_snapshot();
        snapshot.exercise.push(ExerciseEntry {
            recorded_at: now() - Duration::days(1),
            activity: "cycling".into(),
            duration_minutes: 200.0,
            intensity: None,
            calories: None,
        });

        let recommendations = generate_recommendations(&[], &snapshot);
        assert!(!recommendations
            .iter()
            .any(|r| r.category == RecommendationCategory::Exercise));
    }

    #[test]
    fn test_data_entry_recommendation_shape() {
        let rec = data_entry_recommendation();
        assert_eq!(rec.category, RecommendationCategory::Tracking);
        assert_eq!(rec.priority, 1);
    }
}
