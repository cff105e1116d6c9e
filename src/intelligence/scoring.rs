// ABOUTME: Metric scorers and the weighted composite health score aggregator
// ABOUTME: Five pure banded scorers plus period-over-period score comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! # Health Scoring
//!
//! Five independent pure functions map aggregated metric values to 0-100
//! sub-scores using banded thresholds; the aggregator combines them with
//! fixed weights into one composite score, category, and period-over-period
//! delta. Metrics with no readings fall back to a neutral 50, except
//! exercise: an empty exercise log scores 30, because not exercising is
//! itself a negative signal rather than missing information.

use super::thresholds::{
    blood_pressure as bp, categories, exercise, heart_rate as hr, scores, sleep, stress, trend,
    weights,
};
use crate::models::{HealthDataSnapshot, HealthMetric};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One metric's contribution to the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    /// Sub-score, 0-100
    pub score: u8,
    /// Fixed weight, 0-1; all weights sum to exactly 1.0
    pub weight: f64,
}

/// Composite score category bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreCategory {
    /// Category for a composite score
    #[must_use]
    pub const fn for_score(score: u8) -> Self {
        if score >= categories::EXCELLENT_MIN {
            Self::Excellent
        } else if score >= categories::GOOD_MIN {
            Self::Good
        } else if score >= categories::FAIR_MIN {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

/// Direction of a period-over-period change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
    Stable,
}

/// The composite health score with its components and delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreResult {
    /// Weighted composite, 0-100, rounded
    pub score: u8,
    pub category: ScoreCategory,
    pub category_label: String,
    /// Composite recomputed over the shifted previous window
    pub previous_score: u8,
    /// `score - previous_score`
    pub change: i16,
    pub change_direction: ChangeDirection,
    pub components: BTreeMap<HealthMetric, MetricScore>,
}

/// Blood pressure sub-score: start at 100, subtract banded penalties
/// independently for systolic and diastolic, clamp to 0-100
#[must_use]
pub fn calculate_blood_pressure_score(snapshot: &HealthDataSnapshot) -> u8 {
    let Some((avg_systolic, avg_diastolic)) = snapshot.average_blood_pressure() else {
        return scores::NEUTRAL_NO_DATA;
    };

    let systolic_penalty = if avg_systolic <= bp::OPTIMAL_SYSTOLIC {
        0
    } else if avg_systolic <= bp::ELEVATED_SYSTOLIC {
        bp::MINOR_PENALTY
    } else if avg_systolic <= bp::STAGE1_SYSTOLIC {
        bp::MODERATE_PENALTY
    } else if avg_systolic <= bp::STAGE2_SYSTOLIC {
        bp::SEVERE_PENALTY
    } else {
        bp::CRITICAL_PENALTY
    };

    let diastolic_penalty = if avg_diastolic <= bp::OPTIMAL_DIASTOLIC {
        0
    } else if avg_diastolic <= bp::ELEVATED_DIASTOLIC {
        bp::MINOR_PENALTY
    } else if avg_diastolic <= bp::STAGE1_DIASTOLIC {
        bp::MODERATE_PENALTY
    } else if avg_diastolic <= bp::STAGE2_DIASTOLIC {
        bp::SEVERE_PENALTY
    } else {
        bp::CRITICAL_PENALTY
    };

    let score = i32::from(scores::MAX) - systolic_penalty - diastolic_penalty;
    u8::try_from(score.clamp(0, i32::from(scores::MAX))).unwrap_or(0)
}

/// Heart rate sub-score over nested bpm bands
#[must_use]
pub fn calculate_heart_rate_score(snapshot: &HealthDataSnapshot) -> u8 {
    let Some(avg) = snapshot.average_heart_rate() else {
        return scores::NEUTRAL_NO_DATA;
    };

    if (hr::IDEAL_LOW..=hr::IDEAL_HIGH).contains(&avg) {
        scores::MAX
    } else if (hr::GOOD_LOW..=hr::GOOD_HIGH).contains(&avg) {
        scores::BAND_GOOD
    } else if (hr::FAIR_LOW..=hr::FAIR_HIGH).contains(&avg) {
        scores::BAND_FAIR
    } else if (hr::POOR_LOW..=hr::POOR_HIGH).contains(&avg) {
        scores::BAND_POOR
    } else {
        scores::BAND_WORST
    }
}

/// Sleep sub-score over nested nightly-hours bands
#[must_use]
pub fn calculate_sleep_score(snapshot: &HealthDataSnapshot) -> u8 {
    let Some(avg) = snapshot.average_sleep_hours() else {
        return scores::NEUTRAL_NO_DATA;
    };

    if (sleep::IDEAL_LOW..=sleep::IDEAL_HIGH).contains(&avg) {
        scores::MAX
    } else if (sleep::GOOD_LOW..=sleep::GOOD_HIGH).contains(&avg) {
        scores::BAND_GOOD
    } else if (sleep::FAIR_LOW..=sleep::FAIR_HIGH).contains(&avg) {
        scores::BAND_FAIR
    } else if (sleep::POOR_LOW..=sleep::POOR_HIGH).contains(&avg) {
        scores::BAND_POOR
    } else {
        scores::BAND_WORST
    }
}

/// Exercise sub-score from minutes normalized to a weekly rate
///
/// Zero entries score 30, deliberately below the neutral 50 the other
/// scorers fall back to.
#[must_use]
pub fn calculate_exercise_score(snapshot: &HealthDataSnapshot) -> u8 {
    let Some(weekly_minutes) = snapshot.weekly_exercise_minutes() else {
        return scores::NO_EXERCISE_DATA;
    };

    if weekly_minutes >= exercise::WEEKLY_TARGET_MINUTES {
        scores::MAX
    } else if weekly_minutes >= exercise::GOOD_MINUTES {
        scores::BAND_GOOD
    } else if weekly_minutes >= exercise::FAIR_MINUTES {
        scores::BAND_FAIR
    } else if weekly_minutes >= exercise::LOW_MINUTES {
        scores::BAND_POOR
    } else {
        scores::BAND_WORST
    }
}

/// Stress sub-score over the self-reported 0-10 average
#[must_use]
pub fn calculate_stress_score(snapshot: &HealthDataSnapshot) -> u8 {
    let Some(avg) = snapshot.average_stress_level() else {
        return scores::NEUTRAL_NO_DATA;
    };

    if avg <= stress::LOW_LEVEL {
        scores::STRESS_LOW
    } else if avg <= stress::MODERATE_LEVEL {
        scores::STRESS_MODERATE
    } else if avg <= stress::HIGH_LEVEL {
        scores::STRESS_HIGH
    } else {
        scores::STRESS_SEVERE
    }
}

/// All five sub-scores with their fixed weights
#[must_use]
pub fn score_components(snapshot: &HealthDataSnapshot) -> BTreeMap<HealthMetric, MetricScore> {
    let mut components = BTreeMap::new();
    components.insert(
        HealthMetric::BloodPressure,
        MetricScore {
            score: calculate_blood_pressure_score(snapshot),
            weight: weights::BLOOD_PRESSURE,
        },
    );
    components.insert(
        HealthMetric::HeartRate,
        MetricScore {
            score: calculate_heart_rate_score(snapshot),
            weight: weights::HEART_RATE,
        },
    );
    components.insert(
        HealthMetric::Sleep,
        MetricScore {
            score: calculate_sleep_score(snapshot),
            weight: weights::SLEEP,
        },
    );
    components.insert(
        HealthMetric::Exercise,
        MetricScore {
            score: calculate_exercise_score(snapshot),
            weight: weights::EXERCISE,
        },
    );
    components.insert(
        HealthMetric::Stress,
        MetricScore {
            score: calculate_stress_score(snapshot),
            weight: weights::STRESS,
        },
    );
    components
}

/// Weighted composite of a component map, rounded to the nearest integer
#[must_use]
pub fn composite_score(components: &BTreeMap<HealthMetric, MetricScore>) -> u8 {
    let weighted: f64 = components
        .values()
        .map(|c| f64::from(c.score) * c.weight)
        .sum();
    let rounded = weighted.round().clamp(0.0, f64::from(scores::MAX));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=100 above
    {
        rounded as u8
    }
}

/// Compose the full health score result from the current and previous windows
#[must_use]
pub fn compose_health_score(
    current: &HealthDataSnapshot,
    previous: &HealthDataSnapshot,
) -> HealthScoreResult {
    let components = score_components(current);
    let score = composite_score(&components);

    let previous_components = score_components(previous);
    let previous_score = composite_score(&previous_components);

    let change = i16::from(score) - i16::from(previous_score);
    let change_direction = if change > trend::SCORE_STABLE_BAND {
        ChangeDirection::Up
    } else if change < -trend::SCORE_STABLE_BAND {
        ChangeDirection::Down
    } else {
        ChangeDirection::Stable
    };

    let category = ScoreCategory::for_score(score);
    HealthScoreResult {
        score,
        category,
        category_label: category.label().to_owned(),
        previous_score,
        change,
        change_direction,
        components,
    }
}
