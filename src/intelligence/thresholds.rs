// ABOUTME: Banded scoring thresholds and ideal reference values per health metric
// ABOUTME: Single source of truth for scorer bands, insight rules, and trend sensitivity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

//! Metric thresholds used throughout the intelligence layer
//!
//! Band boundaries follow widely published clinical reference ranges (AHA
//! blood pressure categories, the 150 min/week WHO activity guideline, the
//! 7-9 h adult sleep recommendation). All banded scorers are monotonic step
//! functions; comparisons use `<=`, so ties resolve to the better band.

/// Blood pressure bands (mmHg) and penalties
pub mod blood_pressure {
    /// Optimal systolic upper bound
    pub const OPTIMAL_SYSTOLIC: f64 = 120.0;
    pub const ELEVATED_SYSTOLIC: f64 = 130.0;
    pub const STAGE1_SYSTOLIC: f64 = 140.0;
    pub const STAGE2_SYSTOLIC: f64 = 160.0;

    /// Optimal diastolic upper bound
    pub const OPTIMAL_DIASTOLIC: f64 = 80.0;
    pub const ELEVATED_DIASTOLIC: f64 = 85.0;
    pub const STAGE1_DIASTOLIC: f64 = 90.0;
    pub const STAGE2_DIASTOLIC: f64 = 100.0;

    /// Per-band score penalties, applied independently to each component
    pub const MINOR_PENALTY: i32 = 10;
    pub const MODERATE_PENALTY: i32 = 30;
    pub const SEVERE_PENALTY: i32 = 60;
    pub const CRITICAL_PENALTY: i32 = 80;

    /// Ideal mean arterial reference point used by the trend analyzer
    pub const IDEAL_MEAN_PRESSURE: f64 = 105.0;
}

/// Resting heart rate bands (bpm)
pub mod heart_rate {
    pub const IDEAL_LOW: f64 = 60.0;
    pub const IDEAL_HIGH: f64 = 80.0;
    pub const GOOD_LOW: f64 = 50.0;
    pub const GOOD_HIGH: f64 = 90.0;
    pub const FAIR_LOW: f64 = 40.0;
    pub const FAIR_HIGH: f64 = 100.0;
    pub const POOR_LOW: f64 = 35.0;
    pub const POOR_HIGH: f64 = 110.0;

    /// Insight rule boundaries on the raw average
    pub const HIGH_RESTING: f64 = 100.0;
    pub const LOW_RESTING: f64 = 50.0;

    /// Ideal resting rate used by the trend analyzer
    pub const IDEAL_BPM: f64 = 70.0;
}

/// Nightly sleep duration bands (hours)
pub mod sleep {
    pub const IDEAL_LOW: f64 = 7.0;
    pub const IDEAL_HIGH: f64 = 9.0;
    pub const GOOD_LOW: f64 = 6.0;
    pub const GOOD_HIGH: f64 = 10.0;
    pub const FAIR_LOW: f64 = 5.0;
    pub const FAIR_HIGH: f64 = 11.0;
    pub const POOR_LOW: f64 = 4.0;
    pub const POOR_HIGH: f64 = 12.0;

    /// Insight rule boundaries on the raw average
    pub const SHORT_SLEEP: f64 = 6.0;
    pub const LONG_SLEEP: f64 = 10.0;

    /// Ideal nightly hours used by the trend analyzer and recommendations
    pub const IDEAL_HOURS: f64 = 8.0;
    /// Below this average the sleep recommendation switches to improvement
    pub const RECOMMEND_BELOW_HOURS: f64 = 7.0;
}

/// Weekly exercise volume bands (minutes per week)
pub mod exercise {
    /// WHO / AHA guideline for moderate aerobic activity
    pub const WEEKLY_TARGET_MINUTES: f64 = 150.0;
    pub const GOOD_MINUTES: f64 = 100.0;
    pub const FAIR_MINUTES: f64 = 60.0;
    pub const LOW_MINUTES: f64 = 30.0;
}

/// Self-reported stress level bands (0-10 scale)
pub mod stress {
    pub const LOW_LEVEL: f64 = 3.0;
    pub const MODERATE_LEVEL: f64 = 5.0;
    pub const HIGH_LEVEL: f64 = 7.0;
}

/// Sub-score values shared by the banded scorers
pub mod scores {
    pub const MAX: u8 = 100;
    pub const BAND_GOOD: u8 = 80;
    pub const BAND_FAIR: u8 = 60;
    pub const BAND_POOR: u8 = 40;
    pub const BAND_WORST: u8 = 20;

    /// Stress uses its own coarser ladder
    pub const STRESS_LOW: u8 = 100;
    pub const STRESS_MODERATE: u8 = 70;
    pub const STRESS_HIGH: u8 = 40;
    pub const STRESS_SEVERE: u8 = 10;

    /// Neutral fallback when a metric has no readings
    pub const NEUTRAL_NO_DATA: u8 = 50;
    /// Exercise absence is itself a negative signal, scored below neutral
    pub const NO_EXERCISE_DATA: u8 = 30;
}

/// Composite score weights; must sum to exactly 1.0
pub mod weights {
    pub const BLOOD_PRESSURE: f64 = 0.25;
    pub const HEART_RATE: f64 = 0.20;
    pub const SLEEP: f64 = 0.25;
    pub const EXERCISE: f64 = 0.20;
    pub const STRESS: f64 = 0.10;
}

/// Composite score category bands
pub mod categories {
    pub const EXCELLENT_MIN: u8 = 81;
    pub const GOOD_MIN: u8 = 61;
    pub const FAIR_MIN: u8 = 41;
}

/// Trend sensitivity: below these percent changes the direction is "stable"
pub mod trend {
    pub const BLOOD_PRESSURE_SENSITIVITY_PCT: f64 = 2.0;
    pub const HEART_RATE_SENSITIVITY_PCT: f64 = 2.0;
    pub const SLEEP_SENSITIVITY_PCT: f64 = 5.0;
    pub const EXERCISE_SENSITIVITY_PCT: f64 = 10.0;
    pub const STRESS_SENSITIVITY_PCT: f64 = 10.0;

    /// Composite score delta treated as "stable" in either direction
    pub const SCORE_STABLE_BAND: i16 = 2;
}
