// ABOUTME: Clock abstraction so engine and cache time can be fixed in tests
// ABOUTME: Production code uses SystemClock; tests inject a controllable clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meridian Health Intelligence

use chrono::{DateTime, Utc};

/// Source of "now" for windowing, TTL checks, and snapshot timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
