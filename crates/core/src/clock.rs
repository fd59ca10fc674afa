// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// A clock that provides the current UTC time
pub trait Clock: Clone + Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl FakeClock {
    /// Starts at a fixed, deterministic instant.
    pub fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);
        Self { current: Arc::new(Mutex::new(start)) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        *self.current.lock() += duration;
    }

    /// Set the clock to a specific instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock() = instant;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
