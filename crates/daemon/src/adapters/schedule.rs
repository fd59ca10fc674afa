// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron evaluation behind a trait seam.
//!
//! Handlers only ever ask "when is the next trigger after this instant";
//! a bad expression is a per-row condition the caller skips, never a
//! reason to abort a whole spec.

use chrono::{DateTime, Duration, Utc};
use croner::Cron;
use thiserror::Error;

/// Schedule evaluation errors
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid cron expression `{expr}`: {reason}")]
    BadExpression { expr: String, reason: String },

    #[error("cron expression `{0}` has no future trigger")]
    NoFutureRun(String),
}

/// Evaluator yielding the next future trigger instant for a schedule
/// expression. Evaluation is in UTC.
pub trait Schedule: Send + Sync {
    fn next_run(&self, expr: &str, after: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError>;
}

/// Production evaluator for standard five-field cron expressions, with
/// optional seconds.
#[derive(Debug, Clone, Default)]
pub struct CronSchedule;

impl Schedule for CronSchedule {
    fn next_run(&self, expr: &str, after: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        let cron = Cron::new(expr).with_seconds_optional().parse().map_err(|e| {
            ScheduleError::BadExpression { expr: expr.to_string(), reason: e.to_string() }
        })?;
        cron.find_next_occurrence(&after, false)
            .map_err(|_| ScheduleError::NoFutureRun(expr.to_string()))
    }
}

/// Test evaluator: every expression triggers a fixed offset after
/// `after`, except expressions it is told to reject.
#[derive(Debug, Clone)]
pub struct FixedSchedule {
    offset: Duration,
    rejects: Vec<String>,
}

impl FixedSchedule {
    pub fn new(offset: Duration) -> Self {
        Self { offset, rejects: Vec::new() }
    }

    /// Treat `expr` as invalid.
    pub fn rejecting(mut self, expr: impl Into<String>) -> Self {
        self.rejects.push(expr.into());
        self
    }
}

impl Default for FixedSchedule {
    fn default() -> Self {
        Self::new(Duration::hours(1))
    }
}

impl Schedule for FixedSchedule {
    fn next_run(&self, expr: &str, after: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        if self.rejects.iter().any(|r| r == expr) {
            return Err(ScheduleError::BadExpression {
                expr: expr.to_string(),
                reason: "rejected by test schedule".to_string(),
            });
        }
        Ok(after + self.offset)
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
