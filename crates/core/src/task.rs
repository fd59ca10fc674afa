// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduled task entity: one cron-triggered job bound to an agent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a scheduled task.
    ///
    /// Spec rows may declare an explicit id (taken verbatim, used for
    /// upserts); rows without one get a generated `task-` id.
    pub struct TaskId("task-");
}

/// Conversation context a task's prompt is delivered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextMode {
    /// Shared group context with the operator.
    Group,
    /// Fresh isolated context per run.
    Isolated,
}

crate::simple_display! {
    ContextMode {
        Group => "group",
        Isolated => "isolated",
    }
}

impl ContextMode {
    /// Lenient parse used by the spec row decoder; anything that is not
    /// explicitly isolated runs in the group context.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("isolated") {
            ContextMode::Isolated
        } else {
            ContextMode::Group
        }
    }
}

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Paused,
}

crate::simple_display! {
    TaskStatus {
        Active => "active",
        Paused => "paused",
    }
}

/// One cron-triggered job owned by an agent.
///
/// Invariant: `next_run` is the next future instant implied by `schedule`
/// at the moment it was last computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: TaskId,
    /// Owning agent's folder.
    pub folder: String,
    /// Routing identity the prompt is delivered to.
    pub address: String,
    pub prompt: String,
    /// Cron expression evaluated by the schedule adapter.
    pub schedule: String,
    pub context: ContextMode,
    pub next_run: DateTime<Utc>,
    pub status: TaskStatus,
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
