// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External collaborators behind trait seams.
//!
//! The daemon talks to a persistent agent/task registry, a cron
//! evaluator, and a secret store. Each is a trait so handlers stay
//! testable and a different backend can be slotted in without touching
//! handler logic.

mod registry;
mod schedule;
mod secrets;

pub use registry::{FileRegistry, MemRegistry, Registry, RegistryError};
pub use schedule::{CronSchedule, FixedSchedule, Schedule, ScheduleError};
pub use secrets::{EnvSecretStore, MapSecretStore, SecretStore};
