// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for workspace specs.

use std::time::Duration;

use roster_core::{FakeClock, Layout, ModelAliases, SpecState};
use roster_daemon::{
    FixedSchedule, HandlerCtx, MapSecretStore, MemRegistry, Poller, SelfIdentity,
};

pub use roster_core::{with_state, Clock};
pub use roster_daemon::Registry;

/// One spec world: a temp root, the poller, and its collaborators.
pub struct World {
    // Held so the tree outlives the poller.
    #[allow(dead_code)]
    dir: tempfile::TempDir,
    poller: Poller<MemRegistry, FixedSchedule, MapSecretStore, FakeClock>,
}

impl World {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let ctx = HandlerCtx {
            layout: Layout::new(dir.path()),
            registry: MemRegistry::new(),
            schedule: FixedSchedule::default(),
            secrets: MapSecretStore::new([("ANTHROPIC_API_KEY", "sk-test-123")]),
            models: ModelAliases::builtin(),
            identity: SelfIdentity::default(),
            clock: FakeClock::new(),
            required_env: vec!["ANTHROPIC_API_KEY".to_string()],
        };
        let poller = Poller::new(ctx, Duration::from_millis(20));
        Self { dir, poller }
    }

    pub fn layout(&self) -> &Layout {
        &self.poller.ctx().layout
    }

    pub fn registry(&self) -> &MemRegistry {
        &self.poller.ctx().registry
    }

    pub fn clock(&self) -> &FakeClock {
        &self.poller.ctx().clock
    }

    /// Drop a spec file into the watched directory.
    pub fn drop_spec(&self, name: &str, content: &str) {
        std::fs::create_dir_all(self.layout().ops_dir()).unwrap();
        std::fs::write(self.layout().ops_dir().join(name), content).unwrap();
    }

    /// Run one poll pass; returns the number of dispatched files.
    pub async fn tick(&self) -> usize {
        self.poller.tick().await.unwrap()
    }

    /// Entry names in the watched directory, sorted.
    pub fn ops_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.layout().ops_dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }

    pub fn read_ops(&self, name: &str) -> String {
        std::fs::read_to_string(self.layout().ops_dir().join(name)).unwrap()
    }

    /// Operator approval: the external rename from PENDING_APPROVAL to
    /// APPROVED.
    pub fn approve(&self, pending_name: &str) {
        let approved = with_state(pending_name, SpecState::Approved);
        std::fs::rename(
            self.layout().ops_dir().join(pending_name),
            self.layout().ops_dir().join(approved),
        )
        .unwrap();
    }
}

pub const CREATE_BILLING: &str = "\
---
operation: create
agent: billing
---

## Instructions

You are the billing agent.
Process invoices from the inbox.

## Scheduled Tasks

- id: task-1
  cron: 0 9 * * 1
  prompt: summarize the inbox
";
