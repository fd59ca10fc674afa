// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared builders for handler and poller tests.

use roster_core::{FakeClock, Layout, ModelAliases};
use roster_spec::{parse_spec, SpecRecord};

use crate::adapters::{FixedSchedule, MapSecretStore, MemRegistry};
use crate::gate::SelfIdentity;

use super::HandlerCtx;

pub(crate) type TestCtx = HandlerCtx<MemRegistry, FixedSchedule, MapSecretStore, FakeClock>;

pub(crate) struct TestEnv {
    // Held so the tempdir outlives the ctx borrowing paths under it.
    #[allow(dead_code)]
    pub dir: tempfile::TempDir,
    pub ctx: TestCtx,
}

pub(crate) fn test_env() -> TestEnv {
    test_env_with(FixedSchedule::default())
}

pub(crate) fn test_env_with(schedule: FixedSchedule) -> TestEnv {
    let dir = tempfile::tempdir().unwrap();
    let ctx = HandlerCtx {
        layout: Layout::new(dir.path()),
        registry: MemRegistry::new(),
        schedule,
        secrets: MapSecretStore::new([
            ("ANTHROPIC_API_KEY", "sk-test-123"),
            ("SHARED_TEAM_KEY", "team-456"),
        ]),
        models: ModelAliases::builtin(),
        identity: SelfIdentity::default(),
        clock: FakeClock::new(),
        required_env: vec!["ANTHROPIC_API_KEY".to_string()],
    };
    TestEnv { dir, ctx }
}

pub(crate) fn spec(text: &str) -> SpecRecord {
    parse_spec(text).unwrap()
}

pub(crate) const CREATE_BILLING: &str = "\
---
operation: create
agent: billing
---

## Instructions

You are the billing agent.
Process invoices from the inbox.
";

/// A create spec with `n` instruction lines.
pub(crate) fn create_with_lines(agent: &str, n: usize) -> String {
    let doc: Vec<String> = (1..=n).map(|i| format!("instruction line {i}")).collect();
    format!(
        "---\noperation: create\nagent: {agent}\n---\n\n## Instructions\n\n{}\n",
        doc.join("\n")
    )
}
