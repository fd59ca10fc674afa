// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation specs: everything that must land in FAILED, with a note.

use crate::prelude::*;
use roster_daemon::NOTE_MARKER;

#[tokio::test]
async fn malformed_header_fails_with_a_note() {
    let world = World::new();
    world.drop_spec("create-billing.md", "## Instructions\n\nno header at all\n");

    world.tick().await;

    assert_eq!(world.ops_entries(), vec!["create-billing.FAILED.md".to_string()]);
    let content = world.read_ops("create-billing.FAILED.md");
    assert!(content.contains(NOTE_MARKER));
    assert!(content.contains("header"));
}

#[tokio::test]
async fn unknown_operation_fails() {
    let world = World::new();
    world.drop_spec("create-billing.md", "---\noperation: clone\nagent: billing\n---\n");
    world.tick().await;
    assert!(world.read_ops("create-billing.FAILED.md").contains("clone"));
}

#[tokio::test]
async fn duplicate_identity_fails_the_second_create_only() {
    let world = World::new();
    world.drop_spec("create-billing.md", CREATE_BILLING);
    world.tick().await;
    world.drop_spec("create-billing-again.md", CREATE_BILLING);
    world.tick().await;

    assert_eq!(
        world.ops_entries(),
        vec![
            "create-billing-again.FAILED.md".to_string(),
            "create-billing.APPLIED.md".to_string(),
        ]
    );
    assert!(world.read_ops("create-billing-again.FAILED.md").contains("already exists"));
    // The first registration is intact.
    assert!(world.registry().get_agent("billing").await.unwrap().is_some());
}

#[tokio::test]
async fn isolation_violation_names_the_other_agent_and_mutates_nothing() {
    let world = World::new();
    world.drop_spec(
        "create-billing.md",
        "\
---
operation: create
agent: billing
---

## Instructions

A ten-line document would be fine; this one is shorter.

## Mounts

- host: tasks/other-agent
  container: tasks
",
    );

    world.tick().await;

    assert_eq!(world.ops_entries(), vec!["create-billing.FAILED.md".to_string()]);
    assert!(world.read_ops("create-billing.FAILED.md").contains("other-agent"));
    assert!(world.registry().get_agent("billing").await.unwrap().is_none());
    assert!(!world.layout().tasks_dir("billing").exists());
}

#[tokio::test]
async fn oversized_instruction_document_fails() {
    let world = World::new();
    let doc: Vec<String> = (1..=151).map(|i| format!("line {i}")).collect();
    world.drop_spec(
        "create-billing.md",
        &format!(
            "---\noperation: create\nagent: billing\n---\n\n## Instructions\n\n{}\n",
            doc.join("\n")
        ),
    );

    world.tick().await;

    assert!(world.read_ops("create-billing.FAILED.md").contains("151"));
    assert!(world.registry().get_agent("billing").await.unwrap().is_none());
}

#[tokio::test]
async fn modify_of_an_unknown_agent_fails() {
    let world = World::new();
    world.drop_spec("modify-billing.md", "---\noperation: modify\nagent: billing\n---\n");
    world.tick().await;
    assert!(world.read_ops("modify-billing.FAILED.md").contains("no agent named"));
}
