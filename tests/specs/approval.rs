// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Self-modification approval specs.
//!
//! Create/modify specs naming the controller wait in PENDING_APPROVAL
//! until an operator renames them; delete specs naming the controller
//! hard-fail immediately.

use crate::prelude::*;
use roster_core::AgentDefinition;

const MODIFY_SELF: &str = "\
---
operation: modify
agent: roster
---

## Instructions

Updated controller charter.
";

async fn world_with_controller() -> World {
    let world = World::new();
    let controller = AgentDefinition::builder().name("roster").folder("roster").build();
    world.registry().put_agent(controller).await.unwrap();
    world
}

#[tokio::test]
async fn self_modify_is_held_with_no_mutation() {
    let world = world_with_controller().await;
    world.drop_spec("modify-roster.md", MODIFY_SELF);

    world.tick().await;

    assert_eq!(world.ops_entries(), vec!["modify-roster.PENDING_APPROVAL.md".to_string()]);
    assert!(!world.layout().instructions_file("roster").exists());

    // The held file explains what to do next.
    let content = world.read_ops("modify-roster.PENDING_APPROVAL.md");
    assert!(content.contains("APPROVED"));

    // It stays held across ticks.
    assert_eq!(world.tick().await, 0);
}

#[tokio::test]
async fn approved_spec_applies_like_any_other() {
    let world = world_with_controller().await;
    world.drop_spec("modify-roster.md", MODIFY_SELF);
    world.tick().await;

    world.approve("modify-roster.PENDING_APPROVAL.md");
    assert_eq!(world.tick().await, 1);

    assert_eq!(world.ops_entries(), vec!["modify-roster.APPLIED.md".to_string()]);
    let doc = std::fs::read_to_string(world.layout().instructions_file("roster")).unwrap();
    assert_eq!(doc, "Updated controller charter.\n");
}

#[tokio::test]
async fn self_create_is_gated_too() {
    let world = World::new();
    world.drop_spec(
        "create-rosterd.md",
        "---\noperation: create\nagent: rosterd\n---\n\n## Instructions\n\nDoc.\n",
    );
    world.tick().await;
    assert_eq!(world.ops_entries(), vec!["create-rosterd.PENDING_APPROVAL.md".to_string()]);
}

#[tokio::test]
async fn self_delete_hard_fails_instead_of_waiting() {
    let world = world_with_controller().await;
    world.drop_spec("delete-roster.md", "---\noperation: delete\nagent: roster\n---\n");

    world.tick().await;

    assert_eq!(world.ops_entries(), vec!["delete-roster.FAILED.md".to_string()]);
    assert!(world.read_ops("delete-roster.FAILED.md").contains("refusing to delete"));
    assert!(world.registry().get_agent("roster").await.unwrap().is_some());
}
