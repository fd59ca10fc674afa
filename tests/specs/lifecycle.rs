// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent lifecycle specs: create, modify, delete through the poller.

use crate::prelude::*;

#[tokio::test]
async fn create_then_modify_then_delete() {
    let world = World::new();

    // Create.
    world.drop_spec("create-billing.md", CREATE_BILLING);
    assert_eq!(world.tick().await, 1);
    assert_eq!(world.ops_entries(), vec!["create-billing.APPLIED.md".to_string()]);

    let def = world.registry().get_agent("billing").await.unwrap().unwrap();
    assert_eq!(def.folder, "billing");
    assert_eq!(world.registry().tasks_for_owner("billing").await.unwrap().len(), 1);
    assert!(world.layout().instructions_file("billing").is_file());
    assert!(world.layout().settings_file("billing").is_file());

    // Modify: new task upserted next to the declared one, model updated.
    world.drop_spec(
        "modify-billing.md",
        "---\noperation: modify\nagent: billing\nmodel: opus\n---\n\n\
## Tasks\n\n- id: task-2\n  cron: 0 18 * * 5\n  prompt: weekly wrap-up\n",
    );
    assert_eq!(world.tick().await, 1);
    let def = world.registry().get_agent("billing").await.unwrap().unwrap();
    assert_eq!(def.model.as_deref(), Some("claude-opus-4-1"));
    assert_eq!(world.registry().tasks_for_owner("billing").await.unwrap().len(), 2);

    // Delete: registry emptied, pending work archived.
    std::fs::write(world.layout().tasks_dir("billing").join("inbox/open-item.md"), "x").unwrap();
    world.drop_spec("delete-billing.md", "---\noperation: delete\nagent: billing\n---\n");
    assert_eq!(world.tick().await, 1);

    assert!(world.registry().get_agent("billing").await.unwrap().is_none());
    assert!(world.registry().tasks_for_owner("billing").await.unwrap().is_empty());
    assert!(world.layout().tasks_dir("billing").join("archive/open-item.md").is_file());
    assert!(!world.layout().instructions_dir("billing").exists());

    assert_eq!(
        world.ops_entries(),
        vec![
            "create-billing.APPLIED.md".to_string(),
            "delete-billing.APPLIED.md".to_string(),
            "modify-billing.APPLIED.md".to_string(),
        ]
    );
}

#[tokio::test]
async fn create_writes_the_settings_bundle_and_schedules_from_the_clock() {
    let world = World::new();
    world.drop_spec("create-billing.md", CREATE_BILLING);
    world.tick().await;

    let raw = std::fs::read_to_string(world.layout().settings_file("billing")).unwrap();
    let bundle: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(bundle["env"]["ANTHROPIC_API_KEY"], "sk-test-123");

    let tasks = world.registry().tasks_for_owner("billing").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].next_run, world.clock().now_utc() + chrono::Duration::hours(1));
}

#[tokio::test]
async fn recreate_after_delete_succeeds_and_keeps_the_archive() {
    let world = World::new();

    world.drop_spec("create-billing.md", CREATE_BILLING);
    world.tick().await;
    std::fs::write(world.layout().tasks_dir("billing").join("active/wip.md"), "wip").unwrap();

    world.drop_spec("delete-billing.md", "---\noperation: delete\nagent: billing\n---\n");
    world.tick().await;
    assert!(world.registry().get_agent("billing").await.unwrap().is_none());

    world.drop_spec("create-billing-v2.md", CREATE_BILLING);
    world.tick().await;

    assert!(world.registry().get_agent("billing").await.unwrap().is_some());
    assert!(world.layout().tasks_dir("billing").join("archive/wip.md").is_file());
    assert!(world.read_ops("create-billing-v2.APPLIED.md").contains("billing"));
}

#[tokio::test]
async fn processed_files_are_never_dispatched_twice() {
    let world = World::new();
    world.drop_spec("create-billing.md", CREATE_BILLING);

    assert_eq!(world.tick().await, 1);
    for _ in 0..3 {
        assert_eq!(world.tick().await, 0);
    }
}
