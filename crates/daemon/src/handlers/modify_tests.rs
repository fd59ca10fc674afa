// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::handlers::test_helpers::{create_with_lines, spec, test_env, CREATE_BILLING};
use crate::handlers::MAX_INSTRUCTION_LINES;
use roster_core::AgentDefinition;

async fn seeded() -> crate::handlers::test_helpers::TestEnv {
    let env = test_env();
    crate::handlers::apply(&env.ctx, &spec(CREATE_BILLING)).await.unwrap();
    env
}

fn modify(body: &str) -> String {
    format!("---\noperation: modify\nagent: billing\n---\n\n{body}")
}

#[tokio::test]
async fn unknown_target_is_rejected() {
    let env = test_env();
    let err = apply(&env.ctx, &spec(&modify("## Append\n\nmore\n"))).await.unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(ref name) if name == "billing"));
}

#[tokio::test]
async fn instructions_section_overwrites_the_document() {
    let env = seeded().await;
    apply(&env.ctx, &spec(&modify("## Instructions\n\nRewritten from scratch.\n"))).await.unwrap();

    let doc = std::fs::read_to_string(env.ctx.layout.instructions_file("billing")).unwrap();
    assert_eq!(doc, "Rewritten from scratch.\n");
}

#[tokio::test]
async fn append_extends_the_document() {
    let env = seeded().await;
    apply(&env.ctx, &spec(&modify("## Append\n\nAlso watch the dunning queue.\n"))).await.unwrap();

    let doc = std::fs::read_to_string(env.ctx.layout.instructions_file("billing")).unwrap();
    assert!(doc.starts_with("You are the billing agent."));
    assert!(doc.ends_with("Also watch the dunning queue.\n"));
}

#[tokio::test]
async fn append_pushing_past_the_ceiling_leaves_the_document_unmodified() {
    let env = test_env();
    crate::handlers::apply(&env.ctx, &spec(&create_with_lines("billing", MAX_INSTRUCTION_LINES)))
        .await
        .unwrap();
    let before = std::fs::read_to_string(env.ctx.layout.instructions_file("billing")).unwrap();

    let err = apply(&env.ctx, &spec(&modify("## Append\n\none line too many\n"))).await.unwrap_err();
    assert!(matches!(err, HandlerError::TooLong { got } if got == MAX_INSTRUCTION_LINES + 1));

    let after = std::fs::read_to_string(env.ctx.layout.instructions_file("billing")).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn model_hint_updates_the_definition() {
    let env = seeded().await;
    let text = "---\noperation: modify\nagent: billing\nmodel: opus\n---\n";
    apply(&env.ctx, &spec(text)).await.unwrap();

    let def = env.ctx.registry.get_agent("billing").await.unwrap().unwrap();
    assert_eq!(def.model.as_deref(), Some("claude-opus-4-1"));
}

#[tokio::test]
async fn environment_entries_merge_into_the_existing_bundle() {
    let env = seeded().await;
    let body = "## Environment\n\n- key: REGION\n  value: us-east-1\n- key: TEAM\n  value: $SHARED_TEAM_KEY\n";
    apply(&env.ctx, &spec(&modify(body))).await.unwrap();

    let bundle = settings::read(&env.ctx.layout, "billing").unwrap();
    // Keys written at create time survive the merge.
    assert_eq!(bundle.env.get("ANTHROPIC_API_KEY").map(String::as_str), Some("sk-test-123"));
    assert_eq!(bundle.env.get("REGION").map(String::as_str), Some("us-east-1"));
    assert_eq!(bundle.env.get("TEAM").map(String::as_str), Some("team-456"));
}

#[tokio::test]
async fn mounts_are_appended_never_replaced() {
    let env = seeded().await;
    let before = env.ctx.registry.get_agent("billing").await.unwrap().unwrap().mounts;

    let body = "## Mounts\n\n- host: scratch/exports\n  container: exports\n";
    apply(&env.ctx, &spec(&modify(body))).await.unwrap();
    // The same binding a second time is a no-op.
    apply(&env.ctx, &spec(&modify(body))).await.unwrap();

    let after = env.ctx.registry.get_agent("billing").await.unwrap().unwrap().mounts;
    assert_eq!(after.len(), before.len() + 1);
    assert!(after.starts_with(&before));
}

#[tokio::test]
async fn foreign_mounts_are_rejected_on_modify_too() {
    let env = seeded().await;
    let body = "## Mounts\n\n- host: knowledge/other\n  container: k\n";
    let err = apply(&env.ctx, &spec(&modify(body))).await.unwrap_err();
    assert!(err.to_string().contains("other"));

    let def = env.ctx.registry.get_agent("billing").await.unwrap().unwrap();
    assert_eq!(def.mounts.len(), 4);
}

#[tokio::test]
async fn declared_task_with_existing_id_is_updated_in_place() {
    let env = seeded().await;
    let body = "## Tasks\n\n- id: task-1\n  cron: 0 9 * * 1\n  prompt: summarize the inbox\n";
    apply(&env.ctx, &spec(&modify(body))).await.unwrap();
    let first = env.ctx.registry.tasks_for_owner("billing").await.unwrap();
    assert_eq!(first.len(), 1);

    env.ctx.clock.advance(chrono::Duration::days(1));
    let body = "## Tasks\n\n- id: task-1\n  cron: 0 18 * * 5\n  prompt: weekly wrap-up\n  context: isolated\n";
    apply(&env.ctx, &spec(&modify(body))).await.unwrap();

    let tasks = env.ctx.registry.tasks_for_owner("billing").await.unwrap();
    assert_eq!(tasks.len(), 1, "no duplicate task may be created");
    assert_eq!(tasks[0].id, "task-1");
    assert_eq!(tasks[0].prompt, "weekly wrap-up");
    assert_eq!(tasks[0].schedule, "0 18 * * 5");
    assert_eq!(tasks[0].context, roster_core::ContextMode::Isolated);
    assert_eq!(tasks[0].next_run, env.ctx.clock.now_utc() + chrono::Duration::hours(1));
}

#[tokio::test]
async fn declared_task_with_new_id_is_created() {
    let env = seeded().await;
    let body = "## Tasks\n\n- id: task-7\n  cron: 0 9 * * 1\n  prompt: fresh task\n";
    apply(&env.ctx, &spec(&modify(body))).await.unwrap();

    let tasks = env.ctx.registry.tasks_for_owner("billing").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "task-7");
}

#[tokio::test]
async fn target_resolves_through_the_suffixed_variant() {
    let env = test_env();
    env.ctx
        .registry
        .put_agent(AgentDefinition::builder().name("billing-agent").folder("billing").build())
        .await
        .unwrap();

    apply(&env.ctx, &spec(&modify("## Instructions\n\nDoc.\n"))).await.unwrap();
    assert!(env.ctx.layout.instructions_file("billing").is_file());
}

#[tokio::test]
async fn self_alias_resolves_to_the_controllers_own_entry() {
    // The gate normally intercepts self-targeting specs; this is the
    // post-approval path, which executes like any other modify.
    let env = test_env();
    env.ctx
        .registry
        .put_agent(AgentDefinition::builder().name("roster").folder("roster").build())
        .await
        .unwrap();

    let text = "---\noperation: modify\nagent: rosterd\n---\n\n## Instructions\n\nUpdated charter.\n";
    apply(&env.ctx, &spec(text)).await.unwrap();

    let doc = std::fs::read_to_string(env.ctx.layout.instructions_file("roster")).unwrap();
    assert_eq!(doc, "Updated charter.\n");
}
