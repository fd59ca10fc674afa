// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Modify handler: apply any subset of changes to an existing agent.

use std::fs;
use std::io;

use roster_core::{folder_address, Clock, ScheduledTask, TaskId, TaskStatus};
use roster_spec::{decode_env, decode_mounts, decode_tasks, unfence, SectionKind, SpecRecord};
use tracing::{info, warn};

use crate::adapters::{Registry, Schedule, SecretStore};
use crate::isolation::validate_mounts;

use super::{check_line_count, merge_env, resolve_agent, settings, HandlerCtx, HandlerError, Outcome};

pub(super) async fn apply<R, S, K, C>(
    ctx: &HandlerCtx<R, S, K, C>,
    rec: &SpecRecord,
) -> Result<Outcome, HandlerError>
where
    R: Registry,
    S: Schedule,
    K: SecretStore,
    C: Clock,
{
    let name = rec.agent.trim();
    let mut def = resolve_agent(&ctx.registry, &ctx.identity, name)
        .await?
        .ok_or_else(|| HandlerError::NotFound(name.to_string()))?;
    let folder = def.folder.clone();
    let mut changed: Vec<&'static str> = Vec::new();

    // Overwrite the instruction document.
    if let Some(text) = rec.section(SectionKind::Instructions) {
        let doc = unfence(&text);
        check_line_count(&doc)?;
        fs::create_dir_all(ctx.layout.instructions_dir(&folder))?;
        fs::write(ctx.layout.instructions_file(&folder), format!("{doc}\n"))?;
        changed.push("instructions");
    }

    // Append to the instruction document, re-validating the ceiling.
    // On violation the document on disk stays untouched.
    if let Some(text) = rec.section(SectionKind::Append) {
        let addition = unfence(&text);
        let path = ctx.layout.instructions_file(&folder);
        let existing = match fs::read_to_string(&path) {
            Ok(doc) => doc,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let combined = if existing.trim().is_empty() {
            addition
        } else {
            format!("{}\n{addition}", existing.trim_end())
        };
        check_line_count(&combined)?;
        fs::create_dir_all(ctx.layout.instructions_dir(&folder))?;
        fs::write(&path, format!("{combined}\n"))?;
        changed.push("append");
    }

    if let Some(hint) = rec.model.as_deref() {
        def.model = Some(ctx.models.resolve(hint).to_string());
        changed.push("model");
    }

    // Merge environment entries into the settings bundle.
    if let Some(env_text) = rec.section(SectionKind::Environment) {
        let mut bundle = settings::read(&ctx.layout, &folder)?;
        merge_env(&mut bundle, decode_env(&env_text), &ctx.secrets);
        settings::write(&ctx.layout, &folder, &bundle)?;
        changed.push("environment");
    }

    // Append mounts; existing bindings are never replaced.
    if let Some(text) = rec.section(SectionKind::Mounts) {
        let candidates = decode_mounts(&text);
        validate_mounts(&folder, &candidates, &ctx.layout)?;
        for mount in candidates {
            if !def.mounts.iter().any(|m| m.same_binding(&mount)) {
                def.mounts.push(mount);
            }
        }
        changed.push("mounts");
    }

    // Upsert declared tasks: update in place when the id already exists
    // for this agent, create otherwise.
    if let Some(tasks_text) = rec.section(SectionKind::Tasks) {
        let existing = ctx.registry.tasks_for_owner(&folder).await?;
        for row in decode_tasks(&tasks_text) {
            let next_run = match ctx.schedule.next_run(&row.schedule, ctx.clock.now_utc()) {
                Ok(at) => at,
                Err(e) => {
                    warn!(agent = name, schedule = %row.schedule, error = %e, "skipping task with bad schedule");
                    continue;
                }
            };
            let declared_id = row.id.map(TaskId::from_string);
            let current = declared_id
                .as_ref()
                .and_then(|id| existing.iter().find(|t| &t.id == id));
            match current {
                Some(task) => {
                    let mut updated = task.clone();
                    updated.prompt = row.prompt;
                    updated.schedule = row.schedule;
                    updated.context = row.context;
                    updated.next_run = next_run;
                    ctx.registry.update_task(&task.id, updated).await?;
                }
                None => {
                    let task = ScheduledTask {
                        id: declared_id.unwrap_or_default(),
                        folder: folder.clone(),
                        address: folder_address(&folder),
                        prompt: row.prompt,
                        schedule: row.schedule,
                        context: row.context,
                        next_run,
                        status: TaskStatus::Active,
                    };
                    ctx.registry.create_task(task).await?;
                }
            }
        }
        changed.push("tasks");
    }

    ctx.registry.put_agent(def).await?;

    let summary = if changed.is_empty() {
        format!("modified agent `{name}` (no recognized sections)")
    } else {
        format!("modified agent `{name}` ({})", changed.join(", "))
    };
    info!(agent = name, folder = %folder, changes = ?changed, "agent modified");
    Ok(Outcome { summary })
}

#[cfg(test)]
#[path = "modify_tests.rs"]
mod tests;
