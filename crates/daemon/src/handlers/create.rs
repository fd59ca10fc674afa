// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Create handler: provision a new agent from a spec.

use std::fs;

use roster_core::{folder_address, folder_slug, AgentDefinition, Clock, ScheduledTask, TaskStatus};
use roster_spec::{decode_env, decode_mounts, decode_tasks, unfence, SectionKind, SpecRecord};
use tracing::{info, warn};

use crate::adapters::{Registry, Schedule, SecretStore};
use crate::isolation::validate_mounts;

use super::settings::{self, Settings};
use super::{check_line_count, merge_env, HandlerCtx, HandlerError, Outcome, DEFAULT_TIMEOUT_SECS};

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

    // A surviving registry entry — including one left by a crashed
    // earlier attempt — always rejects the create, surfacing the
    // inconsistency to the operator instead of papering over it.
    if ctx.registry.get_agent(name).await?.is_some() {
        return Err(HandlerError::AlreadyExists(name.to_string()));
    }

    let instructions =
        rec.section(SectionKind::Instructions).ok_or(HandlerError::MissingSection("instructions"))?;
    let doc = unfence(&instructions);
    check_line_count(&doc)?;

    let folder = folder_slug(name);
    let custom_mounts =
        rec.section(SectionKind::Mounts).map(|text| decode_mounts(&text)).unwrap_or_default();
    validate_mounts(&folder, &custom_mounts, &ctx.layout)?;

    // All validation passed; start mutating.
    ctx.layout.ensure_agent_dirs(&folder)?;
    fs::create_dir_all(ctx.layout.instructions_dir(&folder))?;
    fs::write(ctx.layout.instructions_file(&folder), format!("{doc}\n"))?;

    let mut mounts = ctx.layout.default_mounts(&folder);
    mounts.extend(custom_mounts);

    let def = AgentDefinition {
        name: name.to_string(),
        folder: folder.clone(),
        address: folder_address(&folder),
        model: rec.model.as_deref().map(|hint| ctx.models.resolve(hint).to_string()),
        trigger: None,
        mounts,
        timeout_secs: DEFAULT_TIMEOUT_SECS,
        requires_trigger: true,
    };
    ctx.registry.put_agent(def).await?;

    let mut bundle = Settings::default();
    for (key, value) in ctx.secrets.lookup(&ctx.required_env) {
        bundle.env.insert(key, value);
    }
    if let Some(env_text) = rec.section(SectionKind::Environment) {
        merge_env(&mut bundle, decode_env(&env_text), &ctx.secrets);
    }
    settings::write(&ctx.layout, &folder, &bundle)?;

    let mut created = 0usize;
    if let Some(tasks_text) = rec.section(SectionKind::Tasks) {
        for row in decode_tasks(&tasks_text) {
            let next_run = match ctx.schedule.next_run(&row.schedule, ctx.clock.now_utc()) {
                Ok(at) => at,
                Err(e) => {
                    warn!(agent = name, schedule = %row.schedule, error = %e, "skipping task with bad schedule");
                    continue;
                }
            };
            let task = ScheduledTask {
                id: row.id.map(Into::into).unwrap_or_default(),
                folder: folder.clone(),
                address: folder_address(&folder),
                prompt: row.prompt,
                schedule: row.schedule,
                context: row.context,
                next_run,
                status: TaskStatus::Active,
            };
            ctx.registry.create_task(task).await?;
            created += 1;
        }
    }

    info!(agent = name, folder = %folder, tasks = created, "agent created");
    Ok(Outcome { summary: format!("created agent `{name}` with {created} scheduled task(s)") })
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;
