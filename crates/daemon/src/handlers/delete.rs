// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delete handler: retire an agent, archiving its pending work.

use std::fs;
use std::io;
use std::path::Path;

use roster_core::{Clock, Layout};
use roster_spec::SpecRecord;
use tracing::info;

use crate::adapters::{Registry, Schedule, SecretStore};

use super::{HandlerCtx, HandlerError, Outcome};

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

    // The controller can never delete itself, approved or not.
    if ctx.identity.is_self(name) {
        return Err(HandlerError::SelfDelete(name.to_string()));
    }

    let def = match ctx.registry.get_agent(name).await? {
        Some(def) => def,
        None => ctx
            .registry
            .get_agent(&format!("{name}-agent"))
            .await?
            .ok_or_else(|| HandlerError::NotFound(name.to_string()))?,
    };
    let folder = def.folder.clone();

    let tasks = ctx.registry.tasks_for_owner(&folder).await?;
    for task in &tasks {
        ctx.registry.delete_task(&task.id).await?;
    }
    ctx.registry.delete_agent(&def.name).await?;

    remove_dir_if_present(&ctx.layout.instructions_dir(&folder))?;
    remove_dir_if_present(&ctx.layout.sessions_dir(&folder))?;

    let archived = archive_pending(&ctx.layout, &folder)?;

    info!(
        agent = %def.name,
        folder = %folder,
        tasks = tasks.len(),
        archived,
        "agent deleted"
    );
    Ok(Outcome {
        summary: format!(
            "deleted agent `{}` ({} task(s) removed, {archived} pending file(s) archived)",
            def.name,
            tasks.len()
        ),
    })
}

fn remove_dir_if_present(dir: &Path) -> Result<(), HandlerError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Move files sitting in the agent's inbox/active subfolders into the
/// corresponding archive. The partitions themselves are retained.
fn archive_pending(layout: &Layout, folder: &str) -> Result<usize, HandlerError> {
    let tasks = layout.tasks_dir(folder);
    let results = layout.results_dir(folder);
    let moves = [
        (tasks.join("inbox"), tasks.join("archive")),
        (tasks.join("active"), tasks.join("archive")),
        (results.join("inbox"), results.join("archive")),
    ];

    let mut archived = 0usize;
    for (from, to) in moves {
        if !from.is_dir() {
            continue;
        }
        fs::create_dir_all(&to)?;
        for entry in fs::read_dir(&from)? {
            let entry = entry?;
            fs::rename(entry.path(), to.join(entry.file_name()))?;
            archived += 1;
        }
    }
    Ok(archived)
}

#[cfg(test)]
#[path = "delete_tests.rs"]
mod tests;
