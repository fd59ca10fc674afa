// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation handlers: create, modify, delete.
//!
//! Handlers orchestrate registry mutations, filesystem side effects, and
//! scheduled-task mutations for one parsed spec. They never panic and
//! never leak a raw error past their boundary; the poller converts every
//! failure into a `FAILED` rename carrying the error's display text.
//!
//! Effects are not transactional: a crash between, say, registering an
//! agent and writing its settings bundle leaves partial state. That
//! state surfaces on retry (duplicate-create rejection) rather than
//! being repaired silently.

mod create;
mod delete;
mod modify;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_helpers;

use roster_core::{AgentDefinition, Clock, Layout, ModelAliases};
use roster_spec::{ParseError, SpecRecord};
use thiserror::Error;
use tracing::warn;

use crate::adapters::{Registry, RegistryError, Schedule, SecretStore};
use crate::gate::SelfIdentity;
use crate::isolation::MountViolation;
use self::settings::Settings;

/// Ceiling on instruction-document length, in lines.
pub const MAX_INSTRUCTION_LINES: usize = 150;

/// Default execution timeout for newly created agents.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Sentinel prefix marking an environment value as a secret-store key
/// reference rather than a literal.
pub const SECRET_SENTINEL: char = '$';

/// Everything a handler needs, injected once at startup.
pub struct HandlerCtx<R, S, K, C> {
    pub layout: Layout,
    pub registry: R,
    pub schedule: S,
    pub secrets: K,
    pub models: ModelAliases,
    pub identity: SelfIdentity,
    pub clock: C,
    /// Environment keys every new agent's settings bundle should carry.
    pub required_env: Vec<String>,
}

/// Successful handler result, summarized for the log.
#[derive(Debug)]
pub struct Outcome {
    pub summary: String,
}

/// Validation and execution failures surfaced to the operator.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("agent `{0}` already exists in the registry")]
    AlreadyExists(String),

    #[error("no agent named `{0}` in the registry")]
    NotFound(String),

    #[error("spec is missing the required `{0}` section")]
    MissingSection(&'static str),

    #[error("instruction document is {got} lines; the limit is {MAX_INSTRUCTION_LINES}")]
    TooLong { got: usize },

    #[error("refusing to delete the controller's own identity `{0}`")]
    SelfDelete(String),

    #[error(transparent)]
    Isolation(#[from] MountViolation),

    #[error(transparent)]
    Spec(#[from] ParseError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("settings bundle error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Apply one parsed spec. The approval gate runs in the poller before
/// this point; by the time a record reaches here it is cleared to
/// execute.
pub async fn apply<R, S, K, C>(
    ctx: &HandlerCtx<R, S, K, C>,
    rec: &SpecRecord,
) -> Result<Outcome, HandlerError>
where
    R: Registry,
    S: Schedule,
    K: SecretStore,
    C: Clock,
{
    match rec.op {
        roster_core::OpKind::Create => create::apply(ctx, rec).await,
        roster_core::OpKind::Modify => modify::apply(ctx, rec).await,
        roster_core::OpKind::Delete => delete::apply(ctx, rec).await,
    }
}

/// Reject instruction documents over the line ceiling.
fn check_line_count(doc: &str) -> Result<(), HandlerError> {
    let got = doc.lines().count();
    if got > MAX_INSTRUCTION_LINES {
        return Err(HandlerError::TooLong { got });
    }
    Ok(())
}

/// Resolve a modify/delete target: exact name, then the conventional
/// `-agent` suffixed variant, then — for self-targeting specs — reverse
/// lookup of the controller's own registered identity.
async fn resolve_agent<R: Registry>(
    registry: &R,
    identity: &SelfIdentity,
    name: &str,
) -> Result<Option<AgentDefinition>, RegistryError> {
    if let Some(def) = registry.get_agent(name).await? {
        return Ok(Some(def));
    }
    if let Some(def) = registry.get_agent(&format!("{name}-agent")).await? {
        return Ok(Some(def));
    }
    if identity.is_self(name) {
        let own = registry
            .list_agents()
            .await?
            .into_iter()
            .find(|a| a.folder == identity.folder() || identity.is_self(&a.name));
        return Ok(own);
    }
    Ok(None)
}

/// Merge declared environment entries into a settings bundle. A value
/// prefixed with [`SECRET_SENTINEL`] is resolved by key lookup against
/// the secret store; unresolvable references are skipped.
fn merge_env<K: SecretStore>(
    settings: &mut Settings,
    entries: Vec<(String, String)>,
    secrets: &K,
) {
    for (key, value) in entries {
        match value.strip_prefix(SECRET_SENTINEL) {
            Some(secret_key) => match secrets.lookup(&[secret_key.to_string()]).pop() {
                Some((_, resolved)) => {
                    settings.env.insert(key, resolved);
                }
                None => {
                    warn!(key, secret = secret_key, "secret not found; entry skipped");
                }
            },
            None => {
                settings.env.insert(key, value);
            }
        }
    }
}
