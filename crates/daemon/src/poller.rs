// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The control loop.
//!
//! A timer-driven, non-re-entrant poll: each tick lists the watched
//! directory, classifies every markdown entry by its filename state, and
//! dispatches each actionable file exactly once. Every dispatch ends in
//! exactly one rename — `APPLIED`, `FAILED`, or (for gated specs)
//! `PENDING_APPROVAL`. Files already carrying a terminal state are
//! skipped, so the next tick observes the renamed file and moves on.
//!
//! Exactly one poller instance may watch a directory: two instances
//! could both observe the same new file before either renames it.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use roster_core::{Clock, SpecState};
use roster_spec::parse_spec;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::adapters::{Registry, Schedule, SecretStore};
use crate::handlers::{self, HandlerCtx, HandlerError};
use crate::transition::{strip_note, transition};

/// Note appended to a spec held for operator approval.
const APPROVAL_NOTE: &str = "this spec targets the controller's own identity and is held for \
operator approval; rename the file to end in `.APPROVED.md` to apply it";

pub struct Poller<R, S, K, C> {
    ctx: HandlerCtx<R, S, K, C>,
    interval: Duration,
}

impl<R, S, K, C> Poller<R, S, K, C>
where
    R: Registry,
    S: Schedule,
    K: SecretStore,
    C: Clock,
{
    pub fn new(ctx: HandlerCtx<R, S, K, C>, interval: Duration) -> Self {
        Self { ctx, interval }
    }

    pub fn ctx(&self) -> &HandlerCtx<R, S, K, C> {
        &self.ctx
    }

    /// Run forever. Per-tick errors are logged, never fatal; the loop
    /// continues on the next interval.
    pub async fn run(&self) {
        let mut tick = tokio::time::interval(self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            if let Err(e) = self.tick().await {
                warn!(error = %e, "poll tick failed");
            }
        }
    }

    /// One poll pass. Returns the number of files dispatched.
    pub async fn tick(&self) -> io::Result<usize> {
        let ops_dir = self.ctx.layout.ops_dir();
        fs::create_dir_all(&ops_dir)?;

        let mut names: Vec<String> = fs::read_dir(&ops_dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();

        let mut dispatched = 0usize;
        for name in names {
            let Some(state) = SpecState::classify(&name) else {
                continue;
            };
            let path = ops_dir.join(&name);
            let result = match state {
                // Terminal, or waiting on an external rename.
                SpecState::Applied | SpecState::Failed | SpecState::PendingApproval => continue,
                SpecState::Approved => self.dispatch_approved(&path).await,
                SpecState::New => self.dispatch_new(&path).await,
            };
            dispatched += 1;
            if let Err(e) = result {
                warn!(file = %name, error = %e, "dispatch failed");
            }
        }
        Ok(dispatched)
    }

    /// Standard path: parse, divert self-targeting specs to the
    /// approval gate, execute everything else.
    async fn dispatch_new(&self, path: &Path) -> io::Result<()> {
        let text = fs::read_to_string(path)?;
        let rec = match parse_spec(&text) {
            Ok(rec) => rec,
            Err(e) => return fail_malformed(path, e),
        };

        if self.ctx.identity.requires_approval(rec.op, &rec.agent) {
            info!(file = %path.display(), agent = %rec.agent, "self-targeting spec held for approval");
            transition(path, SpecState::PendingApproval, Some(APPROVAL_NOTE))?;
            return Ok(());
        }

        self.execute(path, &rec).await
    }

    /// Approved path: strip the appended note, re-parse the original
    /// header and body, then execute exactly as a non-gated spec.
    async fn dispatch_approved(&self, path: &Path) -> io::Result<()> {
        let text = fs::read_to_string(path)?;
        let original = strip_note(&text).to_string();
        let rec = match parse_spec(&original) {
            Ok(rec) => rec,
            Err(e) => return fail_malformed(path, e),
        };
        fs::write(path, format!("{original}\n"))?;
        self.execute(path, &rec).await
    }

    async fn execute(&self, path: &Path, rec: &roster_spec::SpecRecord) -> io::Result<()> {
        match handlers::apply(&self.ctx, rec).await {
            Ok(outcome) => {
                info!(file = %path.display(), op = %rec.op, agent = %rec.agent, "{}", outcome.summary);
                transition(path, SpecState::Applied, None)?;
            }
            Err(e) => {
                warn!(file = %path.display(), op = %rec.op, agent = %rec.agent, error = %e, "spec failed");
                transition(path, SpecState::Failed, Some(&e.to_string()))?;
            }
        }
        Ok(())
    }
}

/// Downgrade a parse failure to a FAILED transition with a note.
fn fail_malformed(path: &Path, e: roster_spec::ParseError) -> io::Result<()> {
    warn!(file = %path.display(), error = %e, "malformed spec");
    let note = HandlerError::from(e).to_string();
    transition(path, SpecState::Failed, Some(&note))?;
    Ok(())
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
