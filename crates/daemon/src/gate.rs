// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval gate for self-targeting operations.
//!
//! Any create/modify spec naming the controller's own identity is held in
//! `PENDING_APPROVAL` until an operator renames the file to carry the
//! `APPROVED` token. The rename itself is the approval: filesystem access
//! to the watched directory is assumed to imply authorization, and no
//! identity is bound to the rename. Delete specs naming the controller
//! are never gated — they hard-fail in the delete handler instead.

use roster_core::OpKind;

/// The controller's own identity: a small fixed set of recognized
/// aliases plus the folder its registry entry lives under. Injected at
/// construction; there is no hidden module state.
#[derive(Debug, Clone)]
pub struct SelfIdentity {
    aliases: Vec<String>,
    folder: String,
}

impl Default for SelfIdentity {
    fn default() -> Self {
        Self {
            aliases: vec![
                "roster".to_string(),
                "rosterd".to_string(),
                "roster-controller".to_string(),
            ],
            folder: "roster".to_string(),
        }
    }
}

impl SelfIdentity {
    pub fn new(aliases: Vec<String>, folder: impl Into<String>) -> Self {
        Self { aliases, folder: folder.into() }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Folder the controller's own registry entry is provisioned under.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// True when `name` is one of the controller's aliases. Case-insensitive.
    pub fn is_self(&self, name: &str) -> bool {
        let name = name.trim();
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Gate decision: create and modify specs targeting the controller
    /// are diverted to the approval path before any mutation.
    pub fn requires_approval(&self, op: OpKind, agent: &str) -> bool {
        matches!(op, OpKind::Create | OpKind::Modify) && self.is_self(agent)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
