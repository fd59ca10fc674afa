// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent definition and mount types.
//!
//! An `AgentDefinition` is the registry entity for one provisioned worker
//! agent. Its `folder` uniquely determines the agent's private data
//! partitions; mount isolation is enforced against that folder, never
//! against the display name.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single filesystem mount applied to an agent's sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    /// Path on the host; relative paths are resolved against the shared root.
    pub host_path: PathBuf,
    /// Path inside the sandbox.
    pub container_path: PathBuf,
    #[serde(default)]
    pub readonly: bool,
}

impl MountEntry {
    pub fn read_write(host: impl Into<PathBuf>, container: impl Into<PathBuf>) -> Self {
        Self { host_path: host.into(), container_path: container.into(), readonly: false }
    }

    pub fn read_only(host: impl Into<PathBuf>, container: impl Into<PathBuf>) -> Self {
        Self { host_path: host.into(), container_path: container.into(), readonly: true }
    }

    /// Two mounts are duplicates when host and container paths coincide,
    /// regardless of the readonly flag.
    pub fn same_binding(&self, other: &MountEntry) -> bool {
        self.host_path == other.host_path && self.container_path == other.container_path
    }
}

/// A provisioned worker agent as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Registry identity, unique within the namespace.
    pub name: String,
    /// Filesystem namespace root for the agent's private partitions.
    pub folder: String,
    /// Opaque routing identity consumed by the messaging relay.
    pub address: String,
    /// Resolved runtime-model identifier, when one was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Trigger policy for the sandboxed runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    pub mounts: Vec<MountEntry>,
    pub timeout_secs: u64,
    pub requires_trigger: bool,
}

crate::builder! {
    pub struct AgentDefinitionBuilder => AgentDefinition {
        into {
            name: String = "billing",
            folder: String = "billing",
            address: String = "billing@roster.local",
        }
        set {
            mounts: Vec<MountEntry> = Vec::new(),
            timeout_secs: u64 = 3600,
            requires_trigger: bool = true,
        }
        option {
            model: String = None,
            trigger: String = None,
        }
    }
}

/// Derive a filesystem-safe folder name from an agent identifier.
///
/// Lowercases and maps any run of non-alphanumeric characters to a single
/// `-`, trimming leading/trailing dashes.
pub fn folder_slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Routing address for an agent folder.
pub fn folder_address(folder: &str) -> String {
    format!("{folder}@roster.local")
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
