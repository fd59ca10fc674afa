// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared directory tree consumed and produced by the daemon.
//!
//! Everything lives under a single root:
//!
//! ```text
//! agent-ops/                          watched spec directory
//! tasks/{folder}/{inbox,active,archive}/
//! results/{folder}/{inbox,archive}/
//! knowledge/{folder}/{archive}/
//! agents/{folder}/AGENT.md            instruction document
//! sessions/{folder}/settings.json     session-settings bundle
//! ```
//!
//! `tasks`, `results`, and `knowledge` are the private partitions: other
//! agents' mounts must never resolve inside them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::agent::MountEntry;

/// Partition roots covered by mount isolation.
pub const PARTITION_ROOTS: [&str; 3] = ["tasks", "results", "knowledge"];

/// Name of the watched spec directory under the root.
pub const OPS_DIR: &str = "agent-ops";

/// Instruction document filename inside an agent's instructions dir.
pub const INSTRUCTIONS_FILE: &str = "AGENT.md";

/// Resolver for every path the daemon reads or writes.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The watched spec directory.
    pub fn ops_dir(&self) -> PathBuf {
        self.root.join(OPS_DIR)
    }

    /// Root of one partition (`tasks`, `results`, or `knowledge`).
    pub fn partition_root(&self, partition: &str) -> PathBuf {
        self.root.join(partition)
    }

    pub fn tasks_dir(&self, folder: &str) -> PathBuf {
        self.root.join("tasks").join(folder)
    }

    pub fn results_dir(&self, folder: &str) -> PathBuf {
        self.root.join("results").join(folder)
    }

    pub fn knowledge_dir(&self, folder: &str) -> PathBuf {
        self.root.join("knowledge").join(folder)
    }

    /// Folder holding the agent's instruction document.
    pub fn instructions_dir(&self, folder: &str) -> PathBuf {
        self.root.join("agents").join(folder)
    }

    pub fn instructions_file(&self, folder: &str) -> PathBuf {
        self.instructions_dir(folder).join(INSTRUCTIONS_FILE)
    }

    /// Folder holding the agent's session-settings bundle.
    pub fn sessions_dir(&self, folder: &str) -> PathBuf {
        self.root.join("sessions").join(folder)
    }

    pub fn settings_file(&self, folder: &str) -> PathBuf {
        self.sessions_dir(folder).join("settings.json")
    }

    /// Create the agent's private partition tree. Idempotent.
    pub fn ensure_agent_dirs(&self, folder: &str) -> io::Result<()> {
        for sub in ["inbox", "active", "archive"] {
            fs::create_dir_all(self.tasks_dir(folder).join(sub))?;
        }
        for sub in ["inbox", "archive"] {
            fs::create_dir_all(self.results_dir(folder).join(sub))?;
        }
        fs::create_dir_all(self.knowledge_dir(folder).join("archive"))?;
        Ok(())
    }

    /// Default mounts granted to every agent: its own three partitions
    /// read-write plus the shared root read-only.
    pub fn default_mounts(&self, folder: &str) -> Vec<MountEntry> {
        vec![
            MountEntry::read_write(self.tasks_dir(folder), "tasks"),
            MountEntry::read_write(self.results_dir(folder), "results"),
            MountEntry::read_write(self.knowledge_dir(folder), "knowledge"),
            MountEntry::read_only(self.root.clone(), "shared"),
        ]
    }

    /// Resolve a mount host path: relative paths are anchored at the root.
    pub fn resolve_host_path(&self, host: &Path) -> PathBuf {
        if host.is_absolute() {
            host.to_path_buf()
        } else {
            self.root.join(host)
        }
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
