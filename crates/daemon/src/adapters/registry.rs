// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent/task registry client.
//!
//! Individual calls are atomic; there is no cross-call transaction. A
//! crash between two registry writes leaves partial state that surfaces
//! on the next attempt instead of being repaired silently.

use std::fs;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use roster_core::{AgentDefinition, ScheduledTask, TaskId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry io error: {0}")]
    Io(#[from] io::Error),

    #[error("registry encoding error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("no task with id `{0}`")]
    TaskNotFound(TaskId),
}

/// Client contract for the persistent registry.
#[async_trait]
pub trait Registry: Send + Sync {
    async fn get_agent(&self, name: &str) -> Result<Option<AgentDefinition>, RegistryError>;
    async fn put_agent(&self, def: AgentDefinition) -> Result<(), RegistryError>;
    async fn delete_agent(&self, name: &str) -> Result<(), RegistryError>;
    async fn list_agents(&self) -> Result<Vec<AgentDefinition>, RegistryError>;

    /// Tasks owned by an agent folder, in insertion order.
    async fn tasks_for_owner(&self, folder: &str) -> Result<Vec<ScheduledTask>, RegistryError>;
    async fn create_task(&self, task: ScheduledTask) -> Result<(), RegistryError>;
    async fn update_task(&self, id: &TaskId, task: ScheduledTask) -> Result<(), RegistryError>;
    async fn delete_task(&self, id: &TaskId) -> Result<(), RegistryError>;
}

/// Everything the registry holds, keyed by agent name and task id.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Snapshot {
    agents: IndexMap<String, AgentDefinition>,
    tasks: IndexMap<TaskId, ScheduledTask>,
}

impl Snapshot {
    fn get_agent(&self, name: &str) -> Option<AgentDefinition> {
        self.agents.get(name).cloned()
    }

    fn tasks_for_owner(&self, folder: &str) -> Vec<ScheduledTask> {
        self.tasks.values().filter(|t| t.folder == folder).cloned().collect()
    }

    fn update_task(&mut self, id: &TaskId, task: ScheduledTask) -> Result<(), RegistryError> {
        match self.tasks.get_mut(id) {
            Some(slot) => {
                *slot = task;
                Ok(())
            }
            None => Err(RegistryError::TaskNotFound(id.clone())),
        }
    }
}

/// JSON-snapshot-backed registry used by `rosterd`.
///
/// The whole snapshot is rewritten on every mutation (write to a temp
/// file, then rename over the old one). Registry volumes are small
/// enough that this stays cheap.
pub struct FileRegistry {
    path: PathBuf,
    snapshot: Mutex<Snapshot>,
}

impl FileRegistry {
    /// Open a registry file, loading the existing snapshot when present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        let snapshot = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, snapshot: Mutex::new(snapshot) })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(snapshot)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Snapshot) -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let mut snapshot = self.snapshot.lock();
        let out = f(&mut snapshot)?;
        self.save(&snapshot)?;
        Ok(out)
    }
}

#[async_trait]
impl Registry for FileRegistry {
    async fn get_agent(&self, name: &str) -> Result<Option<AgentDefinition>, RegistryError> {
        Ok(self.snapshot.lock().get_agent(name))
    }

    async fn put_agent(&self, def: AgentDefinition) -> Result<(), RegistryError> {
        self.mutate(|s| {
            s.agents.insert(def.name.clone(), def);
            Ok(())
        })
    }

    async fn delete_agent(&self, name: &str) -> Result<(), RegistryError> {
        self.mutate(|s| {
            s.agents.shift_remove(name);
            Ok(())
        })
    }

    async fn list_agents(&self) -> Result<Vec<AgentDefinition>, RegistryError> {
        Ok(self.snapshot.lock().agents.values().cloned().collect())
    }

    async fn tasks_for_owner(&self, folder: &str) -> Result<Vec<ScheduledTask>, RegistryError> {
        Ok(self.snapshot.lock().tasks_for_owner(folder))
    }

    async fn create_task(&self, task: ScheduledTask) -> Result<(), RegistryError> {
        self.mutate(|s| {
            s.tasks.insert(task.id.clone(), task);
            Ok(())
        })
    }

    async fn update_task(&self, id: &TaskId, task: ScheduledTask) -> Result<(), RegistryError> {
        self.mutate(|s| s.update_task(id, task))
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RegistryError> {
        self.mutate(|s| {
            s.tasks.shift_remove(id);
            Ok(())
        })
    }
}

/// In-memory registry for tests and dry runs.
#[derive(Default)]
pub struct MemRegistry {
    snapshot: Mutex<Snapshot>,
}

impl MemRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Registry for MemRegistry {
    async fn get_agent(&self, name: &str) -> Result<Option<AgentDefinition>, RegistryError> {
        Ok(self.snapshot.lock().get_agent(name))
    }

    async fn put_agent(&self, def: AgentDefinition) -> Result<(), RegistryError> {
        self.snapshot.lock().agents.insert(def.name.clone(), def);
        Ok(())
    }

    async fn delete_agent(&self, name: &str) -> Result<(), RegistryError> {
        self.snapshot.lock().agents.shift_remove(name);
        Ok(())
    }

    async fn list_agents(&self) -> Result<Vec<AgentDefinition>, RegistryError> {
        Ok(self.snapshot.lock().agents.values().cloned().collect())
    }

    async fn tasks_for_owner(&self, folder: &str) -> Result<Vec<ScheduledTask>, RegistryError> {
        Ok(self.snapshot.lock().tasks_for_owner(folder))
    }

    async fn create_task(&self, task: ScheduledTask) -> Result<(), RegistryError> {
        self.snapshot.lock().tasks.insert(task.id.clone(), task);
        Ok(())
    }

    async fn update_task(&self, id: &TaskId, task: ScheduledTask) -> Result<(), RegistryError> {
        self.snapshot.lock().update_task(id, task)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RegistryError> {
        self.snapshot.lock().tasks.shift_remove(id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
