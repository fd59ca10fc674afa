// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-agent session-settings bundle.
//!
//! A small JSON document under `sessions/{folder}/settings.json` holding
//! the environment the sandboxed runtime injects into the agent.

use std::fs;
use std::io;

use indexmap::IndexMap;
use roster_core::Layout;
use serde::{Deserialize, Serialize};

use super::HandlerError;

/// Settings bundle contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub env: IndexMap<String, String>,
}

/// Read an agent's settings bundle; a missing file is an empty bundle.
pub fn read(layout: &Layout, folder: &str) -> Result<Settings, HandlerError> {
    match fs::read_to_string(layout.settings_file(folder)) {
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

/// Write an agent's settings bundle, creating the sessions folder.
pub fn write(layout: &Layout, folder: &str, settings: &Settings) -> Result<(), HandlerError> {
    fs::create_dir_all(layout.sessions_dir(folder))?;
    let mut raw = serde_json::to_string_pretty(settings)?;
    raw.push('\n');
    fs::write(layout.settings_file(folder), raw)?;
    Ok(())
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
