// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;

/// Resolve root directory: ROSTER_ROOT > XDG_STATE_HOME/roster > ~/.local/state/roster
pub fn root_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("ROSTER_ROOT") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("roster"));
    }
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoRootDir)?;
    Ok(PathBuf::from(home).join(".local/state/roster"))
}

/// Poll interval override (`ROSTER_POLL_MS`).
pub fn poll_interval() -> Option<Duration> {
    std::env::var("ROSTER_POLL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Required environment keys override (`ROSTER_REQUIRED_ENV`, comma list).
pub fn required_env() -> Option<Vec<String>> {
    let raw = std::env::var("ROSTER_REQUIRED_ENV").ok()?;
    let keys: Vec<String> =
        raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect();
    Some(keys)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
