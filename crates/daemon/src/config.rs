// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration.
//!
//! Everything tunable is resolved once at startup and injected into the
//! poller: environment overrides win over `config.toml` under the root,
//! which wins over builtins. Lookup tables (model aliases, self-identity
//! aliases) are plain immutable maps carried by the config, not module
//! state.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use roster_core::ModelAliases;
use serde::Deserialize;
use thiserror::Error;

use crate::env;
use crate::gate::SelfIdentity;

/// Default poll interval when neither the environment nor the config
/// file overrides it.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Resolved daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared root everything lives under.
    pub root: PathBuf,
    pub poll_interval: Duration,
    /// Environment keys every new agent's settings bundle should carry.
    pub required_env: Vec<String>,
    pub model_aliases: ModelAliases,
    pub identity: SelfIdentity,
}

/// Optional `config.toml` under the root.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    poll_ms: Option<u64>,
    #[serde(default)]
    required_env: Vec<String>,
    #[serde(default)]
    model_aliases: HashMap<String, String>,
    #[serde(default)]
    self_aliases: Vec<String>,
    self_folder: Option<String>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the roster root directory")]
    NoRootDir,

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration for the daemon, resolving the root from the
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(env::root_dir()?)
    }

    /// Load configuration against an explicit root.
    pub fn load_from(root: PathBuf) -> Result<Self, ConfigError> {
        let config_path = root.join("config.toml");
        let file: ConfigFile = if config_path.is_file() {
            toml::from_str(&fs::read_to_string(&config_path)?)?
        } else {
            ConfigFile::default()
        };

        let poll_interval = env::poll_interval()
            .or(file.poll_ms.map(Duration::from_millis))
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let required_env = env::required_env().unwrap_or(file.required_env);

        // File entries extend the builtin alias table and win on conflict.
        let mut model_aliases = ModelAliases::builtin();
        model_aliases.merge(file.model_aliases);

        let default_identity = SelfIdentity::default();
        let aliases = if file.self_aliases.is_empty() {
            default_identity.aliases().to_vec()
        } else {
            file.self_aliases
        };
        let folder =
            file.self_folder.unwrap_or_else(|| default_identity.folder().to_string());
        let identity = SelfIdentity::new(aliases, folder);

        Ok(Self { root, poll_interval, required_env, model_aliases, identity })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
