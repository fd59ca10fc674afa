// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secret store client.
//!
//! Lookups are best-effort by contract: absent keys are omitted from the
//! result, never an error.

use std::collections::HashMap;

/// Read-only secret lookup by key name.
pub trait SecretStore: Send + Sync {
    /// Return the subset of `keys` that are present, in request order.
    fn lookup(&self, keys: &[String]) -> Vec<(String, String)>;
}

/// Secrets resolved from the daemon's own process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn lookup(&self, keys: &[String]) -> Vec<(String, String)> {
        keys.iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| (key.clone(), value)))
            .collect()
    }
}

/// Fixed map of secrets for tests.
#[derive(Debug, Clone, Default)]
pub struct MapSecretStore {
    entries: HashMap<String, String>,
}

impl MapSecretStore {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self { entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl SecretStore for MapSecretStore {
    fn lookup(&self, keys: &[String]) -> Vec<(String, String)> {
        keys.iter()
            .filter_map(|key| self.entries.get(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }
}

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod tests;
