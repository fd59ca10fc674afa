// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Model alias resolution.
//!
//! An immutable lookup table injected at construction; there is no hidden
//! module-level state. Unrecognized hints pass through unchanged so specs
//! can name a runtime model the table has never heard of.

use std::collections::HashMap;

/// Alias -> canonical runtime-model identifier map.
#[derive(Debug, Clone, Default)]
pub struct ModelAliases {
    table: HashMap<String, String>,
}

impl ModelAliases {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    /// Builtin table covering the short names operators actually type.
    pub fn builtin() -> Self {
        let table = [
            ("opus", "claude-opus-4-1"),
            ("sonnet", "claude-sonnet-4-5"),
            ("haiku", "claude-3-5-haiku"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { table }
    }

    /// Extend the table with `overrides`, which win on conflict.
    pub fn merge(&mut self, overrides: impl IntoIterator<Item = (String, String)>) {
        self.table.extend(overrides);
    }

    /// Resolve a hint to a canonical identifier; unknown hints pass
    /// through unchanged.
    pub fn resolve<'a>(&'a self, hint: &'a str) -> &'a str {
        let key = hint.trim();
        match self.table.get(&key.to_ascii_lowercase()) {
            Some(canonical) => canonical.as_str(),
            None => key,
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
