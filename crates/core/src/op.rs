// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation kinds recognized in spec headers and filenames.

use serde::{Deserialize, Serialize};

/// The three reconciliation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Create,
    Modify,
    Delete,
}

crate::simple_display! {
    OpKind {
        Create => "create",
        Modify => "modify",
        Delete => "delete",
    }
}

impl OpKind {
    pub const ALL: [OpKind; 3] = [OpKind::Create, OpKind::Modify, OpKind::Delete];

    /// Keyword as it appears in headers and filename prefixes.
    pub fn keyword(&self) -> &'static str {
        match self {
            OpKind::Create => "create",
            OpKind::Modify => "modify",
            OpKind::Delete => "delete",
        }
    }

    /// Parse a header value (`operation: create`). Case-insensitive.
    pub fn parse(s: &str) -> Option<OpKind> {
        let s = s.trim();
        Self::ALL.into_iter().find(|op| s.eq_ignore_ascii_case(op.keyword()))
    }

    /// Match a filename stem prefix (`create-billing`).
    pub fn from_file_prefix(stem: &str) -> Option<OpKind> {
        Self::ALL
            .into_iter()
            .find(|op| stem.len() > op.keyword().len() + 1 && stem.starts_with(op.keyword()) && stem.as_bytes()[op.keyword().len()] == b'-')
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
