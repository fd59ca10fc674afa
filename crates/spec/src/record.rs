// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured spec record and the fixed section vocabulary.

use roster_core::OpKind;

use crate::header::{self, ParseError};
use crate::section::extract_section;

/// Section names a spec body may carry. Matching is case-insensitive and
/// some kinds accept synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Instruction-document content.
    Instructions,
    /// Content appended to an existing instruction document.
    Append,
    /// Filesystem mounts list.
    Mounts,
    /// API keys / environment entries list.
    Environment,
    /// Scheduled tasks list.
    Tasks,
}

impl SectionKind {
    /// Heading titles accepted for this section, lowercased.
    pub fn accepted_names(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Instructions => &["instructions", "agent instructions"],
            SectionKind::Append => &["append", "append instructions"],
            SectionKind::Mounts => &["mounts"],
            SectionKind::Environment => &["api keys", "environment"],
            SectionKind::Tasks => &["scheduled tasks", "tasks"],
        }
    }

    /// True when a heading title names this section.
    pub fn matches(&self, title: &str) -> bool {
        let title = title.trim().to_lowercase();
        self.accepted_names().contains(&title.as_str())
    }
}

/// One parsed spec file: operation, target identity, optional model hint,
/// and the raw body the section extractor works over.
///
/// Created by [`parse_spec`] at poll time, immutable, discarded once the
/// operation completes or fails.
#[derive(Debug)]
pub struct SpecRecord {
    pub op: OpKind,
    pub agent: String,
    pub model: Option<String>,
    body: String,
}

impl SpecRecord {
    /// Extract a named section from the body.
    ///
    /// `None` means the section is absent; `Some` with an empty string
    /// means it is present but empty — callers must distinguish the two.
    pub fn section(&self, kind: SectionKind) -> Option<String> {
        extract_section(&self.body, kind)
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Parse raw spec-file text into a [`SpecRecord`].
pub fn parse_spec(text: &str) -> Result<SpecRecord, ParseError> {
    let parsed = header::parse(text)?;
    Ok(SpecRecord { op: parsed.op, agent: parsed.agent, model: parsed.model, body: parsed.body })
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
