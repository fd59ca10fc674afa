// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spec-file lifecycle states encoded entirely in the filename.
//!
//! A spec file is named `{operation}-{identifier}[.{STATE}].md`. Bare
//! operation-prefixed names are `New`; processed files carry a state token
//! before the extension. Transitions are one-way and terminal except
//! `PendingApproval -> Approved`, which is an external operator rename.
//! A file never re-enters `New`.

use crate::op::OpKind;

/// Processing state of a spec file, as read from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecState {
    New,
    PendingApproval,
    Approved,
    Applied,
    Failed,
}

crate::simple_display! {
    SpecState {
        New => "NEW",
        PendingApproval => "PENDING_APPROVAL",
        Approved => "APPROVED",
        Applied => "APPLIED",
        Failed => "FAILED",
    }
}

/// States carrying a filename token, checked in classification order.
const TOKENED: [SpecState; 4] =
    [SpecState::PendingApproval, SpecState::Approved, SpecState::Applied, SpecState::Failed];

impl SpecState {
    /// Filename token for this state; `New` files are bare.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            SpecState::New => None,
            SpecState::PendingApproval => Some("PENDING_APPROVAL"),
            SpecState::Approved => Some("APPROVED"),
            SpecState::Applied => Some("APPLIED"),
            SpecState::Failed => Some("FAILED"),
        }
    }

    /// Classify a directory entry name.
    ///
    /// Returns `None` for entries the poller ignores: non-markdown files
    /// and markdown files that neither carry a state token nor start with
    /// an operation keyword.
    pub fn classify(file_name: &str) -> Option<SpecState> {
        let stem = file_name.strip_suffix(".md")?;
        for state in TOKENED {
            if let Some(token) = state.token() {
                if let Some(rest) = stem.strip_suffix(token) {
                    if rest.ends_with('.') {
                        return Some(state);
                    }
                }
            }
        }
        OpKind::from_file_prefix(stem).map(|_| SpecState::New)
    }
}

/// Compute the entry name carrying `state`'s token, stripping any token
/// the name already has.
pub fn with_state(file_name: &str, state: SpecState) -> String {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    let mut base = stem;
    for s in TOKENED {
        if let Some(token) = s.token() {
            if let Some(rest) = stem.strip_suffix(token) {
                if let Some(bare) = rest.strip_suffix('.') {
                    base = bare;
                    break;
                }
            }
        }
    }
    match state.token() {
        Some(token) => format!("{base}.{token}.md"),
        None => format!("{base}.md"),
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
