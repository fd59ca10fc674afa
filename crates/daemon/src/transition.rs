// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State transition writer.
//!
//! Outcomes are durable only once the spec file has been renamed to
//! carry the new state token; notes for the operator are appended to the
//! file content behind a fixed marker so the approval path can strip
//! them and recover the original spec byte-for-byte enough to re-parse.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use roster_core::{with_state, SpecState};

/// Marker line separating spec content from an appended note.
pub const NOTE_MARKER: &str = "<!-- roster:note -->";

/// Append `note` (when given) to the file, then rename it to carry
/// `state`'s token. Returns the renamed path.
pub fn transition(path: &Path, state: SpecState, note: Option<&str>) -> io::Result<PathBuf> {
    if let Some(note) = note {
        let mut content = fs::read_to_string(path)?;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        content.push('\n');
        content.push_str(NOTE_MARKER);
        content.push('\n');
        content.push_str(note.trim_end());
        content.push('\n');
        fs::write(path, content)?;
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "spec filename is not utf-8"))?;
    let renamed = path.with_file_name(with_state(file_name, state));
    fs::rename(path, &renamed)?;
    Ok(renamed)
}

/// Content with any appended note removed.
pub fn strip_note(content: &str) -> &str {
    match content.find(NOTE_MARKER) {
        Some(pos) => content[..pos].trim_end(),
        None => content,
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
