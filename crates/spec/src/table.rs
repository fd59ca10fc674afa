// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lenient list-row decoding.
//!
//! Sections like mounts, environment keys, and scheduled tasks are
//! loosely structured lists: a row starts at a list-marker line carrying
//! a `key: value` pair, and indented or bare `key: value` lines extend it
//! until the next marker. The source is natural-language-adjacent text,
//! so unparseable lines are skipped rather than failing the operation.

use indexmap::IndexMap;
use roster_core::{ContextMode, MountEntry};
use tracing::debug;

/// One decoded record: ordered key -> value, keys lowercased.
pub type Row = IndexMap<String, String>;

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))
}

fn parse_pair(text: &str) -> Option<(String, String)> {
    let (key, value) = text.split_once(':')?;
    let key = key.trim().trim_matches('*').to_lowercase();
    if key.is_empty() || key.contains(' ') {
        return None;
    }
    Some((key, value.trim().to_string()))
}

/// Decode a section of free text into an ordered sequence of rows.
pub fn decode_rows(text: &str) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut current: Option<Row> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = list_item(trimmed) {
            // A marker line always terminates the row in progress.
            if let Some(row) = current.take() {
                rows.push(row);
            }
            match parse_pair(rest) {
                Some((key, value)) => {
                    let mut row = Row::new();
                    row.insert(key, value);
                    current = Some(row);
                }
                None => debug!(line = trimmed, "skipping list item without a key: value pair"),
            }
        } else if let Some((key, value)) = parse_pair(trimmed) {
            match current.as_mut() {
                Some(row) => {
                    row.insert(key, value);
                }
                // A continuation line with no open row has nothing to extend.
                None => debug!(line = trimmed, "skipping continuation outside any row"),
            }
        } else {
            debug!(line = trimmed, "skipping unparseable line");
        }
    }

    if let Some(row) = current.take() {
        rows.push(row);
    }
    rows
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "ro" | "readonly" | "1")
}

fn first_of<'a>(row: &'a Row, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| row.get(*k)).map(String::as_str).filter(|v| !v.is_empty())
}

/// Decode mount rows. Rows without both a host and a container path are
/// dropped with a debug log.
pub fn decode_mounts(text: &str) -> Vec<MountEntry> {
    decode_rows(text)
        .into_iter()
        .filter_map(|row| {
            let host = first_of(&row, &["host", "host_path"]);
            let container = first_of(&row, &["container", "container_path"]);
            match (host, container) {
                (Some(host), Some(container)) => Some(MountEntry {
                    host_path: host.into(),
                    container_path: container.into(),
                    readonly: row.get("readonly").is_some_and(|v| truthy(v)),
                }),
                _ => {
                    debug!(?row, "skipping mount row without host and container");
                    None
                }
            }
        })
        .collect()
}

/// Decode environment rows into ordered `(key, value)` pairs.
pub fn decode_env(text: &str) -> Vec<(String, String)> {
    decode_rows(text)
        .into_iter()
        .filter_map(|row| {
            let key = first_of(&row, &["key", "name"])?;
            let value = row.get("value").cloned().unwrap_or_default();
            Some((key.to_string(), value))
        })
        .collect()
}

/// One declared scheduled-task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: Option<String>,
    pub schedule: String,
    pub prompt: String,
    pub context: ContextMode,
}

/// Decode scheduled-task rows. Rows without a schedule or a prompt are
/// dropped with a debug log.
pub fn decode_tasks(text: &str) -> Vec<TaskRow> {
    decode_rows(text)
        .into_iter()
        .filter_map(|row| {
            let schedule = first_of(&row, &["cron", "schedule"]);
            let prompt = first_of(&row, &["prompt"]);
            match (schedule, prompt) {
                (Some(schedule), Some(prompt)) => Some(TaskRow {
                    id: row.get("id").filter(|v| !v.is_empty()).cloned(),
                    schedule: schedule.to_string(),
                    prompt: prompt.to_string(),
                    context: row.get("context").map(|v| ContextMode::parse(v)).unwrap_or(ContextMode::Group),
                }),
                _ => {
                    debug!(?row, "skipping task row without schedule and prompt");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
