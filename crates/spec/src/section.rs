// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Heading-bounded section extraction.
//!
//! Sections are scoped by top-level `## ` headings. Fenced code blocks
//! toggle an in-block flag; a heading seen while the flag is set is
//! content, not a boundary, so literal markdown can be carried inside a
//! section without splitting it.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::SectionKind;

#[allow(clippy::expect_used)]
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(\S.*)$").expect("constant regex pattern is valid"));

fn heading_title(line: &str) -> Option<&str> {
    HEADING.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Extract the text of the first section whose heading names `kind`.
///
/// Returns `None` when no matching heading exists ("section absent"),
/// `Some` with the trimmed text otherwise — possibly empty ("present but
/// empty"). The scan respects fenced code blocks on both sides: a
/// matching heading inside a fence does not open a section, and a
/// heading inside a fence does not close one.
pub fn extract_section(body: &str, kind: SectionKind) -> Option<String> {
    let mut in_fence = false;
    let mut collecting = false;
    let mut collected: Vec<&str> = Vec::new();

    for line in body.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
            if collecting {
                collected.push(line);
            }
            continue;
        }

        if !in_fence {
            if let Some(title) = heading_title(line) {
                if collecting {
                    break;
                }
                if kind.matches(title) {
                    collecting = true;
                }
                continue;
            }
        }

        if collecting {
            collected.push(line);
        }
    }

    if collecting {
        Some(collected.join("\n").trim().to_string())
    } else {
        None
    }
}

/// Strip one outer fence pair when the entire text is a single fenced
/// block, returning the literal content; otherwise return the text as-is.
pub fn unfence(text: &str) -> String {
    let trimmed = text.trim();
    let mut lines = trimmed.lines();
    let Some(first) = lines.next() else {
        return trimmed.to_string();
    };
    if !first.trim_start().starts_with("```") {
        return trimmed.to_string();
    }
    let body: Vec<&str> = lines.collect();
    match body.split_last() {
        Some((last, inner)) if last.trim() == "```" => inner.join("\n"),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
#[path = "section_tests.rs"]
mod tests;
