// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Front-matter header parsing.
//!
//! A spec must begin with a `---` delimited block of `key: value` lines
//! containing `operation` and `agent`. Everything after the closing
//! delimiter is the body. Parse failures are values, never panics; the
//! dispatch layer downgrades them to a FAILED transition with a note.

use roster_core::OpKind;
use thiserror::Error;

/// Malformed-spec conditions.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("spec must begin with a `---` header block")]
    MissingHeader,

    #[error("header block is never closed by a `---` line")]
    UnterminatedHeader,

    #[error("header is missing the required `{0}` key")]
    MissingKey(&'static str),

    #[error("unrecognized operation `{0}`")]
    UnknownOperation(String),
}

/// Raw header fields plus the body text that follows the closing delimiter.
#[derive(Debug)]
pub(crate) struct ParsedHeader {
    pub op: OpKind,
    pub agent: String,
    pub model: Option<String>,
    pub body: String,
}

pub(crate) fn parse(text: &str) -> Result<ParsedHeader, ParseError> {
    let lines: Vec<&str> = text.lines().collect();

    let mut i = 0;
    while i < lines.len() && lines[i].trim().is_empty() {
        i += 1;
    }
    if i >= lines.len() || lines[i].trim() != "---" {
        return Err(ParseError::MissingHeader);
    }
    i += 1;

    let mut operation = None;
    let mut agent = None;
    let mut model = None;
    let mut closed = false;

    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;
        if line == "---" {
            closed = true;
            break;
        }
        // Unknown keys and non key:value lines inside the block are ignored.
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "operation" => operation = Some(value.to_string()),
            "agent" => agent = Some(value.to_string()),
            "model" => model = Some(value.to_string()),
            _ => {}
        }
    }

    if !closed {
        return Err(ParseError::UnterminatedHeader);
    }

    let operation = operation.filter(|v| !v.is_empty()).ok_or(ParseError::MissingKey("operation"))?;
    let op = OpKind::parse(&operation).ok_or(ParseError::UnknownOperation(operation))?;
    let agent = agent.filter(|v| !v.is_empty()).ok_or(ParseError::MissingKey("agent"))?;

    Ok(ParsedHeader { op, agent, model: model.filter(|v| !v.is_empty()), body: lines[i..].join("\n") })
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod tests;
