//! `name=value` mapping text.
//!
//! Serialization writes one line per mapping using the most readable icon
//! spelling. Parsing is total: malformed lines are reported and skipped, the
//! rest are kept.

use serde::Serialize;
use taskicon_core::IconMap;
use tracing::warn;
use crate::notation::{format_icon_value, parse_icon_value};

/// Separator written between serialized lines.
pub const LINE_SEPARATOR: &str = "\n";

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// No `=` on the line
    MissingSeparator,
    /// Nothing before the `=`
    EmptyName,
    /// Nothing after the `=`
    EmptyValue,
    /// Value is not a palette name, code point or private-use character
    UnknownIcon,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::MissingSeparator => "expected name=value",
            Self::EmptyName => "empty name",
            Self::EmptyValue => "empty value",
            Self::UnknownIcon => "unknown icon",
        };
        f.write_str(msg)
    }
}

/// A skipped line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedLine {
    /// 1-based line number
    pub line_number: usize,

    /// Line content as given
    pub content: String,

    /// Why it was skipped
    pub reason: RejectReason,
}

/// Result of parsing a text block.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Accepted mappings
    pub mappings: IconMap,

    /// Lines that were skipped
    pub rejected: Vec<RejectedLine>,
}

impl ParseOutcome {
    /// Whether every non-blank line was accepted.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Render a map as `name=value` lines.
pub fn serialize_mappings(map: &IconMap) -> String {
    map.iter()
        .map(|(key, icon)| format!("{}={}", key, format_icon_value(icon)))
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Parse a text block into a fresh map.
pub fn parse_mappings(text: &str) -> ParseOutcome {
    let mut mappings = IconMap::new();
    let rejected = parse_into(&mut mappings, text);
    ParseOutcome { mappings, rejected }
}

/// Replace the contents of `target` with the mappings in `text`.
///
/// Returns the skipped lines.
pub fn parse_into(target: &mut IconMap, text: &str) -> Vec<RejectedLine> {
    target.clear();
    let mut rejected = Vec::new();

    for (index, line) in split_lines(text).enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok((name, icon)) => {
                target.insert(name, icon.to_string());
            }
            Err(reason) => {
                warn!("Skipping mapping line {}: {} ({:?})", index + 1, reason, line);
                rejected.push(RejectedLine {
                    line_number: index + 1,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    rejected
}

/// Split on real newlines and on the escaped `\n` token some text widgets
/// send instead.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|line| line.split("\\n"))
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.strip_suffix("\\r").unwrap_or(line)
        })
}

fn parse_line(line: &str) -> Result<(&str, char), RejectReason> {
    let (name, value) = line.split_once('=').ok_or(RejectReason::MissingSeparator)?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() {
        return Err(RejectReason::EmptyName);
    }
    if value.is_empty() {
        return Err(RejectReason::EmptyValue);
    }
    let icon = parse_icon_value(value).ok_or(RejectReason::UnknownIcon)?;
    Ok((name, icon))
}
