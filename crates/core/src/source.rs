//! Icon source kinds - which task field drives icon selection.

use serde::{Deserialize, Serialize};

/// The task category consulted for an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IconSourceKind {
    /// Task status, including the derived overdue/archived/completed states
    #[default]
    #[serde(alias = "status")]
    Status,
    /// Task priority
    #[serde(alias = "priority")]
    Priority,
    /// `+project` values
    #[serde(alias = "project")]
    Project,
    /// `@context` values
    #[serde(alias = "context")]
    Context,
    /// `#tag` values
    #[serde(alias = "tag")]
    Tag,
}

impl IconSourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [IconSourceKind; 5] = [
        Self::Status,
        Self::Priority,
        Self::Project,
        Self::Context,
        Self::Tag,
    ];

    /// Conventional leading character for values of this kind.
    pub fn sigil(self) -> Option<char> {
        match self {
            Self::Project => Some('+'),
            Self::Context => Some('@'),
            Self::Tag => Some('#'),
            Self::Status | Self::Priority => None,
        }
    }

    /// Lowercase name, as used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Project => "project",
            Self::Context => "context",
            Self::Tag => "tag",
        }
    }
}

impl std::fmt::Display for IconSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown source kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown icon source '{0}' (expected status, priority, project, context or tag)")]
pub struct UnknownSourceKind(pub String);

impl std::str::FromStr for IconSourceKind {
    type Err = UnknownSourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "project" | "projects" => Ok(Self::Project),
            "context" | "contexts" => Ok(Self::Context),
            "tag" | "tags" => Ok(Self::Tag),
            _ => Err(UnknownSourceKind(s.to_string())),
        }
    }
}
