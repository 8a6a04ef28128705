//! Task snapshot - the read-only view of a task used for icon resolution.

use serde::{Deserialize, Serialize};

/// A task as seen by the resolver.
///
/// The `is_*` flags are derived by whoever owns task semantics (the task
/// data provider) and are trusted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskSnapshot {
    /// Raw status string
    pub status: String,

    /// Raw priority string
    pub priority: Option<String>,

    /// Project values, possibly `+`-prefixed
    pub projects: Option<Vec<String>>,

    /// Context values, possibly `@`-prefixed
    pub contexts: Option<Vec<String>>,

    /// Tag values, possibly `#`-prefixed
    pub tags: Option<Vec<String>>,

    /// Past due and not completed
    pub is_overdue: bool,

    /// Archived
    pub is_archived: bool,

    /// Completed
    pub is_completed: bool,
}

impl TaskSnapshot {
    /// Create a snapshot with the given status and nothing else set.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Default::default()
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Set the projects.
    pub fn with_projects<I, T>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.projects = Some(projects.into_iter().map(Into::into).collect());
        self
    }

    /// Set the contexts.
    pub fn with_contexts<I, T>(mut self, contexts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.contexts = Some(contexts.into_iter().map(Into::into).collect());
        self
    }

    /// Set the tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Mark as overdue.
    pub fn overdue(mut self, value: bool) -> Self {
        self.is_overdue = value;
        self
    }

    /// Mark as archived.
    pub fn archived(mut self, value: bool) -> Self {
        self.is_archived = value;
        self
    }

    /// Mark as completed.
    pub fn completed(mut self, value: bool) -> Self {
        self.is_completed = value;
        self
    }
}
