//! Mapping configuration - the persisted icon rules.

use serde::{Deserialize, Serialize};
use crate::icon::is_valid_icon;
use crate::mapping::IconMap;
use crate::palette::icon;
use crate::source::IconSourceKind;

/// Status keys checked against the derived task flags.
pub mod status_keys {
    /// Used when the task is overdue
    pub const OVERDUE: &str = "overdue";
    /// Used when the task is archived
    pub const ARCHIVED: &str = "archived";
    /// Used when the task is completed
    pub const COMPLETED: &str = "completed";
}

/// Errors raised when validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A stored icon is not a single private-use character
    #[error("invalid icon {value:?} for {category} key '{key}'")]
    InvalidIcon {
        /// Category holding the bad value
        category: IconSourceKind,
        /// Key holding the bad value
        key: String,
        /// The offending value
        value: String,
    },

    /// The default icon is not a single private-use character
    #[error("invalid default icon {0:?}")]
    InvalidDefaultIcon(String),
}

/// Icon rules: which source drives selection, the per-category dictionaries,
/// and the icon used when nothing matches.
///
/// Instances handed to readers are never mutated in place; edits go through
/// a clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MappingConfiguration {
    /// Category consulted first
    #[serde(rename = "primaryIconSource")]
    pub primary_source: IconSourceKind,

    /// Status value → icon, plus the `overdue`/`archived`/`completed` keys
    pub status_icons: IconMap,

    /// Priority value → icon
    pub priority_icons: IconMap,

    /// Project name (without `+`) → icon
    pub project_icons: IconMap,

    /// Context name (without `@`) → icon
    pub context_icons: IconMap,

    /// Tag name (without `#`) → icon
    pub tag_icons: IconMap,

    /// Icon used when nothing resolves
    pub default_icon: String,
}

impl Default for MappingConfiguration {
    fn default() -> Self {
        let status_icons = [
            (status_keys::OVERDUE, icon("Warning")),
            (status_keys::ARCHIVED, icon("Archive")),
            (status_keys::COMPLETED, icon("CheckMark")),
            ("done", icon("CheckMark")),
            ("todo", icon("Checkbox")),
            ("in progress", icon("Sync")),
            ("blocked", icon("Blocked")),
            ("waiting", icon("Clock")),
        ]
        .into_iter()
        .collect();

        let priority_icons = [
            ("urgent", icon("Important")),
            ("high", icon("Flag")),
            ("medium", icon("Pin")),
            ("low", icon("Down")),
        ]
        .into_iter()
        .collect();

        Self {
            primary_source: IconSourceKind::Status,
            status_icons,
            priority_icons,
            project_icons: IconMap::new(),
            context_icons: IconMap::new(),
            tag_icons: IconMap::new(),
            default_icon: icon("CheckboxComposite"),
        }
    }
}

impl MappingConfiguration {
    /// Dictionary for a category.
    pub fn icons_for(&self, kind: IconSourceKind) -> &IconMap {
        match kind {
            IconSourceKind::Status => &self.status_icons,
            IconSourceKind::Priority => &self.priority_icons,
            IconSourceKind::Project => &self.project_icons,
            IconSourceKind::Context => &self.context_icons,
            IconSourceKind::Tag => &self.tag_icons,
        }
    }

    /// Mutable dictionary for a category. Only call this on a private clone.
    pub fn icons_for_mut(&mut self, kind: IconSourceKind) -> &mut IconMap {
        match kind {
            IconSourceKind::Status => &mut self.status_icons,
            IconSourceKind::Priority => &mut self.priority_icons,
            IconSourceKind::Project => &mut self.project_icons,
            IconSourceKind::Context => &mut self.context_icons,
            IconSourceKind::Tag => &mut self.tag_icons,
        }
    }

    /// Check that every icon, including the default, is a legal identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_icon(&self.default_icon) {
            return Err(ConfigError::InvalidDefaultIcon(self.default_icon.clone()));
        }
        for kind in IconSourceKind::ALL {
            for (key, value) in self.icons_for(kind).iter() {
                if !is_valid_icon(value) {
                    return Err(ConfigError::InvalidIcon {
                        category: kind,
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
