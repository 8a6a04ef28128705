//! Icon resolver.
//!
//! Resolution order:
//! ```text
//! primary source → status (if primary was not status) → default icon
//! ```
//! Within status, the derived flags win over the raw status string:
//! overdue, then archived, then completed, then `status` itself.

use serde::Serialize;
use taskicon_core::{
    status_keys, IconMap, IconSourceKind, MappingConfiguration, TaskSnapshot, FALLBACK_ICON,
};
use tracing::trace;

/// Where a resolved icon came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum MatchOrigin {
    /// Matched by the configured primary source
    Primary {
        /// The primary source
        source: IconSourceKind,
        /// Dictionary key that matched
        key: String,
    },

    /// Matched by the status fallback
    Fallback {
        /// Status key that matched
        key: String,
    },

    /// Nothing matched
    Default,
}

/// A resolved icon and how it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution<'a> {
    /// Icon identifier to render
    pub icon: &'a str,

    /// How it was found
    pub origin: MatchOrigin,
}

/// Icon for `task` under `config`. Never empty.
pub fn resolve_icon<'c>(task: &TaskSnapshot, config: &'c MappingConfiguration) -> &'c str {
    resolve(task, config).icon
}

/// Resolve an icon and report which rule produced it.
pub fn resolve<'c>(task: &TaskSnapshot, config: &'c MappingConfiguration) -> Resolution<'c> {
    let primary = config.primary_source;

    let resolution = if let Some((icon, key)) = match_source(primary, task, config) {
        Resolution {
            icon,
            origin: MatchOrigin::Primary { source: primary, key: key.to_string() },
        }
    } else if let Some((icon, key)) = fallback(primary, task, config) {
        Resolution {
            icon,
            origin: MatchOrigin::Fallback { key: key.to_string() },
        }
    } else {
        Resolution {
            icon: default_icon(config),
            origin: MatchOrigin::Default,
        }
    };

    trace!(status = %task.status, origin = ?resolution.origin, "Resolved icon");
    resolution
}

fn fallback<'c, 't>(
    primary: IconSourceKind,
    task: &'t TaskSnapshot,
    config: &'c MappingConfiguration,
) -> Option<(&'c str, &'t str)> {
    if primary == IconSourceKind::Status {
        return None;
    }
    match_status(task, &config.status_icons)
}

fn default_icon(config: &MappingConfiguration) -> &str {
    if config.default_icon.is_empty() {
        FALLBACK_ICON
    } else {
        &config.default_icon
    }
}

/// Match one source. Returns the icon and the key it was found under.
fn match_source<'c, 't>(
    kind: IconSourceKind,
    task: &'t TaskSnapshot,
    config: &'c MappingConfiguration,
) -> Option<(&'c str, &'t str)> {
    let icons = config.icons_for(kind);
    match kind {
        IconSourceKind::Status => match_status(task, icons),
        IconSourceKind::Priority => {
            let priority = task.priority.as_deref().filter(|p| !p.is_empty())?;
            icons.get(priority).map(|icon| (icon, priority))
        }
        IconSourceKind::Project => match_first(task.projects.as_deref(), kind, icons),
        IconSourceKind::Context => match_first(task.contexts.as_deref(), kind, icons),
        IconSourceKind::Tag => match_first(task.tags.as_deref(), kind, icons),
    }
}

fn match_status<'c, 't>(task: &'t TaskSnapshot, icons: &'c IconMap) -> Option<(&'c str, &'t str)> {
    let flags = [
        (task.is_overdue, status_keys::OVERDUE),
        (task.is_archived, status_keys::ARCHIVED),
        (task.is_completed, status_keys::COMPLETED),
    ];
    for (set, key) in flags {
        if !set {
            continue;
        }
        if let Some(icon) = icons.get(key) {
            return Some((icon, key));
        }
    }

    let status = task.status.as_str();
    if status.is_empty() {
        return None;
    }
    icons.get(status).map(|icon| (icon, status))
}

/// First value, in task order, whose sigil-stripped form is mapped.
fn match_first<'c, 't>(
    values: Option<&'t [String]>,
    kind: IconSourceKind,
    icons: &'c IconMap,
) -> Option<(&'c str, &'t str)> {
    values?.iter().find_map(|value| {
        let key = strip_sigil(value, kind);
        if key.is_empty() {
            return None;
        }
        icons.get(key).map(|icon| (icon, key))
    })
}

fn strip_sigil(value: &str, kind: IconSourceKind) -> &str {
    match kind.sigil() {
        Some(sigil) => value.strip_prefix(sigil).unwrap_or(value),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskicon_core::{is_valid_icon, IconMap};

    const OVERDUE: &str = "\u{E7BA}";
    const ARCHIVED: &str = "\u{E7B8}";
    const COMPLETED: &str = "\u{E73E}";
    const BLOCKED: &str = "\u{E733}";
    const FOLDER: &str = "\u{E821}";
    const HOME: &str = "\u{E80F}";

    fn map(pairs: &[(&str, &str)]) -> IconMap {
        pairs.iter().copied().collect()
    }

    fn config_with(primary: IconSourceKind) -> MappingConfiguration {
        MappingConfiguration {
            primary_source: primary,
            ..Default::default()
        }
    }

    #[test]
    fn test_status_precedence() {
        let mut config = config_with(IconSourceKind::Status);
        config.status_icons = map(&[
            ("overdue", OVERDUE),
            ("archived", ARCHIVED),
            ("completed", COMPLETED),
            ("blocked", BLOCKED),
        ]);

        let all = TaskSnapshot::new("blocked").overdue(true).archived(true).completed(true);
        assert_eq!(resolve_icon(&all, &config), OVERDUE);

        let archived = all.clone().overdue(false);
        assert_eq!(resolve_icon(&archived, &config), ARCHIVED);

        let completed = archived.clone().archived(false);
        assert_eq!(resolve_icon(&completed, &config), COMPLETED);

        let raw = completed.completed(false);
        assert_eq!(resolve_icon(&raw, &config), BLOCKED);
    }

    #[test]
    fn test_flag_without_mapping_falls_through() {
        let mut config = config_with(IconSourceKind::Status);
        config.status_icons = map(&[("completed", COMPLETED), ("blocked", BLOCKED)]);

        let task = TaskSnapshot::new("blocked").overdue(true).completed(true);
        let resolution = resolve(&task, &config);
        assert_eq!(resolution.icon, COMPLETED);
        assert_eq!(
            resolution.origin,
            MatchOrigin::Primary { source: IconSourceKind::Status, key: "completed".into() }
        );
    }

    #[test]
    fn test_status_is_case_insensitive() {
        let mut config = config_with(IconSourceKind::Status);
        config.status_icons = map(&[("Done", COMPLETED)]);
        assert_eq!(resolve_icon(&TaskSnapshot::new("DONE"), &config), COMPLETED);
    }

    #[test]
    fn test_status_is_not_sigil_stripped() {
        let mut config = config_with(IconSourceKind::Status);
        config.status_icons = map(&[("done", COMPLETED)]);
        let resolution = resolve(&TaskSnapshot::new("#done"), &config);
        assert_eq!(resolution.origin, MatchOrigin::Default);
    }

    #[test]
    fn test_default_fallback() {
        let mut config = config_with(IconSourceKind::Status);
        config.status_icons = IconMap::new();
        config.default_icon = "\u{E73A}".into();
        for status in ["todo", "done", "", "anything"] {
            let task = TaskSnapshot::new(status).overdue(true);
            assert_eq!(resolve_icon(&task, &config), "\u{E73A}");
        }
    }

    #[test]
    fn test_empty_default_still_resolves() {
        let mut config = config_with(IconSourceKind::Status);
        config.status_icons = IconMap::new();
        config.default_icon = String::new();
        assert_eq!(resolve_icon(&TaskSnapshot::new("x"), &config), FALLBACK_ICON);
    }

    #[test]
    fn test_priority_source() {
        let mut config = config_with(IconSourceKind::Priority);
        config.priority_icons = map(&[("high", FOLDER)]);

        let task = TaskSnapshot::new("todo").with_priority("HIGH");
        let resolution = resolve(&task, &config);
        assert_eq!(resolution.icon, FOLDER);
        assert_eq!(
            resolution.origin,
            MatchOrigin::Primary { source: IconSourceKind::Priority, key: "HIGH".into() }
        );

        let empty = TaskSnapshot::new("todo").with_priority("");
        assert_ne!(resolve_icon(&empty, &config), FOLDER);
    }

    #[test]
    fn test_first_match_project_order() {
        let mut config = config_with(IconSourceKind::Project);
        config.project_icons = map(&[("beta", "\u{E800}")]);
        let task = TaskSnapshot::new("todo").with_projects(["+alpha", "+beta"]);
        assert_eq!(resolve_icon(&task, &config), "\u{E800}");

        config.project_icons.insert("alpha", FOLDER);
        assert_eq!(resolve_icon(&task, &config), FOLDER);
    }

    #[test]
    fn test_sigil_normalization() {
        let mut config = config_with(IconSourceKind::Context);
        config.context_icons = map(&[("phone", HOME)]);

        let with_sigil = TaskSnapshot::new("todo").with_contexts(["@phone"]);
        let without = TaskSnapshot::new("todo").with_contexts(["phone"]);
        assert_eq!(resolve_icon(&with_sigil, &config), HOME);
        assert_eq!(resolve_icon(&without, &config), HOME);
    }

    #[test]
    fn test_only_one_sigil_of_the_right_kind_is_stripped() {
        let mut config = config_with(IconSourceKind::Tag);
        config.tag_icons = map(&[("urgent", FOLDER)]);
        config.status_icons = IconMap::new();

        let double = TaskSnapshot::new("todo").with_tags(["##urgent"]);
        assert_eq!(resolve(&double, &config).origin, MatchOrigin::Default);

        let wrong = TaskSnapshot::new("todo").with_tags(["@urgent"]);
        assert_eq!(resolve(&wrong, &config).origin, MatchOrigin::Default);

        let bare_sigil = TaskSnapshot::new("todo").with_tags(["#", "#Urgent"]);
        assert_eq!(resolve_icon(&bare_sigil, &config), FOLDER);
    }

    #[test]
    fn test_fallback_matches_status_resolution() {
        let mut project_config = MappingConfiguration::default();
        project_config.primary_source = IconSourceKind::Project;
        project_config.project_icons = map(&[("gamma", FOLDER)]);

        let mut status_config = project_config.clone();
        status_config.primary_source = IconSourceKind::Status;

        let tasks = [
            TaskSnapshot::new("todo").with_projects(["+alpha"]),
            TaskSnapshot::new("done").completed(true),
            TaskSnapshot::new("waiting").overdue(true).with_projects(Vec::<String>::new()),
            TaskSnapshot::new("unmapped").with_projects(["+beta"]),
        ];
        for task in &tasks {
            assert_eq!(
                resolve_icon(task, &project_config),
                resolve_icon(task, &status_config),
                "{task:?}"
            );
        }

        let resolution = resolve(&tasks[0], &project_config);
        assert_eq!(resolution.origin, MatchOrigin::Fallback { key: "todo".into() });
    }

    #[test]
    fn test_missing_collections_fall_back() {
        let mut config = MappingConfiguration::default();
        config.primary_source = IconSourceKind::Tag;
        config.tag_icons = map(&[("x", FOLDER)]);
        let task = TaskSnapshot::new("todo");
        assert_eq!(resolve_icon(&task, &config), config.status_icons.get("todo").unwrap());
    }

    #[test]
    fn test_resolution_totality() {
        let mut sparse = MappingConfiguration::default();
        sparse.status_icons = IconMap::new();
        sparse.priority_icons = IconMap::new();
        let configs: Vec<MappingConfiguration> = IconSourceKind::ALL
            .into_iter()
            .flat_map(|kind| {
                let mut full = MappingConfiguration::default();
                full.primary_source = kind;
                let mut empty = sparse.clone();
                empty.primary_source = kind;
                [full, empty]
            })
            .collect();

        let tasks = [
            TaskSnapshot::default(),
            TaskSnapshot::new("todo"),
            TaskSnapshot::new("DONE").completed(true),
            TaskSnapshot::new("").overdue(true).archived(true),
            TaskSnapshot::new("x")
                .with_priority("low")
                .with_projects(["+", ""])
                .with_contexts(["@"])
                .with_tags(["#"]),
        ];

        for config in &configs {
            for task in &tasks {
                let icon = resolve_icon(task, config);
                assert_eq!(icon.chars().count(), 1);
                assert!(is_valid_icon(icon));
            }
        }
    }

    #[test]
    fn test_origin_serializes_with_tag() {
        let origin = MatchOrigin::Fallback { key: "todo".into() };
        let json = serde_json::to_value(&origin).unwrap();
        assert_eq!(json, serde_json::json!({ "origin": "fallback", "key": "todo" }));
    }
}
