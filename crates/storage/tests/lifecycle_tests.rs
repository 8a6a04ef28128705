use std::sync::Arc;
use taskicon_core::{IconSourceKind, MappingConfiguration, TaskSnapshot};
use taskicon_engine::resolve_icon;
use taskicon_storage::{
    export_to, import_from, ConfigurationLifecycle, JsonFileStore, SettingsStore, CONFIG_KEY,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_settings_edit_drives_resolution() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path()).await.unwrap();
    let lifecycle = ConfigurationLifecycle::open(store).await;

    let task = TaskSnapshot::new("todo").with_contexts(["@phone", "@home"]);
    let before = lifecycle.snapshot().await;
    assert_eq!(resolve_icon(&task, &before), "\u{E739}");

    lifecycle
        .edit(|c| c.primary_source = IconSourceKind::Context)
        .await
        .unwrap();
    lifecycle
        .apply_mapping_text(IconSourceKind::Context, "home=Home\\nphone=Phone")
        .await
        .unwrap();

    let after = lifecycle.snapshot().await;
    assert_eq!(resolve_icon(&task, &after), "\u{E717}");
    // The earlier snapshot is unaffected by the edits.
    assert_eq!(resolve_icon(&task, &before), "\u{E739}");
}

#[tokio::test]
async fn test_configuration_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let lifecycle = ConfigurationLifecycle::open(JsonFileStore::new(dir.path()).await.unwrap()).await;
    lifecycle
        .apply_mapping_text(IconSourceKind::Tag, "urgent=Warning")
        .await
        .unwrap();
    let saved = lifecycle.snapshot().await;
    drop(lifecycle);

    let store = JsonFileStore::new(dir.path()).await.unwrap();
    let document = store.load(CONFIG_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&document).unwrap();
    assert_eq!(json["tagIcons"]["urgent"], "\u{E7BA}");
    assert_eq!(json["primaryIconSource"], "Status");

    let reopened = ConfigurationLifecycle::open(store).await;
    assert_eq!(reopened.snapshot().await, saved);
}

#[tokio::test]
async fn test_import_then_update_replaces_live_config() {
    let dir = TempDir::new().unwrap();
    let export_path = dir.path().join("export.json");

    let mut exported = MappingConfiguration::default();
    exported.primary_source = IconSourceKind::Priority;
    exported.priority_icons.insert("someday", "\u{E823}");
    export_to(&export_path, &exported).await.unwrap();

    let lifecycle =
        ConfigurationLifecycle::open(JsonFileStore::new(dir.path().join("settings")).await.unwrap())
            .await;
    let imported = import_from(&export_path).await.unwrap();
    assert_eq!(*lifecycle.snapshot().await, MappingConfiguration::default());

    lifecycle.update(imported).await.unwrap();
    let task = TaskSnapshot::new("todo").with_priority("Someday");
    assert_eq!(resolve_icon(&task, &*lifecycle.snapshot().await), "\u{E823}");
}

#[tokio::test]
async fn test_concurrent_edits_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let lifecycle = Arc::new(
        ConfigurationLifecycle::open(JsonFileStore::new(dir.path()).await.unwrap()).await,
    );

    let mut handles = Vec::new();
    for i in 0..8 {
        let lifecycle = Arc::clone(&lifecycle);
        handles.push(tokio::spawn(async move {
            lifecycle
                .edit(move |c| {
                    c.tag_icons.insert(format!("tag{i}"), "\u{E8EC}");
                })
                .await
                .map(|_| ())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(lifecycle.snapshot().await.tag_icons.len(), 8);
}
