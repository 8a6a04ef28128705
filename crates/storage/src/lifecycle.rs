//! Configuration lifecycle - load, replace, export, import, reset.
//!
//! Readers take an `Arc` snapshot of the current configuration and never hold
//! a lock while using it. Writers build a complete new configuration from a
//! clone, persist it, and only then swap it in.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskicon_codec::{parse_icon_value, parse_into, RejectedLine};
use taskicon_core::{ConfigError, IconMap, IconSourceKind, MappingConfiguration};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use crate::json_storage::write_replace;
use crate::{SettingsStore, StorageError};

/// Settings key the configuration is stored under.
pub const CONFIG_KEY: &str = "iconMapping";

/// Export document format written by this version.
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// Errors from lifecycle operations. None of them change the live
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// Settings store failure
    #[error("settings store error: {0}")]
    Storage(#[from] StorageError),

    /// File I/O failure during export or import
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Document could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Import file does not exist
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Export document written by an unknown format version
    #[error("unsupported export format version {0}")]
    UnsupportedVersion(u32),

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),

    /// Imported icon value could not be normalized
    #[error("invalid icon value {value:?} for {category} key '{key}'")]
    InvalidIconValue {
        /// Category holding the value
        category: String,
        /// Key holding the value
        key: String,
        /// The value as written
        value: String,
    },
}

/// Portable export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Format version, see [`EXPORT_FORMAT_VERSION`]
    pub format_version: u32,

    /// When the export was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,

    /// The full configuration
    pub configuration: MappingConfiguration,
}

/// Owner of the live mapping configuration and its settings store.
pub struct ConfigurationLifecycle<S: SettingsStore> {
    store: Mutex<S>,
    current: RwLock<Arc<MappingConfiguration>>,
}

impl<S: SettingsStore> ConfigurationLifecycle<S> {
    /// Open the lifecycle, loading the stored configuration.
    ///
    /// A missing, unreadable or invalid document yields the built-in
    /// defaults; the stored document is left as it is until the next update.
    pub async fn open(store: S) -> Self {
        let config = match store.load(CONFIG_KEY).await {
            Ok(Some(document)) => match decode_stored(&document) {
                Ok(config) => {
                    info!("Loaded icon mapping configuration");
                    config
                }
                Err(e) => {
                    warn!("Stored icon mapping is invalid: {}, using defaults", e);
                    MappingConfiguration::default()
                }
            },
            Ok(None) => {
                info!("No stored icon mapping, using defaults");
                MappingConfiguration::default()
            }
            Err(e) => {
                warn!("Failed to load icon mapping: {}, using defaults", e);
                MappingConfiguration::default()
            }
        };

        Self {
            store: Mutex::new(store),
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The current configuration. Cheap; clone the inner value to edit it.
    pub async fn snapshot(&self) -> Arc<MappingConfiguration> {
        self.current.read().await.clone()
    }

    /// Replace the whole configuration.
    ///
    /// The new configuration is validated and persisted before it becomes
    /// visible; on error the previous configuration stays live.
    pub async fn update(&self, config: MappingConfiguration) -> Result<(), LifecycleError> {
        let mut store = self.store.lock().await;
        self.commit(&mut *store, config).await
    }

    /// Clone the current configuration, apply `f`, and update with the result.
    ///
    /// Writers are serialized, so concurrent edits never drop each other.
    pub async fn edit<F>(&self, f: F) -> Result<Arc<MappingConfiguration>, LifecycleError>
    where
        F: FnOnce(&mut MappingConfiguration),
    {
        let mut store = self.store.lock().await;
        let mut config = self.snapshot().await.as_ref().clone();
        f(&mut config);
        self.commit(&mut *store, config).await?;
        Ok(self.snapshot().await)
    }

    /// Replace one category's mappings with the contents of a settings text
    /// block. Returns the lines that were skipped.
    pub async fn apply_mapping_text(
        &self,
        kind: IconSourceKind,
        text: &str,
    ) -> Result<Vec<RejectedLine>, LifecycleError> {
        let mut rejected = Vec::new();
        self.edit(|config| {
            rejected = parse_into(config.icons_for_mut(kind), text);
        })
        .await?;
        Ok(rejected)
    }

    /// Replace the configuration with the built-in defaults.
    pub async fn reset(&self) -> Result<(), LifecycleError> {
        self.update(reset_to_defaults()).await?;
        info!("Icon mapping reset to defaults");
        Ok(())
    }

    /// Consume the lifecycle and return its store.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    async fn commit(&self, store: &mut S, config: MappingConfiguration) -> Result<(), LifecycleError> {
        config.validate()?;
        let document = serde_json::to_string(&config)?;
        store.save(CONFIG_KEY, &document).await?;
        *self.current.write().await = Arc::new(config);
        debug!("Icon mapping configuration replaced");
        Ok(())
    }
}

/// A fresh default configuration.
pub fn reset_to_defaults() -> MappingConfiguration {
    MappingConfiguration::default()
}

/// Write `config` to `path` as an export document.
pub async fn export_to(path: &Path, config: &MappingConfiguration) -> Result<(), LifecycleError> {
    let document = ExportDocument {
        format_version: EXPORT_FORMAT_VERSION,
        exported_at: Some(Utc::now()),
        configuration: config.clone(),
    };
    let json = serde_json::to_string_pretty(&document)?;
    write_replace(path, json.as_bytes())
        .await
        .map_err(|source| LifecycleError::Io { path: path.to_path_buf(), source })?;
    info!("Exported icon mapping to {}", path.display());
    Ok(())
}

/// Read an export document from `path`.
///
/// Icon values are normalized through the settings notations, so hand
/// edited exports may use palette names or hex code points. The live
/// configuration is not touched; pass the result to [`ConfigurationLifecycle::update`].
pub async fn import_from(path: &Path) -> Result<MappingConfiguration, LifecycleError> {
    let json = match fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LifecycleError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(LifecycleError::Io { path: path.to_path_buf(), source });
        }
    };

    let document: ExportDocument = serde_json::from_str(&json)?;
    if document.format_version != EXPORT_FORMAT_VERSION {
        return Err(LifecycleError::UnsupportedVersion(document.format_version));
    }

    let config = normalize_icons(document.configuration)?;
    config.validate()?;
    debug!("Imported icon mapping from {}", path.display());
    Ok(config)
}

fn decode_stored(document: &str) -> Result<MappingConfiguration, LifecycleError> {
    let config: MappingConfiguration = serde_json::from_str(document)?;
    let config = normalize_icons(config)?;
    config.validate()?;
    Ok(config)
}

/// Re-spell every icon value as its icon character.
fn normalize_icons(mut config: MappingConfiguration) -> Result<MappingConfiguration, LifecycleError> {
    for kind in IconSourceKind::ALL {
        let map = config.icons_for_mut(kind);
        let mut normalized = IconMap::new();
        for (key, value) in map.iter() {
            let icon = parse_icon_value(value.trim()).ok_or_else(|| LifecycleError::InvalidIconValue {
                category: kind.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            })?;
            normalized.insert(key, icon.to_string());
        }
        *map = normalized;
    }

    let default_icon = parse_icon_value(config.default_icon.trim()).ok_or_else(|| {
        LifecycleError::InvalidIconValue {
            category: "default".to_string(),
            key: "defaultIcon".to_string(),
            value: config.default_icon.clone(),
        }
    })?;
    config.default_icon = default_icon.to_string();
    Ok(config)
}
