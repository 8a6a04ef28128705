//! JSON file settings store.
//!
//! Stores each settings document as `<root>/<key>.json`. Writes go to a
//! sibling temp file first and are then renamed over the target, so a crash
//! mid-write leaves the previous document intact.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use super::trait_::check_key;
use super::{Result, SettingsStore};

/// File-based settings store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create the store, creating `root` if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Directory holding the settings documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        match fs::read_to_string(self.document_path(key)).await {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&mut self, key: &str, document: &str) -> Result<()> {
        check_key(key)?;
        let path = self.document_path(key);
        write_replace(&path, document.as_bytes()).await?;
        debug!("Saved settings document {}", path.display());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        fs::remove_file(self.document_path(key)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }
}

/// Write `contents` to a temp file next to `path`, then rename it into place.
pub(crate) async fn write_replace(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, contents).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}
