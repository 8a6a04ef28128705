//! Settings store trait abstraction.

use async_trait::async_trait;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be used as a storage name
    #[error("Invalid settings key: {0:?}")]
    InvalidKey(String),
}

/// Opaque key → document store for settings.
///
/// Every save replaces the whole document stored under a key; readers never
/// observe a partially written document.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the document stored under `key`.
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`.
    async fn save(&mut self, key: &str, document: &str) -> Result<()>;

    /// Remove the document stored under `key`. Missing keys are not an error.
    async fn remove(&mut self, key: &str) -> Result<()>;
}

/// Keys become file names, so keep them to a safe alphabet.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
