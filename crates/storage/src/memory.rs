//! In-memory settings store.

use std::collections::HashMap;
use async_trait::async_trait;
use super::trait_::check_key;
use super::{Result, SettingsStore};

/// In-memory settings store. Not durable; for tests and embedding hosts that
/// persist settings themselves.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one document.
    pub fn with_document(key: impl Into<String>, document: impl Into<String>) -> Self {
        let mut documents = HashMap::new();
        documents.insert(key.into(), document.into());
        Self { documents }
    }

    /// Raw document for `key`, bypassing the async interface.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.documents.get(key).map(String::as_str)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.documents.get(key).cloned())
    }

    async fn save(&mut self, key: &str, document: &str) -> Result<()> {
        check_key(key)?;
        self.documents.insert(key.to_string(), document.to_string());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        self.documents.remove(key);
        Ok(())
    }
}
