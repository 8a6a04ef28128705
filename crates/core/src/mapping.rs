//! Case-insensitive key → icon dictionaries.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored mapping: the key as the user spelled it and its icon.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    icon: String,
}

/// A dictionary from category values to icon identifiers.
///
/// Keys are compared case-insensitively but keep their original spelling.
/// Empty keys and empty icons are never stored. Iteration follows the
/// lowercase key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconMap {
    entries: BTreeMap<String, Entry>,
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}

impl IconMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping, replacing any key that differs only in case.
    ///
    /// Returns `false` (and stores nothing) for an empty key or icon.
    pub fn insert(&mut self, key: impl Into<String>, icon: impl Into<String>) -> bool {
        let key = key.into();
        let icon = icon.into();
        if key.is_empty() || icon.is_empty() {
            return false;
        }
        self.entries.insert(normalize(&key), Entry { key, icon });
        true
    }

    /// Look up an icon by key, ignoring case.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        self.entries.get(&normalize(key)).map(|e| e.icon.as_str())
    }

    /// Whether `key` is mapped.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a key, ignoring case. Returns the removed icon.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(&normalize(key)).map(|e| e.icon)
    }

    /// Remove every mapping.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(original key, icon)` pairs in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.values().map(|e| (e.key.as_str(), e.icon.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for IconMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = IconMap::new();
        for (key, icon) in iter {
            map.insert(key, icon);
        }
        map
    }
}

impl Serialize for IconMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, icon) in self.iter() {
            map.serialize_entry(key, icon)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for IconMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
