//! Settings persistence and configuration lifecycle for taskicon.
//!
//! This crate provides a trait-based key/blob settings store with JSON file
//! and in-memory implementations, and the lifecycle that loads, replaces,
//! exports and imports the mapping configuration on top of it.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;
pub mod lifecycle;

pub use trait_::{SettingsStore, StorageError, Result};
pub use json_storage::JsonFileStore;
pub use memory::MemoryStore;
pub use lifecycle::{
    export_to, import_from, reset_to_defaults, ConfigurationLifecycle, ExportDocument,
    LifecycleError, CONFIG_KEY, EXPORT_FORMAT_VERSION,
};
