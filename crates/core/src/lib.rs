//! taskicon core data models.
//!
//! Icon identifiers, the built-in palette, task snapshots and the mapping
//! configuration that the resolver and the settings codec operate on.

#![warn(missing_docs)]

// Icons
mod icon;
mod palette;

// Task input
mod source;
mod task;

// Configuration
mod mapping;
mod config;

// Re-exports
pub use icon::{
    code_point_hex, icon_from_code_point, is_private_use, is_valid_icon,
    FALLBACK_ICON, PRIVATE_USE_END, PRIVATE_USE_START,
};
pub use palette::{IconPalette, PaletteEntry};
pub use source::{IconSourceKind, UnknownSourceKind};
pub use task::TaskSnapshot;
pub use mapping::IconMap;
pub use config::{status_keys, ConfigError, MappingConfiguration};
