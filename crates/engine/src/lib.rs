//! Icon resolution.
//!
//! Picks the icon for a task from a mapping configuration: the primary
//! source first, then status as the universal fallback, then the default.

#![warn(missing_docs)]

pub mod resolver;

pub use resolver::{resolve, resolve_icon, MatchOrigin, Resolution};
