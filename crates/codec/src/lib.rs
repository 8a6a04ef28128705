//! Settings text codec.
//!
//! Converts icon dictionaries to and from the `name=value` text blocks edited
//! in the settings surface, accepting several spellings for icon values.

#![warn(missing_docs)]

pub mod notation;
pub mod text;

pub use notation::{format_icon_value, parse_icon_value, Notation, NOTATIONS};
pub use text::{
    parse_into, parse_mappings, serialize_mappings, ParseOutcome, RejectReason, RejectedLine,
    LINE_SEPARATOR,
};
