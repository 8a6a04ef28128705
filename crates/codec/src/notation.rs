//! Icon value notations.
//!
//! A value in mapping text may name an icon in one of several ways. Each
//! notation is a total parser returning `None` when it does not apply; they
//! are tried in order and the first hit wins:
//!
//! - palette name: `Folder`
//! - escaped code point: `\uE821`
//! - bare code point: `E821`
//! - the literal private-use character itself

use regex::Regex;
use std::sync::OnceLock;
use taskicon_core::{code_point_hex, icon_from_code_point, is_private_use, IconPalette};

/// A named icon value parser.
#[derive(Debug, Clone, Copy)]
pub struct Notation {
    /// Short name, used in diagnostics
    pub name: &'static str,

    /// Parser
    pub parse: fn(&str) -> Option<char>,
}

/// Notations in the order they are tried.
pub const NOTATIONS: &[Notation] = &[
    Notation { name: "palette name", parse: palette_name },
    Notation { name: "escaped hex", parse: escaped_hex },
    Notation { name: "bare hex", parse: bare_hex },
    Notation { name: "literal", parse: literal_char },
];

/// Resolve a (trimmed) value to an icon character.
pub fn parse_icon_value(value: &str) -> Option<char> {
    NOTATIONS.iter().find_map(|n| (n.parse)(value))
}

/// Most readable spelling for a stored icon: its palette name if it has one,
/// otherwise its uppercase hex code point.
pub fn format_icon_value(icon: &str) -> String {
    if let Some(name) = IconPalette::name_for_icon(icon) {
        return name.to_string();
    }
    icon.chars().next().map(code_point_hex).unwrap_or_default()
}

fn escaped_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\\[uU]([0-9A-Fa-f]{4})$").expect("static pattern"))
}

fn bare_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-Fa-f]{4}$").expect("static pattern"))
}

fn palette_name(value: &str) -> Option<char> {
    IconPalette::code_for(value)
}

fn escaped_hex(value: &str) -> Option<char> {
    let hex = escaped_pattern().captures(value)?.get(1)?.as_str();
    decode_hex(hex)
}

fn bare_hex(value: &str) -> Option<char> {
    if !bare_pattern().is_match(value) {
        return None;
    }
    decode_hex(value)
}

fn literal_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if is_private_use(c) => Some(c),
        _ => None,
    }
}

fn decode_hex(hex: &str) -> Option<char> {
    let code = u32::from_str_radix(hex, 16).ok()?;
    icon_from_code_point(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_notations_agree() {
        let expected = Some('\u{E821}');
        assert_eq!(parse_icon_value("Folder"), expected);
        assert_eq!(parse_icon_value("E821"), expected);
        assert_eq!(parse_icon_value(r"\uE821"), expected);
        assert_eq!(parse_icon_value("\u{E821}"), expected);
    }

    #[test]
    fn test_hex_is_case_insensitive() {
        assert_eq!(parse_icon_value("e821"), Some('\u{E821}'));
        assert_eq!(parse_icon_value(r"\Ue821"), Some('\u{E821}'));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert_eq!(parse_icon_value("0041"), None);
        assert_eq!(parse_icon_value(r"\u0041"), None);
        assert_eq!(parse_icon_value("F900"), None);
        assert_eq!(parse_icon_value("A"), None);
    }

    #[test]
    fn test_malformed_hex_is_rejected() {
        assert_eq!(parse_icon_value("E82"), None);
        assert_eq!(parse_icon_value("E8211"), None);
        assert_eq!(parse_icon_value(r"\uE82"), None);
        assert_eq!(parse_icon_value(r"\xE821"), None);
        assert_eq!(parse_icon_value("0xE821"), None);
        assert_eq!(parse_icon_value("GGGG"), None);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(parse_icon_value("folder"), None);
        assert_eq!(parse_icon_value("Spaceship"), None);
    }

    #[test]
    fn test_format_prefers_palette_name() {
        assert_eq!(format_icon_value("\u{E821}"), "Folder");
        assert_eq!(format_icon_value("\u{F000}"), "F000");
        assert_eq!(format_icon_value(""), "");
    }

    #[test]
    fn test_notation_order() {
        let names: Vec<_> = NOTATIONS.iter().map(|n| n.name).collect();
        assert_eq!(names, ["palette name", "escaped hex", "bare hex", "literal"]);
    }
}
