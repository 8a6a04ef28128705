//! Icon identifiers - single private-use code points rendered by the host font.

/// First code point of the Basic Multilingual Plane private-use area.
pub const PRIVATE_USE_START: u32 = 0xE000;

/// Last code point of the Basic Multilingual Plane private-use area.
pub const PRIVATE_USE_END: u32 = 0xF8FF;

/// Icon used when a configuration does not carry a usable default
/// (CheckboxComposite).
pub const FALLBACK_ICON: &str = "\u{E73A}";

/// Whether `c` lies in the private-use range.
pub fn is_private_use(c: char) -> bool {
    (PRIVATE_USE_START..=PRIVATE_USE_END).contains(&(c as u32))
}

/// Whether `value` is a legal icon identifier: exactly one private-use char.
pub fn is_valid_icon(value: &str) -> bool {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => is_private_use(c),
        _ => false,
    }
}

/// Convert a numeric code point into an icon char, rejecting anything
/// outside the private-use range.
pub fn icon_from_code_point(code: u32) -> Option<char> {
    if !(PRIVATE_USE_START..=PRIVATE_USE_END).contains(&code) {
        return None;
    }
    char::from_u32(code)
}

/// Uppercase hex form of a code point, at least four digits, no prefix.
pub fn code_point_hex(c: char) -> String {
    format!("{:04X}", c as u32)
}
