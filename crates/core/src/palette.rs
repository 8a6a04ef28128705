//! The built-in icon palette.
//!
//! A fixed catalog of friendly names for the glyph font's private-use code
//! points. It only exists to make mapping text readable; resolution never
//! consults it.

/// A palette entry: friendly name and its code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Friendly name, unique within the palette
    pub name: &'static str,

    /// Icon code point
    pub code: char,
}

const fn entry(name: &'static str, code: char) -> PaletteEntry {
    PaletteEntry { name, code }
}

/// Catalog, sorted by name. Names and codes are each unique.
static PALETTE: &[PaletteEntry] = &[
    entry("Add", '\u{E710}'),
    entry("Archive", '\u{E7B8}'),
    entry("Attach", '\u{E723}'),
    entry("Blocked", '\u{E733}'),
    entry("Bookmark", '\u{E8A4}'),
    entry("Calendar", '\u{E787}'),
    entry("CheckMark", '\u{E73E}'),
    entry("Checkbox", '\u{E739}'),
    entry("CheckboxComposite", '\u{E73A}'),
    entry("Clock", '\u{E823}'),
    entry("Cloud", '\u{E753}'),
    entry("Code", '\u{E943}'),
    entry("Contact", '\u{E77B}'),
    entry("Document", '\u{E8A5}'),
    entry("Down", '\u{E74B}'),
    entry("Edit", '\u{E70F}'),
    entry("Favorite", '\u{E734}'),
    entry("Flag", '\u{E7C1}'),
    entry("Folder", '\u{E821}'),
    entry("Globe", '\u{E774}'),
    entry("Heart", '\u{EB51}'),
    entry("Home", '\u{E80F}'),
    entry("Important", '\u{E8C9}'),
    entry("Library", '\u{E8F1}'),
    entry("Lightbulb", '\u{EA80}'),
    entry("Link", '\u{E71B}'),
    entry("List", '\u{E8FD}'),
    entry("Mail", '\u{E715}'),
    entry("People", '\u{E716}'),
    entry("Phone", '\u{E717}'),
    entry("Pin", '\u{E718}'),
    entry("Repair", '\u{E90F}'),
    entry("Shop", '\u{E719}'),
    entry("Sync", '\u{E895}'),
    entry("Tag", '\u{E8EC}'),
    entry("Up", '\u{E74A}'),
    entry("Warning", '\u{E7BA}'),
];

/// Fixed, bidirectional name/code catalog.
pub struct IconPalette;

impl IconPalette {
    /// All entries, in catalog order.
    pub fn entries() -> &'static [PaletteEntry] {
        PALETTE
    }

    /// Code for an exact (case-sensitive) friendly name.
    pub fn code_for(name: &str) -> Option<char> {
        PALETTE.iter().find(|e| e.name == name).map(|e| e.code)
    }

    /// First name carrying `code`.
    pub fn name_for(code: char) -> Option<&'static str> {
        PALETTE.iter().find(|e| e.code == code).map(|e| e.name)
    }

    /// Name for an icon string, if it is a single palette code.
    pub fn name_for_icon(icon: &str) -> Option<&'static str> {
        let mut chars = icon.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::name_for(c),
            _ => None,
        }
    }
}

/// Shorthand for building icon strings from palette names in defaults.
pub(crate) fn icon(name: &str) -> String {
    IconPalette::code_for(name)
        .map(String::from)
        .unwrap_or_else(|| crate::icon::FALLBACK_ICON.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::is_private_use;
    use std::collections::HashSet;

    #[test]
    fn test_names_and_codes_are_unique() {
        let names: HashSet<_> = PALETTE.iter().map(|e| e.name).collect();
        let codes: HashSet<_> = PALETTE.iter().map(|e| e.code).collect();
        assert_eq!(names.len(), PALETTE.len());
        assert_eq!(codes.len(), PALETTE.len());
    }

    #[test]
    fn test_every_code_is_private_use() {
        assert!(PALETTE.iter().all(|e| is_private_use(e.code)));
    }

    #[test]
    fn test_lookup_both_directions() {
        assert_eq!(IconPalette::code_for("Folder"), Some('\u{E821}'));
        assert_eq!(IconPalette::name_for('\u{E80F}'), Some("Home"));
        assert_eq!(IconPalette::name_for_icon("\u{E821}"), Some("Folder"));
    }

    #[test]
    fn test_name_lookup_is_exact() {
        assert_eq!(IconPalette::code_for("folder"), None);
        assert_eq!(IconPalette::code_for(" Folder"), None);
        assert_eq!(IconPalette::name_for('\u{F000}'), None);
    }
}
