//! Group and sort key derivation.
//!
//! A row's byline is split on a delimiter into `primary • secondary • ...`.
//! Missing or blank fields fall back to fixed "unknown" strings so every row
//! still lands in a deterministic group. Normalization never fails.

use playorder_types::{Identity, Item, SourceItem};

use crate::constants::{
    DEFAULT_BYLINE_DELIMITER, GROUP_KEY_SEPARATOR, UNKNOWN_PRIMARY, UNKNOWN_SECONDARY,
    UNKNOWN_TITLE,
};

/// Keys derived from one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKeys {
    pub title: String,
    pub primary: String,
    pub secondary: String,
    pub group_key: String,
}

#[derive(Clone, Debug)]
pub struct KeyNormalizer {
    delimiter: String,
}

impl Default for KeyNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_BYLINE_DELIMITER)
    }
}

impl KeyNormalizer {
    pub fn new(delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        let delimiter = if delimiter.is_empty() {
            DEFAULT_BYLINE_DELIMITER.to_string()
        } else {
            delimiter
        };
        Self { delimiter }
    }

    pub fn normalize(&self, item: &SourceItem) -> SortKeys {
        let mut fields = item.byline.split(self.delimiter.as_str()).map(str::trim);
        let primary = non_blank(fields.next(), UNKNOWN_PRIMARY);
        let secondary = non_blank(fields.next(), UNKNOWN_SECONDARY);
        let group_key = format!("{primary}{GROUP_KEY_SEPARATOR}{secondary}");

        SortKeys {
            title: non_blank(Some(item.title.trim()), UNKNOWN_TITLE),
            primary,
            secondary,
            group_key,
        }
    }

    /// Build a validated [`Item`] at `position` from a row whose identity
    /// has already been checked.
    pub fn to_item(&self, position: usize, item: &SourceItem, identity: Identity) -> Item {
        let keys = self.normalize(item);
        Item {
            position,
            title: keys.title,
            primary: keys.primary,
            secondary: keys.secondary,
            group_key: keys.group_key,
            identity,
        }
    }
}

fn non_blank(field: Option<&str>, fallback: &str) -> String {
    match field {
        Some(f) if !f.is_empty() => f.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, byline: &str) -> SourceItem {
        SourceItem::new(title, byline, None)
    }

    #[test]
    fn test_splits_primary_and_secondary() {
        let keys = KeyNormalizer::default().normalize(&row("Song", "Artist • Album • 3:41"));
        assert_eq!(keys.primary, "Artist");
        assert_eq!(keys.secondary, "Album");
        assert_eq!(keys.group_key, "Artist\nAlbum");
        assert_eq!(keys.title, "Song");
    }

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let normalizer = KeyNormalizer::default();

        let keys = normalizer.normalize(&row("", ""));
        assert_eq!(keys.title, UNKNOWN_TITLE);
        assert_eq!(keys.primary, UNKNOWN_PRIMARY);
        assert_eq!(keys.secondary, UNKNOWN_SECONDARY);

        let keys = normalizer.normalize(&row("Song", "Only Artist"));
        assert_eq!(keys.primary, "Only Artist");
        assert_eq!(keys.secondary, UNKNOWN_SECONDARY);

        let keys = normalizer.normalize(&row("Song", " • Album"));
        assert_eq!(keys.primary, UNKNOWN_PRIMARY);
        assert_eq!(keys.secondary, "Album");
    }

    #[test]
    fn test_custom_delimiter() {
        let keys = KeyNormalizer::new("|").normalize(&row("Song", "A|B"));
        assert_eq!(keys.group_key, "A\nB");
    }

    #[test]
    fn test_empty_delimiter_falls_back_to_default() {
        let keys = KeyNormalizer::new("").normalize(&row("Song", "A • B"));
        assert_eq!(keys.group_key, "A\nB");
    }

    #[test]
    fn test_to_item_carries_position_and_identity() {
        let id = Identity::new("s1").unwrap();
        let item = KeyNormalizer::default().to_item(4, &row(" Song ", "A • B"), id.clone());
        assert_eq!(item.position, 4);
        assert_eq!(item.title, "Song");
        assert_eq!(item.identity, id);
    }
}
