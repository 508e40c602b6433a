//! Locale-aware, case- and diacritic-insensitive string ordering.
//!
//! Wraps an ICU collator at primary strength ("base" sensitivity): `a`,
//! `A` and `á` compare equal, and ordering follows the locale's natural
//! alphabet rather than code points.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::Locale;

use crate::error::ConfigError;

pub struct Collation {
    tag: String,
    collator: Collator,
}

impl Collation {
    /// Build a collator for a BCP-47 tag such as `"pt-BR"`.
    pub fn for_locale(tag: &str) -> Result<Self, ConfigError> {
        let locale: Locale = tag.parse().map_err(|e: icu_locid::ParserError| ConfigError::Locale {
            tag: tag.to_string(),
            reason: e.to_string(),
        })?;

        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Primary);

        let collator = Collator::try_new(&(&locale).into(), options).map_err(|e| {
            ConfigError::Collator {
                tag: tag.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            tag: tag.to_string(),
            collator,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation").field("tag", &self.tag).finish()
    }
}
