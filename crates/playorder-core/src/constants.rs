//! Engine defaults.
//!
//! Centralizes hardcoded values for easier configuration and documentation.

use std::time::Duration;

/// Locale used for collation when none is configured.
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// Separator between fields of an item's byline (`"Artist • Album"`).
pub const DEFAULT_BYLINE_DELIMITER: &str = "•";

/// Joins primary and secondary fields into a group key. Must not appear in
/// legitimate field content.
pub const GROUP_KEY_SEPARATOR: char = '\n';

/// Fallback title for rows without one.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Fallback primary field (artist).
pub const UNKNOWN_PRIMARY: &str = "Unknown Artist";

/// Fallback secondary field (album).
pub const UNKNOWN_SECONDARY: &str = "Unknown Album";

/// Mirror replay reports progress and yields every this many steps.
pub const DEFAULT_MIRROR_YIELD_EVERY: usize = 5;

/// Upper bound for the single batch call. Expiry counts as a remote failure.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);
