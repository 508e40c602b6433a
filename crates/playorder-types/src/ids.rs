//! Opaque string tokens for items and playlists.
//!
//! An [`Identity`] is the per-entry token the remote service hands out (the
//! "set video id" of a playlist row). It is the only thing the remote edit
//! API accepts as a move anchor, so it is never derived from titles or
//! positions. A [`PlaylistId`] names the collection being reordered.
//!
//! Both are opaque on the wire (`#[serde(transparent)]` strings). `short()`
//! is for log lines only, never a lookup key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, unique token for one playlist entry.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

/// Token naming the playlist being reordered.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_token {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Wrap a raw token. Empty tokens are rejected.
            pub fn new(token: impl Into<String>) -> Option<Self> {
                let token = token.into();
                if token.is_empty() { None } else { Some(Self(token)) }
            }

            /// The raw token as sent on the wire.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// First 8 characters, for display only.
            pub fn short(&self) -> &str {
                match self.0.char_indices().nth(8) {
                    Some((idx, _)) => &self.0[..idx],
                    None => &self.0,
                }
            }
        }

        impl From<$T> for String {
            fn from(id: $T) -> String {
                id.0
            }
        }

        impl AsRef<str> for $T {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.short())
            }
        }
    };
}

impl_token!(Identity, "Identity");
impl_token!(PlaylistId, "PlaylistId");

// ── PlaylistId parsing ──────────────────────────────────────────────────────

/// Prefix the browse view puts in front of playlist ids (`VLPL...`).
const BROWSE_PREFIX: &str = "VL";

/// Query parameter carrying the playlist id in a location reference.
const LIST_PARAM: &str = "list";

impl PlaylistId {
    /// Extract the playlist id from a location reference.
    ///
    /// Accepts a full URL (`https://host/playlist?list=VLPL123`) or a bare
    /// token. A leading `VL` is stripped. Returns `None` when the reference
    /// carries no usable id.
    pub fn from_location(location: &str) -> Option<Self> {
        let location = location.trim();
        let raw = match url::Url::parse(location) {
            Ok(url) => url
                .query_pairs()
                .find(|(key, _)| key == LIST_PARAM)
                .map(|(_, value)| value.into_owned())?,
            Err(_) => location.to_string(),
        };
        let raw = raw.strip_prefix(BROWSE_PREFIX).unwrap_or(&raw);
        Self::new(raw)
    }
}

// ============================================================================
// Tests
// ============================================================================
