//! Playlist entries, raw and validated.
//!
//! A [`SourceItem`] is what a collection source hands over: a title, the
//! raw byline text, and an identity that may be missing. An [`Item`] is an
//! entry that passed validation: its identity is guaranteed and its sort
//! fields have been derived. The two-stage split keeps "identity may be
//! absent" out of every type downstream of the precondition check.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::Identity;

/// One entry as read from the live collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    /// Display title (primary sort field within a group).
    #[serde(default)]
    pub title: String,
    /// Raw descriptive text, e.g. `"Artist • Album • 3:41"`.
    #[serde(default)]
    pub byline: String,
    /// Remote move token. `None` means the row cannot be moved.
    #[serde(default, deserialize_with = "non_empty_identity")]
    pub identity: Option<Identity>,
}

impl SourceItem {
    pub fn new(title: impl Into<String>, byline: impl Into<String>, identity: Option<Identity>) -> Self {
        Self {
            title: title.into(),
            byline: byline.into(),
            identity,
        }
    }
}

/// Blank tokens read from a snapshot count as missing.
fn non_empty_identity<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Identity>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.and_then(Identity::new))
}

/// A validated, orderable entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Index in the sequence that currently holds this item. Recomputed per view.
    pub position: usize,
    /// Primary sort field within a group.
    pub title: String,
    /// First descriptive field (artist).
    pub primary: String,
    /// Second descriptive field (album).
    pub secondary: String,
    /// `primary + "\n" + secondary`. Items with equal keys form one group.
    pub group_key: String,
    /// Remote move token, unique within a sequence.
    pub identity: Identity,
}

impl Item {
    /// Human-readable label for logs: `"Artist - Title"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.primary, self.title)
    }
}

/// Anything that carries an identity. Lets the mirror work over raw rows
/// and validated items alike.
pub trait HasIdentity {
    fn identity(&self) -> Option<&Identity>;
}

impl HasIdentity for SourceItem {
    fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

impl HasIdentity for Item {
    fn identity(&self) -> Option<&Identity> {
        Some(&self.identity)
    }
}
