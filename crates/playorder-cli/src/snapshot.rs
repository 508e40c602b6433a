//! Snapshot files: a playlist location plus its rows in current order.
//!
//! ```json
//! {
//!   "location": "https://music.youtube.com/playlist?list=PL...",
//!   "items": [ { "title": "...", "byline": "Artist • Album", "identity": "..." } ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use playorder_types::{PlaylistId, SourceItem};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub items: Vec<SourceItem>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("invalid snapshot {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("failed to write snapshot {}", path.display()))
    }

    /// Playlist id from `override_location`, falling back to the snapshot's.
    pub fn playlist(&self, override_location: Option<&str>) -> Option<PlaylistId> {
        override_location
            .or(self.location.as_deref())
            .and_then(PlaylistId::from_location)
    }
}
