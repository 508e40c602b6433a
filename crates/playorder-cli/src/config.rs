//! RON configuration file.
//!
//! ```ron
//! (
//!     engine: (locale: "pt-BR", strictness: lenient),
//!     remote: (
//!         api_key: Some("..."),
//!         context_file: Some("/home/me/.config/playorder/context.json"),
//!         auth_user: "0",
//!     ),
//! )
//! ```
//!
//! Credentials never live here; see `PLAYORDER_AUTHORIZATION`.

use std::path::{Path, PathBuf};

use playorder_client::RemoteConfig;
use playorder_core::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub remote: RemoteConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Ron {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// `~/.config/playorder/config.ron` (or the platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("playorder").join("config.ron"))
}

impl Config {
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigLoadError> {
        ron::from_str(text).map_err(|source| ConfigLoadError::Ron { path: path.to_path_buf(), source })
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text, path)
    }

    /// Load an explicit path, or the default path if it exists, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}
