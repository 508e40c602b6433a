//! Engine configuration.
//!
//! Deserialized from the `engine` section of the CLI's RON config; every
//! field has a default so an empty section is valid:
//!
//! ```ron
//! engine: (
//!     locale: "pt-BR",
//!     delimiter: "•",
//!     strictness: strict,
//!     mirror_yield_every: 5,
//!     submit_timeout_secs: 30,
//! )
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BYLINE_DELIMITER, DEFAULT_LOCALE, DEFAULT_MIRROR_YIELD_EVERY, DEFAULT_SUBMIT_TIMEOUT,
};

/// How move synthesis treats a target entry missing from the current sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Abort with [`SynthesisError::Inconsistent`](crate::SynthesisError::Inconsistent).
    #[default]
    Strict,
    /// Log the entry and skip it.
    Lenient,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// BCP-47 tag for collation.
    pub locale: String,
    /// Byline field separator.
    pub delimiter: String,
    pub strictness: Strictness,
    /// Mirror progress/yield cadence, in steps. Zero is treated as one.
    pub mirror_yield_every: usize,
    /// Remote call timeout. Zero is treated as one.
    pub submit_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            delimiter: DEFAULT_BYLINE_DELIMITER.to_string(),
            strictness: Strictness::default(),
            mirror_yield_every: DEFAULT_MIRROR_YIELD_EVERY,
            submit_timeout_secs: DEFAULT_SUBMIT_TIMEOUT.as_secs(),
        }
    }
}

impl EngineConfig {
    /// Remote call timeout. Zero is treated as one second.
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs.max(1))
    }
}
