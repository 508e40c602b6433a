//! Run lifecycle markers for the presentation layer.
//!
//! ```text
//! Idle ──▶ Computing ──▶ Submitting{n} ──▶ Syncing{%} ──▶ Done
//!   ▲          │               │
//!   │          ▼               ▼
//!   └──── (cancel)         Failed(reason)
//! ```
//!
//! There is no timing contract; a presentation layer renders whatever the
//! latest phase is.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIs};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumIs)]
#[serde(tag = "phase", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    Computing,
    Submitting { count: usize },
    Syncing { percent: u8 },
    Done,
    Failed { reason: String },
}

impl RunPhase {
    /// Whether a run is in flight (the trigger should be disabled).
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Computing | Self::Submitting { .. } | Self::Syncing { .. })
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitting { count } => write!(f, "submitting({count})"),
            Self::Syncing { percent } => write!(f, "syncing({percent}%)"),
            Self::Failed { reason } => write!(f, "failed({reason})"),
            other => f.write_str(other.as_ref()),
        }
    }
}
