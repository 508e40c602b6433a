//! Error types for reconciliation runs.
//!
//! Precondition and remote failures end a run and are shown to the user.
//! Mirror misses never surface here; they are per-step and only logged.

use playorder_types::Identity;
use thiserror::Error;

/// A run cannot start. Raised before any mutation; never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// No playlist id could be derived from the location reference.
    #[error("unable to obtain playlist id")]
    MissingPlaylist,

    /// The remote context (api key, client context, credentials) is unavailable.
    #[error("unable to access the remote API: {0}")]
    RemoteUnavailable(String),

    /// The collection has no items.
    #[error("0 items found in this playlist")]
    EmptySequence,

    /// Items without an identity cannot be moved; the whole run is refused.
    #[error("{count} items without a valid id (first: {first_title:?})")]
    MissingIdentity { count: usize, first_title: String },

    /// Two entries share one identity.
    #[error("duplicate item id: {0}")]
    DuplicateIdentity(Identity),

    /// Another run is still in flight.
    #[error("a reorder is already running")]
    Busy,
}

/// Move synthesis could not produce a trustworthy plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Target and current do not hold the same identities.
    #[error("target and current sequences differ: {} ids missing from current, {} extra", missing.len(), extra)]
    Inconsistent { missing: Vec<Identity>, extra: usize },

    /// Replaying the plan does not land on the target order.
    #[error("move plan does not reproduce the target order (first difference at position {position})")]
    ReplayMismatch { position: usize },
}

/// Terminal failure of a reconciliation run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Synthesis(SynthesisError),

    /// The batch call failed (transport, status, embedded error or timeout).
    /// The mirror was not touched.
    #[error("error when ordering playlist, try again or reload the page")]
    RemoteExecution,
}

impl From<SynthesisError> for RunError {
    fn from(e: SynthesisError) -> Self {
        match e {
            SynthesisError::Precondition(p) => RunError::Precondition(p),
            other => RunError::Synthesis(other),
        }
    }
}

/// A single mirror step could not be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MirrorError {
    #[error("move {from} -> {to} out of bounds for collection of length {len}")]
    OutOfBounds { from: usize, to: usize, len: usize },
}

/// Invalid engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid locale tag {tag:?}: {reason}")]
    Locale { tag: String, reason: String },

    #[error("collator unavailable for {tag:?}: {reason}")]
    Collator { tag: String, reason: String },
}
