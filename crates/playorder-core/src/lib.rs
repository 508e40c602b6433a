//! Playlist reconciliation engine.
//!
//! Reorders a remote playlist to a canonical order (artist, album, title)
//! through an API that only knows "move A before B". The engine computes
//! the moves, submits them as one batch, and replays them against the local
//! view once the remote confirms.
//!
//! # Pipeline
//!
//! ```text
//! SourceItem[] ──▶ KeyNormalizer ──▶ build_target_order ──▶ target
//!                                                              │
//! current + target ──▶ MoveSynthesizer ──▶ MovePlan ◀──────────┘
//!                                              │
//!                      BatchExecutor ◀─────────┤ instructions
//!                           │ ok               │
//!                           ▼                  │ planned moves
//!                   MirrorSynchronizer ◀───────┘
//! ```
//!
//! [`Reconciler`] drives one run through all stages and publishes its
//! [`RunPhase`](playorder_types::RunPhase). [`Planner`] is the pure half,
//! for dry runs.
//!
//! # Errors
//!
//! - [`PreconditionError`]: refused before anything is sent
//! - [`SynthesisError`]: current and target disagree (strict mode)
//! - [`RunError::RemoteExecution`]: the batch failed; the mirror is untouched
//! - mirror misses are logged per step and never fail a run

mod collate;
pub mod config;
pub mod constants;
mod error;
mod executor;
mod keys;
mod mirror;
mod order;
mod planner;
mod reconciler;
mod source;
mod synth;

pub use collate::Collation;
pub use config::{EngineConfig, Strictness};
pub use error::{ConfigError, MirrorError, PreconditionError, RunError, SynthesisError};
pub use executor::{BatchExecutor, RemoteMutation, SubmitOutcome};
pub use keys::{KeyNormalizer, SortKeys};
pub use mirror::{LiveCollection, MirrorReport, MirrorSynchronizer};
pub use order::build_target_order;
pub use planner::{Planner, Reconciliation};
pub use reconciler::{Preflight, Reconciler, RunOutcome};
pub use source::{CollectionSource, SnapshotSource};
pub use synth::{MoveSynthesizer, prepare_items, replay};
