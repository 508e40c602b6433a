//! One reconciliation run, end to end.
//!
//! ```text
//!   rows ──▶ Planner ──▶ MovePlan ──▶ confirm? ──▶ BatchExecutor ──▶ Mirror
//!                            │            │              │
//!                       empty: done   no: cancel    false: failed (mirror untouched)
//! ```
//!
//! The run's phase is published on a `watch` channel for whatever renders
//! it; there is no ambient state. Runs never overlap: a second `run` while
//! one is in flight is refused with [`PreconditionError::Busy`].

use std::sync::atomic::{AtomicBool, Ordering};

use playorder_types::{PlaylistId, RunPhase};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::config::EngineConfig;
use crate::error::{ConfigError, PreconditionError, RunError};
use crate::executor::{BatchExecutor, RemoteMutation};
use crate::mirror::{LiveCollection, MirrorReport, MirrorSynchronizer};
use crate::planner::Planner;
use crate::source::CollectionSource;

/// What the user is asked to confirm before anything is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preflight {
    pub items: usize,
    pub moves: usize,
}

/// How a run that did not fail ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing to do: the collection is already in target order.
    AlreadyOrdered,
    /// The user declined at the confirmation step. Nothing was sent.
    Cancelled,
    /// The remote accepted every move.
    Applied {
        moves: usize,
        /// `None` when the container was replaced mid-run and the mirror
        /// replay was skipped.
        mirror: Option<MirrorReport>,
    },
}

pub struct Reconciler<R> {
    planner: Planner,
    executor: BatchExecutor<R>,
    mirror: MirrorSynchronizer,
    phase: watch::Sender<RunPhase>,
    running: AtomicBool,
}

/// Clears the running flag when a run ends, however it ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<R: RemoteMutation> Reconciler<R> {
    pub fn new(remote: R, config: &EngineConfig) -> Result<Self, ConfigError> {
        let (phase, _) = watch::channel(RunPhase::Idle);
        Ok(Self {
            planner: Planner::new(config)?,
            executor: BatchExecutor::new(remote).with_timeout(config.submit_timeout()),
            mirror: MirrorSynchronizer::new(config.mirror_yield_every),
            phase,
            running: AtomicBool::new(false),
        })
    }

    /// Follow phase changes.
    pub fn subscribe(&self) -> watch::Receiver<RunPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase.borrow().clone()
    }

    fn set_phase(&self, phase: RunPhase) {
        self.phase.send_replace(phase);
    }

    fn begin(&self) -> Result<RunGuard<'_>, PreconditionError> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| RunGuard(&self.running))
            .map_err(|_| PreconditionError::Busy)
    }

    /// Reorder `collection` on the remote, then mirror the result locally.
    ///
    /// `confirm` is the last point a run can be cancelled; once the batch is
    /// sent the run can only complete or fail.
    #[instrument(skip_all, fields(playlist = ?playlist))]
    pub async fn run<C, F>(
        &self,
        playlist: Option<PlaylistId>,
        collection: &mut C,
        confirm: F,
    ) -> Result<RunOutcome, RunError>
    where
        C: CollectionSource + LiveCollection,
        F: FnOnce(&Preflight) -> bool,
    {
        let _guard = self.begin()?;
        self.set_phase(RunPhase::Computing);

        let result = self.run_inner(playlist, collection, confirm).await;
        match &result {
            Ok(RunOutcome::Cancelled) => self.set_phase(RunPhase::Idle),
            Ok(_) => self.set_phase(RunPhase::Done),
            Err(e) => {
                warn!(error = %e, "reorder failed");
                self.set_phase(RunPhase::Failed { reason: e.to_string() });
            }
        }
        result
    }

    async fn run_inner<C, F>(
        &self,
        playlist: Option<PlaylistId>,
        collection: &mut C,
        confirm: F,
    ) -> Result<RunOutcome, RunError>
    where
        C: CollectionSource + LiveCollection,
        F: FnOnce(&Preflight) -> bool,
    {
        let playlist = playlist.ok_or(PreconditionError::MissingPlaylist)?;
        self.executor
            .remote()
            .ensure_ready()
            .map_err(PreconditionError::RemoteUnavailable)?;

        let mut replaced = collection.subscribe_replacement();
        let rows = collection.current_items();
        let reconciliation = self.planner.plan(&rows)?;
        let plan = &reconciliation.plan;

        if plan.is_empty() {
            info!(items = rows.len(), "playlist already ordered");
            return Ok(RunOutcome::AlreadyOrdered);
        }

        let preflight = Preflight { items: rows.len(), moves: plan.len() };
        if !confirm(&preflight) {
            info!("cancelled by user");
            return Ok(RunOutcome::Cancelled);
        }

        self.set_phase(RunPhase::Submitting { count: plan.len() });
        info!(moves = plan.len(), "submitting moves in a single batch");
        if !self.executor.execute(&playlist, &plan.instructions).await {
            return Err(RunError::RemoteExecution);
        }

        if !matches!(replaced.try_recv(), Err(TryRecvError::Empty | TryRecvError::Closed)) {
            info!("collection replaced during run, skipping mirror replay");
            return Ok(RunOutcome::Applied { moves: plan.len(), mirror: None });
        }

        self.set_phase(RunPhase::Syncing { percent: 0 });
        let report = self
            .mirror
            .replay(collection, &plan.moves, |percent| {
                self.set_phase(RunPhase::Syncing { percent });
            })
            .await;

        info!(
            moves = plan.len(),
            applied = report.applied,
            missed = report.missed,
            "playlist successfully ordered"
        );
        Ok(RunOutcome::Applied { moves: plan.len(), mirror: Some(report) })
    }
}

// ============================================================================
// Tests
// ============================================================================
