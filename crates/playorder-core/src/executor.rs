//! Batch submission of move instructions.
//!
//! The whole instruction list goes out as one request. The remote applies
//! it move by move with no all-or-nothing guarantee, so a failure here may
//! leave the remote partially reordered; nothing in this crate can detect
//! or repair that.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use playorder_types::{Instruction, PlaylistId};
use tracing::{error, info, instrument};

use crate::constants::DEFAULT_SUBMIT_TIMEOUT;

/// Result of one remote batch call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub ok: bool,
    pub error_detail: Option<String>,
}

impl SubmitOutcome {
    pub fn success() -> Self {
        Self { ok: true, error_detail: None }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self { ok: false, error_detail: Some(detail.into()) }
    }
}

/// The remote edit capability.
///
/// Implementations own transport, authorization and request context. The
/// engine only sees readiness and a success flag.
#[async_trait]
pub trait RemoteMutation: Send + Sync {
    /// Check that the request context (keys, client context, credentials) can
    /// be acquired. Called before anything else in a run.
    fn ensure_ready(&self) -> Result<(), String>;

    /// Submit all instructions for `playlist` in one call.
    async fn submit(&self, playlist: &PlaylistId, instructions: &[Instruction]) -> SubmitOutcome;
}

#[async_trait]
impl<T: RemoteMutation + ?Sized> RemoteMutation for Arc<T> {
    fn ensure_ready(&self) -> Result<(), String> {
        (**self).ensure_ready()
    }

    async fn submit(&self, playlist: &PlaylistId, instructions: &[Instruction]) -> SubmitOutcome {
        (**self).submit(playlist, instructions).await
    }
}

/// Sends an instruction list through a [`RemoteMutation`] with a timeout and
/// folds every failure mode into `false`.
pub struct BatchExecutor<R> {
    remote: R,
    timeout: Duration,
}

impl<R: RemoteMutation> BatchExecutor<R> {
    pub fn new(remote: R) -> Self {
        Self { remote, timeout: DEFAULT_SUBMIT_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Submit the batch. Returns `true` only on confirmed remote success.
    ///
    /// Diagnostics are logged here; callers take one uniform failure branch.
    #[instrument(skip_all, fields(playlist = %playlist, count = instructions.len()))]
    pub async fn execute(&self, playlist: &PlaylistId, instructions: &[Instruction]) -> bool {
        if instructions.is_empty() {
            error!("refusing to submit an empty batch");
            return false;
        }

        match tokio::time::timeout(self.timeout, self.remote.submit(playlist, instructions)).await {
            Ok(SubmitOutcome { ok: true, .. }) => {
                info!("remote accepted all moves");
                true
            }
            Ok(SubmitOutcome { error_detail, .. }) => {
                error!(
                    detail = error_detail.as_deref().unwrap_or("unspecified"),
                    "remote batch failed"
                );
                false
            }
            Err(_) => {
                error!(timeout_secs = self.timeout.as_secs_f64(), "remote batch timed out");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use playorder_types::Identity;
    use std::sync::Mutex;

    /// Scripted remote that records every submitted batch.
    pub(crate) struct FakeRemote {
        pub ready: Result<(), String>,
        pub outcome: SubmitOutcome,
        pub delay: Option<Duration>,
        pub calls: Mutex<Vec<(PlaylistId, Vec<Instruction>)>>,
    }

    impl FakeRemote {
        pub fn ok() -> Self {
            Self {
                ready: Ok(()),
                outcome: SubmitOutcome::success(),
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(detail: &str) -> Self {
            Self { outcome: SubmitOutcome::failure(detail), ..Self::ok() }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RemoteMutation for FakeRemote {
        fn ensure_ready(&self) -> Result<(), String> {
            self.ready.clone()
        }

        async fn submit(&self, playlist: &PlaylistId, instructions: &[Instruction]) -> SubmitOutcome {
            self.calls.lock().unwrap().push((playlist.clone(), instructions.to_vec()));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.outcome.clone()
        }
    }

    fn playlist() -> PlaylistId {
        PlaylistId::new("PLtest").unwrap()
    }

    fn batch() -> Vec<Instruction> {
        vec![Instruction::before(Identity::new("a").unwrap(), Identity::new("b").unwrap())]
    }

    #[tokio::test]
    async fn test_success() {
        let executor = BatchExecutor::new(FakeRemote::ok());
        assert!(executor.execute(&playlist(), &batch()).await);
        assert_eq!(executor.remote().call_count(), 1);
    }

    #[tokio::test]
    async fn test_embedded_error_is_failure() {
        let executor = BatchExecutor::new(FakeRemote::failing("status 403"));
        assert!(!executor.execute(&playlist(), &batch()).await);
    }

    #[tokio::test]
    async fn test_empty_batch_never_sent() {
        let executor = BatchExecutor::new(FakeRemote::ok());
        assert!(!executor.execute(&playlist(), &[]).await);
        assert_eq!(executor.remote().call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_failure() {
        let remote = FakeRemote { delay: Some(Duration::from_secs(120)), ..FakeRemote::ok() };
        let executor = BatchExecutor::new(remote).with_timeout(Duration::from_secs(5));
        assert!(!executor.execute(&playlist(), &batch()).await);
    }

    #[tokio::test]
    async fn test_arc_remote_delegates() {
        let remote = Arc::new(FakeRemote::ok());
        let executor = BatchExecutor::new(remote.clone());
        assert!(executor.execute(&playlist(), &batch()).await);
        assert_eq!(remote.call_count(), 1);
    }
}
