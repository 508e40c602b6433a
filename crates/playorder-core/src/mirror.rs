//! Local mirror replay.
//!
//! After the remote confirms a batch, the same moves are replayed against
//! the live, user-visible collection so it matches without a reload. The
//! remote is the state of record; the mirror is a convenience, so every
//! failure here is per-step and non-fatal.
//!
//! Each step re-resolves the item's live position by identity right before
//! moving it. Positions computed during synthesis are never trusted, since
//! earlier replay steps shift everything behind them.

use playorder_types::{HasIdentity, Identity, PlannedMove};
use tracing::{debug, warn};

use crate::constants::DEFAULT_MIRROR_YIELD_EVERY;
use crate::error::MirrorError;

/// The live collection a mirror replays into.
pub trait LiveCollection {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current position of the entry with this identity.
    fn position_of(&self, identity: &Identity) -> Option<usize>;

    /// Remove the entry at `from` and reinsert it so it ends up at `to`.
    fn move_item(&mut self, from: usize, to: usize) -> Result<(), MirrorError>;
}

impl<T: HasIdentity> LiveCollection for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn position_of(&self, identity: &Identity) -> Option<usize> {
        self.iter().position(|entry| entry.identity() == Some(identity))
    }

    fn move_item(&mut self, from: usize, to: usize) -> Result<(), MirrorError> {
        let len = self.as_slice().len();
        if from >= len || to >= len {
            return Err(MirrorError::OutOfBounds { from, to, len });
        }
        let entry = self.remove(from);
        self.insert(to, entry);
        Ok(())
    }
}

/// Tally of one replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MirrorReport {
    /// Steps that moved an entry.
    pub applied: usize,
    /// Steps where the entry already sat at its destination.
    pub unchanged: usize,
    /// Steps skipped because the entry was missing or the move failed.
    pub missed: usize,
}

#[derive(Clone, Debug)]
pub struct MirrorSynchronizer {
    yield_every: usize,
}

impl Default for MirrorSynchronizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIRROR_YIELD_EVERY)
    }
}

impl MirrorSynchronizer {
    /// Report progress and yield to the scheduler every `yield_every` steps
    /// (and after the last one). Zero is treated as one.
    pub fn new(yield_every: usize) -> Self {
        Self { yield_every: yield_every.max(1) }
    }

    /// Replay `moves` in order against `collection`.
    ///
    /// `on_progress` receives a completion percentage at each yield point.
    /// Steps run strictly one after another.
    pub async fn replay<C, F>(&self, collection: &mut C, moves: &[PlannedMove], mut on_progress: F) -> MirrorReport
    where
        C: LiveCollection + ?Sized,
        F: FnMut(u8),
    {
        let mut report = MirrorReport::default();
        let total = moves.len();

        for (step, planned) in moves.iter().enumerate() {
            match collection.position_of(&planned.identity) {
                None => {
                    warn!(
                        identity = %planned.identity,
                        title = %planned.title,
                        "mirror item not found, skipping"
                    );
                    report.missed += 1;
                }
                Some(from) if from == planned.to => report.unchanged += 1,
                Some(from) => match collection.move_item(from, planned.to) {
                    Ok(()) => report.applied += 1,
                    Err(e) => {
                        warn!(identity = %planned.identity, error = %e, "mirror move failed, skipping");
                        report.missed += 1;
                    }
                },
            }

            let done = step + 1;
            if step % self.yield_every == 0 || done == total {
                on_progress(percent(done, total));
                tokio::task::yield_now().await;
            }
        }

        debug!(
            applied = report.applied,
            unchanged = report.unchanged,
            missed = report.missed,
            "mirror replay complete"
        );
        report
    }
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done * 100 + total / 2) / total).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use playorder_types::SourceItem;

    fn row(id: &str) -> SourceItem {
        SourceItem::new(id.to_uppercase(), "", Identity::new(id))
    }

    fn planned(id: &str, from: usize, to: usize) -> PlannedMove {
        PlannedMove {
            identity: Identity::new(id).unwrap(),
            title: id.to_uppercase(),
            from,
            to,
        }
    }

    fn order(rows: &[SourceItem]) -> Vec<&str> {
        rows.iter().filter_map(|r| r.identity.as_ref()).map(|i| i.as_str()).collect()
    }

    #[tokio::test]
    async fn test_replays_in_order() {
        let mut live = vec![row("z"), row("a"), row("b")];
        let moves = [planned("a", 1, 0), planned("b", 2, 1)];
        let report = MirrorSynchronizer::default().replay(&mut live, &moves, |_| {}).await;
        assert_eq!(order(&live), ["a", "b", "z"]);
        assert_eq!(report, MirrorReport { applied: 2, unchanged: 0, missed: 0 });
    }

    #[tokio::test]
    async fn test_resolves_live_position_not_planned() {
        // Planned `from` is stale (the live view differs); identity wins.
        let mut live = vec![row("a"), row("z"), row("b")];
        let moves = [planned("b", 0, 1)];
        MirrorSynchronizer::default().replay(&mut live, &moves, |_| {}).await;
        assert_eq!(order(&live), ["a", "b", "z"]);
    }

    #[tokio::test]
    async fn test_already_in_place_is_noop() {
        let mut live = vec![row("a"), row("b")];
        let report = MirrorSynchronizer::default()
            .replay(&mut live, &[planned("a", 1, 0)], |_| {})
            .await;
        assert_eq!(report.unchanged, 1);
        assert_eq!(order(&live), ["a", "b"]);
    }

    #[tokio::test]
    async fn test_missing_and_out_of_bounds_are_skipped() {
        let mut live = vec![row("b"), row("a")];
        let moves = [planned("ghost", 3, 0), planned("a", 1, 9), planned("a", 1, 0)];
        let report = MirrorSynchronizer::default().replay(&mut live, &moves, |_| {}).await;
        assert_eq!(report, MirrorReport { applied: 1, unchanged: 0, missed: 2 });
        assert_eq!(order(&live), ["a", "b"]);
    }

    #[tokio::test]
    async fn test_progress_cadence() {
        let mut live: Vec<SourceItem> = (0..12).map(|i| row(&format!("i{i}"))).collect();
        let moves: Vec<PlannedMove> = (0..12).map(|i| planned(&format!("i{i}"), i, i)).collect();
        let mut seen = Vec::new();
        MirrorSynchronizer::new(5)
            .replay(&mut live, &moves, |p| seen.push(p))
            .await;
        // Steps 0, 5, 10 and the final step 11.
        assert_eq!(seen, vec![8, 50, 92, 100]);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 100);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(3, 3), 100);
    }
}
