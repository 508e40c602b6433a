//! Where a run's items come from.
//!
//! The engine never polls or watches a view itself. A collaborator invokes
//! a run once it has a stable snapshot, and signals if the container it was
//! reading from gets replaced (navigation, re-render) while a run is in
//! flight.

use playorder_types::{Identity, SourceItem};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::MirrorError;
use crate::mirror::LiveCollection;

pub trait CollectionSource {
    /// Ordered snapshot of the collection as it is now.
    fn current_items(&self) -> Vec<SourceItem>;

    /// Fires once per container replacement.
    fn subscribe_replacement(&self) -> broadcast::Receiver<()>;
}

/// In-memory collection: a list of rows that is both the source of a run
/// and the mirror it replays into.
#[derive(Debug)]
pub struct SnapshotSource {
    rows: Vec<SourceItem>,
    replaced: broadcast::Sender<()>,
}

impl SnapshotSource {
    pub fn new(rows: Vec<SourceItem>) -> Self {
        let (replaced, _) = broadcast::channel(4);
        Self { rows, replaced }
    }

    pub fn rows(&self) -> &[SourceItem] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SourceItem> {
        self.rows
    }

    /// Swap in a new container. Subscribers are notified.
    pub fn replace(&mut self, rows: Vec<SourceItem>) {
        self.rows = rows;
        // No receivers is fine: nobody is mid-run.
        let notified = self.replaced.send(()).unwrap_or(0);
        debug!(rows = self.rows.len(), notified, "collection replaced");
    }
}

impl CollectionSource for SnapshotSource {
    fn current_items(&self) -> Vec<SourceItem> {
        self.rows.clone()
    }

    fn subscribe_replacement(&self) -> broadcast::Receiver<()> {
        self.replaced.subscribe()
    }
}

impl LiveCollection for SnapshotSource {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn position_of(&self, identity: &Identity) -> Option<usize> {
        self.rows.position_of(identity)
    }

    fn move_item(&mut self, from: usize, to: usize) -> Result<(), MirrorError> {
        self.rows.move_item(from, to)
    }
}
