//! Pure planning: rows in, instructions out.
//!
//! Runs the Key Normalizer, Target Order Builder and Move Synthesizer in
//! sequence without touching the remote or the mirror. The CLI's dry-run
//! and the [`Reconciler`](crate::Reconciler) both go through here.

use playorder_types::{Identity, Item, MovePlan, SourceItem};
use tracing::{Level, debug, enabled};

use crate::collate::Collation;
use crate::config::EngineConfig;
use crate::error::{ConfigError, SynthesisError};
use crate::keys::KeyNormalizer;
use crate::order::build_target_order;
use crate::synth::{MoveSynthesizer, prepare_items, replay};

/// Everything computed for one run before submission.
#[derive(Clone, Debug)]
pub struct Reconciliation {
    pub current: Vec<Item>,
    pub target: Vec<Item>,
    pub plan: MovePlan,
}

impl Reconciliation {
    /// Identity order after applying the plan the way the remote would.
    pub fn replayed(&self) -> Vec<Identity> {
        let current: Vec<Identity> = self.current.iter().map(|i| i.identity.clone()).collect();
        replay(&current, &self.plan.instructions)
    }

    /// Whether replaying the plan lands exactly on the target order.
    pub fn is_consistent(&self) -> bool {
        self.verify().is_ok()
    }

    /// Replay the plan and compare against the target, position by position.
    pub fn verify(&self) -> Result<(), SynthesisError> {
        let replayed = self.replayed();
        let target = self.target.iter().map(|i| &i.identity);
        match replayed.iter().zip(target).position(|(got, want)| got != want) {
            Some(position) => Err(SynthesisError::ReplayMismatch { position }),
            None if replayed.len() != self.target.len() => Err(SynthesisError::ReplayMismatch {
                position: replayed.len().min(self.target.len()),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct Planner {
    normalizer: KeyNormalizer,
    collation: Collation,
    synthesizer: MoveSynthesizer,
}

impl Planner {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let collation = Collation::for_locale(&config.locale)?;
        debug!(locale = collation.tag(), strictness = ?config.strictness, "planner ready");
        Ok(Self {
            normalizer: KeyNormalizer::new(config.delimiter.clone()),
            collation,
            synthesizer: MoveSynthesizer::new(config.strictness),
        })
    }

    pub fn plan(&self, rows: &[SourceItem]) -> Result<Reconciliation, SynthesisError> {
        let current = prepare_items(rows, &self.normalizer)?;
        let target = build_target_order(&current, &self.collation);

        if enabled!(Level::DEBUG) {
            let before: Vec<String> = current.iter().map(Item::label).collect();
            let after: Vec<String> = target.iter().map(Item::label).collect();
            debug!(?before, ?after, "ordering preview");
        }

        let plan = self.synthesizer.synthesize(&current, &target)?;
        let reconciliation = Reconciliation { current, target, plan };
        reconciliation.verify()?;
        debug!(moves = reconciliation.plan.len(), "plan verified by replay");
        Ok(reconciliation)
    }
}
