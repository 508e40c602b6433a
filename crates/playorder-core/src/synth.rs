//! Move synthesis.
//!
//! Diffs the current order against the target order and emits the
//! anchor-relative instructions that turn one into the other when applied
//! one at a time, in order.
//!
//! # Algorithm
//!
//! A single left-to-right pass over a throwaway copy of the current order:
//!
//! ```text
//! for slot in 0..len(target):
//!     pos = where target[slot] sits in simulated right now
//!     if pos == slot: continue
//!     emit "move simulated[pos] before simulated[slot]"
//!     simulated: remove pos, insert at slot
//! ```
//!
//! Each move is applied to the simulation immediately, so every later
//! lookup sees the order the remote will see at that point. Emitting
//! against a stale order would anchor on a successor that has since moved.
//!
//! Because `simulated[..slot]` already matches the target prefix, a wanted
//! item is always found at or after `slot`: every move is backwards and
//! always has a successor. Lookups go through an identity → position map,
//! refreshed over the shifted span `slot..=pos` after each move.
//!
//! The pass is a near-linear heuristic, not a minimum-move diff.

use std::collections::{HashMap, HashSet};

use playorder_types::{Identity, Instruction, Item, MovePlan, SourceItem};
use tracing::{debug, trace, warn};

use crate::config::Strictness;
use crate::error::{PreconditionError, SynthesisError};
use crate::keys::KeyNormalizer;

/// Validate raw rows and derive sort keys.
///
/// Fails fast on an empty collection, on any row without an identity, or on
/// duplicate identities. No partial result is ever returned.
pub fn prepare_items(
    rows: &[SourceItem],
    normalizer: &KeyNormalizer,
) -> Result<Vec<Item>, PreconditionError> {
    if rows.is_empty() {
        return Err(PreconditionError::EmptySequence);
    }

    let missing: Vec<&SourceItem> = rows.iter().filter(|r| r.identity.is_none()).collect();
    if let Some(first) = missing.first() {
        return Err(PreconditionError::MissingIdentity {
            count: missing.len(),
            first_title: first.title.clone(),
        });
    }

    let mut seen = HashSet::with_capacity(rows.len());
    let mut items = Vec::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        let Some(identity) = row.identity.clone() else {
            continue;
        };
        if !seen.insert(identity.clone()) {
            return Err(PreconditionError::DuplicateIdentity(identity));
        }
        items.push(normalizer.to_item(position, row, identity));
    }
    Ok(items)
}

#[derive(Clone, Debug, Default)]
pub struct MoveSynthesizer {
    strictness: Strictness,
}

impl MoveSynthesizer {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    /// Compute the instruction list turning `current` into `target`.
    ///
    /// An empty plan means `current` is already in target order.
    pub fn synthesize(&self, current: &[Item], target: &[Item]) -> Result<MovePlan, SynthesisError> {
        if current.is_empty() {
            return Err(PreconditionError::EmptySequence.into());
        }

        let mut positions: HashMap<&Identity, usize> = HashMap::with_capacity(current.len());
        for (pos, item) in current.iter().enumerate() {
            if positions.insert(&item.identity, pos).is_some() {
                return Err(PreconditionError::DuplicateIdentity(item.identity.clone()).into());
            }
        }

        if self.strictness == Strictness::Strict {
            check_same_identities(&positions, target)?;
        }

        let mut simulated: Vec<&Item> = current.iter().collect();
        let mut plan = MovePlan::default();
        let mut slot = 0usize;

        for wanted in target {
            let Some(&pos) = positions.get(&wanted.identity) else {
                warn!(
                    identity = %wanted.identity,
                    title = %wanted.title,
                    "target item not found in current sequence, skipping"
                );
                continue;
            };

            if pos < slot {
                warn!(identity = %wanted.identity, "target item already placed, skipping");
                continue;
            }

            if pos == slot {
                slot += 1;
                continue;
            }

            let successor = simulated.get(slot).map(|s| s.identity.clone());
            let mover = simulated.remove(pos);
            simulated.insert(slot, mover);
            for (offset, item) in simulated[slot..=pos].iter().copied().enumerate() {
                positions.insert(&item.identity, slot + offset);
            }

            trace!(
                n = plan.len() + 1,
                title = %mover.title,
                from = pos + 1,
                to = slot + 1,
                "simulated move"
            );
            plan.record(mover.identity.clone(), successor, &mover.title, pos, slot);
            slot += 1;
        }

        debug!(items = current.len(), moves = plan.len(), "move synthesis complete");
        Ok(plan)
    }
}

/// Strict mode: the target must hold exactly the identities of `current`.
fn check_same_identities(
    positions: &HashMap<&Identity, usize>,
    target: &[Item],
) -> Result<(), SynthesisError> {
    let mut matched = HashSet::with_capacity(target.len());
    let mut missing = Vec::new();
    for item in target {
        if positions.contains_key(&item.identity) {
            matched.insert(&item.identity);
        } else {
            missing.push(item.identity.clone());
        }
    }
    let extra = positions.len() - matched.len();

    if missing.is_empty() && extra == 0 && target.len() == positions.len() {
        Ok(())
    } else {
        Err(SynthesisError::Inconsistent { missing, extra })
    }
}

/// Apply instructions to an identity order with "move before anchor"
/// semantics, the way the remote applies them.
///
/// An instruction whose moved item or anchor is absent is skipped, leaving
/// the order unchanged for that step.
pub fn replay(current: &[Identity], instructions: &[Instruction]) -> Vec<Identity> {
    let mut order = current.to_vec();
    for instruction in instructions {
        let Some(from) = order.iter().position(|id| id == &instruction.moved) else {
            continue;
        };
        let moved = order.remove(from);
        let to = match &instruction.successor {
            Some(anchor) => match order.iter().position(|id| id == anchor) {
                Some(to) => to,
                None => {
                    order.insert(from, moved);
                    continue;
                }
            },
            None => order.len(),
        };
        order.insert(to, moved);
    }
    order
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collate::Collation;
    use crate::constants::DEFAULT_LOCALE;
    use crate::order::build_target_order;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    fn id(s: &str) -> Identity {
        Identity::new(s).unwrap()
    }

    fn rows(entries: &[(&str, &str, &str)]) -> Vec<SourceItem> {
        entries
            .iter()
            .map(|(title, byline, ident)| SourceItem::new(*title, *byline, Identity::new(*ident)))
            .collect()
    }

    fn items(entries: &[(&str, &str, &str)]) -> Vec<Item> {
        prepare_items(&rows(entries), &KeyNormalizer::default()).unwrap()
    }

    fn ids(items: &[Item]) -> Vec<Identity> {
        items.iter().map(|i| i.identity.clone()).collect()
    }

    fn collation() -> Collation {
        Collation::for_locale(DEFAULT_LOCALE).unwrap()
    }

    // ── prepare_items ───────────────────────────────────────────────────

    #[test]
    fn test_prepare_rejects_empty() {
        let err = prepare_items(&[], &KeyNormalizer::default()).unwrap_err();
        assert_eq!(err, PreconditionError::EmptySequence);
    }

    #[test]
    fn test_prepare_rejects_missing_identity() {
        let mut input = rows(&[("A", "x", "1"), ("B", "x", "2"), ("C", "x", "3")]);
        input[1].identity = None;
        input[2].identity = None;
        let err = prepare_items(&input, &KeyNormalizer::default()).unwrap_err();
        assert_eq!(
            err,
            PreconditionError::MissingIdentity { count: 2, first_title: "B".into() }
        );
    }

    #[test]
    fn test_prepare_rejects_duplicate_identity() {
        let input = rows(&[("A", "x", "1"), ("B", "x", "1")]);
        let err = prepare_items(&input, &KeyNormalizer::default()).unwrap_err();
        assert_eq!(err, PreconditionError::DuplicateIdentity(id("1")));
    }

    // ── synthesize ──────────────────────────────────────────────────────

    #[test]
    fn test_already_ordered_yields_empty_plan() {
        let current = items(&[("Alpha", "A", "1"), ("Beta", "A", "2"), ("Zeta", "B", "3")]);
        let target = build_target_order(&current, &collation());
        let plan = MoveSynthesizer::default().synthesize(&current, &target).unwrap();
        assert!(plan.is_empty());
        assert!(plan.moves.is_empty());
    }

    #[test]
    fn test_single_move_anchors_on_slot_occupant() {
        let current = items(&[("Zeta", "B", "z"), ("Alpha", "A", "a"), ("Beta", "A", "b")]);
        let target = build_target_order(&current, &collation());
        let plan = MoveSynthesizer::default().synthesize(&current, &target).unwrap();

        // z a b -> a b z: move a before z, then b before z.
        assert_eq!(
            plan.instructions,
            vec![Instruction::before(id("a"), id("z")), Instruction::before(id("b"), id("z"))]
        );
        assert_eq!((plan.moves[0].from, plan.moves[0].to), (1, 0));
        assert_eq!((plan.moves[1].from, plan.moves[1].to), (2, 1));
    }

    #[test]
    fn test_anchor_reflects_earlier_moves() {
        // c b a -> a b c
        let current = items(&[("C", "x", "c"), ("B", "x", "b"), ("A", "x", "a")]);
        let target = build_target_order(&current, &collation());
        let plan = MoveSynthesizer::default().synthesize(&current, &target).unwrap();

        // After "a before c" the order is a c b; b's anchor is c, not a.
        assert_eq!(
            plan.instructions,
            vec![Instruction::before(id("a"), id("c")), Instruction::before(id("b"), id("c"))]
        );
        assert_eq!(replay(&ids(&current), &plan.instructions), ids(&target));
    }

    #[test]
    fn test_duplicate_titles_resolved_by_identity() {
        // Two distinct entries share title and group; identity keeps them apart.
        let current = items(&[("Song", "Z", "z"), ("Dup", "A", "d2"), ("Dup", "A", "d1")]);
        let target = build_target_order(&current, &collation());
        let plan = MoveSynthesizer::default().synthesize(&current, &target).unwrap();
        assert_eq!(replay(&ids(&current), &plan.instructions), ids(&target));
        assert_eq!(ids(&target), vec![id("d2"), id("d1"), id("z")]);
    }

    #[test]
    fn test_instruction_count_bounded() {
        let current = items(&[
            ("E", "x", "5"),
            ("D", "x", "4"),
            ("C", "x", "3"),
            ("B", "x", "2"),
            ("A", "x", "1"),
        ]);
        let target = build_target_order(&current, &collation());
        let plan = MoveSynthesizer::default().synthesize(&current, &target).unwrap();
        assert!(plan.len() <= current.len());
        assert_eq!(replay(&ids(&current), &plan.instructions), ids(&target));
    }

    #[test]
    fn test_strict_rejects_mismatched_sequences() {
        let current = items(&[("A", "x", "1"), ("B", "x", "2")]);
        let target = items(&[("A", "x", "1"), ("C", "x", "3")]);
        let err = MoveSynthesizer::new(Strictness::Strict)
            .synthesize(&current, &target)
            .unwrap_err();
        assert_eq!(err, SynthesisError::Inconsistent { missing: vec![id("3")], extra: 1 });
    }

    #[test]
    fn test_strict_rejects_repeated_target_entry() {
        let current = items(&[("A", "x", "1"), ("B", "x", "2")]);
        let mut target = current.clone();
        target[1] = target[0].clone();
        let err = MoveSynthesizer::default().synthesize(&current, &target).unwrap_err();
        assert!(matches!(err, SynthesisError::Inconsistent { .. }));
    }

    #[test]
    fn test_lenient_skips_missing_entries() {
        let current = items(&[("B", "x", "2"), ("A", "x", "1"), ("C", "x", "3")]);
        let target = items(&[("A", "x", "1"), ("Q", "x", "9"), ("B", "x", "2")]);
        let plan = MoveSynthesizer::new(Strictness::Lenient)
            .synthesize(&current, &target)
            .unwrap();
        assert_eq!(plan.instructions, vec![Instruction::before(id("1"), id("2"))]);
        // Entries the target omits stay behind the reconciled prefix.
        assert_eq!(
            replay(&ids(&current), &plan.instructions),
            vec![id("1"), id("2"), id("3")]
        );
    }

    #[test]
    fn test_duplicate_identity_in_current_is_precondition_error() {
        let mut current = items(&[("A", "x", "1"), ("B", "x", "2")]);
        current[1].identity = id("1");
        let err = MoveSynthesizer::default().synthesize(&current, &current).unwrap_err();
        assert_eq!(err, SynthesisError::Precondition(PreconditionError::DuplicateIdentity(id("1"))));
    }

    #[test]
    fn test_random_permutations_replay_to_target() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let artists = ["Abba", "björk", "Cher", "Élan", "abba"];
        let albums = ["Gold", "Post", "Believe"];

        for round in 0..50 {
            let len = 1 + round % 23;
            let mut entries: Vec<(String, String, String)> = (0..len)
                .map(|i| {
                    let artist = artists[i % artists.len()];
                    let album = albums[(i / 2) % albums.len()];
                    (format!("Track {}", i % 7), format!("{artist} • {album}"), format!("id-{round}-{i}"))
                })
                .collect();
            entries.shuffle(&mut rng);

            let input: Vec<SourceItem> = entries
                .iter()
                .map(|(t, b, i)| SourceItem::new(t.clone(), b.clone(), Identity::new(i.clone())))
                .collect();
            let current = prepare_items(&input, &KeyNormalizer::default()).unwrap();
            let target = build_target_order(&current, &collation());
            let plan = MoveSynthesizer::default().synthesize(&current, &target).unwrap();

            assert!(plan.len() <= current.len());
            assert_eq!(plan.instructions.len(), plan.moves.len());
            let replayed = replay(&ids(&current), &plan.instructions);
            assert_eq!(replayed, ids(&target), "round {round}");

            let mut before: Vec<Identity> = ids(&current);
            let mut after = replayed;
            before.sort();
            after.sort();
            assert_eq!(before, after);
        }
    }

    // ── replay ──────────────────────────────────────────────────────────

    #[test]
    fn test_replay_tail_move() {
        let order = vec![id("a"), id("b"), id("c")];
        let out = replay(&order, &[Instruction::to_tail(id("a"))]);
        assert_eq!(out, vec![id("b"), id("c"), id("a")]);
    }

    #[test]
    fn test_replay_skips_unknown_anchor() {
        let order = vec![id("a"), id("b")];
        let out = replay(&order, &[Instruction::before(id("b"), id("missing"))]);
        assert_eq!(out, order);
    }
}
