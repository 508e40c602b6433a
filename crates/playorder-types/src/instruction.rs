//! Move instructions and their wire encoding.
//!
//! An [`Instruction`] is one remote directive: "place `moved` immediately
//! before `successor`", or at the tail when there is no successor. The
//! remote applies instructions one at a time, in order, so a list of them
//! only makes sense against the exact starting order it was computed from.
//!
//! [`PlannedMove`] is the presentation-side twin of an instruction: the same
//! move expressed as positions, used to replay it against a local mirror.

use serde::{Deserialize, Serialize};

use crate::ids::Identity;

/// Action name the remote edit endpoint expects for an anchor-relative move.
pub const MOVE_BEFORE_ACTION: &str = "ACTION_MOVE_VIDEO_BEFORE";

/// One remote move directive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// Entry being moved.
    pub moved: Identity,
    /// Entry that must directly follow `moved` afterwards. `None` = tail.
    pub successor: Option<Identity>,
}

impl Instruction {
    pub fn before(moved: Identity, successor: Identity) -> Self {
        Self { moved, successor: Some(successor) }
    }

    pub fn to_tail(moved: Identity) -> Self {
        Self { moved, successor: None }
    }

    /// Encode for the remote edit endpoint.
    pub fn to_action(&self) -> MoveAction {
        MoveAction {
            action: MOVE_BEFORE_ACTION.to_string(),
            set_video_id: self.moved.clone(),
            moved_set_video_id_successor: self.successor.clone(),
        }
    }
}

/// Wire form of an [`Instruction`] inside an edit request's `actions` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveAction {
    pub action: String,
    pub set_video_id: Identity,
    /// Serialized as `null` for tail moves.
    pub moved_set_video_id_successor: Option<Identity>,
}

/// A move as positions in the simulated sequence at synthesis time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMove {
    pub identity: Identity,
    pub title: String,
    /// Position before the move was simulated.
    pub from: usize,
    /// Position after the move was simulated.
    pub to: usize,
}

/// Output of move synthesis: remote instructions plus their mirror moves,
/// index-aligned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub instructions: Vec<Instruction>,
    pub moves: Vec<PlannedMove>,
}

impl MovePlan {
    /// An empty plan means the sequence is already in target order.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Record one simulated move.
    pub fn record(&mut self, moved: Identity, successor: Option<Identity>, title: &str, from: usize, to: usize) {
        self.moves.push(PlannedMove {
            identity: moved.clone(),
            title: title.to_string(),
            from,
            to,
        });
        self.instructions.push(Instruction { moved, successor });
    }
}
