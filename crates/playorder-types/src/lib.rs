//! Shared item, identity and instruction types for playorder.
//!
//! This is the leaf crate: no internal playorder dependencies. Everything
//! that crosses a crate boundary (core, remote client, CLI) lives here.
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------------|
//! | Type              | Purpose                                            |
//! |-------------------|----------------------------------------------------|
//! | [`Identity`]      | Remote move token for one entry (the only anchor)  |
//! | [`PlaylistId`]    | Which playlist is being reordered                  |
//! | [`SourceItem`]    | Raw entry from a collection (identity optional)    |
//! | [`Item`]          | Validated entry with derived sort fields           |
//! | [`Instruction`]   | "move A before B" / "move A to tail"               |
//! | [`MoveAction`]    | Wire encoding of an instruction                    |
//! | [`PlannedMove`]   | The same move as positions, for mirror replay      |
//! | [`MovePlan`]      | Synthesis output (instructions + planned moves)    |
//! | [`RunPhase`]      | Lifecycle marker for presentation                  |
//! |-------------------|----------------------------------------------------|

pub mod ids;
pub mod instruction;
pub mod item;
pub mod phase;

pub use ids::{Identity, PlaylistId};
pub use instruction::{Instruction, MOVE_BEFORE_ACTION, MoveAction, MovePlan, PlannedMove};
pub use item::{HasIdentity, Item, SourceItem};
pub use phase::RunPhase;
