//! Conflict resolution - combining demon moves into whole-turn outcomes
//!
//! The real game moves demons one at a time in an order it never reveals.
//! Demons whose candidate moves collide are ordered every admissible way,
//! and the union of all resulting combinations is the prediction.

pub mod conflicts;
pub mod engine;
pub mod precedence;

pub use conflicts::{find_conflicts, ConflictGroup};
pub use engine::{predict, resolve_turn, Prediction};
pub use precedence::{admissible_graphs, assertions, PrecedenceAssertion, PrecedenceGraph};
