//! Demon behaviors - what each demon may do this turn
//!
//! Every demon on the board becomes an [`Actor`] for one turn. Actors
//! answer two questions: which actions are legal at all, and which they
//! actually take once some cells are already claimed by other demons.

pub mod action;
pub mod actor;
pub mod bomber;
pub mod melee;
pub mod ranged;
pub mod view;

pub use action::{apply_combination, Action, ActionKind, JointAction};
pub use actor::{actors_from_terrain, Actor, ActorId, Archetype};
pub use view::TurnView;
