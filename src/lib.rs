//! Hoplite Oracle - demon move prediction for Hoplite turns
//!
//! Given the board before a turn and the player's move, the oracle lists
//! every way the demons could respond under any internal move order the
//! game might use, so that a recorded outcome can be checked against it.

pub mod core;
pub mod demons;
pub mod game;
pub mod harness;
pub mod hex;
pub mod resolution;
