//! Demons as they are stored on the board

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::OracleError;

/// A demon kind with the state the board tracks for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DemonKind {
    /// Melee, attacks adjacent player
    Footman,
    /// Shoots arrows along straight lines
    Archer,
    /// Throws bombs; holds one when cooldown is zero
    Demolitionist { cooldown: u8 },
    /// Casts bolts along straight lines when the wand is charged
    Wizard { charged: bool },
}

impl DemonKind {
    pub fn name(&self) -> &'static str {
        match self {
            DemonKind::Footman => "footman",
            DemonKind::Archer => "archer",
            DemonKind::Demolitionist { .. } => "demolitionist",
            DemonKind::Wizard { .. } => "wizard",
        }
    }

    pub fn holds_bomb(&self) -> bool {
        matches!(self, DemonKind::Demolitionist { cooldown: 0 })
    }
}

impl fmt::Display for DemonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the plain kind name, with a fresh state (bomb held, wand charged)
impl FromStr for DemonKind {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "footman" => Ok(DemonKind::Footman),
            "archer" => Ok(DemonKind::Archer),
            "demolitionist" | "bomber" => Ok(DemonKind::Demolitionist { cooldown: 0 }),
            "wizard" => Ok(DemonKind::Wizard { charged: true }),
            other => Err(OracleError::UnknownArchetype(other.to_string())),
        }
    }
}
