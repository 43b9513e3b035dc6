//! Demon actors and dispatch to their behaviors

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::demons::action::Action;
use crate::demons::bomber;
use crate::demons::melee;
use crate::demons::ranged::{self, Marksman};
use crate::demons::view::TurnView;
use crate::game::{DemonKind, Terrain};
use crate::hex::HexCoord;

/// Turn-local actor number, assigned in board order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Behavior archetype with its per-turn extra state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Footman
    Melee,
    /// Archer
    RangedLine,
    /// Wizard
    RangedCharge { charged: bool },
    /// Demolitionist
    AreaDenial { cooldown: u8 },
    /// Anything without a specialised behavior
    WaitOnly,
}

impl From<DemonKind> for Archetype {
    fn from(kind: DemonKind) -> Self {
        match kind {
            DemonKind::Footman => Archetype::Melee,
            DemonKind::Archer => Archetype::RangedLine,
            DemonKind::Wizard { charged } => Archetype::RangedCharge { charged },
            DemonKind::Demolitionist { cooldown } => Archetype::AreaDenial { cooldown },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub position: HexCoord,
    pub archetype: Archetype,
}

impl Actor {
    pub fn new(id: ActorId, position: HexCoord, archetype: Archetype) -> Self {
        Self {
            id,
            position,
            archetype,
        }
    }

    /// Every legal action, ignoring what other demons do this turn
    pub fn candidates_unconstrained(&self, view: &TurnView) -> BTreeSet<Action> {
        match self.archetype {
            Archetype::Melee => melee::unconstrained(self, view),
            Archetype::RangedLine => ranged::unconstrained(&Marksman::archer(self.position, view), view),
            Archetype::RangedCharge { charged } => {
                ranged::unconstrained(&Marksman::wizard(self.position, charged, view), view)
            }
            Archetype::AreaDenial { cooldown } => bomber::unconstrained(self.position, cooldown, view),
            Archetype::WaitOnly => BTreeSet::from([Action::wait(self.position)]),
        }
    }

    /// The actions actually available once `occupied` cells are claimed by other demons
    pub fn candidates_given_occupied(
        &self,
        view: &TurnView,
        occupied: &BTreeSet<HexCoord>,
    ) -> BTreeSet<Action> {
        match self.archetype {
            Archetype::Melee => melee::given_occupied(self, view, occupied),
            Archetype::RangedLine => {
                ranged::given_occupied(&Marksman::archer(self.position, view), view, occupied)
            }
            Archetype::RangedCharge { charged } => ranged::given_occupied(
                &Marksman::wizard(self.position, charged, view),
                view,
                occupied,
            ),
            Archetype::AreaDenial { cooldown } => {
                bomber::given_occupied(self.position, cooldown, view, occupied)
            }
            Archetype::WaitOnly => BTreeSet::from([Action::wait(self.position)]),
        }
    }
}

/// Build one actor per demon on the board, numbered in board order
pub fn actors_from_terrain(terrain: &Terrain) -> Vec<Actor> {
    terrain
        .demons
        .iter()
        .enumerate()
        .map(|(i, (position, kind))| Actor::new(ActorId(i), *position, Archetype::from(*kind)))
        .collect()
}
