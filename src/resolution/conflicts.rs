//! Destination conflicts between demons' unconstrained candidates

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::demons::{Action, ActorId};
use crate::hex::HexCoord;

/// Demons competing for at least one common destination cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConflictGroup {
    pub actors: BTreeSet<ActorId>,
    /// Every contested cell these demons share
    pub destinations: BTreeSet<HexCoord>,
}

impl ConflictGroup {
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

/// Group candidate actions by destination and keep the contested cells
///
/// All action kinds are grouped together: a Wait, a Bomb landing cell and a
/// Walk target on the same cell all conflict. Cells contested by the same
/// set of demons collapse into one group.
pub fn find_conflicts(candidates: &BTreeMap<ActorId, BTreeSet<Action>>) -> Vec<ConflictGroup> {
    let mut claimants: BTreeMap<HexCoord, BTreeSet<ActorId>> = BTreeMap::new();
    for (id, actions) in candidates {
        for action in actions {
            claimants.entry(action.destination).or_default().insert(*id);
        }
    }

    let mut groups: BTreeMap<BTreeSet<ActorId>, BTreeSet<HexCoord>> = BTreeMap::new();
    for (cell, actors) in claimants {
        if actors.len() > 1 {
            groups.entry(actors).or_default().insert(cell);
        }
    }

    groups
        .into_iter()
        .map(|(actors, destinations)| ConflictGroup {
            actors,
            destinations,
        })
        .collect()
}
