//! Demon action primitives and their effect on a game state

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::core::config::OracleConfig;
use crate::core::error::{OracleError, Result};
use crate::game::{DemonKind, GameState};
use crate::hex::HexCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    Wait,
    Attack,
    Walk,
    /// Bomb thrown onto the destination cell
    Bomb,
}

/// One demon's move for the turn
///
/// Identity is the (source, destination) pair only. Two actions differing
/// just in kind compare equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub source: HexCoord,
    pub destination: HexCoord,
}

impl Action {
    pub fn wait(position: HexCoord) -> Self {
        Self {
            kind: ActionKind::Wait,
            source: position,
            destination: position,
        }
    }

    pub fn attack(position: HexCoord) -> Self {
        Self {
            kind: ActionKind::Attack,
            source: position,
            destination: position,
        }
    }

    pub fn walk(source: HexCoord, destination: HexCoord) -> Self {
        Self {
            kind: ActionKind::Walk,
            source,
            destination,
        }
    }

    pub fn bomb(source: HexCoord, destination: HexCoord) -> Self {
        Self {
            kind: ActionKind::Bomb,
            source,
            destination,
        }
    }

    /// Walk when the destination differs from the source, Wait otherwise
    pub fn step(source: HexCoord, destination: HexCoord) -> Self {
        if source == destination {
            Self::wait(source)
        } else {
            Self::walk(source, destination)
        }
    }

    /// Apply this action alone to `state`
    pub fn apply(&self, state: &mut GameState, config: &OracleConfig) -> Result<()> {
        match self.kind {
            ActionKind::Wait | ActionKind::Attack => Ok(()),
            ActionKind::Walk => {
                let demon = state
                    .terrain
                    .demons
                    .remove(&self.source)
                    .ok_or(OracleError::MissingActor(self.source))?;
                state.terrain.demons.insert(self.destination, demon);
                Ok(())
            }
            ActionKind::Bomb => throw_bomb(self, state, config),
        }
    }
}

fn throw_bomb(action: &Action, state: &mut GameState, config: &OracleConfig) -> Result<()> {
    let demon = state
        .terrain
        .demons
        .get_mut(&action.source)
        .ok_or(OracleError::MissingActor(action.source))?;
    if let DemonKind::Demolitionist { cooldown } = demon {
        *cooldown = config.bomber.cooldown_after_bomb;
    }
    state.terrain.bombs.insert(action.destination);
    Ok(())
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.destination == other.destination
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.destination.hash(state);
    }
}

impl Ord for Action {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source
            .cmp(&other.source)
            .then_with(|| self.destination.cmp(&other.destination))
    }
}

impl PartialOrd for Action {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Wait => write!(f, "Wait{}", self.source),
            ActionKind::Attack => write!(f, "Attack{}", self.source),
            ActionKind::Walk => write!(f, "Walk{} -> {}", self.source, self.destination),
            ActionKind::Bomb => write!(f, "Bomb{} -> {}", self.source, self.destination),
        }
    }
}

/// A set of actions with at most one action per source demon
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointAction(BTreeSet<Action>);

impl JointAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this combination extended with `action`
    pub fn with(&self, action: Action) -> Self {
        debug_assert!(!self.sources().contains(&action.source));
        let mut actions = self.0.clone();
        actions.insert(action);
        Self(actions)
    }

    pub fn union(&self, other: &JointAction) -> Self {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sources(&self) -> BTreeSet<HexCoord> {
        self.0.iter().map(|a| a.source).collect()
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.0.contains(action)
    }
}

impl FromIterator<Action> for JointAction {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for JointAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, action) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", action)?;
        }
        f.write_str("}")
    }
}

/// Apply every action of a combination to an independent copy of `state`
///
/// Walks are resolved simultaneously: all walking demons leave their cells
/// before any of them lands, so one demon stepping into a cell another is
/// leaving never overwrites it.
pub fn apply_combination(
    state: &GameState,
    combination: &JointAction,
    config: &OracleConfig,
) -> Result<GameState> {
    let mut next = state.clone();

    let mut lifted: BTreeMap<HexCoord, DemonKind> = BTreeMap::new();
    for action in combination.iter().filter(|a| a.kind == ActionKind::Walk) {
        let demon = next
            .terrain
            .demons
            .remove(&action.source)
            .ok_or(OracleError::MissingActor(action.source))?;
        lifted.insert(action.destination, demon);
    }
    next.terrain.demons.extend(lifted);

    for action in combination.iter().filter(|a| a.kind != ActionKind::Walk) {
        action.apply(&mut next, config)?;
    }
    Ok(next)
}
