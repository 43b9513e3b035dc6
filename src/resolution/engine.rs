//! Turn resolution: every outcome consistent with some demon move order

use ahash::AHashSet;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::config::OracleConfig;
use crate::core::error::{OracleError, Result};
use crate::demons::{
    actors_from_terrain, apply_combination, Action, Actor, ActorId, JointAction, TurnView,
};
use crate::game::{GameState, PlayerMove};
use crate::hex::HexCoord;
use crate::resolution::conflicts::{find_conflicts, ConflictGroup};
use crate::resolution::precedence::{admissible_graphs, PrecedenceGraph};

/// Everything the demons might do this turn, and where that leaves the board
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub combinations: BTreeSet<JointAction>,
    /// Distinct resulting states, in combination order
    #[serde(serialize_with = "state_codes")]
    pub states: Vec<GameState>,
    pub distinct_actions: BTreeSet<Action>,
    pub conflicts: Vec<ConflictGroup>,
    pub admissible_orders: usize,
}

fn state_codes<S: Serializer>(
    states: &[GameState],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(states.iter().map(GameState::to_code))
}

impl Prediction {
    /// Predicted state with the observed demons on the same cells, if any
    ///
    /// Demons are compared by kind; wand charge and bomb cooldown are not.
    pub fn matching_state(&self, observed: &GameState) -> Option<&GameState> {
        let layout = observed.terrain.demon_layout();
        self.states
            .iter()
            .find(|state| state.terrain.demon_layout() == layout)
    }

    pub fn covers(&self, observed: &GameState) -> bool {
        self.matching_state(observed).is_some()
    }
}

/// Apply the player's move, then predict the demons' response
pub fn predict(
    previous: &GameState,
    player_move: &PlayerMove,
    config: &OracleConfig,
) -> Result<Prediction> {
    let after_move = player_move.apply(previous, config)?;
    resolve_turn(&after_move, config)
}

/// Predict every demon response on a board where the player has already moved
///
/// Fails with [`OracleError::CombinationOverflow`] when more combinations
/// exist than `engine.max_combinations`; the error carries what was found.
pub fn resolve_turn(state: &GameState, config: &OracleConfig) -> Result<Prediction> {
    let actors: BTreeMap<ActorId, Actor> = actors_from_terrain(&state.terrain)
        .into_iter()
        .map(|actor| (actor.id, actor))
        .collect();
    let roster: Vec<Actor> = actors.values().copied().collect();
    let view = TurnView::new(&state.terrain, config, &roster);

    let candidates: BTreeMap<ActorId, BTreeSet<Action>> = actors
        .values()
        .map(|actor| (actor.id, actor.candidates_unconstrained(&view)))
        .collect();
    let conflicts = find_conflicts(&candidates);
    let graphs = admissible_graphs(&conflicts);
    tracing::debug!(
        "{} demons, {} conflict groups, {} admissible orders",
        actors.len(),
        conflicts.len(),
        graphs.len()
    );

    let limit = config.engine.max_combinations;
    let enumerated: Vec<Enumerated> = if graphs.len() >= config.engine.parallel_threshold {
        graphs
            .par_iter()
            .map(|graph| enumerate_ordering(graph, &actors, &view, limit))
            .collect()
    } else {
        graphs
            .iter()
            .map(|graph| enumerate_ordering(graph, &actors, &view, limit))
            .collect()
    };

    let mut combinations = BTreeSet::new();
    let mut truncated = false;
    for result in enumerated {
        truncated |= result.truncated;
        combinations.extend(result.combinations);
        truncated |= cap(&mut combinations, limit);
    }

    let states = apply_all(state, &combinations, config)?;
    let distinct_actions = combinations
        .iter()
        .flat_map(|joint| joint.iter().copied())
        .collect();
    let prediction = Prediction {
        combinations,
        states,
        distinct_actions,
        conflicts,
        admissible_orders: graphs.len(),
    };
    tracing::debug!(
        "{} combinations, {} distinct states",
        prediction.combinations.len(),
        prediction.states.len()
    );

    match limit {
        Some(limit) if truncated => {
            tracing::warn!("Combination limit {} reached, prediction is partial", limit);
            Err(OracleError::CombinationOverflow {
                limit,
                partial: Box::new(prediction),
            })
        }
        _ => Ok(prediction),
    }
}

struct Enumerated {
    combinations: BTreeSet<JointAction>,
    truncated: bool,
}

/// Drop the largest entries beyond `limit`; true if anything was dropped
fn cap<T: Ord>(set: &mut BTreeSet<T>, limit: Option<usize>) -> bool {
    let Some(limit) = limit else {
        return false;
    };
    let mut dropped = false;
    while set.len() > limit {
        set.pop_last();
        dropped = true;
    }
    dropped
}

/// Combinations for one admissible order
///
/// Demons in the graph choose in topological order, each seeing the cells
/// committed before it. Demons outside the graph choose with nothing
/// committed and are combined with every ordered branch.
fn enumerate_ordering(
    graph: &PrecedenceGraph,
    actors: &BTreeMap<ActorId, Actor>,
    view: &TurnView,
    limit: Option<usize>,
) -> Enumerated {
    let mut truncated = false;

    let mut branches: BTreeSet<(BTreeSet<HexCoord>, JointAction)> =
        BTreeSet::from([(BTreeSet::new(), JointAction::new())]);
    for id in graph.topological_order() {
        let Some(actor) = actors.get(&id) else {
            continue;
        };
        let mut next = BTreeSet::new();
        for (committed, joint) in &branches {
            for action in actor.candidates_given_occupied(view, committed) {
                let mut committed = committed.clone();
                committed.insert(action.destination);
                next.insert((committed, joint.with(action)));
            }
        }
        truncated |= cap(&mut next, limit);
        branches = next;
    }

    let mut combinations: BTreeSet<JointAction> =
        branches.into_iter().map(|(_, joint)| joint).collect();
    let nobody = BTreeSet::new();
    for actor in actors.values().filter(|actor| !graph.contains(actor.id)) {
        let options = actor.candidates_given_occupied(view, &nobody);
        let mut next = BTreeSet::new();
        for joint in &combinations {
            for action in &options {
                next.insert(joint.with(*action));
            }
        }
        truncated |= cap(&mut next, limit);
        combinations = next;
    }

    Enumerated {
        combinations,
        truncated,
    }
}

/// Resulting state of every combination, duplicates removed
fn apply_all(
    state: &GameState,
    combinations: &BTreeSet<JointAction>,
    config: &OracleConfig,
) -> Result<Vec<GameState>> {
    let joints: Vec<&JointAction> = combinations.iter().collect();
    let results: Vec<GameState> = if joints.len() >= config.engine.parallel_threshold {
        joints
            .par_iter()
            .map(|joint| apply_combination(state, joint, config))
            .collect::<Result<Vec<_>>>()?
    } else {
        joints
            .iter()
            .map(|joint| apply_combination(state, joint, config))
            .collect::<Result<Vec<_>>>()?
    };

    let mut seen = AHashSet::new();
    Ok(results
        .into_iter()
        .filter(|next| seen.insert(next.clone()))
        .collect())
}
