//! Demolitionist behavior

use std::collections::BTreeSet;

use crate::demons::action::Action;
use crate::demons::ranged::{approach_given_occupied, approach_unconstrained};
use crate::demons::view::TurnView;
use crate::game::surface_neighbors;
use crate::hex::HexCoord;

/// Cells next to the player a bomb can be thrown onto without catching another demon
///
/// Cells in `claimed` already belong to a demon that moved earlier this turn.
fn throw_targets(
    position: HexCoord,
    cooldown: u8,
    view: &TurnView,
    claimed: &BTreeSet<HexCoord>,
) -> BTreeSet<HexCoord> {
    let config = &view.config.bomber;
    let player = view.player();
    if cooldown > 0 || position.distance(&player) > config.trigger_radius {
        return BTreeSet::new();
    }

    let blockages = view.blockages(position);
    let others = view.other_demons(position);
    surface_neighbors(player)
        .filter(|cell| {
            view.terrain.walkable(*cell)
                && !blockages.contains(cell)
                && !claimed.contains(cell)
                && position.distance(cell) <= config.throw_range
                && cell.neighbors().iter().all(|n| !others.contains(n))
        })
        .collect()
}

fn bombs(position: HexCoord, targets: BTreeSet<HexCoord>) -> BTreeSet<Action> {
    targets
        .into_iter()
        .map(|target| Action::bomb(position, target))
        .collect()
}

pub fn unconstrained(position: HexCoord, cooldown: u8, view: &TurnView) -> BTreeSet<Action> {
    let targets = throw_targets(position, cooldown, view, &BTreeSet::new());
    if !targets.is_empty() {
        return bombs(position, targets);
    }
    approach_unconstrained(
        position,
        view.config.bomber.perfect_radius,
        &view.blockages(position),
        view,
    )
}

pub fn given_occupied(
    position: HexCoord,
    cooldown: u8,
    view: &TurnView,
    occupied: &BTreeSet<HexCoord>,
) -> BTreeSet<Action> {
    let targets = throw_targets(position, cooldown, view, occupied);
    if !targets.is_empty() {
        return bombs(position, targets);
    }
    let mut excluded: BTreeSet<HexCoord> =
        view.blockages(position).union(occupied).copied().collect();
    excluded.insert(view.player());
    approach_given_occupied(position, view.config.bomber.perfect_radius, &excluded, view)
}
