//! Archer and wizard behavior, plus the radius seeking shared with bombers
//!
//! Ranged demons try to stand on a straight line with the player at their
//! perfect radius. When they cannot shoot they step to a neighbor that
//! would give a clear line, or otherwise move toward the perfect radius.

use std::collections::{BTreeMap, BTreeSet};

use crate::demons::action::Action;
use crate::demons::view::TurnView;
use crate::game::surface_neighbors;
use crate::hex::{is_extended_line_blocked, is_line_blocked, HexCoord, RadiusStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Weapon {
    Bow { min_range: u32, max_range: u32 },
    Wand { charged: bool, max_range: u32, reach: u32 },
}

/// A ranged demon as seen for one turn
#[derive(Debug, Clone)]
pub struct Marksman {
    position: HexCoord,
    perfect_radius: u32,
    weapon: Weapon,
    blockages: BTreeSet<HexCoord>,
    others: BTreeSet<HexCoord>,
}

impl Marksman {
    pub fn archer(position: HexCoord, view: &TurnView) -> Self {
        let config = &view.config.archer;
        Self {
            position,
            perfect_radius: config.perfect_radius,
            weapon: Weapon::Bow {
                min_range: config.min_range,
                max_range: config.max_range,
            },
            blockages: view.blockages(position),
            others: view.other_demons(position),
        }
    }

    pub fn wizard(position: HexCoord, charged: bool, view: &TurnView) -> Self {
        let config = &view.config.wizard;
        Self {
            position,
            perfect_radius: config.perfect_radius,
            weapon: Weapon::Wand {
                charged,
                max_range: config.max_range,
                reach: config.bolt_reach,
            },
            blockages: view.blockages(position),
            others: view.other_demons(position),
        }
    }

    fn in_range(&self, distance: u32) -> bool {
        match self.weapon {
            Weapon::Bow { min_range, max_range } => (min_range..=max_range).contains(&distance),
            Weapon::Wand { max_range, .. } => (1..=max_range).contains(&distance),
        }
    }

    /// Would a shot from `from` reach the player without hitting anything else?
    fn clear_shot(&self, from: HexCoord, player: HexCoord) -> bool {
        if !from.is_collinear(&player) || !self.in_range(from.distance(&player)) {
            return false;
        }
        match self.weapon {
            Weapon::Bow { .. } => !is_line_blocked(from, player, &self.blockages),
            Weapon::Wand { reach, .. } => {
                !is_extended_line_blocked(from, player, &self.blockages, &self.others, reach)
            }
        }
    }

    /// Attack or hold position without looking at other demons' moves
    fn fixed_response(&self, player: HexCoord) -> Option<Action> {
        let distance = self.position.distance(&player);
        match self.weapon {
            Weapon::Bow { .. } => self
                .clear_shot(self.position, player)
                .then(|| Action::attack(self.position)),
            Weapon::Wand { charged: true, .. } => self
                .clear_shot(self.position, player)
                .then(|| Action::attack(self.position)),
            // A discharged wizard already in line at its perfect radius waits to recharge
            Weapon::Wand { charged: false, .. } => (self.position.is_collinear(&player)
                && self.in_range(distance)
                && distance == self.perfect_radius)
                .then(|| Action::wait(self.position)),
        }
    }

    /// Walkable neighbors, not in `excluded`, that would give a clear shot
    fn firing_cells(&self, view: &TurnView, excluded: &BTreeSet<HexCoord>) -> Vec<HexCoord> {
        let player = view.player();
        surface_neighbors(self.position)
            .filter(|cell| {
                view.terrain.walkable(*cell)
                    && !excluded.contains(cell)
                    && self.clear_shot(*cell, player)
            })
            .collect()
    }
}

pub fn unconstrained(marksman: &Marksman, view: &TurnView) -> BTreeSet<Action> {
    if let Some(action) = marksman.fixed_response(view.player()) {
        return BTreeSet::from([action]);
    }
    let mut actions = approach_unconstrained(
        marksman.position,
        marksman.perfect_radius,
        &marksman.blockages,
        view,
    );
    actions.extend(
        marksman
            .firing_cells(view, &marksman.blockages)
            .into_iter()
            .map(|cell| Action::walk(marksman.position, cell)),
    );
    actions
}

pub fn given_occupied(
    marksman: &Marksman,
    view: &TurnView,
    occupied: &BTreeSet<HexCoord>,
) -> BTreeSet<Action> {
    let player = view.player();
    if let Some(action) = marksman.fixed_response(player) {
        return BTreeSet::from([action]);
    }

    let mut excluded: BTreeSet<HexCoord> = marksman.blockages.union(occupied).copied().collect();
    excluded.insert(player);

    // Firing cells ranked by how far they are from the perfect radius.
    // Stairs and spear cells only count when no other firing cell exists.
    let mut primary: BTreeMap<u32, BTreeSet<HexCoord>> = BTreeMap::new();
    let mut secondary: BTreeMap<u32, BTreeSet<HexCoord>> = BTreeMap::new();
    for cell in marksman.firing_cells(view, &excluded) {
        let rank = cell.distance(&player).abs_diff(marksman.perfect_radius);
        let tier = if view.secondary_obstacles().contains(&cell) {
            &mut secondary
        } else {
            &mut primary
        };
        tier.entry(rank).or_default().insert(cell);
    }
    if let Some((_, cells)) = primary.into_iter().next().or_else(|| secondary.into_iter().next()) {
        return cells
            .into_iter()
            .map(|cell| Action::walk(marksman.position, cell))
            .collect();
    }

    approach_given_occupied(marksman.position, marksman.perfect_radius, &excluded, view)
}

fn open_cells(
    step: RadiusStep,
    position: HexCoord,
    excluded: &BTreeSet<HexCoord>,
    view: &TurnView,
) -> BTreeSet<HexCoord> {
    step.cells(position, view.player())
        .into_iter()
        .filter(|cell| {
            view.terrain.walkable(*cell)
                && !excluded.contains(cell)
                && !view.secondary_obstacles().contains(cell)
        })
        .collect()
}

/// Menu of moves toward the perfect radius: level moves are always allowed
pub(crate) fn approach_unconstrained(
    position: HexCoord,
    perfect_radius: u32,
    blockages: &BTreeSet<HexCoord>,
    view: &TurnView,
) -> BTreeSet<Action> {
    let radius = position.distance(&view.player());
    let step = if radius > perfect_radius {
        RadiusStep::KeepOrReduce
    } else if radius == perfect_radius {
        RadiusStep::Keep
    } else {
        RadiusStep::KeepOrIncrease
    };

    let mut actions = BTreeSet::from([Action::wait(position)]);
    actions.extend(
        open_cells(step, position, blockages, view)
            .into_iter()
            .map(|cell| Action::walk(position, cell)),
    );
    actions
}

/// Move toward the perfect radius if possible, else keep level, else wait
pub(crate) fn approach_given_occupied(
    position: HexCoord,
    perfect_radius: u32,
    excluded: &BTreeSet<HexCoord>,
    view: &TurnView,
) -> BTreeSet<Action> {
    let radius = position.distance(&view.player());
    let preferred = if radius > perfect_radius {
        Some(RadiusStep::Reduce)
    } else if radius < perfect_radius {
        Some(RadiusStep::Increase)
    } else {
        None
    };

    for step in preferred.into_iter().chain(std::iter::once(RadiusStep::Keep)) {
        let cells = open_cells(step, position, excluded, view);
        if !cells.is_empty() {
            return cells
                .into_iter()
                .map(|cell| Action::walk(position, cell))
                .collect();
        }
    }
    BTreeSet::from([Action::wait(position)])
}
