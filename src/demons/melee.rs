//! Footman behavior: close in on the player along shortest paths

use std::collections::{BTreeMap, BTreeSet};

use crate::demons::action::Action;
use crate::demons::actor::Actor;
use crate::demons::view::{TurnView, UNREACHABLE};
use crate::hex::HexCoord;

fn adjacent_to_player(actor: &Actor, view: &TurnView) -> bool {
    actor.position.distance(&view.player()) == 1
}

fn lengths<'v>(actor: &Actor, view: &'v TurnView) -> Option<&'v BTreeMap<HexCoord, u32>> {
    let table = view.path_lengths(actor.id);
    if table.is_none() {
        tracing::warn!("No path table for melee actor {} at {}", actor.id, actor.position);
    }
    table
}

pub fn unconstrained(actor: &Actor, view: &TurnView) -> BTreeSet<Action> {
    if adjacent_to_player(actor, view) {
        return BTreeSet::from([Action::attack(actor.position)]);
    }
    let mut actions = BTreeSet::from([Action::wait(actor.position)]);
    let Some(table) = lengths(actor, view) else {
        return actions;
    };
    let current = table.get(&actor.position).copied().unwrap_or(UNREACHABLE);

    actions.extend(
        table
            .iter()
            .filter(|(cell, length)| **length <= current && !view.demons().contains(*cell))
            .map(|(cell, _)| Action::walk(actor.position, *cell)),
    );
    actions
}

pub fn given_occupied(
    actor: &Actor,
    view: &TurnView,
    occupied: &BTreeSet<HexCoord>,
) -> BTreeSet<Action> {
    if adjacent_to_player(actor, view) {
        return BTreeSet::from([Action::attack(actor.position)]);
    }
    let Some(table) = lengths(actor, view) else {
        return BTreeSet::from([Action::wait(actor.position)]);
    };
    let current = table.get(&actor.position).copied().unwrap_or(UNREACHABLE);

    let free: Vec<(HexCoord, u32)> = table
        .iter()
        .filter(|(cell, _)| {
            **cell == actor.position
                || (!occupied.contains(*cell) && !view.demons().contains(*cell))
        })
        .map(|(cell, length)| (*cell, *length))
        .collect();

    let preferred: BTreeSet<Action> = free
        .iter()
        .filter(|(_, length)| *length < current)
        .map(|(cell, _)| Action::walk(actor.position, *cell))
        .collect();
    if !preferred.is_empty() {
        return preferred;
    }

    // the actor's own cell always qualifies here, so this is never empty
    free.iter()
        .filter(|(_, length)| *length == current)
        .map(|(cell, _)| Action::step(actor.position, *cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OracleConfig;
    use crate::demons::actor::{actors_from_terrain, ActorId, Archetype};
    use crate::game::{DemonKind, Terrain, Tile};

    fn c(x: i32, y: i32) -> HexCoord {
        HexCoord::new(x, y)
    }

    fn board(footmen: &[(i32, i32)]) -> Terrain {
        let mut terrain = Terrain::new();
        terrain.player = c(0, 0);
        for (x, y) in footmen {
            terrain.demons.insert(c(*x, *y), DemonKind::Footman);
        }
        terrain
    }

    #[test]
    fn test_adjacent_footman_attacks() {
        let terrain = board(&[(1, 0)]);
        let config = OracleConfig::default();
        let actors = actors_from_terrain(&terrain);
        let view = TurnView::new(&terrain, &config, &actors);

        let expected = BTreeSet::from([Action::attack(c(1, 0))]);
        assert_eq!(actors[0].candidates_unconstrained(&view), expected);
        assert_eq!(actors[0].candidates_given_occupied(&view, &BTreeSet::new()), expected);
    }

    #[test]
    fn test_single_improving_neighbor() {
        let terrain = board(&[(0, 2)]);
        let config = OracleConfig::default();
        let actors = actors_from_terrain(&terrain);
        let view = TurnView::new(&terrain, &config, &actors);

        assert_eq!(
            actors[0].candidates_given_occupied(&view, &BTreeSet::new()),
            BTreeSet::from([Action::walk(c(0, 2), c(0, 1))])
        );
        // (-1, 2) and (1, 1) keep the distance, the rest move away
        assert_eq!(
            actors[0].candidates_unconstrained(&view),
            BTreeSet::from([
                Action::wait(c(0, 2)),
                Action::walk(c(0, 2), c(0, 1)),
                Action::walk(c(0, 2), c(-1, 2)),
                Action::walk(c(0, 2), c(1, 1)),
            ])
        );
    }

    #[test]
    fn test_falls_back_to_level_cells_when_blocked() {
        let terrain = board(&[(0, 2)]);
        let config = OracleConfig::default();
        let actors = actors_from_terrain(&terrain);
        let view = TurnView::new(&terrain, &config, &actors);

        let occupied = BTreeSet::from([c(0, 1)]);
        assert_eq!(
            actors[0].candidates_given_occupied(&view, &occupied),
            BTreeSet::from([
                Action::wait(c(0, 2)),
                Action::walk(c(0, 2), c(-1, 2)),
                Action::walk(c(0, 2), c(1, 1)),
            ])
        );
    }

    #[test]
    fn test_other_demons_are_never_entered() {
        let terrain = board(&[(0, 2), (0, 1)]);
        let config = OracleConfig::default();
        let actors = actors_from_terrain(&terrain);
        let view = TurnView::new(&terrain, &config, &actors);
        let back = actors.iter().find(|a| a.position == c(0, 2)).unwrap();

        let moves = back.candidates_unconstrained(&view);
        assert!(!moves.contains(&Action::walk(c(0, 2), c(0, 1))));
    }

    #[test]
    fn test_unreachable_player_never_improves() {
        let mut terrain = board(&[(0, 3)]);
        for cell in c(0, 0).neighbors() {
            terrain.set_tile(cell, Tile::Magma);
        }
        let config = OracleConfig::default();
        let actor = Actor::new(ActorId(0), c(0, 3), Archetype::Melee);
        let view = TurnView::new(&terrain, &config, &[actor]);

        let moves = actor.candidates_given_occupied(&view, &BTreeSet::new());
        // nothing improves, so every walkable neighbor is level with the current cell
        assert!(moves.contains(&Action::wait(c(0, 3))));
        assert_eq!(moves.len(), 7);
    }
}
