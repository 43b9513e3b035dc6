//! End-to-end prediction tests

use std::collections::BTreeSet;

use hoplite_oracle::core::{OracleConfig, OracleError};
use hoplite_oracle::demons::*;
use hoplite_oracle::game::*;
use hoplite_oracle::hex::HexCoord;
use hoplite_oracle::resolution::*;

fn c(x: i32, y: i32) -> HexCoord {
    HexCoord::new(x, y)
}

/// Player at the centre, no stairs, given demons
fn board(demons: &[((i32, i32), DemonKind)]) -> GameState {
    let mut state = GameState::default();
    state.terrain.player = c(0, 0);
    state.terrain.stairs = None;
    for ((x, y), kind) in demons {
        state.terrain.demons.insert(c(*x, *y), *kind);
    }
    state
}

fn busy_board() -> GameState {
    let mut state = board(&[
        ((0, 3), DemonKind::Footman),
        ((1, 2), DemonKind::Footman),
        ((-2, 3), DemonKind::Footman),
        ((3, -1), DemonKind::Archer),
        ((-3, 0), DemonKind::Wizard { charged: false }),
        ((2, -4), DemonKind::Demolitionist { cooldown: 0 }),
    ]);
    state.terrain.set_tile(c(-1, 1), Tile::Magma);
    state.terrain.spear = Some(c(1, -2));
    state
}

#[test]
fn test_single_footman_takes_only_improving_step() {
    let state = board(&[((0, 2), DemonKind::Footman)]);
    let prediction = resolve_turn(&state, &OracleConfig::default()).unwrap();

    assert_eq!(
        prediction.combinations,
        BTreeSet::from([JointAction::from_iter([Action::walk(c(0, 2), c(0, 1))])])
    );
    assert_eq!(prediction.states.len(), 1);
    assert_eq!(
        prediction.states[0].terrain.demons.get(&c(0, 1)),
        Some(&DemonKind::Footman)
    );
}

#[test]
fn test_two_footmen_contest_one_cell() {
    let mut state = board(&[((0, 2), DemonKind::Footman), ((1, 1), DemonKind::Footman)]);
    for cell in [c(1, 0), c(2, 0), c(-1, 2)] {
        state.terrain.set_tile(cell, Tile::Magma);
    }
    let prediction = resolve_turn(&state, &OracleConfig::default()).unwrap();

    assert_eq!(prediction.conflicts.len(), 1);
    assert_eq!(prediction.admissible_orders, 2);
    assert_eq!(prediction.states.len(), 2);

    let occupants: BTreeSet<BTreeSet<HexCoord>> = prediction
        .states
        .iter()
        .map(|s| s.terrain.demon_positions())
        .collect();
    assert_eq!(
        occupants,
        BTreeSet::from([
            BTreeSet::from([c(0, 1), c(1, 1)]),
            BTreeSet::from([c(0, 1), c(0, 2)]),
        ])
    );
}

#[test]
fn test_archer_with_clear_shot_only_attacks() {
    let state = board(&[((3, -3), DemonKind::Archer)]);
    let prediction = resolve_turn(&state, &OracleConfig::default()).unwrap();

    assert_eq!(
        prediction.distinct_actions,
        BTreeSet::from([Action::attack(c(3, -3))])
    );
    assert!(prediction
        .distinct_actions
        .iter()
        .all(|a| a.kind == ActionKind::Attack));
}

#[test]
fn test_demolitionist_on_cooldown_never_bombs() {
    let config = OracleConfig::default();
    for position in [(0, 1), (0, 2), (1, 2), (0, 3), (2, 2), (0, 5)] {
        let state = board(&[(position, DemonKind::Demolitionist { cooldown: 1 })]);
        let prediction = resolve_turn(&state, &config).unwrap();
        assert!(
            prediction
                .distinct_actions
                .iter()
                .all(|a| a.kind != ActionKind::Bomb),
            "bomb predicted from {:?}",
            position
        );
        assert!(prediction.states.iter().all(|s| s.terrain.bombs.is_empty()));
    }
}

#[test]
fn test_ready_demolitionist_places_bomb_and_cools_down() {
    let config = OracleConfig::default();
    let state = board(&[((0, 3), DemonKind::Demolitionist { cooldown: 0 })]);
    let prediction = resolve_turn(&state, &config).unwrap();

    assert_eq!(prediction.states.len(), 3);
    for next in &prediction.states {
        assert_eq!(next.terrain.bombs.len(), 1);
        assert_eq!(
            next.terrain.demons.get(&c(0, 3)),
            Some(&DemonKind::Demolitionist {
                cooldown: config.bomber.cooldown_after_bomb
            })
        );
    }
}

#[test]
fn test_wait_only_combination_round_trip() {
    let state = busy_board();
    let waits: JointAction = state
        .terrain
        .demons
        .keys()
        .map(|pos| Action::wait(*pos))
        .collect();
    let next = apply_combination(&state, &waits, &OracleConfig::default()).unwrap();
    assert_eq!(next.terrain.demon_positions(), state.terrain.demon_positions());
    assert_eq!(next, state);
}

#[test]
fn test_prediction_is_deterministic() {
    let state = busy_board();
    let config = OracleConfig::default();
    let first = resolve_turn(&state, &config).unwrap();
    for _ in 0..3 {
        let again = resolve_turn(&state, &config).unwrap();
        assert_eq!(again.combinations, first.combinations);
        assert_eq!(again.states, first.states);
    }
}

#[test]
fn test_every_combination_moves_each_demon_once() {
    let state = busy_board();
    let prediction = resolve_turn(&state, &OracleConfig::default()).unwrap();
    let demons = state.terrain.demon_positions();

    assert!(!prediction.combinations.is_empty());
    for joint in &prediction.combinations {
        assert_eq!(joint.len(), demons.len());
        assert_eq!(joint.sources(), demons);
    }
    for next in &prediction.states {
        assert_eq!(next.terrain.demons.len(), demons.len());
    }
}

#[test]
fn test_predict_applies_player_move_first() {
    let mut previous = board(&[((0, 3), DemonKind::Footman), ((1, 0), DemonKind::Footman)]);
    previous.terrain.player = c(0, -1);
    let prediction = predict(
        &previous,
        &PlayerMove::Walk(c(0, 0)),
        &OracleConfig::default(),
    )
    .unwrap();

    // (1, 0) was not next to (0, -1), so the step does not stab it
    for next in &prediction.states {
        assert_eq!(next.terrain.player, c(0, 0));
        assert!(next.terrain.demons.contains_key(&c(1, 0)));
    }
    assert!(prediction
        .distinct_actions
        .contains(&Action::attack(c(1, 0))));
}

#[test]
fn test_overflow_is_reported_not_truncated() {
    let state = busy_board();
    let mut config = OracleConfig::default();
    config.engine.max_combinations = None;
    let full = resolve_turn(&state, &config).unwrap();
    assert!(full.combinations.len() > 2);

    config.engine.max_combinations = Some(2);
    match resolve_turn(&state, &config) {
        Err(OracleError::CombinationOverflow { limit, partial }) => {
            assert_eq!(limit, 2);
            assert_eq!(partial.combinations.len(), 2);
        }
        other => panic!("expected overflow, got {:?}", other.map(|p| p.combinations.len())),
    }
}
