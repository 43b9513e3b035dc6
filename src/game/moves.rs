//! Player moves and how they change the board before demons react

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, i32 as integer, multispace0};
use nom::combinator::{all_consuming, opt, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::core::config::OracleConfig;
use crate::core::error::{OracleError, Result};
use crate::game::board::{on_surface, surface_neighbors};
use crate::game::state::GameState;
use crate::game::status::{Prayer, LEAP_ENERGY};
use crate::game::terrain::Tile;
use crate::hex::HexCoord;

/// A move performed by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerMove {
    Walk(HexCoord),
    Leap(HexCoord),
    Throw(HexCoord),
    Bash(HexCoord),
    Idle,
    Altar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveName {
    Walk,
    Leap,
    Throw,
    Bash,
    Idle,
    Altar,
}

fn move_name(input: &str) -> IResult<&str, MoveName> {
    alt((
        value(MoveName::Walk, tag("WalkMove")),
        value(MoveName::Leap, tag("LeapMove")),
        value(MoveName::Throw, tag("ThrowMove")),
        value(MoveName::Bash, tag("BashMove")),
        value(MoveName::Idle, tag("IdleMove")),
        value(MoveName::Altar, tag("AltarMove")),
    ))
    .parse(input)
}

fn components(input: &str) -> IResult<&str, Vec<i32>> {
    delimited(
        (char('('), multispace0),
        separated_list1((multispace0, char(','), multispace0), integer),
        (multispace0, char(')')),
    )
    .parse(input)
}

impl PlayerMove {
    /// Parse the recorded form, e.g. `WalkMove(1, -2, 1)` or `IdleMove`
    pub fn parse(text: &str) -> Result<Self> {
        let malformed = |reason: String| OracleError::MalformedMove(format!("'{}': {}", text, reason));

        let (_, (name, components)) =
            all_consuming((move_name, opt(preceded(multispace0, components))))
                .parse(text.trim())
                .map_err(|e| malformed(e.to_string()))?;

        let target = match components.as_deref() {
            None => None,
            Some([x, y]) => Some(HexCoord::new(*x, *y)),
            Some([x, y, z]) => Some(HexCoord::try_from_cube(*x, *y, *z)?),
            Some(other) => return Err(malformed(format!("{} coordinate components", other.len()))),
        };

        match (name, target) {
            (MoveName::Walk, Some(t)) => Ok(PlayerMove::Walk(t)),
            (MoveName::Leap, Some(t)) => Ok(PlayerMove::Leap(t)),
            (MoveName::Throw, Some(t)) => Ok(PlayerMove::Throw(t)),
            (MoveName::Bash, Some(t)) => Ok(PlayerMove::Bash(t)),
            (MoveName::Idle, None) => Ok(PlayerMove::Idle),
            (MoveName::Altar, None) => Ok(PlayerMove::Altar),
            (_, Some(_)) => Err(malformed("move takes no target".into())),
            (_, None) => Err(malformed("missing target".into())),
        }
    }

    pub fn target(&self) -> Option<HexCoord> {
        match self {
            PlayerMove::Walk(t) | PlayerMove::Leap(t) | PlayerMove::Throw(t) | PlayerMove::Bash(t) => {
                Some(*t)
            }
            PlayerMove::Idle | PlayerMove::Altar => None,
        }
    }

    pub fn is_walk(&self) -> bool {
        matches!(self, PlayerMove::Walk(_))
    }

    /// Perform the move on a copy of `prev`, then resolve the damage step
    ///
    /// Demon movement is not part of this; see the resolution engine.
    pub fn apply(&self, prev: &GameState, config: &OracleConfig) -> Result<GameState> {
        if let Some(target) = self.target() {
            if !on_surface(target) {
                return Err(OracleError::NotOnSurface(target));
            }
        }

        let mut next = prev.clone();
        match *self {
            PlayerMove::Walk(target) => {
                relocate_player(&mut next, target);
                stab(prev, &mut next);
                lunge(prev, &mut next);
            }
            PlayerMove::Leap(target) => {
                relocate_player(&mut next, target);
                next.status.energy = next.status.energy.saturating_sub(LEAP_ENERGY);
                stab(prev, &mut next);
                lunge(prev, &mut next);
            }
            PlayerMove::Throw(target) => {
                if let Some(demon) = next.terrain.demons.remove(&target) {
                    tracing::debug!("Spear kills {} at {}", demon, target);
                }
                next.status.spear = false;
                next.terrain.spear = Some(target);
            }
            PlayerMove::Bash(target) => bash(prev, &mut next, target),
            PlayerMove::Idle => {}
            PlayerMove::Altar => next.terrain.altar_prayable = false,
        }
        next.apply_damages(config);
        Ok(next)
    }
}

impl fmt::Display for PlayerMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerMove::Walk(t) => write!(f, "WalkMove{}", t),
            PlayerMove::Leap(t) => write!(f, "LeapMove{}", t),
            PlayerMove::Throw(t) => write!(f, "ThrowMove{}", t),
            PlayerMove::Bash(t) => write!(f, "BashMove{}", t),
            PlayerMove::Idle => f.write_str("IdleMove"),
            PlayerMove::Altar => f.write_str("AltarMove"),
        }
    }
}

fn relocate_player(next: &mut GameState, target: HexCoord) {
    next.terrain.player = target;
    if next.terrain.spear == Some(target) {
        next.status.spear = true;
        next.terrain.spear = None;
    }
}

/// Demons adjacent to both the old and the new player cell die
fn stab(prev: &GameState, next: &mut GameState) {
    let before: BTreeSet<HexCoord> = surface_neighbors(prev.terrain.player).collect();
    for cell in surface_neighbors(next.terrain.player) {
        if before.contains(&cell) && prev.terrain.demons.contains_key(&cell) {
            if let Some(demon) = next.terrain.demons.remove(&cell) {
                tracing::debug!("Stab kills {} at {}", demon, cell);
            }
        }
    }
}

/// With the spear in hand, the demon one step further along the move dies
fn lunge(prev: &GameState, next: &mut GameState) {
    if !prev.status.spear {
        return;
    }
    let Some(direction) = prev.terrain.player.direction_to(&next.terrain.player) else {
        return;
    };
    let cell = next.terrain.player + direction.offset();
    if let Some(demon) = next.terrain.demons.remove(&cell) {
        tracing::debug!("Lunge kills {} at {}", demon, cell);
    }
}

/// Push whatever stands on the bashed cells away from the player
fn bash(prev: &GameState, next: &mut GameState, target: HexCoord) {
    let player = prev.terrain.player;
    let bashed: Vec<HexCoord> = if prev.status.has_prayer(Prayer::SpinningBash) {
        surface_neighbors(player).collect()
    } else if prev.status.has_prayer(Prayer::SweepingBash) {
        let back = player - target;
        vec![target, target + back.rotate(1), target + back.rotate(-1)]
    } else {
        vec![target]
    };

    let knockback = next.status.knockback_distance();
    for from in bashed {
        let Some(direction) = next.terrain.player.direction_to(&from) else {
            continue;
        };
        let to = from + direction.offset() * knockback;

        if prev.terrain.demons.contains_key(&from) {
            let Some(demon) = next.terrain.demons.remove(&from) else {
                continue;
            };
            if next.terrain.surface.get(&to).map_or(true, |tile| *tile == Tile::Magma) {
                tracing::debug!("Bash pushes {} from {} to its death at {}", demon, from, to);
            } else {
                next.terrain.demons.insert(to, demon);
            }
        } else if prev.terrain.bombs.contains(&from) {
            next.terrain.bombs.remove(&from);
            next.terrain.bombs.insert(to);
        }
    }
    next.status.cooldown = next.status.bash_cooldown();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::demon::DemonKind;

    fn state(player: (i32, i32), demons: &[((i32, i32), DemonKind)]) -> GameState {
        let mut state = GameState::default();
        state.terrain.player = HexCoord::new(player.0, player.1);
        for ((x, y), kind) in demons {
            state.terrain.demons.insert(HexCoord::new(*x, *y), *kind);
        }
        state
    }

    #[test]
    fn test_parse_cube_and_axial_forms() {
        assert_eq!(
            PlayerMove::parse("WalkMove(1, -2, 1)").unwrap(),
            PlayerMove::Walk(HexCoord::new(1, -2))
        );
        assert_eq!(
            PlayerMove::parse(" LeapMove(0,3) ").unwrap(),
            PlayerMove::Leap(HexCoord::new(0, 3))
        );
        assert_eq!(PlayerMove::parse("IdleMove").unwrap(), PlayerMove::Idle);
    }

    #[test]
    fn test_parse_rejects_bad_moves() {
        assert!(PlayerMove::parse("SwimMove(1, 0)").is_err());
        assert!(PlayerMove::parse("WalkMove").is_err());
        assert!(PlayerMove::parse("IdleMove(1, 0)").is_err());
        assert!(matches!(
            PlayerMove::parse("WalkMove(1, 1, 1)"),
            Err(OracleError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_display_parses_back() {
        let mv = PlayerMove::Bash(HexCoord::new(-1, 2));
        assert_eq!(PlayerMove::parse(&mv.to_string()).unwrap(), mv);
    }

    #[test]
    fn test_walk_stabs_shared_neighbors() {
        let config = OracleConfig::default();
        // (1, -1) neighbors both (0, 0) and (1, 0)
        let prev = state((0, 0), &[((1, -1), DemonKind::Footman), ((-1, 0), DemonKind::Footman)]);
        let next = PlayerMove::Walk(HexCoord::new(1, 0)).apply(&prev, &config).unwrap();

        assert_eq!(next.terrain.player, HexCoord::new(1, 0));
        assert!(!next.terrain.demons.contains_key(&HexCoord::new(1, -1)));
        assert!(next.terrain.demons.contains_key(&HexCoord::new(-1, 0)));
    }

    #[test]
    fn test_walk_lunges_with_spear() {
        let config = OracleConfig::default();
        let prev = state((0, 0), &[((0, 2), DemonKind::Archer)]);
        let next = PlayerMove::Walk(HexCoord::new(0, 1)).apply(&prev, &config).unwrap();
        assert!(next.terrain.demons.is_empty());

        let mut unarmed = prev.clone();
        unarmed.status.spear = false;
        let next = PlayerMove::Walk(HexCoord::new(0, 1)).apply(&unarmed, &config).unwrap();
        assert_eq!(next.terrain.demons.len(), 1);
    }

    #[test]
    fn test_walk_picks_up_spear() {
        let config = OracleConfig::default();
        let mut prev = state((0, 0), &[]);
        prev.status.spear = false;
        prev.terrain.spear = Some(HexCoord::new(1, 0));
        let next = PlayerMove::Walk(HexCoord::new(1, 0)).apply(&prev, &config).unwrap();
        assert!(next.status.spear);
        assert_eq!(next.terrain.spear, None);
    }

    #[test]
    fn test_bash_into_magma_kills() {
        let config = OracleConfig::default();
        let mut prev = state((0, 0), &[((1, 0), DemonKind::Footman)]);
        prev.terrain.set_tile(HexCoord::new(2, 0), Tile::Magma);
        let next = PlayerMove::Bash(HexCoord::new(1, 0)).apply(&prev, &config).unwrap();
        assert!(next.terrain.demons.is_empty());
        assert_eq!(next.status.cooldown, 4);
    }

    #[test]
    fn test_bash_pushes_demon() {
        let config = OracleConfig::default();
        let prev = state((0, 0), &[((0, 1), DemonKind::Footman)]);
        let next = PlayerMove::Bash(HexCoord::new(0, 1)).apply(&prev, &config).unwrap();
        assert_eq!(next.terrain.demons.get(&HexCoord::new(0, 2)), Some(&DemonKind::Footman));
    }

    #[test]
    fn test_off_board_target_rejected() {
        let config = OracleConfig::default();
        let prev = state((0, 0), &[]);
        assert!(matches!(
            PlayerMove::Walk(HexCoord::new(7, 0)).apply(&prev, &config),
            Err(OracleError::NotOnSurface(_))
        ));
    }
}
