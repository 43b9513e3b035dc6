//! Full game state: level depth, terrain and player status

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::config::OracleConfig;
use crate::core::error::{OracleError, Result};
use crate::game::board::surface_neighbors;
use crate::game::demon::DemonKind;
use crate::game::status::Status;
use crate::game::terrain::Terrain;
use crate::hex::{is_extended_line_blocked, is_line_blocked, HexCoord};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub depth: u32,
    pub terrain: Terrain,
    pub status: Status,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            depth: 1,
            terrain: Terrain::new(),
            status: Status::default(),
        }
    }
}

impl GameState {
    pub fn new(depth: u32, terrain: Terrain, status: Status) -> Self {
        Self {
            depth,
            terrain,
            status,
        }
    }

    /// Decode `depth;terrain;status`
    pub fn from_code(code: &str) -> Result<Self> {
        let parts: Vec<&str> = code.trim().split(';').collect();
        let [depth, terrain, status] = parts.as_slice() else {
            return Err(OracleError::MalformedState(format!(
                "expected depth;terrain;status, got '{}'",
                code
            )));
        };
        let depth = depth
            .parse::<u32>()
            .map_err(|_| OracleError::MalformedState(format!("bad depth '{}'", depth)))?;
        Ok(Self {
            depth,
            terrain: Terrain::from_code(terrain)?,
            status: Status::from_code(status)?,
        })
    }

    pub fn to_code(&self) -> String {
        format!(
            "{};{};{}",
            self.depth,
            self.terrain.to_code(),
            self.status.to_code()
        )
    }

    /// Resolve the damage step: bombs explode, then demons strike the player
    ///
    /// Returns the damage dealt to the player.
    pub fn apply_damages(&mut self, config: &OracleConfig) -> u32 {
        let mut damage = 0;

        let bombs = std::mem::take(&mut self.terrain.bombs);
        for bomb in bombs {
            for neighbor in surface_neighbors(bomb) {
                if neighbor == self.terrain.player {
                    tracing::debug!("Bomb at {} hits the player", bomb);
                    damage += 1;
                } else if let Some(demon) = self.terrain.demons.remove(&neighbor) {
                    tracing::debug!("Bomb at {} kills {} at {}", bomb, demon, neighbor);
                }
            }
        }

        let strikers: Vec<(HexCoord, DemonKind)> = self
            .terrain
            .demons
            .iter()
            .filter(|(pos, kind)| hits_player(**pos, **kind, &self.terrain, config))
            .map(|(pos, kind)| (*pos, *kind))
            .collect();
        for (pos, kind) in &strikers {
            tracing::debug!("{} at {} hits the player", kind, pos);
        }
        damage += strikers.len() as u32;

        self.status.deal_damage(damage);
        damage
    }
}

/// Would this demon hit the player from where it stands?
pub fn hits_player(pos: HexCoord, kind: DemonKind, terrain: &Terrain, config: &OracleConfig) -> bool {
    let player = terrain.player;
    let distance = pos.distance(&player);
    let mut obstacles: BTreeSet<HexCoord> = terrain.demon_positions();
    obstacles.remove(&pos);
    let others = obstacles.clone();
    obstacles.extend(terrain.altar);

    match kind {
        DemonKind::Footman => distance == 1,
        DemonKind::Archer => {
            pos.is_collinear(&player)
                && (config.archer.min_range..=config.archer.max_range).contains(&distance)
                && !is_line_blocked(pos, player, &obstacles)
        }
        DemonKind::Wizard { charged } => {
            charged
                && pos.is_collinear(&player)
                && (1..=config.wizard.max_range).contains(&distance)
                && !is_extended_line_blocked(
                    pos,
                    player,
                    &obstacles,
                    &others,
                    config.wizard.bolt_reach,
                )
        }
        DemonKind::Demolitionist { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(demons: &[((i32, i32), DemonKind)], player: (i32, i32)) -> GameState {
        let mut state = GameState::default();
        state.terrain.player = HexCoord::new(player.0, player.1);
        for ((x, y), kind) in demons {
            state.terrain.demons.insert(HexCoord::new(*x, *y), *kind);
        }
        state
    }

    #[test]
    fn test_code_round_trip() {
        let state = state_with(&[((1, 1), DemonKind::Archer)], (0, 0));
        let decoded = GameState::from_code(&state.to_code()).unwrap();
        assert_eq!(decoded.terrain.demons, state.terrain.demons);
        assert_eq!(decoded.terrain.player, state.terrain.player);
        assert_eq!(decoded.depth, 1);
    }

    #[test]
    fn test_bad_code_rejected() {
        assert!(GameState::from_code("1;000").is_err());
        assert!(GameState::from_code("x;;").is_err());
    }

    #[test]
    fn test_archer_in_line_hits() {
        let config = OracleConfig::default();
        let mut state = state_with(&[((0, 3), DemonKind::Archer)], (0, 0));
        assert_eq!(state.apply_damages(&config), 1);
        assert_eq!(state.status.health, 2);
    }

    #[test]
    fn test_archer_too_close_misses() {
        let config = OracleConfig::default();
        let mut state = state_with(&[((0, 1), DemonKind::Archer)], (0, 0));
        assert_eq!(state.apply_damages(&config), 0);
    }

    #[test]
    fn test_wizard_holds_fire_with_demon_behind_player() {
        let config = OracleConfig::default();
        let wizard = DemonKind::Wizard { charged: true };
        let mut clear = state_with(&[((0, 2), wizard)], (0, 0));
        assert_eq!(clear.apply_damages(&config), 1);

        let mut crowded = state_with(&[((0, 2), wizard), ((0, -2), DemonKind::Archer)], (0, 0));
        assert!(!hits_player(HexCoord::new(0, 2), wizard, &crowded.terrain, &config));
        // The archer behind the player still shoots
        assert_eq!(crowded.apply_damages(&config), 1);
    }

    #[test]
    fn test_bomb_kills_adjacent_demons_and_hurts_player() {
        let config = OracleConfig::default();
        let mut state = state_with(&[((2, 0), DemonKind::Archer)], (0, 0));
        state.terrain.bombs.insert(HexCoord::new(1, 0));

        let damage = state.apply_damages(&config);
        assert_eq!(damage, 1);
        assert!(state.terrain.demons.is_empty());
        assert!(state.terrain.bombs.is_empty());
    }
}
