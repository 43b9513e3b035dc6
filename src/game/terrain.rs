//! Terrain of one board: tiles, demons and single-cell features

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::{OracleError, Result};
use crate::game::board::{surface, BOARD_TILES};
use crate::game::demon::DemonKind;
use crate::hex::HexCoord;

/// Ground composition of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Ground,
    Magma,
}

/// Logical representation of the board contents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Terrain {
    pub player: HexCoord,
    pub surface: BTreeMap<HexCoord, Tile>,
    pub demons: BTreeMap<HexCoord, DemonKind>,
    pub bombs: BTreeSet<HexCoord>,
    pub spear: Option<HexCoord>,
    pub altar: Option<HexCoord>,
    pub altar_prayable: bool,
    pub fleece: Option<HexCoord>,
    pub portal: Option<HexCoord>,
    pub stairs: Option<HexCoord>,
}

impl Default for Terrain {
    fn default() -> Self {
        Self::new()
    }
}

impl Terrain {
    /// All-ground board with the player and stairs at their level-start cells
    pub fn new() -> Self {
        Self {
            player: HexCoord::new(0, -4),
            surface: surface().iter().map(|c| (*c, Tile::Ground)).collect(),
            demons: BTreeMap::new(),
            bombs: BTreeSet::new(),
            spear: None,
            altar: None,
            altar_prayable: false,
            fleece: None,
            portal: None,
            stairs: Some(HexCoord::new(0, 4)),
        }
    }

    /// Can something stand on this cell? (Ground tile on the board)
    pub fn walkable(&self, coord: HexCoord) -> bool {
        self.surface.get(&coord) == Some(&Tile::Ground)
    }

    pub fn set_tile(&mut self, coord: HexCoord, tile: Tile) {
        self.surface.insert(coord, tile);
    }

    pub fn demon_positions(&self) -> BTreeSet<HexCoord> {
        self.demons.keys().copied().collect()
    }

    /// Demon kind names by cell, ignoring charge and cooldown
    pub fn demon_layout(&self) -> BTreeMap<HexCoord, &'static str> {
        self.demons
            .iter()
            .map(|(pos, kind)| (*pos, kind.name()))
            .collect()
    }

    /// Decode the 79-symbol hexadecimal terrain code
    pub fn from_code(code: &str) -> Result<Self> {
        let symbols: Vec<char> = code.trim().chars().collect();
        if symbols.len() != BOARD_TILES {
            return Err(OracleError::MalformedState(format!(
                "terrain code has {} symbols, expected {}",
                symbols.len(),
                BOARD_TILES
            )));
        }

        let mut terrain = Terrain::new();
        terrain.stairs = None;
        for (&pos, &symbol) in surface().iter().zip(symbols.iter()) {
            terrain.surface.insert(pos, Tile::Ground);
            match symbol {
                '0' => {}
                '1' => {
                    terrain.surface.insert(pos, Tile::Magma);
                }
                '2' => {
                    terrain.demons.insert(pos, DemonKind::Footman);
                }
                '3' => {
                    terrain.demons.insert(pos, DemonKind::Archer);
                }
                '4' => {
                    terrain.demons.insert(pos, DemonKind::Demolitionist { cooldown: 0 });
                }
                '5' => {
                    terrain.demons.insert(pos, DemonKind::Demolitionist { cooldown: 1 });
                }
                '6' => {
                    terrain.demons.insert(pos, DemonKind::Wizard { charged: true });
                }
                '7' => {
                    terrain.demons.insert(pos, DemonKind::Wizard { charged: false });
                }
                '8' => terrain.spear = Some(pos),
                '9' => {
                    terrain.bombs.insert(pos);
                }
                'a' => terrain.player = pos,
                'b' => terrain.stairs = Some(pos),
                'c' | 'd' => {
                    terrain.altar = Some(pos);
                    terrain.altar_prayable = symbol == 'c';
                }
                'e' => terrain.fleece = Some(pos),
                'f' => terrain.portal = Some(pos),
                other => {
                    return Err(OracleError::UnknownArchetype(format!(
                        "terrain symbol '{}' at {}",
                        other, pos
                    )))
                }
            }
        }
        Ok(terrain)
    }

    /// Encode as the 79-symbol hexadecimal terrain code
    pub fn to_code(&self) -> String {
        surface().iter().map(|pos| self.symbol_at(*pos)).collect()
    }

    fn symbol_at(&self, pos: HexCoord) -> char {
        if pos == self.player {
            'a'
        } else if Some(pos) == self.spear {
            '8'
        } else if Some(pos) == self.altar {
            if self.altar_prayable {
                'c'
            } else {
                'd'
            }
        } else if Some(pos) == self.fleece {
            'e'
        } else if Some(pos) == self.portal {
            'f'
        } else if self.bombs.contains(&pos) {
            '9'
        } else if Some(pos) == self.stairs {
            'b'
        } else if let Some(demon) = self.demons.get(&pos) {
            match demon {
                DemonKind::Footman => '2',
                DemonKind::Archer => '3',
                DemonKind::Demolitionist { cooldown: 0 } => '4',
                DemonKind::Demolitionist { .. } => '5',
                DemonKind::Wizard { charged: true } => '6',
                DemonKind::Wizard { charged: false } => '7',
            }
        } else if self.surface.get(&pos) == Some(&Tile::Magma) {
            '1'
        } else {
            '0'
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_code() -> Vec<char> {
        vec!['0'; BOARD_TILES]
    }

    #[test]
    fn test_decode_places_entities() {
        let mut code = blank_code();
        code[0] = 'a';
        code[1] = '3';
        code[2] = '1';
        code[3] = '5';
        code[78] = 'b';
        let terrain = Terrain::from_code(&code.iter().collect::<String>()).unwrap();

        assert_eq!(terrain.player, surface()[0]);
        assert_eq!(terrain.demons.get(&surface()[1]), Some(&DemonKind::Archer));
        assert!(!terrain.walkable(surface()[2]));
        assert_eq!(
            terrain.demons.get(&surface()[3]),
            Some(&DemonKind::Demolitionist { cooldown: 1 })
        );
        assert_eq!(terrain.stairs, Some(surface()[78]));
    }

    #[test]
    fn test_encode_is_inverse_of_decode() {
        let mut code = blank_code();
        code[10] = 'a';
        code[20] = '6';
        code[21] = '7';
        code[30] = 'c';
        code[40] = '9';
        code[50] = '1';
        code[60] = 'e';
        let code: String = code.into_iter().collect();
        assert_eq!(Terrain::from_code(&code).unwrap().to_code(), code);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            Terrain::from_code("000"),
            Err(OracleError::MalformedState(_))
        ));
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let mut code = blank_code();
        code[5] = 'z';
        assert!(matches!(
            Terrain::from_code(&code.iter().collect::<String>()),
            Err(OracleError::UnknownArchetype(_))
        ));
    }

    #[test]
    fn test_magma_and_off_board_not_walkable() {
        let mut terrain = Terrain::new();
        terrain.set_tile(HexCoord::new(1, 1), Tile::Magma);
        assert!(!terrain.walkable(HexCoord::new(1, 1)));
        assert!(!terrain.walkable(HexCoord::new(9, 0)));
        assert!(terrain.walkable(HexCoord::new(0, 0)));
    }
}
