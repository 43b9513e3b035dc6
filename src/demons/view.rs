//! Per-turn read-only view of the board shared by all demon behaviors

use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::config::OracleConfig;
use crate::demons::actor::{Actor, ActorId, Archetype};
use crate::game::pathfinding::path_length;
use crate::game::{surface_neighbors, Terrain};
use crate::hex::HexCoord;

/// Path length used for cells with no route to the player
pub const UNREACHABLE: u32 = u32::MAX;

/// Snapshot of the post-player-move board for one turn of demon moves
///
/// Built once at turn start and dropped with the turn. Melee path lengths
/// are computed here up front so actors stay plain values.
pub struct TurnView<'a> {
    pub terrain: &'a Terrain,
    pub config: &'a OracleConfig,
    demons: BTreeSet<HexCoord>,
    features: BTreeSet<HexCoord>,
    secondary: BTreeSet<HexCoord>,
    path_lengths: AHashMap<ActorId, BTreeMap<HexCoord, u32>>,
}

impl<'a> TurnView<'a> {
    pub fn new(terrain: &'a Terrain, config: &'a OracleConfig, actors: &[Actor]) -> Self {
        let features = [terrain.altar, terrain.fleece, terrain.portal]
            .into_iter()
            .flatten()
            .collect();
        let secondary = [terrain.stairs, terrain.spear].into_iter().flatten().collect();

        let mut path_lengths = AHashMap::new();
        for actor in actors {
            if actor.archetype == Archetype::Melee {
                path_lengths.insert(actor.id, melee_path_lengths(terrain, actor.position));
            }
        }

        Self {
            terrain,
            config,
            demons: terrain.demon_positions(),
            features,
            secondary,
            path_lengths,
        }
    }

    pub fn player(&self) -> HexCoord {
        self.terrain.player
    }

    /// Every demon cell at turn start, `position` included
    pub fn demons(&self) -> &BTreeSet<HexCoord> {
        &self.demons
    }

    /// Demon cells other than `position`
    pub fn other_demons(&self, position: HexCoord) -> BTreeSet<HexCoord> {
        let mut others = self.demons.clone();
        others.remove(&position);
        others
    }

    /// Cells that stop projectiles and cannot be entered: other demons, altar, fleece, portal
    pub fn blockages(&self, position: HexCoord) -> BTreeSet<HexCoord> {
        let mut blockages = self.other_demons(position);
        blockages.extend(self.features.iter().copied());
        blockages
    }

    /// Stairs and spear: avoided unless nothing better is available
    pub fn secondary_obstacles(&self) -> &BTreeSet<HexCoord> {
        &self.secondary
    }

    /// Path lengths to the player from a melee actor's cell and its walkable neighbors
    pub fn path_lengths(&self, id: ActorId) -> Option<&BTreeMap<HexCoord, u32>> {
        self.path_lengths.get(&id)
    }
}

fn melee_path_lengths(terrain: &Terrain, position: HexCoord) -> BTreeMap<HexCoord, u32> {
    surface_neighbors(position)
        .filter(|cell| terrain.walkable(*cell))
        .chain(std::iter::once(position))
        .map(|cell| {
            let length = path_length(terrain, cell, terrain.player).unwrap_or(UNREACHABLE);
            (cell, length)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DemonKind, Tile};

    #[test]
    fn test_blockages_exclude_self_and_include_features() {
        let mut terrain = Terrain::new();
        terrain.demons.insert(HexCoord::new(1, 1), DemonKind::Archer);
        terrain.demons.insert(HexCoord::new(2, 0), DemonKind::Footman);
        terrain.altar = Some(HexCoord::new(-1, 0));
        terrain.spear = Some(HexCoord::new(0, 2));
        let config = OracleConfig::default();
        let view = TurnView::new(&terrain, &config, &[]);

        let blockages = view.blockages(HexCoord::new(1, 1));
        assert!(!blockages.contains(&HexCoord::new(1, 1)));
        assert!(blockages.contains(&HexCoord::new(2, 0)));
        assert!(blockages.contains(&HexCoord::new(-1, 0)));
        assert!(view.secondary_obstacles().contains(&HexCoord::new(0, 2)));
        assert!(view.secondary_obstacles().contains(&HexCoord::new(0, 4)));
    }

    #[test]
    fn test_melee_table_skips_magma_and_marks_unreachable() {
        let mut terrain = Terrain::new();
        terrain.player = HexCoord::new(0, 0);
        terrain.set_tile(HexCoord::new(0, 1), Tile::Magma);
        for cell in HexCoord::new(0, 0).neighbors() {
            terrain.set_tile(cell, Tile::Magma);
        }
        let actor = Actor::new(ActorId(0), HexCoord::new(0, 2), Archetype::Melee);
        terrain.demons.insert(actor.position, DemonKind::Footman);
        let config = OracleConfig::default();
        let view = TurnView::new(&terrain, &config, &[actor]);

        let table = view.path_lengths(ActorId(0)).unwrap();
        assert!(!table.contains_key(&HexCoord::new(0, 1)));
        assert_eq!(table.get(&HexCoord::new(0, 2)), Some(&UNREACHABLE));
    }
}
