//! A* pathfinding over walkable board tiles
//!
//! Every step costs 1. Demons do not block paths; only the ground does.

use ahash::AHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::game::board::surface_neighbors;
use crate::game::terrain::Terrain;
use crate::hex::HexCoord;

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode {
    coord: HexCoord,
    f_cost: u32, // g_cost + heuristic
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord && self.f_cost == other.f_cost
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap, ties broken by coordinate for determinism
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest path using A*
///
/// Returns None if no path exists. The path includes both `start` and `goal`.
pub fn find_path(terrain: &Terrain, start: HexCoord, goal: HexCoord) -> Option<Vec<HexCoord>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<HexCoord, HexCoord> = AHashMap::new();
    let mut g_scores: AHashMap<HexCoord, u32> = AHashMap::new();

    g_scores.insert(start, 0);
    open_set.push(PathNode {
        coord: start,
        f_cost: start.distance(&goal),
    });

    while let Some(current) = open_set.pop() {
        if current.coord == goal {
            return Some(reconstruct_path(&came_from, current.coord));
        }

        let current_g = *g_scores.get(&current.coord).unwrap_or(&u32::MAX);
        // Stale heap entry for a node already expanded with a better score
        if current.f_cost > current_g.saturating_add(current.coord.distance(&goal)) {
            continue;
        }

        for neighbor in surface_neighbors(current.coord) {
            if !terrain.walkable(neighbor) {
                continue;
            }

            let tentative_g = current_g + 1;
            let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&u32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.coord);
                g_scores.insert(neighbor, tentative_g);

                open_set.push(PathNode {
                    coord: neighbor,
                    f_cost: tentative_g + neighbor.distance(&goal),
                });
            }
        }
    }

    None // No path found
}

/// Reconstruct path from came_from map
fn reconstruct_path(
    came_from: &AHashMap<HexCoord, HexCoord>,
    mut current: HexCoord,
) -> Vec<HexCoord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Number of steps on a shortest path, None if unreachable
pub fn path_length(terrain: &Terrain, start: HexCoord, goal: HexCoord) -> Option<u32> {
    find_path(terrain, start, goal).map(|path| path.len() as u32 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::terrain::Tile;

    #[test]
    fn test_pathfind_straight_line() {
        let terrain = Terrain::new();
        let start = HexCoord::new(0, -3);
        let goal = HexCoord::new(0, 2);

        let path = find_path(&terrain, start, goal).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn test_pathfind_around_magma() {
        let mut terrain = Terrain::new();
        terrain.set_tile(HexCoord::new(0, 0), Tile::Magma);
        terrain.set_tile(HexCoord::new(1, -1), Tile::Magma);

        let start = HexCoord::new(0, -1);
        let goal = HexCoord::new(0, 1);

        let path = find_path(&terrain, start, goal).unwrap();
        assert!(!path.contains(&HexCoord::new(0, 0)));
        assert_eq!(path_length(&terrain, start, goal), Some(3));
    }

    #[test]
    fn test_pathfind_no_path() {
        let mut terrain = Terrain::new();
        let goal = HexCoord::new(0, 0);
        for neighbor in goal.neighbors() {
            terrain.set_tile(neighbor, Tile::Magma);
        }

        assert!(find_path(&terrain, HexCoord::new(3, -3), goal).is_none());
        assert_eq!(path_length(&terrain, HexCoord::new(3, -3), goal), None);
    }

    #[test]
    fn test_pathfind_same_start_goal() {
        let terrain = Terrain::new();
        let start = HexCoord::new(2, 2);
        assert_eq!(find_path(&terrain, start, start), Some(vec![start]));
        assert_eq!(path_length(&terrain, start, start), Some(0));
    }

    #[test]
    fn test_demons_do_not_block() {
        let mut terrain = Terrain::new();
        terrain.demons.insert(HexCoord::new(0, 0), crate::game::DemonKind::Footman);
        assert_eq!(path_length(&terrain, HexCoord::new(0, -1), HexCoord::new(0, 1)), Some(2));
    }
}
