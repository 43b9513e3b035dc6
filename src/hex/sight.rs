//! Straight-line shooting predicates
//!
//! Projectiles only travel along the three straight axes. A shot is blocked
//! by anything standing strictly between shooter and target.

use std::collections::BTreeSet;

use crate::hex::coord::HexCoord;

/// Cells strictly between `source` and `target` on their shared line
///
/// Empty when the cells are not collinear or are adjacent.
pub fn interior_cells(source: HexCoord, target: HexCoord) -> Vec<HexCoord> {
    let Some(direction) = source.direction_to(&target) else {
        return Vec::new();
    };
    let step = direction.offset();
    (1..source.distance(&target) as i32)
        .map(|i| source + step * i)
        .collect()
}

/// Cells past `target` on the line from `source`, up to `reach` from the source
pub fn trailing_cells(source: HexCoord, target: HexCoord, reach: u32) -> Vec<HexCoord> {
    let Some(direction) = source.direction_to(&target) else {
        return Vec::new();
    };
    let step = direction.offset();
    (source.distance(&target) as i32 + 1..=reach as i32)
        .map(|i| source + step * i)
        .collect()
}

/// Is the straight line from `source` to `target` obstructed?
///
/// Only meaningful when the cells are collinear; otherwise reports `false`.
pub fn is_line_blocked(
    source: HexCoord,
    target: HexCoord,
    obstacles: &BTreeSet<HexCoord>,
) -> bool {
    interior_cells(source, target)
        .iter()
        .any(|cell| obstacles.contains(cell))
}

/// Line check for a bolt that keeps travelling past the target
///
/// Blocked if the interior holds an obstacle, or if one of `threats` stands
/// on the line past the target within `reach` of the source.
pub fn is_extended_line_blocked(
    source: HexCoord,
    target: HexCoord,
    obstacles: &BTreeSet<HexCoord>,
    threats: &BTreeSet<HexCoord>,
    reach: u32,
) -> bool {
    is_line_blocked(source, target, obstacles)
        || trailing_cells(source, target, reach)
            .iter()
            .any(|cell| threats.contains(cell))
}
