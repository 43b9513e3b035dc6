//! The fixed hexagonal board
//!
//! 79 tiles: nine columns of heights 7..11..7. The canonical tile order
//! (column by column, bottom to top) is the order of the terrain text code.

use std::sync::OnceLock;

use crate::hex::HexCoord;

/// Number of tiles on the board
pub const BOARD_TILES: usize = 79;

const COLUMN_HEIGHTS: [i32; 9] = [7, 8, 9, 10, 11, 10, 9, 8, 7];

static SURFACE: OnceLock<Vec<HexCoord>> = OnceLock::new();

/// All board coordinates in canonical order
pub fn surface() -> &'static [HexCoord] {
    SURFACE.get_or_init(|| {
        let mut coords = Vec::with_capacity(BOARD_TILES);
        for (x, height) in (-4..=4).zip(COLUMN_HEIGHTS) {
            let start = if x >= 0 { -5 } else { -5 - x };
            for y in start..start + height {
                coords.push(HexCoord::new(x, y));
            }
        }
        coords
    })
}

/// Is the coordinate one of the board tiles?
pub fn on_surface(coord: HexCoord) -> bool {
    coord.x.abs() <= 4 && coord.y.abs() <= 5 && coord.z().abs() <= 5
}

/// Adjacent coordinates that are on the board
pub fn surface_neighbors(coord: HexCoord) -> impl Iterator<Item = HexCoord> {
    coord.neighbors().into_iter().filter(|c| on_surface(*c))
}
