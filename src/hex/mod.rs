//! Hex geometry - coordinates, radius-seeking tables and shooting lines

pub mod coord;
pub mod sectors;
pub mod sight;

pub use coord::{HexCoord, HexDirection};
pub use sectors::{RadiusStep, Sector};
pub use sight::{interior_cells, is_extended_line_blocked, is_line_blocked, trailing_cells};
