//! Hoplite board model: terrain, player status, demons and player moves

pub mod board;
pub mod demon;
pub mod moves;
pub mod pathfinding;
pub mod state;
pub mod status;
pub mod terrain;

pub use board::{on_surface, surface, surface_neighbors, BOARD_TILES};
pub use demon::DemonKind;
pub use moves::PlayerMove;
pub use pathfinding::{find_path, path_length};
pub use state::{hits_player, GameState};
pub use status::{Prayer, Status};
pub use terrain::{Terrain, Tile};
