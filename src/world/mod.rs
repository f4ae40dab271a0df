//! World module
//!
//! The tile arena sight queries run against: tiles, their terrain kinds,
//! and the explicit adjacency graph connecting them.

pub mod map;
pub mod tile;

pub use map::{MapError, TileMap};
pub use tile::{Tile, TileId, TileType};
