//! Gloamsight - precomputed field-of-view and line-of-sight
//!
//! Sight over a grid of tiles linked by explicit adjacency, driven by
//! transition tables built once per visibility radius and reused for every
//! query: a stack flood for field of view, and the same tables reversed
//! for aiming lines and line-of-sight checks.

pub mod geometry;
pub mod sight;
pub mod world;

// Re-export commonly used types
pub use geometry::{Direction, Offset};
pub use sight::{
    compute_fov, compute_fov_shaped, line_of_sight, trace, FovMap, FovShape, SightCache,
};
pub use world::{MapError, TileId, TileMap, TileType};
