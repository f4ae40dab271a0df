//! Map data structure
//!
//! An arena of tiles addressed by stable ids, with explicit adjacency
//! links. The grid constructor wires the standard 8-way neighborhood;
//! `link`/`unlink` allow arbitrary topologies on top of it.

use thiserror::Error;

use super::tile::{Tile, TileId, TileType};
use crate::geometry::{Direction, Offset};

/// Errors arising from map construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("invalid map dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

/// A tile arena.
///
/// Tiles reference their neighbors by id rather than by pointer, so the
/// cyclic adjacency graph needs no shared ownership: the map owns every
/// tile, and sight queries borrow the whole arena read-only.
#[derive(Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Create a `width` x `height` grid filled with walls, with 8-way
    /// adjacency wired between all neighboring cells. Links are absent at
    /// the physical edges.
    pub fn new(width: i32, height: i32) -> Result<Self, MapError> {
        if width <= 0 || height <= 0 {
            return Err(MapError::InvalidDimensions { width, height });
        }

        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(TileType::Wall, Offset::new(x, y)));
            }
        }

        let mut map = Self {
            width,
            height,
            tiles,
        };
        map.wire_grid_adjacency();
        Ok(map)
    }

    fn wire_grid_adjacency(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.xy_to_idx(x, y);
                for dir in Direction::ALL {
                    let step = dir.offset();
                    let (nx, ny) = (x + step.x, y + step.y);
                    if self.in_bounds(nx, ny) {
                        let neighbor = TileId(self.xy_to_idx(nx, ny) as u32);
                        self.tiles[idx].adjacent[dir.slot()] = Some(neighbor);
                    }
                }
            }
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of tiles in the arena.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Get the id of the tile at the given coordinates.
    pub fn get(&self, x: i32, y: i32) -> Option<TileId> {
        if self.in_bounds(x, y) {
            Some(TileId(self.xy_to_idx(x, y) as u32))
        } else {
            None
        }
    }

    /// Borrow a tile by id.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this map. Stale and foreign ids
    /// are programming errors, not recoverable conditions.
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// Mutably borrow a tile by id.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this map.
    pub fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.index()]
    }

    /// Set tile type at position
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileType) {
        if let Some(id) = self.get(x, y) {
            self.tiles[id.index()].kind = kind;
        }
    }

    /// Follow the adjacency link matching a unit displacement.
    ///
    /// Returns `None` both for absent links (map edge) and for deltas that
    /// are not one of the eight unit directions.
    pub fn neighbor(&self, id: TileId, delta: Offset) -> Option<TileId> {
        let dir = Direction::from_offset(delta)?;
        self.tile(id).adjacent(dir)
    }

    /// Install a one-way adjacency link from `a` to `b` in direction `dir`,
    /// replacing whatever was in that slot. Call again with
    /// `dir.opposite()` swapped for a two-way link.
    pub fn link(&mut self, a: TileId, dir: Direction, b: TileId) {
        assert!(b.index() < self.tiles.len(), "link target not in this map");
        self.tiles[a.index()].adjacent[dir.slot()] = Some(b);
    }

    /// Remove the adjacency link from `a` in direction `dir`.
    pub fn unlink(&mut self, a: TileId, dir: Direction) {
        self.tiles[a.index()].adjacent[dir.slot()] = None;
    }

    /// Check if a position blocks line of sight
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, |id| !self.tile(id).is_transparent())
    }

    /// Check if a position is walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(false, |id| self.tile(id).is_walkable())
    }
}
