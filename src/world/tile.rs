//! Tile definitions
//!
//! Arena cells and the terrain kinds they can hold.

use serde::{Deserialize, Serialize};

use crate::geometry::{Direction, Offset};

/// Stable handle to a tile inside a [`TileMap`](super::TileMap) arena.
///
/// Ids are plain indices: cheap to copy, hash and store, valid for the life
/// of the map that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub(crate) u32);

impl TileId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single cell in the map arena.
///
/// Adjacency is one slot per [`Direction`], `None` where the map simply
/// ends. Sight queries only ever read the kind's transparency and follow
/// these links.
#[derive(Debug, Clone)]
pub struct Tile {
    pub kind: TileType,
    pub(crate) pos: Offset,
    pub(crate) adjacent: [Option<TileId>; 8],
}

impl Tile {
    pub(crate) fn new(kind: TileType, pos: Offset) -> Self {
        Self {
            kind,
            pos,
            adjacent: [None; 8],
        }
    }

    /// Absolute position of this tile on its map.
    pub fn pos(&self) -> Offset {
        self.pos
    }

    /// The neighbor linked in the given direction, if any.
    pub fn adjacent(&self, dir: Direction) -> Option<TileId> {
        self.adjacent[dir.slot()]
    }

    /// Whether light and sight pass through this tile.
    pub fn is_transparent(&self) -> bool {
        self.kind.is_transparent()
    }

    /// Whether creatures can walk onto this tile.
    pub fn is_walkable(&self) -> bool {
        self.kind.is_walkable()
    }
}

/// Types of tiles in the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
    DoorOpen,
    DoorClosed,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor | TileType::DoorOpen)
    }

    pub fn is_transparent(&self) -> bool {
        !matches!(self, TileType::Wall | TileType::DoorClosed)
    }
}
