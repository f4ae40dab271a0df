//! Compass directions
//!
//! The eight unit directions a tile can link to a neighbor in. The
//! discriminant doubles as the adjacency slot index inside a tile.

use serde::{Deserialize, Serialize};

use super::Offset;

/// One of the eight compass directions.
///
/// Y grows downward, as on a terminal grid, so `North` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions, in slot order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The unit offset this direction steps by.
    pub fn offset(self) -> Offset {
        match self {
            Direction::North => Offset::new(0, -1),
            Direction::NorthEast => Offset::new(1, -1),
            Direction::East => Offset::new(1, 0),
            Direction::SouthEast => Offset::new(1, 1),
            Direction::South => Offset::new(0, 1),
            Direction::SouthWest => Offset::new(-1, 1),
            Direction::West => Offset::new(-1, 0),
            Direction::NorthWest => Offset::new(-1, -1),
        }
    }

    /// Convert a unit displacement back into a direction.
    ///
    /// Returns `None` for the zero offset and for anything longer than one
    /// step.
    pub fn from_offset(offset: Offset) -> Option<Direction> {
        match (offset.x, offset.y) {
            (0, -1) => Some(Direction::North),
            (1, -1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, 1) => Some(Direction::SouthEast),
            (0, 1) => Some(Direction::South),
            (-1, 1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, -1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    /// The direction pointing the opposite way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// The adjacency slot this direction occupies.
    #[inline]
    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}
