//! Line tracing and line of sight
//!
//! Both walk the reverse table: tracing collects the offsets of the single
//! path from the origin to a goal, line of sight walks the same path over
//! live tiles and tests opacity along the way. Because the path is the one
//! the FoV flood itself follows, a positive sight check always agrees with
//! a computed field of view of sufficient radius.

use super::cache::SightCache;
use crate::geometry::Offset;
use crate::world::{TileId, TileMap};

/// Compute the straight-ish line of offsets from the origin to `goal`,
/// origin-exclusive and goal-inclusive.
///
/// The path is determined entirely by the cached table for the goal's
/// Chebyshev distance: calling again with the same goal yields the same
/// path. The goal being the origin yields an empty path.
pub fn trace(cache: &SightCache, goal: Offset) -> Vec<Offset> {
    if goal == Offset::ZERO {
        return Vec::new();
    }

    let table = cache.reverse_table(goal.chebyshev());
    let mut path = Vec::with_capacity(goal.chebyshev() as usize);
    let mut curr = goal;
    while curr != Offset::ZERO {
        path.push(curr);
        // the table covers the whole disc; treat a gap like reaching the
        // origin rather than walking forever
        curr = table.get(&curr).copied().unwrap_or(Offset::ZERO);
    }

    path.reverse();
    path
}

/// Whether an unobstructed line runs from `origin` to `goal`.
///
/// Walks the traced path via live adjacency, goal first, and fails on the
/// first non-transparent tile (the goal counts, the origin does not) or on
/// a missing link. A tile has line of sight to itself.
pub fn line_of_sight(map: &TileMap, cache: &SightCache, origin: TileId, goal: TileId) -> bool {
    if origin == goal {
        return true;
    }

    let mut curr = map.tile(goal).pos() - map.tile(origin).pos();
    let table = cache.reverse_table(curr.chebyshev());

    let mut tile = goal;
    while tile != origin {
        if !map.tile(tile).is_transparent() {
            return false;
        }
        let Some(&prev) = table.get(&curr) else {
            // off the table: the path cannot reach the origin
            return false;
        };
        let Some(next) = map.neighbor(tile, prev - curr) else {
            // the graph ends where the table does not: no line exists
            return false;
        };
        tile = next;
        curr = prev;
    }
    true
}
