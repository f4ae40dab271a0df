//! Field of view
//!
//! Walks the precomputed directional table with an explicit stack,
//! resolving each table edge through the live adjacency of the tile
//! already reached, then patches the cardinal wall artifacts the mirrored
//! octants leave behind.

use std::collections::HashMap;

use super::cache::SightCache;
use crate::geometry::Offset;
use crate::world::{TileId, TileMap};

/// A computed field of view, relative to the query origin.
///
/// Keys are offsets covered by the table; a `None` value records an offset
/// the table reaches where the map has no tile, which is exactly how the
/// view shows the map ending.
pub type FovMap = HashMap<Offset, Option<TileId>>;

/// The boundary shape of a computed field of view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FovShape {
    /// Chebyshev square, the table's native shape.
    #[default]
    Square,
    /// The square clipped to a Euclidean circle.
    Circle,
}

const CARDINALS: [Offset; 4] = [
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(0, 1),
    Offset::new(0, -1),
];

/// Compute the field of view from `origin` out to `radius`.
///
/// Opaque tiles appear in the result (they are seen) but sight never
/// spreads onward through them. Offsets past the physical edge of the map
/// are recorded as `None`.
///
/// # Panics
///
/// Panics if `radius < 1`.
pub fn compute_fov(map: &TileMap, cache: &SightCache, origin: TileId, radius: i32) -> FovMap {
    compute_fov_shaped(map, cache, origin, radius, FovShape::Square)
}

/// [`compute_fov`] with an explicit boundary shape.
///
/// # Panics
///
/// Panics if `radius < 1`.
pub fn compute_fov_shaped(
    map: &TileMap,
    cache: &SightCache,
    origin: TileId,
    radius: i32,
    shape: FovShape,
) -> FovMap {
    assert!(radius >= 1, "fov radius must be positive");
    let table = cache.table(radius);

    let mut fov = FovMap::new();
    fov.insert(Offset::ZERO, Some(origin));
    let mut stack = vec![Offset::ZERO];

    while let Some(off) = stack.pop() {
        // the tile recorded at this offset; a later edge may have
        // overwritten it with an absent neighbor, in which case there is
        // nothing to expand from
        let Some(&Some(tile)) = fov.get(&off) else {
            continue;
        };
        let Some(edges) = table.get(&off) else {
            continue;
        };

        for &adj in edges {
            // resolve the table edge through live adjacency, relative to
            // the tile we have already reached
            let neighbor = map.neighbor(tile, adj - off);
            fov.insert(adj, neighbor);

            // sight keeps spreading only out of transparent tiles; since
            // the neighbor is already recorded, popping it later can pick
            // the exploration back up from there
            if let Some(id) = neighbor {
                if map.tile(id).is_transparent() {
                    stack.push(adj);
                }
            }
        }
    }

    fix_walls(map, &mut fov, radius);

    if shape == FovShape::Circle {
        let limit = radius * radius;
        fov.retain(|off, _| off.x * off.x + off.y * off.y <= limit);
    }

    fov
}

/// Patch the visual gaps next to opaque tiles on the four cardinal rays.
///
/// The two octants converging on a cardinal axis do not share cells beside
/// it, so a wall run along the axis shows pinholes. March each axis
/// outward while it is still in view and re-derive both diagonal side
/// cells from the adjacency of the previous axis tile; that tile is
/// already resolved, so its links are safe to follow even when the current
/// axis tile is the wall itself.
fn fix_walls(map: &TileMap, fov: &mut FovMap, radius: i32) {
    for axis in CARDINALS {
        let perp = Offset::new(axis.y, axis.x);
        for step in 1..=radius {
            if !fov.contains_key(&(axis * step)) {
                break;
            }
            let prev_off = axis * (step - 1);
            let Some(&Some(prev)) = fov.get(&prev_off) else {
                break;
            };
            for diag in [axis + perp, axis - perp] {
                fov.insert(prev_off + diag, map.neighbor(prev, diag));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileType;

    fn open_map(width: i32, height: i32) -> TileMap {
        let mut map = TileMap::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                map.set_tile(x, y, TileType::Floor);
            }
        }
        map
    }

    #[test]
    fn test_self_inclusion() {
        let map = open_map(9, 9);
        let cache = SightCache::new();
        let origin = map.get(4, 4).unwrap();

        for radius in 1..=6 {
            let fov = compute_fov(&map, &cache, origin, radius);
            assert_eq!(fov[&Offset::ZERO], Some(origin));
        }
    }

    #[test]
    fn test_open_map_count() {
        // fully open 21x21, origin at center, radius 5: the table reaches
        // the whole Chebyshev disc, 11 * 11 cells
        let map = open_map(21, 21);
        let cache = SightCache::new();
        let origin = map.get(10, 10).unwrap();

        let fov = compute_fov(&map, &cache, origin, 5);
        assert_eq!(fov.len(), 121);
        for (&off, &tile) in &fov {
            assert!(off.chebyshev() <= 5);
            let id = tile.expect("open interior map has no absent neighbors");
            assert_eq!(map.tile(id).pos(), Offset::new(10, 10) + off);
        }
    }

    #[test]
    fn test_opaque_blocking() {
        // 5-tile corridor with an opaque middle: nothing strictly beyond
        // the wall along the ray is seen
        let mut map = TileMap::new(7, 3).unwrap();
        for x in 1..=5 {
            map.set_tile(x, 1, TileType::Floor);
        }
        map.set_tile(3, 1, TileType::Wall);
        let cache = SightCache::new();
        let origin = map.get(1, 1).unwrap();

        let fov = compute_fov(&map, &cache, origin, 10);

        // the wall itself is visible
        assert_eq!(fov[&Offset::new(2, 0)], map.get(3, 1));
        // the corridor past it is not
        assert!(!fov.contains_key(&Offset::new(3, 0)));
        assert!(!fov.contains_key(&Offset::new(4, 0)));
    }

    #[test]
    fn test_closed_door_blocks_like_wall() {
        let mut map = open_map(9, 3);
        map.set_tile(4, 1, TileType::DoorClosed);
        let cache = SightCache::new();
        let origin = map.get(1, 1).unwrap();

        let fov = compute_fov(&map, &cache, origin, 7);
        assert_eq!(fov[&Offset::new(3, 0)], map.get(4, 1));
        assert!(!fov.contains_key(&Offset::new(5, 0)));
    }

    #[test]
    fn test_map_edge_recorded_as_absent() {
        // a map smaller than the radius: the view runs off the edge and
        // records the missing geometry as None
        let map = open_map(3, 3);
        let cache = SightCache::new();
        let origin = map.get(1, 1).unwrap();

        let fov = compute_fov(&map, &cache, origin, 2);
        assert_eq!(fov.len(), 25);

        let in_map = fov.values().filter(|tile| tile.is_some()).count();
        assert_eq!(in_map, 9);
        assert_eq!(fov[&Offset::new(2, 0)], None);
        assert_eq!(fov[&Offset::new(-2, -2)], None);
    }

    #[test]
    fn test_wall_fix_fills_gaps_along_long_wall() {
        // standing next to a long wall: the naive flood loses wall cells
        // whose table predecessor is another wall cell, so the corrector
        // must re-derive them from the axis tiles
        let mut map = open_map(11, 11);
        for x in 0..11 {
            map.set_tile(x, 6, TileType::Wall);
        }
        let cache = SightCache::new();
        let origin = map.get(5, 5).unwrap();

        let fov = compute_fov(&map, &cache, origin, 4);
        // (3,1) is only reachable in the table through the wall at (2,1),
        // so only the corrector can add it
        assert_eq!(fov[&Offset::new(3, 1)], map.get(8, 6));
        assert_eq!(fov[&Offset::new(4, 1)], map.get(9, 6));
        // and the room beyond the wall stays dark
        assert!(!fov.contains_key(&Offset::new(3, 2)));
    }

    #[test]
    fn test_circle_clips_corners() {
        let map = open_map(13, 13);
        let cache = SightCache::new();
        let origin = map.get(6, 6).unwrap();

        let fov = compute_fov_shaped(&map, &cache, origin, 5, FovShape::Circle);

        assert!(fov.contains_key(&Offset::new(5, 0)));
        assert!(fov.contains_key(&Offset::new(3, 4)));
        assert!(!fov.contains_key(&Offset::new(5, 5)));
        assert!(!fov.contains_key(&Offset::new(4, 4)));
        // the Euclidean disc of radius 5 holds exactly 81 cells
        assert_eq!(fov.len(), 81);
    }

    #[test]
    #[should_panic(expected = "radius must be positive")]
    fn test_zero_radius_panics() {
        let map = open_map(3, 3);
        let cache = SightCache::new();
        compute_fov(&map, &cache, map.get(1, 1).unwrap(), 0);
    }
}
