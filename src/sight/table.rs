//! Visibility transition tables
//!
//! The tables that make every sight query cheap: for a fixed radius, a
//! forward table maps each offset to the offsets one ring further out that
//! sight spreads to, and its inversion maps each offset back to its unique
//! predecessor. Built once per radius, immutable afterwards.
//!
//! One octant is generated by a break-row recurrence that approximates the
//! angular spread of shadowcasting without any trigonometry; reflection and
//! rotation complete the remaining seven octants.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::geometry::Offset;

/// Forward transitions: source offset to the set of offsets reachable by
/// one direct step, for a fixed radius.
pub type DirectionalTable = HashMap<Offset, HashSet<Offset>>;

/// Inverted transitions: each reachable offset to its unique predecessor.
/// The origin has none.
pub type ReverseTable = HashMap<Offset, Offset>;

/// Build the forward table for the given radius.
///
/// Every offset with Chebyshev distance below `radius` gets at least one
/// outgoing edge; no edge leads beyond distance `radius + 1`. The result is
/// closed under the eight reflections/rotations of the plane.
///
/// Callers must guard the radius; the builder assumes `radius >= 1`.
pub fn build_table(radius: i32) -> DirectionalTable {
    let mut table = DirectionalTable::new();

    // Two seed rays out of the origin bound the first octant.
    add_entry(&mut table, Offset::ZERO, Offset::new(1, 0));
    add_entry(&mut table, Offset::ZERO, Offset::new(1, 1));

    // Each ring has one break row where sight spawns both straight and
    // diagonally; everything below it continues diagonally, everything
    // above straight. The break row drifts outward more slowly as rings
    // grow, which is what spreads the branch points apart with distance.
    let mut curr_break = 0;
    let mut break_count = 0;
    for x in 1..radius {
        let mut next_y = 0;
        for y in 0..=x {
            let pos = Offset::new(x, y);
            if y == curr_break {
                add_entry(&mut table, pos, Offset::new(x + 1, next_y));
                add_entry(&mut table, pos, Offset::new(x + 1, next_y + 1));
                next_y += 2;
            } else {
                add_entry(&mut table, pos, Offset::new(x + 1, next_y));
                next_y += 1;
            }
        }
        break_count -= 1;
        if break_count < 0 {
            break_count = curr_break + 1;
            curr_break += 1;
        }
    }

    complete_table(&mut table);

    log::debug!(
        "built directional table for radius {radius}: {} sources",
        table.len()
    );
    table
}

/// Place a link between two offsets, creating the destination set keyed by
/// `src` if it is not already present.
fn add_entry(table: &mut DirectionalTable, src: Offset, dst: Offset) {
    table.entry(src).or_default().insert(dst);
}

/// Extend a single-octant table to all 8 octants by reflection and
/// rotation.
///
/// Entries are snapshotted before each pass; the reflection set is closed,
/// so inserting while iterating would reach the same fixed point.
fn complete_table(table: &mut DirectionalTable) {
    // mirror across the diagonal: octant one becomes octant two
    let entries = snapshot(table);
    for (src, dsts) in entries {
        for dst in dsts {
            add_entry(table, Offset::new(src.y, src.x), Offset::new(dst.y, dst.x));
        }
    }

    // reflect the quadrant across both axes and the origin
    let entries = snapshot(table);
    for (src, dsts) in entries {
        for dst in dsts {
            add_entry(table, Offset::new(-src.x, src.y), Offset::new(-dst.x, dst.y));
            add_entry(table, Offset::new(src.x, -src.y), Offset::new(dst.x, -dst.y));
            add_entry(table, Offset::new(-src.x, -src.y), Offset::new(-dst.x, -dst.y));
        }
    }
}

fn snapshot(table: &DirectionalTable) -> Vec<(Offset, Vec<Offset>)> {
    table
        .iter()
        .map(|(&src, dsts)| (src, dsts.iter().copied().collect()))
        .collect()
}

/// Invert a forward table into predecessor form.
///
/// Edges are processed in sorted `(dst, src)` order and the first writer
/// wins, so the result does not depend on hash iteration order. A
/// destination claimed by more than one distinct source is a collision in
/// the forward table's spanning structure; collisions are kept out of the
/// result and logged.
pub fn build_reverse_table(forward: &DirectionalTable) -> ReverseTable {
    let mut edges: Vec<(Offset, Offset)> = forward
        .iter()
        .flat_map(|(&src, dsts)| dsts.iter().map(move |&dst| (dst, src)))
        .collect();
    edges.sort_unstable();

    let mut reverse = ReverseTable::new();
    for (dst, src) in edges {
        match reverse.entry(dst) {
            Entry::Vacant(slot) => {
                slot.insert(src);
            }
            Entry::Occupied(slot) => {
                if *slot.get() != src {
                    log::debug!(
                        "reverse table collision at {:?}: keeping {:?}, dropping {:?}",
                        dst,
                        slot.get(),
                        src
                    );
                }
            }
        }
    }
    reverse
}
