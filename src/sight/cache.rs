//! Table cache
//!
//! Lazy, per-radius memoization of the visibility tables. Construct one
//! cache at startup and hand it to every sight query; tables are built on
//! first use and shared read-only from then on.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::table::{build_reverse_table, build_table, DirectionalTable, ReverseTable};

/// Memoized visibility tables, keyed by radius.
///
/// Tables depend only on the radius, never on map content, so entries are
/// never invalidated or evicted; memory grows with the distinct radii ever
/// requested, which game view distances keep small.
///
/// All methods take `&self`: the lazy build path is guarded by rwlocks, so
/// a cache shared between threads hands out the same `Arc`s everywhere.
#[derive(Debug, Default)]
pub struct SightCache {
    forward: RwLock<HashMap<i32, Arc<DirectionalTable>>>,
    reverse: RwLock<HashMap<i32, Arc<ReverseTable>>>,
}

impl SightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The forward table for `radius`, building and storing it on first
    /// request.
    ///
    /// # Panics
    ///
    /// Panics if `radius < 1`.
    pub fn table(&self, radius: i32) -> Arc<DirectionalTable> {
        assert!(radius >= 1, "sight table radius must be positive");

        if let Some(table) = self.forward.read().get(&radius) {
            return Arc::clone(table);
        }

        let mut tables = self.forward.write();
        // another thread may have built it between the read and the write
        Arc::clone(
            tables
                .entry(radius)
                .or_insert_with(|| Arc::new(build_table(radius))),
        )
    }

    /// The reverse table for `radius`, building and storing it (and the
    /// forward table it inverts) on first request.
    ///
    /// # Panics
    ///
    /// Panics if `radius < 1`.
    pub fn reverse_table(&self, radius: i32) -> Arc<ReverseTable> {
        assert!(radius >= 1, "sight table radius must be positive");

        if let Some(table) = self.reverse.read().get(&radius) {
            return Arc::clone(table);
        }

        // resolve the forward table before taking the reverse write lock,
        // so the two locks are never held at once
        let forward = self.table(radius);
        let mut tables = self.reverse.write();
        Arc::clone(
            tables
                .entry(radius)
                .or_insert_with(|| Arc::new(build_reverse_table(&forward))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memoization() {
        let cache = SightCache::new();

        let first = cache.table(4);
        let second = cache.table(4);
        assert!(Arc::ptr_eq(&first, &second));

        let first = cache.reverse_table(4);
        let second = cache.reverse_table(4);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_radii_get_distinct_tables() {
        let cache = SightCache::new();
        assert!(cache.table(2).len() < cache.table(5).len());
    }

    #[test]
    fn test_reverse_matches_standalone_build() {
        let cache = SightCache::new();
        let expected = build_reverse_table(&build_table(3));
        assert_eq!(*cache.reverse_table(3), expected);
    }

    #[test]
    fn test_concurrent_access_shares_one_table() {
        let cache = SightCache::new();

        let (a, b) = std::thread::scope(|scope| {
            let a = scope.spawn(|| cache.table(6));
            let b = scope.spawn(|| cache.table(6));
            (a.join().unwrap(), b.join().unwrap())
        });

        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &cache.table(6)));
    }

    #[test]
    #[should_panic(expected = "radius must be positive")]
    fn test_zero_radius_panics() {
        SightCache::new().table(0);
    }
}
