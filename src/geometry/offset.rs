//! 2D integer offsets
//!
//! The workhorse value type: a relative displacement between tiles, also
//! used as the key of visibility tables and query results.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 2-dimensional integer vector.
///
/// Offsets are relative displacements, so the same value can describe a
/// direction of travel, a position relative to a field-of-view origin, or
/// a key into a precomputed visibility table.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// The zero displacement.
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// L1 distance from the origin.
    pub fn manhattan(self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// L2 distance from the origin.
    pub fn euclidean(self) -> f64 {
        f64::from(self.x).hypot(f64::from(self.y))
    }

    /// L-infinity distance from the origin (diagonals count as one step).
    pub fn chebyshev(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(-self.x, -self.y)
    }
}

/// Scale by an integer factor.
impl Mul<i32> for Offset {
    type Output = Offset;

    fn mul(self, rhs: i32) -> Offset {
        Offset::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Offset::new(3, -1);
        let b = Offset::new(-2, 4);

        assert_eq!(a + b, Offset::new(1, 3));
        assert_eq!(a - b, Offset::new(5, -5));
        assert_eq!(-a, Offset::new(-3, 1));
        assert_eq!(a * 3, Offset::new(9, -3));
        assert_eq!(b * 0, Offset::ZERO);
    }

    #[test]
    fn test_distances() {
        let o = Offset::new(3, -4);

        assert_eq!(o.manhattan(), 7);
        assert_eq!(o.chebyshev(), 4);
        assert!((o.euclidean() - 5.0).abs() < 1e-9);
        assert_eq!(Offset::ZERO.manhattan(), 0);
        assert_eq!(Offset::ZERO.chebyshev(), 0);
    }

    #[test]
    fn test_diagonal_is_one_step() {
        // Chebyshev treats a diagonal neighbor the same as a cardinal one
        assert_eq!(Offset::new(1, 1).chebyshev(), 1);
        assert_eq!(Offset::new(1, 0).chebyshev(), 1);
        assert_eq!(Offset::new(5, 5).chebyshev(), 5);
    }
}
