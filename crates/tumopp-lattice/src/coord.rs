//! Integer lattice coordinates.
//!
//! Coordinates are always stored as three components; 2-D lattices keep
//! `z = 0` everywhere, which also matches the output contract (2-D cells are
//! written with `z = 0`).

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A lattice site (or displacement between sites).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord(pub [i32; 3]);

impl Coord {
    pub const ORIGIN: Coord = Coord([0, 0, 0]);

    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Coord([x, y, z])
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.0[1]
    }

    #[inline]
    pub fn z(self) -> i32 {
        self.0[2]
    }

    /// Squared Euclidean norm, exact in integers.
    #[inline]
    pub fn norm_sq(self) -> i64 {
        self.0.iter().map(|&v| v as i64 * v as i64).sum()
    }
}

impl Add for Coord {
    type Output = Coord;
    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl AddAssign for Coord {
    #[inline]
    fn add_assign(&mut self, rhs: Coord) {
        *self = *self + rhs;
    }
}

impl Sub for Coord {
    type Output = Coord;
    #[inline]
    fn sub(self, rhs: Coord) -> Coord {
        Coord([
            self.0[0] - rhs.0[0],
            self.0[1] - rhs.0[1],
            self.0[2] - rhs.0[2],
        ])
    }
}

impl Neg for Coord {
    type Output = Coord;
    #[inline]
    fn neg(self) -> Coord {
        Coord([-self.0[0], -self.0[1], -self.0[2]])
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}
