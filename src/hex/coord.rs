//! Hex coordinate system for the board (axial coordinates)
//!
//! Stores `x` and `y`; the third cube component `z` is derived so that
//! `x + y + z = 0` holds for every value that exists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::core::error::{OracleError, Result};

/// Axial hex coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build from all three cube components, rejecting values off the plane
    pub fn try_from_cube(x: i32, y: i32, z: i32) -> Result<Self> {
        if x + y + z != 0 {
            return Err(OracleError::InvalidCoordinate { x, y, z });
        }
        Ok(Self::new(x, y))
    }

    /// Cube coordinate z (derived from x and y)
    pub const fn z(&self) -> i32 {
        -self.x - self.y
    }

    /// Infinite norm, i.e. the distance to the origin
    pub fn norm(&self) -> u32 {
        self.x.unsigned_abs().max(self.y.unsigned_abs()).max(self.z().unsigned_abs())
    }

    /// Hex distance
    pub fn distance(&self, other: &Self) -> u32 {
        (*other - *self).norm()
    }

    /// All 6 adjacent coordinates, in `HexDirection::all()` order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HexDirection::all().map(|direction| *self + direction.offset())
    }

    /// True if the two cells share a cube component (same straight line)
    pub fn is_collinear(&self, other: &Self) -> bool {
        self.x == other.x || self.y == other.y || self.z() == other.z()
    }

    /// Unit step from self toward other, if they are on one straight line
    pub fn direction_to(&self, other: &Self) -> Option<HexDirection> {
        if self == other || !self.is_collinear(other) {
            return None;
        }
        let gap = *other - *self;
        let n = gap.norm() as i32;
        HexDirection::from_offset(HexCoord::new(gap.x / n, gap.y / n))
    }

    /// Rotate a vector by sixths of a turn (positive = counterclockwise)
    pub fn rotate(&self, steps: i32) -> Self {
        let mut result = *self;
        for _ in 0..steps.unsigned_abs() {
            result = if steps < 0 {
                HexCoord::new(-result.z(), -result.x)
            } else {
                HexCoord::new(-result.y, -result.z())
            };
        }
        result
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z())
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: Self) -> Self::Output {
        HexCoord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;

    fn sub(self, rhs: Self) -> Self::Output {
        HexCoord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for HexCoord {
    type Output = HexCoord;

    fn mul(self, rhs: i32) -> Self::Output {
        HexCoord::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for HexCoord {
    type Output = HexCoord;

    fn neg(self) -> Self::Output {
        HexCoord::new(-self.x, -self.y)
    }
}

/// The six straight directions of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexDirection {
    #[default]
    East,
    West,
    NorthWest,
    SouthEast,
    SouthWest,
    NorthEast,
}

impl HexDirection {
    /// Get the hex offset for this direction
    pub const fn offset(&self) -> HexCoord {
        match self {
            HexDirection::East => HexCoord::new(1, 0),
            HexDirection::West => HexCoord::new(-1, 0),
            HexDirection::NorthWest => HexCoord::new(0, 1),
            HexDirection::SouthEast => HexCoord::new(0, -1),
            HexDirection::SouthWest => HexCoord::new(-1, 1),
            HexDirection::NorthEast => HexCoord::new(1, -1),
        }
    }

    /// Get opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            HexDirection::East => HexDirection::West,
            HexDirection::West => HexDirection::East,
            HexDirection::NorthWest => HexDirection::SouthEast,
            HexDirection::SouthEast => HexDirection::NorthWest,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::NorthEast => HexDirection::SouthWest,
        }
    }

    pub fn from_offset(offset: HexCoord) -> Option<Self> {
        Self::all().into_iter().find(|direction| direction.offset() == offset)
    }

    /// All directions
    pub const fn all() -> [HexDirection; 6] {
        [
            HexDirection::East,
            HexDirection::West,
            HexDirection::NorthWest,
            HexDirection::SouthEast,
            HexDirection::SouthWest,
            HexDirection::NorthEast,
        ]
    }
}
