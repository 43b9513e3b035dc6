//! Radius-seeking offset tables
//!
//! The direction from a source to a target falls into one of twelve sectors:
//! six on the straight axes and six between them. For each sector the six
//! neighbor offsets split into those keeping the distance to the target,
//! those reducing it and those increasing it. Demons that want to hold a
//! distance to the player pick their steps from these tables.

use serde::{Deserialize, Serialize};

use crate::hex::coord::HexCoord;

const fn h(x: i32, y: i32) -> HexCoord {
    HexCoord::new(x, y)
}

const KEEP: [&[HexCoord]; 12] = [
    &[h(-1, 1), h(1, 0)],
    &[h(-1, 1), h(1, -1)],
    &[h(0, 1), h(1, -1)],
    &[h(0, 1), h(0, -1)],
    &[h(1, 0), h(0, -1)],
    &[h(1, 0), h(-1, 0)],
    &[h(1, -1), h(-1, 0)],
    &[h(1, -1), h(-1, 1)],
    &[h(0, -1), h(-1, 1)],
    &[h(0, -1), h(0, 1)],
    &[h(-1, 0), h(0, 1)],
    &[h(-1, 0), h(1, 0)],
];

const REDUCE: [&[HexCoord]; 12] = [
    &[h(0, 1)],
    &[h(0, 1), h(1, 0)],
    &[h(1, 0)],
    &[h(1, 0), h(1, -1)],
    &[h(1, -1)],
    &[h(1, -1), h(0, -1)],
    &[h(0, -1)],
    &[h(0, -1), h(-1, 0)],
    &[h(-1, 0)],
    &[h(-1, 0), h(-1, 1)],
    &[h(-1, 1)],
    &[h(-1, 1), h(0, 1)],
];

const INCREASE: [&[HexCoord]; 12] = [
    &[h(1, -1), h(0, -1), h(-1, 0)],
    &[h(0, -1), h(-1, 0)],
    &[h(0, -1), h(-1, 0), h(-1, 1)],
    &[h(-1, 0), h(-1, 1)],
    &[h(-1, 0), h(-1, 1), h(0, 1)],
    &[h(-1, 1), h(0, 1)],
    &[h(-1, 1), h(0, 1), h(1, 0)],
    &[h(0, 1), h(1, 0)],
    &[h(0, 1), h(1, 0), h(1, -1)],
    &[h(1, 0), h(1, -1)],
    &[h(1, 0), h(1, -1), h(0, -1)],
    &[h(1, -1), h(0, -1)],
];

/// One of the twelve direction classes from a source to a target
///
/// Even indices lie on a straight axis (the cells share a cube component),
/// odd indices lie between two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sector(u8);

impl Sector {
    pub const COUNT: usize = 12;

    /// Classify the direction from `source` to `target`
    ///
    /// `source == target` has no direction; it lands in sector 0.
    pub fn between(source: HexCoord, target: HexCoord) -> Self {
        let index = if source.x == target.x {
            if source.y > target.y {
                6
            } else {
                0
            }
        } else if source.x < target.x {
            if source.y < target.y {
                1
            } else if source.y == target.y {
                2
            } else if source.z() > target.z() {
                3
            } else if source.z() == target.z() {
                4
            } else {
                5
            }
        } else if source.y > target.y {
            7
        } else if source.y == target.y {
            8
        } else if source.z() < target.z() {
            9
        } else if source.z() == target.z() {
            10
        } else {
            11
        };
        Sector(index)
    }

    pub fn all() -> impl Iterator<Item = Sector> {
        (0..Self::COUNT as u8).map(Sector)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn is_axis(&self) -> bool {
        self.0 % 2 == 0
    }

    pub fn keep_offsets(&self) -> &'static [HexCoord] {
        KEEP[self.index()]
    }

    pub fn reduce_offsets(&self) -> &'static [HexCoord] {
        REDUCE[self.index()]
    }

    pub fn increase_offsets(&self) -> &'static [HexCoord] {
        INCREASE[self.index()]
    }
}

/// How a step should change the distance to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadiusStep {
    Keep,
    Reduce,
    Increase,
    KeepOrReduce,
    KeepOrIncrease,
}

impl RadiusStep {
    /// Offsets from a source in `sector` producing this kind of step
    pub fn offsets(&self, sector: Sector) -> Vec<HexCoord> {
        match self {
            RadiusStep::Keep => sector.keep_offsets().to_vec(),
            RadiusStep::Reduce => sector.reduce_offsets().to_vec(),
            RadiusStep::Increase => sector.increase_offsets().to_vec(),
            RadiusStep::KeepOrReduce => [sector.keep_offsets(), sector.reduce_offsets()].concat(),
            RadiusStep::KeepOrIncrease => {
                [sector.keep_offsets(), sector.increase_offsets()].concat()
            }
        }
    }

    /// Neighbor cells of `source` producing this kind of step toward `target`
    ///
    /// Cells are not filtered against the board; callers check walkability.
    pub fn cells(&self, source: HexCoord, target: HexCoord) -> Vec<HexCoord> {
        self.offsets(Sector::between(source, target))
            .into_iter()
            .map(|offset| source + offset)
            .collect()
    }
}
