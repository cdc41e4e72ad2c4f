//! Eight-way compass headings
//!
//! A heading is an index into a fixed table of unit steps, ordered clockwise
//! starting from "up" (screen coordinates, +y points down). Adjacent indices
//! are angular neighbours and all arithmetic wraps modulo 8.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of compass directions
pub const HEADING_COUNT: u8 = 8;

/// Unit step `(dx, dy)` for each heading index
const STEPS: [(i8, i8); HEADING_COUNT as usize] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// One of the eight compass directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Heading(u8);

impl Heading {
    pub const UP: Heading = Heading(0);
    pub const UP_RIGHT: Heading = Heading(1);
    pub const RIGHT: Heading = Heading(2);
    pub const DOWN_RIGHT: Heading = Heading(3);
    pub const DOWN: Heading = Heading(4);
    pub const DOWN_LEFT: Heading = Heading(5);
    pub const LEFT: Heading = Heading(6);
    pub const UP_LEFT: Heading = Heading(7);

    /// Heading reversal offset
    pub const REVERSE: i32 = 4;
    /// Quarter-turn offset used for single-axis flips
    pub const QUARTER: i32 = 2;

    /// Heading for an arbitrary index, wrapped modulo 8
    #[inline]
    pub fn from_index(index: i32) -> Self {
        Heading(index.rem_euclid(HEADING_COUNT as i32) as u8)
    }

    /// Heading whose unit step is `(dx, dy)`, if that is a compass step
    pub fn from_step(dx: i8, dy: i8) -> Option<Self> {
        STEPS
            .iter()
            .position(|&s| s == (dx, dy))
            .map(|i| Heading(i as u8))
    }

    /// Uniformly random heading, used for an agent's first frame
    pub fn initial<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Heading(rng.random_range(0..HEADING_COUNT))
    }

    /// The same heading or one of its two neighbours, uniformly
    pub fn perturb<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let delta: i32 = rng.random_range(-1..=1);
        self.rotate(delta)
    }

    /// Rotate by `steps` eighth-turns (positive is clockwise)
    #[inline]
    pub fn rotate(self, steps: i32) -> Self {
        Self::from_index(self.0 as i32 + steps)
    }

    /// Opposite direction
    #[inline]
    pub fn reversed(self) -> Self {
        self.rotate(Self::REVERSE)
    }

    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Unit step `(dx, dy)`, each in {-1, 0, 1}
    #[inline]
    pub fn step(self) -> (i8, i8) {
        STEPS[self.0 as usize]
    }

    /// True for the four purely horizontal or vertical headings
    #[inline]
    pub fn is_axis_aligned(self) -> bool {
        let (dx, dy) = self.step();
        dx == 0 || dy == 0
    }

    /// Number of eighth-turns between two headings, in 0..=4
    pub fn distance(self, other: Heading) -> u8 {
        let d = (self.0 as i32 - other.0 as i32).rem_euclid(HEADING_COUNT as i32) as u8;
        d.min(HEADING_COUNT - d)
    }

    /// Every heading in index order
    pub fn all() -> impl Iterator<Item = Heading> {
        (0..HEADING_COUNT).map(Heading)
    }
}

impl TryFrom<u8> for Heading {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index < HEADING_COUNT {
            Ok(Heading(index))
        } else {
            Err(format!("heading index {index} out of range 0..8"))
        }
    }
}

impl From<Heading> for u8 {
    fn from(heading: Heading) -> u8 {
        heading.0
    }
}
