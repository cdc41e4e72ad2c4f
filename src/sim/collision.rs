//! Collision detection between a ball and the wall segments
//!
//! A ball is sampled at eight points on its bounding square: the four edge
//! midpoints and the four corners. The first point found inside any wall wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::WallSegment;

/// Which of the eight boundary sample points touched a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitSample {
    Left,
    Top,
    Right,
    Bottom,
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl HitSample {
    /// Samples in the order they are tested against each wall
    pub const CHECK_ORDER: [HitSample; 8] = [
        HitSample::Left,
        HitSample::Top,
        HitSample::Right,
        HitSample::Bottom,
        HitSample::TopRight,
        HitSample::TopLeft,
        HitSample::BottomRight,
        HitSample::BottomLeft,
    ];

    /// Offset of this sample from the ball centre, in radii
    #[inline]
    pub fn offset(self) -> (i8, i8) {
        match self {
            HitSample::Left => (-1, 0),
            HitSample::Top => (0, -1),
            HitSample::Right => (1, 0),
            HitSample::Bottom => (0, 1),
            HitSample::TopRight => (1, -1),
            HitSample::TopLeft => (-1, -1),
            HitSample::BottomRight => (1, 1),
            HitSample::BottomLeft => (-1, 1),
        }
    }

    /// Sample position for a ball at `center`
    #[inline]
    pub fn point(self, center: Vec2, radius: f32) -> Vec2 {
        let (ox, oy) = self.offset();
        center + Vec2::new(ox as f32, oy as f32) * radius
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        let (ox, oy) = self.offset();
        ox != 0 && oy != 0
    }
}

/// All eight sample points of a ball, in check order
pub fn sample_points(center: Vec2, radius: f32) -> [(HitSample, Vec2); 8] {
    HitSample::CHECK_ORDER.map(|s| (s, s.point(center, radius)))
}

/// A detected wall contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Index of the wall in the arena's wall list
    pub wall: usize,
    /// The sample point found inside it
    pub sample: HitSample,
}

/// Find the first wall containing any of the ball's sample points.
///
/// Walls are scanned in order; for each wall the samples are tested in
/// `HitSample::CHECK_ORDER`. Later overlaps in the same frame are ignored.
pub fn detect(center: Vec2, radius: f32, walls: &[WallSegment]) -> Option<Hit> {
    let samples = sample_points(center, radius);
    walls.iter().enumerate().find_map(|(wall, segment)| {
        samples
            .iter()
            .find(|(_, p)| segment.contains_point(*p))
            .map(|&(sample, _)| Hit { wall, sample })
    })
}
