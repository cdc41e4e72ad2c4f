//! Arena layout: the fixed maze of axis-aligned wall segments
//!
//! The maze is four groups of four bars, one group per side of the arena,
//! spaced evenly along that side. Four zero-thickness segments trace the
//! outer edge of the play area.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SLOTS_PER_SIDE, WALL_COUNT, WALL_REACH_DIVISOR, WALL_THICKNESS};
use crate::error::ArenaError;

/// An immutable axis-aligned wall rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WallSegment {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Point containment with inclusive edges.
    ///
    /// Inclusive edges are what make the zero-thickness boundary lines solid.
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

/// The static arena geometry shared by every agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaLayout {
    width: f32,
    height: f32,
    /// Maze bars followed by boundary lines
    walls: Vec<WallSegment>,
    /// How many leading entries of `walls` are maze bars
    maze_len: usize,
}

impl ArenaLayout {
    /// Lay out the 16 maze bars and 4 boundary lines for a `width` x `height` arena.
    ///
    /// Walls are ordered: for each slot `i`, left bar, right bar, top bar,
    /// bottom bar; then the top, left, right and bottom boundary lines.
    /// Collision tie-breaking follows this order.
    pub fn build(width: f32, height: f32) -> Result<Self, ArenaError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ArenaError::InvalidArenaDimension { width, height });
        }

        let slots = SLOTS_PER_SIDE as f32;
        // Total thickness of the bars on one side, split out of the spacing
        let bar_span = slots * WALL_THICKNESS;
        let gap_y = (height - bar_span) / (slots + 1.0);
        let gap_x = (width - bar_span) / (slots + 1.0);
        let reach_x = width / WALL_REACH_DIVISOR;
        let reach_y = height / WALL_REACH_DIVISOR;

        let mut walls = Vec::with_capacity(WALL_COUNT);
        for i in 0..SLOTS_PER_SIDE {
            let n = i as f32;
            let slot_y = n * WALL_THICKNESS + (n + 1.0) * gap_y;
            let slot_x = n * WALL_THICKNESS + (n + 1.0) * gap_x;

            walls.push(WallSegment::new(0.0, slot_y, reach_x, WALL_THICKNESS));
            walls.push(WallSegment::new(width - reach_x, slot_y, reach_x, WALL_THICKNESS));
            walls.push(WallSegment::new(slot_x, 0.0, WALL_THICKNESS, reach_y));
            walls.push(WallSegment::new(slot_x, height - reach_y, WALL_THICKNESS, reach_y));
        }

        walls.push(WallSegment::new(0.0, 0.0, width, 0.0));
        walls.push(WallSegment::new(0.0, 0.0, 0.0, height));
        walls.push(WallSegment::new(width, 0.0, 0.0, height));
        walls.push(WallSegment::new(0.0, height, width, 0.0));

        debug_assert_eq!(walls.len(), WALL_COUNT);
        log::info!(
            "Arena {}x{}: {} walls (bar gaps {:.1} x {:.1})",
            width,
            height,
            walls.len(),
            gap_x,
            gap_y
        );

        Ok(Self {
            width,
            height,
            walls,
            maze_len: SLOTS_PER_SIDE * 4,
        })
    }

    /// Build a layout from explicit walls (custom mazes, tests).
    ///
    /// Collisions test `maze` in the given order, then `boundary`. Only the
    /// maze walls are drawn.
    pub fn with_walls(
        width: f32,
        height: f32,
        maze: Vec<WallSegment>,
        boundary: Vec<WallSegment>,
    ) -> Result<Self, ArenaError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ArenaError::InvalidArenaDimension { width, height });
        }
        let maze_len = maze.len();
        let mut walls = maze;
        walls.extend(boundary);
        Ok(Self {
            width,
            height,
            walls,
            maze_len,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// All walls in collision order
    #[inline]
    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    /// The visible maze bars
    pub fn maze(&self) -> &[WallSegment] {
        &self.walls[..self.maze_len]
    }

    /// The invisible lines tested after the maze
    pub fn boundary(&self) -> &[WallSegment] {
        &self.walls[self.maze_len..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_build_standard_layout() {
        let arena = ArenaLayout::build(1000.0, 1000.0).unwrap();
        assert_eq!(arena.walls().len(), 20);
        assert_eq!(arena.maze().len(), 16);

        // First left bar: y = 184, reaching 1000 / 5.4 into the arena
        let left = arena.walls()[0];
        assert!(approx(left.x, 0.0));
        assert!(approx(left.y, 184.0));
        assert!(approx(left.width, 1000.0 / 5.4));
        assert!(approx(left.height, 20.0));

        // Last bottom bar sits at x = 3*20 + 4*184
        let bottom = arena.walls()[15];
        assert!(approx(bottom.x, 796.0));
        assert!(approx(bottom.bottom(), 1000.0));
    }

    #[test]
    fn test_layout_is_mirror_symmetric() {
        let arena = ArenaLayout::build(1000.0, 800.0).unwrap();
        let maze = arena.maze();
        for i in 0..4 {
            let left = maze[i * 4];
            let right = maze[i * 4 + 1];
            assert!(approx(left.left(), 1000.0 - right.right()));
            assert!(approx(left.y, right.y));

            // Slot i mirrors slot 3 - i across the horizontal centre
            let mirror = maze[(3 - i) * 4];
            assert!(approx(left.top(), 800.0 - mirror.bottom()));

            let top = maze[i * 4 + 2];
            let bottom = maze[i * 4 + 3];
            assert!(approx(top.top(), 800.0 - bottom.bottom()));
            assert!(approx(top.x, bottom.x));
        }
    }

    #[test]
    fn test_boundary_lines() {
        let arena = ArenaLayout::build(640.0, 480.0).unwrap();
        let b = arena.boundary();
        assert_eq!(b, &arena.walls()[16..]);
        assert_eq!(b[0], WallSegment::new(0.0, 0.0, 640.0, 0.0));
        assert_eq!(b[1], WallSegment::new(0.0, 0.0, 0.0, 480.0));
        assert_eq!(b[2], WallSegment::new(640.0, 0.0, 0.0, 480.0));
        assert_eq!(b[3], WallSegment::new(0.0, 480.0, 640.0, 0.0));
    }

    #[test]
    fn test_zero_thickness_wall_is_solid() {
        let line = WallSegment::new(0.0, 0.0, 100.0, 0.0);
        assert!(line.contains_point(Vec2::new(50.0, 0.0)));
        assert!(!line.contains_point(Vec2::new(50.0, 0.01)));
        assert!(!line.contains_point(Vec2::new(100.01, 0.0)));
    }

    #[test]
    fn test_containment_is_inclusive() {
        let wall = WallSegment::new(10.0, 10.0, 20.0, 5.0);
        assert!(wall.contains_point(Vec2::new(10.0, 10.0)));
        assert!(wall.contains_point(Vec2::new(30.0, 15.0)));
        assert!(!wall.contains_point(Vec2::new(9.99, 12.0)));
        assert!(!wall.contains_point(Vec2::new(20.0, 15.01)));
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        for (w, h) in [(0.0, 100.0), (100.0, -1.0), (f32::NAN, 100.0), (f32::INFINITY, 5.0)] {
            let err = ArenaLayout::build(w, h).unwrap_err();
            assert!(matches!(err, ArenaError::InvalidArenaDimension { .. }));
        }
        assert!(ArenaLayout::with_walls(-5.0, 5.0, Vec::new(), Vec::new()).is_err());
    }

    #[test]
    fn test_custom_layout_keeps_lines_out_of_maze() {
        let bar = WallSegment::new(40.0, 40.0, 20.0, 20.0);
        let floor = WallSegment::new(0.0, 100.0, 100.0, 0.0);
        let arena = ArenaLayout::with_walls(100.0, 100.0, vec![bar], vec![floor]).unwrap();

        assert_eq!(arena.maze(), &[bar]);
        assert_eq!(arena.boundary(), &[floor]);
        assert_eq!(arena.walls(), &[bar, floor]);

        // A line-only layout draws nothing
        let open = ArenaLayout::with_walls(100.0, 100.0, Vec::new(), vec![floor]).unwrap();
        assert!(open.maze().is_empty());
        assert_eq!(open.walls().len(), 1);
    }
}
