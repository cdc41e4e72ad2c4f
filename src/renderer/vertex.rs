//! Vertex types for 2D rendering

/// Simple 2D vertex with position and color
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for arena elements
pub mod colors {
    /// Maze bars, olive yellow (153, 153, 0)
    pub const WALL: [f32; 4] = [0.6, 0.6, 0.0, 1.0];
    /// Balls, pure blue (0, 0, 255)
    pub const BALL: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    /// Arena floor, light grey (224, 224, 224)
    pub const BACKGROUND: [f32; 4] = [0.878, 0.878, 0.878, 1.0];
}
