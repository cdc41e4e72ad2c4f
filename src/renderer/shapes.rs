//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{ArenaLayout, WallSegment};

/// Segments used to tessellate a ball
pub const BALL_SEGMENTS: u32 = 16;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(wall: &WallSegment, color: [f32; 4]) -> Vec<Vertex> {
    let (l, r, t, b) = (wall.left(), wall.right(), wall.top(), wall.bottom());

    vec![
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Static layer: background plus the visible maze bars.
///
/// Boundary lines have no area and are not drawn.
pub fn wall_layer(arena: &ArenaLayout) -> Vec<Vertex> {
    let floor = WallSegment::new(0.0, 0.0, arena.width(), arena.height());
    let mut vertices = rect(&floor, colors::BACKGROUND);
    for wall in arena.maze() {
        vertices.extend(rect(wall, colors::WALL));
    }
    vertices
}

/// A ball at its current position
pub fn ball(center: Vec2, radius: f32) -> Vec<Vertex> {
    circle(center, radius, colors::BALL, BALL_SEGMENTS)
}
