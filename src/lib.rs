//! Maze Bounce - balls drifting through a symmetric wall maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arena layout, headings, collisions, reflection, stepping)
//! - `renderer`: Rendering collaborator seam (draw lists, headless and recording backends)
//! - `settings`: Serializable run configuration
//! - `error`: Error taxonomy shared by the above

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AgentError, ArenaError, DegenerateHit, RenderError, SettingsError, SimError};
pub use settings::{BallSettings, Settings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 1000.0;

    /// Default number of balls released into the arena
    pub const BALL_COUNT: usize = 25;
    /// Default frame rate handed to the renderer's pacer
    pub const FRAME_RATE: u32 = 45;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_STEP: (f32, f32) = (2.0, 2.0);
    pub const BALL_START: (f32, f32) = (500.0, 500.0);
    /// Frames between heading perturbations when nothing is hit
    pub const MOVE_LIMIT: u32 = 25;

    /// Maze geometry
    pub const WALL_COUNT: usize = 20;
    /// Thickness of every maze bar
    pub const WALL_THICKNESS: f32 = 20.0;
    /// Maze bars reach `dimension / WALL_REACH_DIVISOR` into the arena
    pub const WALL_REACH_DIVISOR: f32 = 5.4;
    /// Bars per side of the arena
    pub const SLOTS_PER_SIDE: usize = 4;
}

/// Convert an arena `(x, y)` pair to a vector
#[inline]
pub fn vec2(pair: (f32, f32)) -> Vec2 {
    Vec2::new(pair.0, pair.1)
}
