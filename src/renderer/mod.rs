//! Rendering collaborator seam
//!
//! The simulation never draws. Each frame it asks a `Renderer` to pace,
//! redraw the static wall layer, and present every ball at its new position.
//! Backends own their state in a `RenderContext` rather than in globals.

pub mod headless;
pub mod shapes;
pub mod vertex;

pub use headless::{HeadlessRenderer, RecordingRenderer, RenderCall};
pub use vertex::{Vertex, colors};

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::error::RenderError;
use crate::sim::{AgentId, ArenaLayout};

/// Trait that abstracts the presentation layer.
/// This allows for different backends (headless, recording, windowed).
pub trait Renderer {
    /// Clear the frame and redraw the static wall layer
    fn new_frame(&mut self, arena: &ArenaLayout) -> Result<(), RenderError>;

    /// Draw or update one ball
    fn present(&mut self, agent: AgentId, pos: Vec2, radius: f32) -> Result<(), RenderError>;

    /// Block until the next frame is due
    fn wait_for_next_tick(&mut self, target_fps: u32) -> Result<(), RenderError>;

    /// Ask the run loop to stop between frames
    fn should_stop(&self) -> bool {
        false
    }
}

/// Frame clock and counters owned by a backend
#[derive(Debug, Clone)]
pub struct RenderContext {
    last_tick: Option<Instant>,
    frames: u64,
    pacing: bool,
}

impl RenderContext {
    /// `pacing: false` runs frames back to back
    pub fn new(pacing: bool) -> Self {
        Self {
            last_tick: None,
            frames: 0,
            pacing,
        }
    }

    /// Target duration of one frame (zero when `fps` is zero)
    pub fn frame_period(fps: u32) -> Duration {
        if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / fps as f64)
        }
    }

    /// Sleep off whatever remains of the current frame
    pub fn wait_for_next_tick(&mut self, fps: u32) {
        if self.pacing {
            let period = Self::frame_period(fps);
            if let Some(last) = self.last_tick {
                let elapsed = last.elapsed();
                if elapsed < period {
                    std::thread::sleep(period - elapsed);
                }
            }
        }
        self.last_tick = Some(Instant::now());
        self.frames += 1;
    }

    /// Frames paced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_period() {
        assert_eq!(RenderContext::frame_period(0), Duration::ZERO);
        assert_eq!(RenderContext::frame_period(50), Duration::from_millis(20));
    }

    #[test]
    fn test_unpaced_context_counts_frames() {
        let mut ctx = RenderContext::new(false);
        let start = Instant::now();
        for _ in 0..10 {
            ctx.wait_for_next_tick(1);
        }
        assert_eq!(ctx.frames(), 10);
        // At 1 fps a paced context would have slept for seconds
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_paced_context_waits_between_frames() {
        let mut ctx = RenderContext::new(true);
        let start = Instant::now();
        for _ in 0..3 {
            ctx.wait_for_next_tick(100);
        }
        // First frame is immediate, the next two wait ~10ms each
        assert!(start.elapsed() >= Duration::from_millis(18));
    }
}
