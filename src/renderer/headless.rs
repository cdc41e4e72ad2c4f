//! Windowless backends
//!
//! `HeadlessRenderer` tessellates every frame into vertex buffers and logs
//! them, pacing with a wall clock. It can also stream every presented ball
//! to a trace sink as JSON lines. `RecordingRenderer` keeps every call for
//! later inspection.

use std::io::Write;

use glam::Vec2;
use serde::Serialize;

use super::vertex::Vertex;
use super::{RenderContext, Renderer, shapes};
use crate::error::RenderError;
use crate::sim::{AgentId, ArenaLayout};

/// Frames between periodic progress lines
const REPORT_INTERVAL: u64 = 450;

/// One line of the frame trace
#[derive(Debug, Serialize)]
struct TraceRecord {
    frame: u64,
    agent: AgentId,
    x: f32,
    y: f32,
}

/// Builds draw lists without a window
pub struct HeadlessRenderer {
    ctx: RenderContext,
    /// Static wall layer, rebuilt when the arena size changes
    wall_layer: Vec<Vertex>,
    wall_layer_size: (f32, f32),
    /// Ball vertices for the frame in progress
    balls: Vec<Vertex>,
    presented: usize,
    trace: Option<Box<dyn Write>>,
}

impl HeadlessRenderer {
    pub fn new(pacing: bool) -> Self {
        Self {
            ctx: RenderContext::new(pacing),
            wall_layer: Vec::new(),
            wall_layer_size: (0.0, 0.0),
            balls: Vec::new(),
            presented: 0,
            trace: None,
        }
    }

    /// Also write one JSON line per presented ball to `sink`
    pub fn with_trace(mut self, sink: impl Write + 'static) -> Self {
        self.trace = Some(Box::new(sink));
        self
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Vertices of the current frame: walls first, then balls
    pub fn frame_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.wall_layer.iter().chain(self.balls.iter())
    }

    /// Balls presented since the last `new_frame`
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Renderer for HeadlessRenderer {
    fn new_frame(&mut self, arena: &ArenaLayout) -> Result<(), RenderError> {
        let size = (arena.width(), arena.height());
        if self.wall_layer.is_empty() || size != self.wall_layer_size {
            self.wall_layer = shapes::wall_layer(arena);
            self.wall_layer_size = size;
            log::debug!("Wall layer rebuilt: {} vertices", self.wall_layer.len());
        }
        self.balls.clear();
        self.presented = 0;
        if let Some(out) = self.trace.as_mut() {
            out.flush()?;
        }
        Ok(())
    }

    fn present(&mut self, agent: AgentId, pos: Vec2, radius: f32) -> Result<(), RenderError> {
        log::trace!("present {} at ({:.1}, {:.1}) r={}", agent, pos.x, pos.y, radius);
        self.balls.extend(shapes::ball(pos, radius));
        self.presented += 1;

        if let Some(out) = self.trace.as_mut() {
            let record = TraceRecord {
                frame: self.ctx.frames(),
                agent,
                x: pos.x,
                y: pos.y,
            };
            serde_json::to_writer(&mut *out, &record).map_err(std::io::Error::from)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn wait_for_next_tick(&mut self, target_fps: u32) -> Result<(), RenderError> {
        self.ctx.wait_for_next_tick(target_fps);
        let frames = self.ctx.frames();
        if frames % REPORT_INTERVAL == 0 {
            log::info!(
                "Frame {}: {} balls, {} vertices",
                frames,
                self.presented,
                self.wall_layer.len() + self.balls.len()
            );
        }
        Ok(())
    }
}

/// One collaborator call, as seen by a `RecordingRenderer`
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Wait { fps: u32 },
    NewFrame { width: f32, height: f32, walls: usize },
    Present { agent: AgentId, pos: Vec2, radius: f32 },
}

/// Records calls instead of drawing
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
    frames: u64,
    stop_after: Option<u64>,
}

impl RecordingRenderer {
    /// A recorder that asks the loop to stop once `frames` frames have been paced
    pub fn stopping_after(frames: u64) -> Self {
        Self {
            stop_after: Some(frames),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Presented positions for one agent, oldest first
    pub fn track(&self, id: AgentId) -> Vec<Vec2> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Present { agent, pos, .. } if *agent == id => Some(*pos),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn new_frame(&mut self, arena: &ArenaLayout) -> Result<(), RenderError> {
        self.calls.push(RenderCall::NewFrame {
            width: arena.width(),
            height: arena.height(),
            walls: arena.walls().len(),
        });
        Ok(())
    }

    fn present(&mut self, agent: AgentId, pos: Vec2, radius: f32) -> Result<(), RenderError> {
        self.calls.push(RenderCall::Present { agent, pos, radius });
        Ok(())
    }

    fn wait_for_next_tick(&mut self, target_fps: u32) -> Result<(), RenderError> {
        self.calls.push(RenderCall::Wait { fps: target_fps });
        self.frames += 1;
        Ok(())
    }

    fn should_stop(&self) -> bool {
        self.stop_after.is_some_and(|limit| self.frames >= limit)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::renderer::colors;

    /// A sink whose reader has gone away
    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_headless_frame_holds_walls_then_balls() {
        let arena = ArenaLayout::build(1000.0, 1000.0).unwrap();
        let mut renderer = HeadlessRenderer::new(false);

        renderer.wait_for_next_tick(45).unwrap();
        renderer.new_frame(&arena).unwrap();
        renderer.present(AgentId(0), Vec2::new(500.0, 500.0), 12.0).unwrap();
        renderer.present(AgentId(1), Vec2::new(300.0, 500.0), 12.0).unwrap();

        assert_eq!(renderer.presented(), 2);
        let verts: Vec<&Vertex> = renderer.frame_vertices().collect();
        let walls = shapes::wall_layer(&arena).len();
        assert_eq!(verts.len(), walls + 2 * (shapes::BALL_SEGMENTS * 3) as usize);
        assert!(verts[walls..].iter().all(|v| v.color == colors::BALL));

        // A new frame drops last frame's balls but keeps the wall layer
        renderer.new_frame(&arena).unwrap();
        assert_eq!(renderer.presented(), 0);
        assert_eq!(renderer.frame_vertices().count(), walls);
        assert_eq!(renderer.context().frames(), 1);
    }

    #[test]
    fn test_recording_track() {
        let mut renderer = RecordingRenderer::default();
        renderer.present(AgentId(0), Vec2::new(1.0, 1.0), 2.0).unwrap();
        renderer.present(AgentId(1), Vec2::new(5.0, 5.0), 2.0).unwrap();
        renderer.present(AgentId(0), Vec2::new(2.0, 2.0), 2.0).unwrap();
        assert_eq!(
            renderer.track(AgentId(0)),
            vec![Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]
        );
    }

    #[test]
    fn test_recording_stop_after() {
        let mut renderer = RecordingRenderer::stopping_after(2);
        assert!(!renderer.should_stop());
        renderer.wait_for_next_tick(30).unwrap();
        assert!(!renderer.should_stop());
        renderer.wait_for_next_tick(30).unwrap();
        assert!(renderer.should_stop());
    }

    #[test]
    fn test_trace_writes_one_line_per_ball() {
        let path = std::env::temp_dir()
            .join(format!("maze-bounce-trace-{}.jsonl", std::process::id()));
        let file = std::fs::File::create(&path).unwrap();
        let arena = ArenaLayout::build(1000.0, 1000.0).unwrap();
        let mut renderer = HeadlessRenderer::new(false).with_trace(io::BufWriter::new(file));

        for frame in 0..2 {
            renderer.wait_for_next_tick(45).unwrap();
            renderer.new_frame(&arena).unwrap();
            renderer.present(AgentId(0), Vec2::new(500.0, 500.0 + frame as f32), 12.0).unwrap();
            renderer.present(AgentId(1), Vec2::new(300.0, 500.0), 12.0).unwrap();
        }
        drop(renderer);

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let lines: Vec<serde_json::Value> =
            text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["frame"], 1);
        assert_eq!(lines[0]["agent"], 0);
        assert_eq!(lines[2]["frame"], 2);
        assert_eq!(lines[2]["y"], 501.0);
        assert_eq!(lines[3]["agent"], 1);
    }

    #[test]
    fn test_trace_write_failure_is_reported() {
        let arena = ArenaLayout::build(1000.0, 1000.0).unwrap();
        let mut renderer = HeadlessRenderer::new(false).with_trace(ClosedSink);
        renderer.wait_for_next_tick(45).unwrap();
        renderer.new_frame(&arena).unwrap();

        let err = renderer.present(AgentId(0), Vec2::new(500.0, 500.0), 12.0).unwrap_err();
        let RenderError::Trace(io_err) = err;
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);

        // The run loop hands the failure back instead of carrying on
        let mut sim = crate::Settings {
            ball_count: 1,
            seed: Some(4),
            ..Default::default()
        }
        .build_simulation()
        .unwrap();
        let mut renderer = HeadlessRenderer::new(false).with_trace(ClosedSink);
        assert!(matches!(sim.run(&mut renderer, 45, Some(10)), Err(RenderError::Trace(_))));
        assert_eq!(sim.frame(), 1);
    }
}
