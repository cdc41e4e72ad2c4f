//! Maze Bounce entry point
//!
//! Loads settings, applies command-line overrides, and runs the simulation
//! against the headless renderer.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use maze_bounce::Settings;
use maze_bounce::renderer::HeadlessRenderer;

#[derive(Parser, Debug)]
#[command(
    name = "maze-bounce",
    version,
    about = "Balls drifting through a symmetric wall maze"
)]
struct Cli {
    /// JSON settings file; unspecified fields take their defaults.
    #[arg(short, long, env = "MAZE_BOUNCE_CONFIG")]
    config: Option<PathBuf>,

    /// Arena width in pixels.
    #[arg(long)]
    width: Option<f32>,

    /// Arena height in pixels.
    #[arg(long)]
    height: Option<f32>,

    /// Number of balls to release.
    #[arg(short, long)]
    balls: Option<usize>,

    /// Target frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// RNG seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames (runs until interrupted if omitted).
    #[arg(short, long)]
    frames: Option<u64>,

    /// Run frames back to back instead of pacing to the frame rate.
    #[arg(long)]
    no_pace: bool,

    /// Write every presented ball position to this file as JSON lines.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Write the effective settings to this file and exit.
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(width) = self.width {
            settings.arena_width = width;
        }
        if let Some(height) = self.height {
            settings.arena_height = height;
        }
        if let Some(balls) = self.balls {
            settings.ball_count = balls;
        }
        if let Some(fps) = self.fps {
            settings.frame_rate = fps;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }

        settings.validate().context("invalid settings")?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let settings = cli.settings()?;

    if let Some(path) = &cli.dump_config {
        settings
            .save(path)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        return Ok(());
    }

    log::info!(
        "Maze Bounce starting: {} balls at {} fps",
        settings.ball_count,
        settings.frame_rate
    );

    let mut sim = settings
        .build_simulation()
        .context("building simulation")?;
    let mut renderer = HeadlessRenderer::new(!cli.no_pace);
    if let Some(path) = &cli.trace {
        let file = File::create(path)
            .with_context(|| format!("creating trace file {}", path.display()))?;
        renderer = renderer.with_trace(BufWriter::new(file));
        log::info!("Tracing ball positions to {}", path.display());
    }
    sim.run(&mut renderer, settings.frame_rate, cli.frames)
        .context("running simulation")?;

    for state in sim.agent_states() {
        log::debug!(
            "Agent {} final position ({:.1}, {:.1}) heading {:?}",
            state.id,
            state.pos.x,
            state.pos.y,
            state.heading
        );
    }
    Ok(())
}
