//! Error types
//!
//! Fatal errors abort construction; `DegenerateHit` is a non-fatal record that
//! the simulation reports alongside a completed tick.

use thiserror::Error;

use crate::sim::{AgentId, Heading, HitSample};

/// Errors raised while building the arena layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArenaError {
    /// Width or height is not a finite positive number.
    #[error("invalid arena dimension {width}x{height}: both sides must be positive")]
    InvalidArenaDimension { width: f32, height: f32 },
}

/// Errors raised when registering an agent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error("ball radius {0} must be positive")]
    InvalidRadius(f32),
    #[error("ball step ({0}, {1}) must be non-negative")]
    InvalidStep(f32, f32),
    #[error("move limit must be at least one frame")]
    ZeroMoveLimit,
}

/// A collision that matched none of the reflection rules.
///
/// The heading is left as it was and the frame proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("agent {agent}: {sample:?} hit while heading {heading:?} matches no reflection rule")]
pub struct DegenerateHit {
    pub agent: AgentId,
    pub heading: Heading,
    pub sample: HitSample,
}

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

/// Errors surfaced by a rendering collaborator.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The frame trace sink refused a write.
    #[error("failed to write frame trace: {0}")]
    Trace(#[from] std::io::Error),
}

/// Any error the simulation can surface to its caller.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
