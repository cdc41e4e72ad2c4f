//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - One discrete step per frame
//! - Seeded RNG only
//! - Stable iteration order (by agent creation)
//! - No rendering or platform dependencies beyond the `Renderer` seam

pub mod arena;
pub mod collision;
pub mod heading;
pub mod reflect;
pub mod state;
pub mod tick;

pub use arena::{ArenaLayout, WallSegment};
pub use collision::{Hit, HitSample, detect, sample_points};
pub use heading::Heading;
pub use reflect::{HitKind, classify, resolve};
pub use state::{Agent, AgentId, AgentSpec, AgentState, MotionPhase};
pub use tick::{Simulation, TickReport, populate};
