//! Agent state and core simulation types

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::heading::Heading;
use super::reflect::HitKind;
use crate::consts::*;
use crate::error::AgentError;

/// Stable agent handle, assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parameters for registering a new agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub start: Vec2,
    /// Distance moved per frame along each axis
    pub step: Vec2,
    pub radius: f32,
    /// Frames between heading perturbations
    pub move_limit: u32,
    /// Use this heading on the first frame instead of a random one
    #[serde(default)]
    pub first_heading: Option<Heading>,
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self {
            start: crate::vec2(BALL_START),
            step: crate::vec2(BALL_STEP),
            radius: BALL_RADIUS,
            move_limit: MOVE_LIMIT,
            first_heading: None,
        }
    }
}

impl AgentSpec {
    pub fn new(start: Vec2, step: Vec2, radius: f32, move_limit: u32) -> Self {
        Self {
            start,
            step,
            radius,
            move_limit,
            first_heading: None,
        }
    }

    /// Pin the heading used on the first frame
    pub fn with_heading(mut self, heading: Heading) -> Self {
        self.first_heading = Some(heading);
        self
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(AgentError::InvalidRadius(self.radius));
        }
        if !(self.step.is_finite() && self.step.x >= 0.0 && self.step.y >= 0.0) {
            return Err(AgentError::InvalidStep(self.step.x, self.step.y));
        }
        if self.move_limit == 0 {
            return Err(AgentError::ZeroMoveLimit);
        }
        Ok(())
    }
}

/// Where an agent is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    /// Not yet moved; the first frame picks the heading
    AwaitingFirstHeading { preset: Option<Heading> },
    /// Moving along `heading`
    Moving { heading: Heading },
}

/// A ball drifting through the maze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub pos: Vec2,
    /// Position computed this frame, committed at the end of the frame
    pub pending: Vec2,
    pub radius: f32,
    pub step: Vec2,
    pub phase: MotionPhase,
    /// Frames since the last perturbation or collision, modulo `move_limit`
    pub move_counter: u32,
    pub move_limit: u32,
    /// Classification of the most recent collision, if the last frame had one
    #[serde(skip)]
    pub last_hit: Option<HitKind>,
}

impl Agent {
    pub fn new(id: AgentId, spec: &AgentSpec) -> Self {
        Self {
            id,
            pos: spec.start,
            pending: spec.start,
            radius: spec.radius,
            step: spec.step,
            phase: MotionPhase::AwaitingFirstHeading {
                preset: spec.first_heading,
            },
            move_counter: 0,
            move_limit: spec.move_limit,
            last_hit: None,
        }
    }

    /// Current heading, once the first frame has run
    pub fn heading(&self) -> Option<Heading> {
        match self.phase {
            MotionPhase::Moving { heading } => Some(heading),
            MotionPhase::AwaitingFirstHeading { .. } => None,
        }
    }

    /// Compute the pending position one step along `heading`
    pub fn plan_step(&mut self, heading: Heading) {
        let (dx, dy) = heading.step();
        self.pending = self.pos + Vec2::new(dx as f32 * self.step.x, dy as f32 * self.step.y);
    }

    /// Advance the move counter, wrapping at `move_limit`
    pub fn advance_counter(&mut self) {
        self.move_counter += 1;
        if self.move_counter >= self.move_limit {
            self.move_counter = 0;
        }
    }

    /// Make the pending position current
    pub fn commit(&mut self) {
        self.pos = self.pending;
    }
}

/// Snapshot of one agent for inspection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: AgentId,
    pub pos: Vec2,
    pub heading: Option<Heading>,
}

impl From<&Agent> for AgentState {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            pos: agent.pos,
            heading: agent.heading(),
        }
    }
}
