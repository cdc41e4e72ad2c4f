//! Frame-synchronous simulation tick
//!
//! Every frame visits each agent in creation order:
//! detect -> resolve (or perturb) -> step -> count -> commit.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::{ArenaLayout, WallSegment};
use super::collision::detect;
use super::heading::Heading;
use super::reflect::{HitKind, resolve};
use super::state::{Agent, AgentId, AgentSpec, AgentState, MotionPhase};
use crate::error::{AgentError, DegenerateHit, RenderError};
use crate::renderer::Renderer;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Frame index this report describes (0-based)
    pub frame: u64,
    /// Agents that touched a wall this frame
    pub collisions: u32,
    /// Agents whose heading was randomly perturbed this frame
    pub perturbations: u32,
    /// Collisions that matched no reflection rule
    pub degenerate: Vec<DegenerateHit>,
}

/// A running simulation: one arena, many agents, one RNG
#[derive(Debug, Clone)]
pub struct Simulation {
    arena: ArenaLayout,
    agents: Vec<Agent>,
    rng: Pcg32,
    seed: u64,
    frame: u64,
    next_id: u32,
}

impl Simulation {
    /// Create an empty simulation over `arena`, seeding the RNG with `seed`
    pub fn new(arena: ArenaLayout, seed: u64) -> Self {
        log::info!(
            "Simulation seed {} on {}x{} arena",
            seed,
            arena.width(),
            arena.height()
        );
        Self {
            arena,
            agents: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            frame: 0,
            next_id: 0,
        }
    }

    /// Register an agent; it moves on the next tick
    pub fn add_agent(&mut self, spec: AgentSpec) -> Result<AgentId, AgentError> {
        spec.validate()?;
        let id = AgentId(self.next_id);
        self.next_id += 1;
        self.agents.push(Agent::new(id, &spec));
        log::debug!("Agent {} added at ({}, {})", id, spec.start.x, spec.start.y);
        Ok(id)
    }

    /// Advance every agent by one frame
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport {
            frame: self.frame,
            ..Default::default()
        };

        let walls = self.arena.walls();
        for agent in &mut self.agents {
            step_agent(agent, walls, &mut self.rng, &mut report);
        }

        self.frame += 1;
        report
    }

    /// Run one paced frame against a rendering collaborator
    pub fn run_frame<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        target_fps: u32,
    ) -> Result<TickReport, RenderError> {
        renderer.wait_for_next_tick(target_fps)?;
        renderer.new_frame(&self.arena)?;
        let report = self.tick();
        self.present(renderer)?;
        Ok(report)
    }

    /// Hand every agent's current position to the renderer
    pub fn present<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), RenderError> {
        for agent in &self.agents {
            renderer.present(agent.id, agent.pos, agent.radius)?;
        }
        Ok(())
    }

    /// Run until `frames` have elapsed (forever if `None`) or the renderer asks to stop.
    ///
    /// Returns the number of frames run.
    pub fn run<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        target_fps: u32,
        frames: Option<u64>,
    ) -> Result<u64, RenderError> {
        let mut ran = 0;
        let mut degenerate = 0usize;
        while frames.is_none_or(|limit| ran < limit) && !renderer.should_stop() {
            let report = self.run_frame(renderer, target_fps)?;
            degenerate += report.degenerate.len();
            ran += 1;
        }
        log::info!(
            "Stopped after {} frames ({} unresolved hits)",
            ran,
            degenerate
        );
        Ok(ran)
    }

    /// Position and heading of every agent, in creation order
    pub fn agent_states(&self) -> Vec<AgentState> {
        self.agents.iter().map(AgentState::from).collect()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn arena(&self) -> &ArenaLayout {
        &self.arena
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of completed ticks
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Advance a single agent by one frame
fn step_agent(
    agent: &mut Agent,
    walls: &[WallSegment],
    rng: &mut Pcg32,
    report: &mut TickReport,
) {
    let (mut heading, first_frame) = match agent.phase {
        MotionPhase::AwaitingFirstHeading { preset } => {
            (preset.unwrap_or_else(|| Heading::initial(rng)), true)
        }
        MotionPhase::Moving { heading } => (heading, false),
    };
    agent.last_hit = None;

    match detect(agent.pos, agent.radius, walls) {
        Some(hit) => {
            let (next, kind) = resolve(heading, hit.sample);
            if kind == HitKind::None {
                let degenerate = DegenerateHit {
                    agent: agent.id,
                    heading,
                    sample: hit.sample,
                };
                log::debug!("Frame {}: {}", report.frame, degenerate);
                report.degenerate.push(degenerate);
            } else {
                log::debug!(
                    "Frame {}: agent {} {:?} hit on wall {} ({:?}), heading {} -> {}",
                    report.frame,
                    agent.id,
                    kind,
                    hit.wall,
                    hit.sample,
                    heading.index(),
                    next.index()
                );
            }
            heading = next;
            agent.last_hit = Some(kind);
            agent.move_counter = 0;
            report.collisions += 1;
        }
        None if !first_frame && agent.move_counter == 0 => {
            heading = heading.perturb(rng);
            report.perturbations += 1;
        }
        None => {}
    }

    agent.phase = MotionPhase::Moving { heading };
    agent.plan_step(heading);
    agent.advance_counter();
    agent.commit();
}

/// Register `count` agents built from the same spec
pub fn populate(
    sim: &mut Simulation,
    spec: AgentSpec,
    count: usize,
) -> Result<Vec<AgentId>, AgentError> {
    (0..count).map(|_| sim.add_agent(spec)).collect()
}
