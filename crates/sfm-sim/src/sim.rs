//! The `Sim` struct and its step loop.

use sfm_agent::{Agent, AgentStore};
use sfm_core::units::{GOAL_PROXIMITY, PIXELS_PER_METER};
use sfm_core::{AgentId, ForceParams, SimClock, SimConfig, Step, Vec2};
use tracing::{debug, info, warn};

use crate::density::{self, DensityMap};
use crate::force::{ForceBreakdown, ForceModel, ForceOutcome};
use crate::{RunOutcome, SimBuilder, SimObserver, SimResult};

/// What one call to [`Sim::step`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// The step that just completed.
    pub step: Step,
    /// Agents that reached their target during the step, ascending id.
    pub arrived: Vec<AgentId>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each step has two phases:
///
/// 1. **Force pass** ([`step_forces`](Self::step_forces)): a compute phase
///    reads the shared `&AgentStore` and produces one [`ForceOutcome`] per
///    agent (optionally parallel with the `parallel` feature); an apply phase
///    then stores the accelerations in ascending `AgentId` order.  No agent
///    ever sees another agent's updated state within a step.
/// 2. **Integration** ([`integrate`](Self::integrate)): trapezoidal velocity
///    and position update, followed by the goal-proximity check.
///
/// Create via [`SimBuilder`] or [`Sim::create`].
#[derive(Clone, Debug)]
pub struct Sim {
    config: SimConfig,
    clock:  SimClock,
    agents: AgentStore,
}

impl Sim {
    pub(crate) fn from_parts(config: SimConfig, agents: AgentStore) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            agents,
        }
    }

    /// Circle formation of `agent_count` agents around
    /// `(center_x, center_y)`, every other setting at its default.
    pub fn create(
        agent_count:  usize,
        timestep:     f64,
        center_x:     f64,
        center_y:     f64,
        inner_radius: f64,
        outer_radius: f64,
        seed:         u64,
    ) -> SimResult<Self> {
        SimBuilder::new(SimConfig {
            agent_count,
            timestep,
            center: Vec2::new(center_x, center_y),
            inner_radius,
            outer_radius,
            seed,
            ..SimConfig::default()
        })
        .build()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> SimResult<&Agent> {
        Ok(self.agents.require(id)?)
    }

    pub fn arrived_count(&self) -> usize {
        self.agents.arrived_count()
    }

    /// True once every agent has reached its target.
    pub fn is_converged(&self) -> bool {
        self.agents.all_arrived()
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Compute and store every non-frozen agent's acceleration.
    ///
    /// Returns the agents found standing exactly on their goal, which are
    /// frozen instead of accelerated.
    pub fn step_forces(&mut self, params: &ForceParams) -> Vec<AgentId> {
        debug_assert!(params.validate().is_ok(), "invalid force params {params:?}");
        let model = ForceModel::new(*params, self.config.friction, self.config.wall);

        // Compute (shared borrow), then apply (exclusive borrow).
        let outcomes = self.compute_outcomes(&model);

        let now = self.clock.current_step;
        let mut at_goal = Vec::new();
        for (agent, outcome) in self.agents.iter_mut().zip(outcomes) {
            match outcome {
                ForceOutcome::Frozen => {}
                ForceOutcome::Accelerate(acceleration) => agent.set_acceleration(acceleration),
                ForceOutcome::AtGoal => {
                    agent.freeze(now);
                    debug!(agent = %agent.id(), step = %now, "agent standing on goal, frozen");
                    at_goal.push(agent.id());
                }
            }
        }
        at_goal
    }

    fn compute_outcomes(&self, model: &ForceModel) -> Vec<ForceOutcome> {
        let agents = self.agents.as_slice();

        #[cfg(not(feature = "parallel"))]
        {
            (0..agents.len()).map(|i| model.outcome(i, agents)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            (0..agents.len())
                .into_par_iter()
                .map(|i| model.outcome(i, agents))
                .collect()
        }
    }

    /// Advance every non-frozen agent by `dt` seconds using the stored
    /// accelerations, then freeze those within [`GOAL_PROXIMITY`] of their
    /// goal.  Returns the agents that arrived.
    pub fn integrate(&mut self, dt: f64) -> Vec<AgentId> {
        let arrival = self.clock.current_step + 1;
        let mut arrived = Vec::new();

        for agent in self.agents.iter_mut() {
            if agent.target_reached() {
                continue;
            }
            let velocity = agent.velocity();
            let next_velocity = velocity + agent.acceleration() * dt;
            let displacement = (velocity + next_velocity) * (0.5 * dt * PIXELS_PER_METER);
            agent.advance(next_velocity, displacement);

            if agent.distance_to_goal() < GOAL_PROXIMITY {
                agent.freeze(arrival);
                debug!(
                    agent = %agent.id(),
                    step  = %arrival,
                    speed = agent.speed(),
                    "target reached"
                );
                arrived.push(agent.id());
            }
        }

        self.clock.advance_by(dt);
        if !arrived.is_empty() && self.is_converged() {
            info!(step = %self.clock.current_step, secs = self.clock.elapsed_secs(), "all agents arrived");
        }
        arrived
    }

    /// One full step with the configured force constants and timestep.
    pub fn step(&mut self) -> StepReport {
        let params = self.config.forces;
        let mut arrived = self.step_forces(&params);
        arrived.extend(self.integrate(self.config.timestep));
        arrived.sort_unstable();
        StepReport { step: self.clock.current_step, arrived }
    }

    /// Step until every agent has arrived or `max_steps` steps have run.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`](crate::NoopObserver) if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, max_steps: u64, observer: &mut O) -> RunOutcome {
        let mut steps = 0;
        let outcome = loop {
            if self.is_converged() {
                break RunOutcome::Converged { steps };
            }
            if steps >= max_steps {
                warn!(
                    steps,
                    arrived = self.arrived_count(),
                    agents  = self.agents.len(),
                    "step limit reached before convergence"
                );
                break RunOutcome::StepLimit { steps };
            }

            observer.on_step_start(self.clock.current_step);
            let report = self.step();
            for &id in &report.arrived {
                if let Some(agent) = self.agents.get(id) {
                    observer.on_arrival(agent, &self.clock);
                }
            }
            observer.on_step_end(self);
            steps += 1;
        };
        observer.on_sim_end(outcome, self);
        outcome
    }

    /// Per-term forces on agent `id` against the current state.  `None` when
    /// the agent stands exactly on its goal.
    pub fn force_breakdown(
        &self,
        id:     AgentId,
        params: &ForceParams,
    ) -> SimResult<Option<ForceBreakdown>> {
        self.agents.require(id)?;
        let model = ForceModel::new(*params, self.config.friction, self.config.wall);
        Ok(model.breakdown(id.index(), self.agents.as_slice()))
    }

    // ── Density queries ───────────────────────────────────────────────────

    /// Agents per distance-unit² within `radius` of `center`.
    pub fn zone_density(&self, center: Vec2, radius: f64) -> f64 {
        density::zone_density(&self.agents, center, radius)
    }

    /// Agents inside the configured inner circle.
    pub fn inner_circle_count(&self) -> usize {
        density::zone_count(&self.agents, self.config.center, self.config.inner_radius)
    }

    /// Density of other agents within `radius` of agent `id`.
    pub fn local_density(&self, id: AgentId, radius: f64) -> SimResult<f64> {
        self.agents.require(id)?;
        Ok(density::local_density(self.agents.as_slice(), id.index(), radius))
    }

    pub fn corridor_occupancy_and_speed(&self, x_min: f64, x_max: f64) -> (usize, f64) {
        density::corridor_occupancy_and_speed(&self.agents, x_min, x_max)
    }

    /// Inner-circle density plus every agent's local density within the
    /// configured `local_density_radius`.
    pub fn density(&self) -> DensityMap {
        DensityMap::build(
            self.agents.as_slice(),
            self.config.center,
            self.config.inner_radius,
            self.config.local_density_radius,
        )
    }
}
