//! Fluent builder for constructing a [`Sim`].

use sfm_agent::{AgentStore, PopulationBuilder};
use sfm_core::{ForceParams, FrictionMode, SimConfig, WallConfig};
use tracing::info;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                          |
/// |-------------------|--------------------------------------------------|
/// | `.agents(store)`  | Circle formation drawn from `config`             |
/// | `.forces(p)`      | `config.forces`                                  |
/// | `.friction(m)`    | `config.friction`                                |
/// | `.wall(w)`        | `config.wall`                                    |
///
/// # Example
///
/// ```rust
/// use sfm_core::{ForceParams, SimConfig};
/// use sfm_sim::SimBuilder;
///
/// let config = SimConfig { agent_count: 4, ..SimConfig::default() };
/// let sim = SimBuilder::new(config)
///     .forces(ForceParams { friction_coefficient: 0.0, ..ForceParams::default() })
///     .wall(None)
///     .build()
///     .unwrap();
/// assert_eq!(sim.agents().len(), 4);
/// ```
pub struct SimBuilder {
    config: SimConfig,
    agents: Option<AgentStore>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, agents: None }
    }

    /// Supply an explicitly placed population instead of the circle
    /// formation.  Must hold exactly `config.agent_count` agents.
    pub fn agents(mut self, store: AgentStore) -> Self {
        self.agents = Some(store);
        self
    }

    /// Force constants used by [`Sim::step`].
    pub fn forces(mut self, params: ForceParams) -> Self {
        self.config.forces = params;
        self
    }

    pub fn friction(mut self, mode: FrictionMode) -> Self {
        self.config.friction = mode;
        self
    }

    /// Corridor walls; `None` disables the wall term.
    pub fn wall(mut self, wall: Option<WallConfig>) -> Self {
        self.config.wall = wall;
        self
    }

    /// Validate the configuration, place the population, and return a
    /// ready-to-step [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let agents = match self.agents {
            Some(store) => {
                if store.len() != self.config.agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: self.config.agent_count,
                        got:      store.len(),
                        what:     "agent store",
                    });
                }
                // Deserialized agents skip `Agent::new`.
                for agent in store.iter() {
                    agent.params().validate()?;
                }
                store
            }
            None => PopulationBuilder::new(self.config.agent_count, self.config.seed)
                .center(self.config.center)
                .radius(self.config.outer_radius)
                .ranges(self.config.params)
                .build()?,
        };

        info!(
            agents   = agents.len(),
            timestep = self.config.timestep,
            seed     = self.config.seed,
            wall     = self.config.wall.is_some(),
            "simulation built"
        );

        Ok(Sim::from_parts(self.config, agents))
    }
}
