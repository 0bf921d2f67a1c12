//! Fluent builder for the circle formation.
//!
//! # Usage
//!
//! ```rust
//! use sfm_agent::PopulationBuilder;
//! use sfm_core::Vec2;
//!
//! let store = PopulationBuilder::new(8, /*seed=*/ 42)
//!     .center(Vec2::new(540.0, 355.0))
//!     .radius(200.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.len(), 8);
//! // Every goal is the antipode of the spawn point.
//! let a = store.iter().next().unwrap();
//! assert_eq!(a.goal(), a.position().reflect_through(Vec2::new(540.0, 355.0)));
//! ```

use std::f64::consts::TAU;

use sfm_core::{AgentId, AgentRng, ParameterRanges, SfmError, SfmResult, Vec2};

use crate::{Agent, AgentStore, PhysicalParams, Quadrant};

/// Places `count` agents evenly on a circle, counter-clockwise from the +x
/// axis, each with its goal at the diametrically opposite point.
pub struct PopulationBuilder {
    count: usize,
    seed: u64,
    center: Vec2,
    radius: f64,
    ranges: ParameterRanges,
}

impl PopulationBuilder {
    /// Create a builder for `count` agents using `seed` for parameter draws.
    ///
    /// Defaults: centre (540, 355), radius 200, default parameter ranges.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            center: Vec2::new(540.0, 355.0),
            radius: 200.0,
            ranges: ParameterRanges::default(),
        }
    }

    pub fn center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    /// Radius of the formation circle.
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn ranges(mut self, ranges: ParameterRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// Spawn point of agent `index` out of `count`.
    pub fn spawn_point(center: Vec2, radius: f64, index: usize, count: usize) -> Vec2 {
        let angle = TAU / count as f64 * index as f64;
        center + Vec2::from_angle(angle) * radius
    }

    /// Draw parameters and place every agent.
    pub fn build(self) -> SfmResult<AgentStore> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SfmError::config(format!(
                "formation radius must be finite and positive, got {}",
                self.radius
            )));
        }
        self.ranges.validate()?;

        let agents = (0..self.count)
            .map(|i| {
                let id = AgentId::try_from(i)
                    .map_err(|_| SfmError::config(format!("agent index {i} exceeds the id space")))?;
                let spawn = Self::spawn_point(self.center, self.radius, i, self.count);
                let goal = spawn.reflect_through(self.center);
                let mut rng = AgentRng::new(self.seed, id);
                let params = PhysicalParams::sample(&self.ranges, &mut rng);
                Agent::new(id, spawn, goal, params, Quadrant::classify(spawn, self.center))
            })
            .collect::<SfmResult<Vec<_>>>()?;

        AgentStore::from_agents(agents)
    }
}
