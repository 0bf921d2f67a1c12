//! The Social Force model.
//!
//! Net force on agent `i`:
//!
//! ```text
//! F_i = F_desired + Σ_j F_ij + F_wall + F_friction
//!
//! F_desired  = m_i · (v0_i · ĝ_i − v_i) / τ_i
//! F_ij       = A · exp((r_i + r_j − d_ij) / B) · n̂_ij       (n̂_ij points j → i)
//! F_wall     = ±A · exp(−d_iW / B) · ŷ                     (inside the corridor band)
//! F_friction = C · (mean_j v_j − v_i), j walking           (FrictionMode::MeanNeighbor)
//!
//! a_i = clamp(F_i / m_i, MAX_ACCELERATION)
//! ```
//!
//! Lengths inside the exponentials are in metres; positions and radii are
//! converted from distance units with [`PIXELS_PER_METER`].  Every function
//! here reads a shared `&[Agent]` slice and writes nothing, which is what lets
//! [`Sim::step_forces`](crate::Sim::step_forces) evaluate all agents against
//! the same start-of-step snapshot.

use sfm_agent::Agent;
use sfm_core::units::{MAX_ACCELERATION, PIXELS_PER_METER, to_meters};
use sfm_core::{ForceParams, FrictionMode, Vec2, WallConfig};

/// Per-term forces acting on one agent, N.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ForceBreakdown {
    pub desired: Vec2,
    pub interaction: Vec2,
    pub wall: Vec2,
    pub friction: Vec2,
}

impl ForceBreakdown {
    pub fn total(&self) -> Vec2 {
        self.desired + self.interaction + self.wall + self.friction
    }

    /// `total / mass`, clamped to [`MAX_ACCELERATION`].
    pub fn acceleration(&self, mass: f64) -> Vec2 {
        (self.total() / mass).clamp_length(MAX_ACCELERATION)
    }
}

/// What the force pass decided for one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ForceOutcome {
    /// Already at its target; nothing to compute or apply.
    Frozen,
    /// Standing exactly on its goal, so the goal direction is undefined.
    /// The apply pass treats this as arrival.
    AtGoal,
    /// New acceleration, m/s².
    Accelerate(Vec2),
}

/// Force constants plus the scenario's optional terms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ForceModel {
    pub params: ForceParams,
    pub friction: FrictionMode,
    pub wall: Option<WallConfig>,
}

impl ForceModel {
    pub fn new(params: ForceParams, friction: FrictionMode, wall: Option<WallConfig>) -> Self {
        Self { params, friction, wall }
    }

    /// All four terms for `agents[index]`, or `None` when the agent stands
    /// on its goal.
    pub fn breakdown(&self, index: usize, agents: &[Agent]) -> Option<ForceBreakdown> {
        let agent = &agents[index];
        let desired = desired_force(agent)?;
        let wall = match &self.wall {
            Some(w) => wall_force(agent.position(), w, &self.params),
            None => Vec2::ZERO,
        };
        let friction = match self.friction {
            FrictionMode::Off => Vec2::ZERO,
            FrictionMode::MeanNeighbor => {
                mean_neighbor_friction(index, agents, self.params.friction_coefficient)
            }
        };
        Some(ForceBreakdown {
            desired,
            interaction: interaction_force(index, agents, &self.params),
            wall,
            friction,
        })
    }

    pub fn outcome(&self, index: usize, agents: &[Agent]) -> ForceOutcome {
        let agent = &agents[index];
        if agent.target_reached() {
            return ForceOutcome::Frozen;
        }
        match self.breakdown(index, agents) {
            Some(forces) => ForceOutcome::Accelerate(forces.acceleration(agent.mass())),
            None => ForceOutcome::AtGoal,
        }
    }
}

// ── Individual terms ──────────────────────────────────────────────────────────

/// Drive toward the goal at the desired speed, relaxing the current velocity
/// with the agent's relaxation time.  `None` when position equals goal.
pub fn desired_force(agent: &Agent) -> Option<Vec2> {
    let heading = (agent.goal() - agent.position()).try_normalize()?;
    let p = agent.params();
    Some((heading * p.desired_speed - agent.velocity()) * (p.mass / p.relaxation_time))
}

/// Repulsion of `other` on `me`.  `None` when the centres coincide: there is
/// no direction to push in, and the pair contributes nothing.
pub fn pair_repulsion(me: &Agent, other: &Agent, params: &ForceParams) -> Option<Vec2> {
    let (normal, distance) = (me.position() - other.position()).normalize_with_length()?;
    let overlap = to_meters(me.radius() + other.radius() - distance);
    Some(normal * (params.repulsion_strength * (overlap / params.repulsion_range).exp()))
}

/// Sum of pairwise repulsion on `agents[index]` from every other agent,
/// frozen ones included.
pub fn interaction_force(index: usize, agents: &[Agent], params: &ForceParams) -> Vec2 {
    let me = &agents[index];
    agents
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .filter_map(|(_, other)| {
            let force = pair_repulsion(me, other, params);
            if force.is_none() {
                tracing::trace!(agent = %me.id(), other = %other.id(), "coincident pair skipped");
            }
            force
        })
        .sum()
}

/// Corridor push away from the nearer boundary line, zero outside the band
/// and between the edges.
pub fn wall_force(position: Vec2, wall: &WallConfig, params: &ForceParams) -> Vec2 {
    let y = position.y;
    if y < wall.band_min || y > wall.band_max {
        return Vec2::ZERO;
    }
    let fall_off = PIXELS_PER_METER * params.repulsion_range;
    if y < wall.upper_edge {
        let gap = y - wall.band_min;
        Vec2::new(0.0, params.repulsion_strength * (-gap / fall_off).exp())
    } else if y > wall.lower_edge {
        let gap = wall.band_max - y;
        Vec2::new(0.0, -params.repulsion_strength * (-gap / fall_off).exp())
    } else {
        Vec2::ZERO
    }
}

/// `C · (mean_j v_j − v_i)` over every other agent still walking.
///
/// Arrived agents are stationary and keep their last velocity only as a
/// record, so they are left out.  Zero when no walking neighbour remains.
pub fn mean_neighbor_friction(index: usize, agents: &[Agent], coefficient: f64) -> Vec2 {
    let (moving, sum) = agents
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != index && !other.target_reached())
        .fold((0usize, Vec2::ZERO), |(n, sum), (_, other)| (n + 1, sum + other.velocity()));
    if moving == 0 {
        return Vec2::ZERO;
    }
    (sum / moving as f64 - agents[index].velocity()) * coefficient
}
