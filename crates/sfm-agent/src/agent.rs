//! A single pedestrian: kinematic state, physical parameters, bookkeeping.

use sfm_core::{AgentId, AgentRng, ParameterRanges, SfmError, SfmResult, Step, Vec2};

// ── PhysicalParams ────────────────────────────────────────────────────────────

/// Per-agent physical constants, drawn once at creation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalParams {
    /// Body radius, distance units.
    pub radius: f64,
    /// Mass, kg.
    pub mass: f64,
    /// Preferred walking speed, m/s.
    pub desired_speed: f64,
    /// Time constant of the velocity relaxation toward the desired velocity, s.
    pub relaxation_time: f64,
}

impl PhysicalParams {
    /// Draw every parameter from `ranges`.
    ///
    /// Draw order is fixed (mass, radius, desired speed, relaxation time) so a
    /// given seed always yields the same agent.
    pub fn sample(ranges: &ParameterRanges, rng: &mut AgentRng) -> Self {
        let mass = rng.uniform(ranges.mass.min, ranges.mass.max);
        let radius = rng.uniform(ranges.radius.min, ranges.radius.max);
        let desired_speed = rng.uniform(ranges.desired_speed.min, ranges.desired_speed.max);
        let relaxation_time =
            rng.uniform(ranges.relaxation_time.min, ranges.relaxation_time.max);
        Self { radius, mass, desired_speed, relaxation_time }
    }

    /// Every parameter must be finite and strictly positive.  A zero mass or
    /// relaxation time divides by zero in the desired force.
    pub fn validate(&self) -> SfmResult<()> {
        for (name, value) in [
            ("radius", self.radius),
            ("mass", self.mass),
            ("desired speed", self.desired_speed),
            ("relaxation time", self.relaxation_time),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SfmError::config(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// ── Quadrant ──────────────────────────────────────────────────────────────────

/// Spawn quadrant relative to the formation centre, in screen coordinates
/// (y grows downward).  Collaborators use it to colour agents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quadrant {
    /// Right of centre, on or above it.
    First,
    /// Left of centre, on or above it.
    Second,
    /// Left of centre, below it.
    Third,
    /// Right of centre (or on the vertical axis), below it.
    Fourth,
}

impl Quadrant {
    pub fn classify(point: Vec2, center: Vec2) -> Self {
        match (point.x >= center.x, point.y <= center.y) {
            (true, true) => Quadrant::First,
            (false, true) => Quadrant::Second,
            (false, false) => Quadrant::Third,
            (true, false) => Quadrant::Fourth,
        }
    }

    /// 1-based quadrant number.
    pub fn number(self) -> u8 {
        match self {
            Quadrant::First => 1,
            Quadrant::Second => 2,
            Quadrant::Third => 3,
            Quadrant::Fourth => 4,
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One simulated pedestrian.
///
/// Fields are read through getters.  The three mutators used by the
/// simulation ([`set_acceleration`](Self::set_acceleration),
/// [`advance`](Self::advance), [`freeze`](Self::freeze)) are no-ops once the
/// agent has reached its target, so a frozen agent's position and velocity
/// can never change again.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    id: AgentId,
    quadrant: Quadrant,
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    goal: Vec2,
    params: PhysicalParams,
    total_displacement: f64,
    target_reached: bool,
    arrival_step: Option<Step>,
}

impl Agent {
    /// Create an agent at rest at `spawn`, heading for `goal`.
    ///
    /// Fails when `spawn == goal` (no direction to walk in), either point is
    /// not finite, or `params` does not [validate](PhysicalParams::validate).
    pub fn new(
        id: AgentId,
        spawn: Vec2,
        goal: Vec2,
        params: PhysicalParams,
        quadrant: Quadrant,
    ) -> SfmResult<Self> {
        if !spawn.is_finite() || !goal.is_finite() {
            return Err(SfmError::config(format!(
                "agent {id}: spawn {spawn} and goal {goal} must be finite"
            )));
        }
        if spawn == goal {
            return Err(SfmError::config(format!(
                "agent {id}: spawn position equals goal {goal}"
            )));
        }
        params.validate().map_err(|e| match e {
            SfmError::Config(msg) => SfmError::config(format!("agent {id}: {msg}")),
            other => other,
        })?;
        Ok(Self {
            id,
            quadrant,
            position: spawn,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            goal,
            params,
            total_displacement: 0.0,
            target_reached: false,
            arrival_step: None,
        })
    }

    // ── Getters ───────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    #[inline]
    pub fn goal(&self) -> Vec2 {
        self.goal
    }

    #[inline]
    pub fn params(&self) -> &PhysicalParams {
        &self.params
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.params.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.params.mass
    }

    /// Path length travelled so far, distance units.
    #[inline]
    pub fn total_displacement(&self) -> f64 {
        self.total_displacement
    }

    #[inline]
    pub fn target_reached(&self) -> bool {
        self.target_reached
    }

    /// The step at which the agent froze, if it has.
    #[inline]
    pub fn arrival_step(&self) -> Option<Step> {
        self.arrival_step
    }

    /// Speed magnitude, m/s.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Distance from the current position to the goal, distance units.
    #[inline]
    pub fn distance_to_goal(&self) -> f64 {
        self.position.distance_to(self.goal)
    }

    // ── Mutators (simulation apply phase) ─────────────────────────────────

    /// Store the acceleration computed for this step.  Ignored when frozen.
    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        if !self.target_reached {
            self.acceleration = acceleration;
        }
    }

    /// Move by `displacement` (distance units) and take on `velocity`.
    /// Accumulates path length.  Ignored when frozen.
    pub fn advance(&mut self, velocity: Vec2, displacement: Vec2) {
        if self.target_reached {
            return;
        }
        self.position += displacement;
        self.velocity = velocity;
        self.total_displacement += displacement.length();
    }

    /// Mark the target as reached at `step`.  Idempotent: the first arrival
    /// step is kept.
    pub fn freeze(&mut self, step: Step) {
        if !self.target_reached {
            self.target_reached = true;
            self.arrival_step = Some(step);
        }
    }
}
