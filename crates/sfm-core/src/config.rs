//! Simulation configuration.
//!
//! Every struct here has a `Default` that reproduces the standard circle
//! scenario (50 pedestrians on a 200-unit circle around (540, 355), stepping
//! at 5 ms).  Applications override fields directly or, with the `serde`
//! feature, load a partial JSON/TOML document on top of the defaults.
//!
//! Validation happens once, in [`SimConfig::validate`], called by the
//! simulation builder.  The per-step code assumes a validated config.

use crate::{SfmError, SfmResult, SimClock, Vec2};

// ── ParamRange ────────────────────────────────────────────────────────────────

/// Closed interval a per-agent physical parameter is drawn from.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range that always yields `value`.
    pub const fn constant(value: f64) -> Self {
        Self { min: value, max: value }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn validate(&self, name: &str) -> SfmResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SfmError::config(format!("{name} range must be finite")));
        }
        if self.min <= 0.0 {
            return Err(SfmError::config(format!(
                "{name} range must be positive, got min {}",
                self.min
            )));
        }
        if self.min > self.max {
            return Err(SfmError::config(format!(
                "{name} range is inverted: min {} > max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

// ── ParameterRanges ───────────────────────────────────────────────────────────

/// Bounds for the randomised per-agent physical parameters.
///
/// Default policy: mass, radius, and desired speed are drawn uniformly;
/// relaxation time is the constant 0.04 s.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParameterRanges {
    /// Body mass, kg.
    pub mass: ParamRange,
    /// Body radius, distance units.
    pub radius: ParamRange,
    /// Preferred walking speed, m/s.
    pub desired_speed: ParamRange,
    /// Velocity relaxation time constant, s.
    pub relaxation_time: ParamRange,
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            mass:            ParamRange::new(50.0, 70.0),
            radius:          ParamRange::new(5.0, 7.5),
            desired_speed:   ParamRange::new(0.6, 1.2),
            relaxation_time: ParamRange::constant(0.04),
        }
    }
}

impl ParameterRanges {
    /// Identical parameters for every agent.  Used by symmetric scenarios.
    pub fn uniform(mass: f64, radius: f64, desired_speed: f64, relaxation_time: f64) -> Self {
        Self {
            mass:            ParamRange::constant(mass),
            radius:          ParamRange::constant(radius),
            desired_speed:   ParamRange::constant(desired_speed),
            relaxation_time: ParamRange::constant(relaxation_time),
        }
    }

    pub fn validate(&self) -> SfmResult<()> {
        self.mass.validate("mass")?;
        self.radius.validate("radius")?;
        self.desired_speed.validate("desired speed")?;
        self.relaxation_time.validate("relaxation time")
    }
}

// ── ForceParams ───────────────────────────────────────────────────────────────

/// Constants of the pairwise and wall force terms.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForceParams {
    /// `A`: repulsion magnitude at contact, N.
    pub repulsion_strength: f64,
    /// `B`: repulsion fall-off length, metres.  Strictly positive; repulsion
    /// decays as `exp(-gap / B)`.
    pub repulsion_range: f64,
    /// `C`: weight of the velocity-alignment (friction) term, kg/s.
    pub friction_coefficient: f64,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            repulsion_strength:   2000.0,
            repulsion_range:      0.08,
            friction_coefficient: 0.2,
        }
    }
}

impl ForceParams {
    pub fn validate(&self) -> SfmResult<()> {
        if !(self.repulsion_strength.is_finite() && self.repulsion_strength >= 0.0) {
            return Err(SfmError::config(format!(
                "repulsion strength must be finite and non-negative, got {}",
                self.repulsion_strength
            )));
        }
        if !(self.repulsion_range.is_finite() && self.repulsion_range > 0.0) {
            return Err(SfmError::config(format!(
                "repulsion range must be finite and positive, got {}",
                self.repulsion_range
            )));
        }
        if !(self.friction_coefficient.is_finite() && self.friction_coefficient >= 0.0) {
            return Err(SfmError::config(format!(
                "friction coefficient must be finite and non-negative, got {}",
                self.friction_coefficient
            )));
        }
        Ok(())
    }
}

// ── FrictionMode ──────────────────────────────────────────────────────────────

/// How the velocity-difference term is aggregated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrictionMode {
    /// No velocity-difference term.
    Off,
    /// `C * (mean_j v_j - v_i)` over every other agent.
    #[default]
    MeanNeighbor,
}

// ── WallConfig ────────────────────────────────────────────────────────────────

/// Two horizontal boundary lines forming a corridor.
///
/// The lines sit at `y = band_min` and `y = band_max`.  Inside the band, an
/// agent with `y < upper_edge` is pushed toward +y (away from `band_min`) and
/// an agent with `y > lower_edge` toward -y, each with an exponential
/// fall-off from its line.  Between the edges and outside the band the wall
/// exerts nothing.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WallConfig {
    pub band_min: f64,
    pub upper_edge: f64,
    pub lower_edge: f64,
    pub band_max: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            band_min:   40.0,
            upper_edge: 200.0,
            lower_edge: 480.0,
            band_max:   640.0,
        }
    }
}

impl WallConfig {
    pub fn validate(&self) -> SfmResult<()> {
        let ordered = self.band_min <= self.upper_edge
            && self.upper_edge <= self.lower_edge
            && self.lower_edge <= self.band_max;
        let finite = [self.band_min, self.upper_edge, self.lower_edge, self.band_max]
            .iter()
            .all(|v| v.is_finite());
        if !(finite && ordered) {
            return Err(SfmError::config(format!(
                "wall lines must be finite and ordered band_min <= upper_edge <= lower_edge <= band_max, got {self:?}"
            )));
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of pedestrians placed on the formation circle.
    pub agent_count: usize,

    /// Seconds per step.
    pub timestep: f64,

    /// Centre of the formation circle, distance units.
    pub center: Vec2,

    /// Radius of the inner measurement circle used for zone density.
    pub inner_radius: f64,

    /// Radius of the formation circle agents spawn on.
    pub outer_radius: f64,

    /// Neighbourhood radius for per-agent local density.
    pub local_density_radius: f64,

    /// Master RNG seed.  The same seed always draws the same population.
    pub seed: u64,

    /// Force constants used by the simulation's bundled `step`.
    pub forces: ForceParams,

    pub friction: FrictionMode,

    /// Corridor walls.  `None` disables the wall term entirely.
    pub wall: Option<WallConfig>,

    pub params: ParameterRanges,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agent_count:          50,
            timestep:             0.005,
            center:               Vec2::new(540.0, 355.0),
            inner_radius:         1.0,
            outer_radius:         200.0,
            local_density_radius: 200.0,
            seed:                 42,
            forces:               ForceParams::default(),
            friction:             FrictionMode::default(),
            wall:                 Some(WallConfig::default()),
            params:               ParameterRanges::default(),
        }
    }
}

impl SimConfig {
    /// Fail fast on anything the step functions would otherwise divide by
    /// or propagate as NaN.
    pub fn validate(&self) -> SfmResult<()> {
        if self.agent_count == 0 {
            return Err(SfmError::config("agent count must be at least 1"));
        }
        if u32::try_from(self.agent_count).is_err() {
            return Err(SfmError::config(format!(
                "agent count {} exceeds the id space",
                self.agent_count
            )));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(SfmError::config(format!(
                "timestep must be finite and positive, got {}",
                self.timestep
            )));
        }
        if !self.center.is_finite() {
            return Err(SfmError::config(format!("center must be finite, got {}", self.center)));
        }
        for (name, value) in [
            ("inner radius", self.inner_radius),
            ("outer radius", self.outer_radius),
            ("local density radius", self.local_density_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SfmError::config(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        self.forces.validate()?;
        if let Some(wall) = &self.wall {
            wall.validate()?;
        }
        self.params.validate()
    }

    /// Construct a `SimClock` for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.timestep)
    }
}
