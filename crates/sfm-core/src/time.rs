//! Simulation time model.
//!
//! Time is a monotonically increasing `Step` counter.  The mapping to
//! simulated seconds is held in `SimClock`:
//!
//!   nominal_secs = step * timestep_secs
//!
//! Keeping the integer step canonical means arrival bookkeeping compares
//! exactly.  The clock also accumulates the seconds actually integrated,
//! since a driver may pass a `dt` other than the configured timestep.

use std::fmt;

// ── Step ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current step and converts steps to simulated seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds represented by one step.
    pub timestep_secs: f64,
    /// Number of completed steps.
    pub current_step: Step,
    /// Sum of every `dt` the clock has been advanced by.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new(timestep_secs: f64) -> Self {
        Self {
            timestep_secs,
            current_step: Step::ZERO,
            elapsed_secs: 0.0,
        }
    }

    /// Advance the clock by one nominal timestep.
    #[inline]
    pub fn advance(&mut self) {
        self.advance_by(self.timestep_secs);
    }

    /// Advance the clock by one step of `dt` seconds.
    #[inline]
    pub fn advance_by(&mut self, dt: f64) {
        self.current_step = self.current_step + 1;
        self.elapsed_secs += dt;
    }

    /// Simulated seconds integrated so far.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Nominal seconds at an arbitrary step (`step * timestep_secs`).
    #[inline]
    pub fn secs_at(&self, step: Step) -> f64 {
        step.0 as f64 * self.timestep_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_step, self.elapsed_secs())
    }
}
