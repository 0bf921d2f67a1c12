//! Simulation observer trait for progress reporting and data collection.

use sfm_agent::Agent;
use sfm_core::{SimClock, Step};

use crate::Sim;

/// How a call to [`Sim::run`] ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every agent reached its target after `steps` steps of this run.
    Converged { steps: u64 },
    /// The step limit ran out first.
    StepLimit { steps: u64 },
}

impl RunOutcome {
    pub fn steps(self) -> u64 {
        match self {
            RunOutcome::Converged { steps } | RunOutcome::StepLimit { steps } => steps,
        }
    }

    pub fn is_converged(self) -> bool {
        matches!(self, RunOutcome::Converged { .. })
    }
}

/// Callbacks invoked by [`Sim::run`] at key points in the step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl SimObserver for ArrivalPrinter {
///     fn on_arrival(&mut self, agent: &Agent, clock: &SimClock) {
///         println!("{} arrived at {clock}", agent.id());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before the force pass.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called once per agent that reached its target during the step, after
    /// integration.  `clock` already counts the completed step.
    fn on_arrival(&mut self, _agent: &Agent, _clock: &SimClock) {}

    /// Called at the end of each step with read-only access to the whole
    /// simulation, so collectors can sample densities or positions.
    fn on_step_end(&mut self, _sim: &Sim) {}

    /// Called once when `run` returns.
    fn on_sim_end(&mut self, _outcome: RunOutcome, _sim: &Sim) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
