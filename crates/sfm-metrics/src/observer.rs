//! `MetricsObserver` — collects run statistics through `SimObserver` hooks.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use sfm_agent::Agent;
use sfm_core::units::to_meters;
use sfm_core::{AgentId, SimClock};
use sfm_sim::{RunOutcome, Sim, SimObserver};
use tracing::{debug, info};

use crate::row::{ArrivalRow, DensitySampleRow, TrajectoryRow};
use crate::{MetricsError, MetricsResult};

/// Tolerance when comparing accumulated simulated time to sample times.
const TIME_EPS: f64 = 1e-9;

/// A [`SimObserver`] that keeps inner-circle density samples, arrival
/// records and (optionally) sampled trajectories in memory.
///
/// Samples are taken at the end of the first step whose accumulated time
/// reaches each multiple of the sample interval.  Inner-circle membership is
/// tracked every step so dwell times are exact to one step.
pub struct MetricsObserver {
    sample_interval_secs: f64,
    next_sample_secs:     f64,
    record_trajectories:  bool,
    /// Entry time of every agent currently inside the inner circle.
    inside_since:         BTreeMap<AgentId, f64>,
    samples:              Vec<DensitySampleRow>,
    arrivals:             Vec<ArrivalRow>,
    trajectories:         Vec<TrajectoryRow>,
    outcome:              Option<RunOutcome>,
}

impl Default for MetricsObserver {
    /// Quarter-second sampling, trajectories off.
    fn default() -> Self {
        Self::with_interval(0.25)
    }
}

impl MetricsObserver {
    pub fn new(sample_interval_secs: f64) -> MetricsResult<Self> {
        if !(sample_interval_secs.is_finite() && sample_interval_secs > 0.0) {
            return Err(MetricsError::SampleInterval(sample_interval_secs));
        }
        Ok(Self::with_interval(sample_interval_secs))
    }

    fn with_interval(sample_interval_secs: f64) -> Self {
        Self {
            sample_interval_secs,
            next_sample_secs: sample_interval_secs,
            record_trajectories: false,
            inside_since: BTreeMap::new(),
            samples: Vec::new(),
            arrivals: Vec::new(),
            trajectories: Vec::new(),
            outcome: None,
        }
    }

    /// Also record every agent's position at each sample time.
    pub fn with_trajectories(mut self) -> Self {
        self.record_trajectories = true;
        self
    }

    pub fn sample_interval_secs(&self) -> f64 {
        self.sample_interval_secs
    }

    pub fn samples(&self) -> &[DensitySampleRow] {
        &self.samples
    }

    /// Arrivals in the order they happened.
    pub fn arrivals(&self) -> &[ArrivalRow] {
        &self.arrivals
    }

    pub fn trajectories(&self) -> &[TrajectoryRow] {
        &self.trajectories
    }

    /// How the observed run ended, once it has.
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// Mean arrival time over recorded arrivals, `None` before the first.
    pub fn mean_arrival_secs(&self) -> Option<f64> {
        mean(self.arrivals.iter().map(|r| r.time_secs))
    }

    pub fn mean_arrival_speed(&self) -> Option<f64> {
        mean(self.arrivals.iter().map(|r| r.speed))
    }

    /// Highest inner-circle density seen in any sample.
    pub fn peak_density_per_m2(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.density_per_m2).reduce(f64::max)
    }

    fn track_inner_circle(&mut self, sim: &Sim, now: f64) {
        let config = sim.config();
        let radius_sq = config.inner_radius * config.inner_radius;
        for agent in sim.agents() {
            if agent.position().distance_sq_to(config.center) <= radius_sq {
                self.inside_since.entry(agent.id()).or_insert(now);
            } else {
                self.inside_since.remove(&agent.id());
            }
        }
    }

    fn take_sample(&mut self, sim: &Sim, time_secs: f64) {
        let clock = sim.clock();
        let now = clock.elapsed_secs();
        let inside = sim.inner_circle_count();
        let radius_m = to_meters(sim.config().inner_radius);
        let density_per_m2 = inside as f64 / (PI * radius_m * radius_m);
        let mean_dwell_secs = mean(self.inside_since.values().map(|&since| now - since)).unwrap_or(0.0);

        self.samples.push(DensitySampleRow {
            step: clock.current_step.0,
            time_secs,
            inside,
            density_per_m2,
            mean_dwell_secs,
        });
        debug!(time_secs, inside, density_per_m2, mean_dwell_secs, "inner circle sampled");

        if self.record_trajectories {
            self.trajectories.extend(sim.agents().iter().map(|a| TrajectoryRow {
                agent_id: a.id().0,
                time_secs,
                x: a.position().x,
                y: a.position().y,
                arrived: a.target_reached(),
            }));
        }
    }
}

impl SimObserver for MetricsObserver {
    fn on_arrival(&mut self, agent: &Agent, clock: &SimClock) {
        // Agents frozen on their goal by the force pass arrive one step
        // before the clock reports.
        let step = agent.arrival_step().unwrap_or(clock.current_step);
        self.arrivals.push(ArrivalRow {
            agent_id:           agent.id().0,
            step:               step.0,
            time_secs:          clock.secs_at(step),
            speed:              agent.speed(),
            total_displacement: agent.total_displacement(),
        });
    }

    fn on_step_end(&mut self, sim: &Sim) {
        let now = sim.clock().elapsed_secs();
        self.track_inner_circle(sim, now);

        if now + TIME_EPS < self.next_sample_secs {
            return;
        }
        let time_secs = self.next_sample_secs;
        // A timestep longer than the interval skips the missed sample times.
        while self.next_sample_secs <= now + TIME_EPS {
            self.next_sample_secs += self.sample_interval_secs;
        }
        self.take_sample(sim, time_secs);
    }

    fn on_sim_end(&mut self, outcome: RunOutcome, _sim: &Sim) {
        self.outcome = Some(outcome);
        info!(
            steps     = outcome.steps(),
            arrived   = self.arrivals.len(),
            samples   = self.samples.len(),
            converged = outcome.is_converged(),
            "metrics collected"
        );
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (n, sum) = values.fold((0usize, 0.0), |(n, sum), v| (n + 1, sum + v));
    (n > 0).then(|| sum / n as f64)
}
