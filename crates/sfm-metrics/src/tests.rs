//! Unit tests for sfm-metrics.

use sfm_core::SimConfig;
use sfm_sim::{Sim, SimBuilder};

fn four_agents(inner_radius: f64) -> Sim {
    SimBuilder::new(SimConfig { agent_count: 4, inner_radius, ..SimConfig::default() })
        .build()
        .unwrap()
}

#[cfg(test)]
mod construction {
    use crate::{MetricsError, MetricsObserver};

    #[test]
    fn default_samples_every_quarter_second() {
        let m = MetricsObserver::default();
        assert_eq!(m.sample_interval_secs(), 0.25);
        assert!(m.samples().is_empty());
        assert_eq!(m.outcome(), None);
        assert_eq!(m.mean_arrival_secs(), None);
    }

    #[test]
    fn invalid_interval_rejected() {
        assert_eq!(MetricsObserver::new(0.0).err(), Some(MetricsError::SampleInterval(0.0)));
        assert!(MetricsObserver::new(-1.0).is_err());
        assert!(MetricsObserver::new(f64::INFINITY).is_err());
        assert!(MetricsObserver::new(0.1).is_ok());
    }
}

#[cfg(test)]
mod sampling {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use sfm_sim::RunOutcome;

    use super::*;
    use crate::MetricsObserver;

    #[test]
    fn samples_on_interval_boundaries() {
        let mut sim = four_agents(1.0);
        let mut m = MetricsObserver::default();
        let outcome = sim.run(200, &mut m);

        assert_eq!(outcome, RunOutcome::StepLimit { steps: 200 });
        assert_eq!(m.outcome(), Some(outcome));
        let steps: Vec<u64> = m.samples().iter().map(|s| s.step).collect();
        assert_eq!(steps, [50, 100, 150, 200]);
        for (k, s) in m.samples().iter().enumerate() {
            assert_relative_eq!(s.time_secs, 0.25 * (k + 1) as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn empty_inner_circle_has_zero_density_and_dwell() {
        let mut sim = four_agents(1.0);
        let mut m = MetricsObserver::default();
        sim.run(50, &mut m);
        let s = m.samples()[0];
        assert_eq!(s.inside, 0);
        assert_eq!(s.density_per_m2, 0.0);
        assert_eq!(s.mean_dwell_secs, 0.0);
    }

    #[test]
    fn density_in_agents_per_square_metre() {
        // A 250-unit circle (2.5 m) holds the whole formation at the start.
        let mut sim = four_agents(250.0);
        let mut m = MetricsObserver::default();
        sim.run(50, &mut m);

        let s = m.samples()[0];
        assert_eq!(s.inside, 4);
        assert_relative_eq!(s.density_per_m2, 4.0 / (PI * 2.5 * 2.5), max_relative = 1e-12);
        // Inside since the end of step 1.
        assert_relative_eq!(s.mean_dwell_secs, 0.245, epsilon = 1e-9);
        assert_eq!(m.peak_density_per_m2(), Some(s.density_per_m2));
    }

    #[test]
    fn trajectories_are_opt_in() {
        let mut sim = four_agents(1.0);
        let mut plain = MetricsObserver::default();
        sim.run(100, &mut plain);
        assert!(plain.trajectories().is_empty());

        let mut sim = four_agents(1.0);
        let mut traced = MetricsObserver::default().with_trajectories();
        sim.run(100, &mut traced);
        assert_eq!(traced.trajectories().len(), 2 * 4);
        let last = traced.trajectories().last().unwrap();
        let agent = sim.agents().as_slice().last().unwrap();
        assert_eq!(last.agent_id, agent.id().0);
        assert_eq!((last.x, last.y), (agent.position().x, agent.position().y));
    }
}

#[cfg(test)]
mod arrivals {
    use approx::assert_relative_eq;

    use super::*;
    use crate::MetricsObserver;

    #[test]
    fn every_agent_recorded_once() {
        let mut sim = four_agents(1.0);
        let mut m = MetricsObserver::default();
        let outcome = sim.run(200_000, &mut m);
        assert!(outcome.is_converged());

        let mut ids: Vec<u32> = m.arrivals().iter().map(|r| r.agent_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, [0, 1, 2, 3]);

        let dt = sim.config().timestep;
        for r in m.arrivals() {
            let agent = sim.agents().as_slice()[r.agent_id as usize].clone();
            assert_eq!(agent.arrival_step().map(|s| s.0), Some(r.step));
            assert_relative_eq!(r.time_secs, r.step as f64 * dt, epsilon = 1e-9);
            assert_eq!(r.speed, agent.speed());
            assert_eq!(r.total_displacement, agent.total_displacement());
            // Spawn and goal are 400 units apart; arrival is within 5.
            assert!(r.total_displacement > 395.0 - 1e-9);
        }
        assert!(m.mean_arrival_secs().unwrap() > 0.0);
        assert!(m.mean_arrival_speed().unwrap() > 0.0);
    }

    #[test]
    fn agent_starting_on_goal_arrives_at_step_zero() {
        use sfm_agent::{Agent, AgentStore, PhysicalParams, Quadrant};
        use sfm_core::{AgentId, Step, Vec2};

        let params =
            PhysicalParams { radius: 5.0, mass: 60.0, desired_speed: 1.0, relaxation_time: 0.5 };
        let mut agent =
            Agent::new(AgentId(0), Vec2::ZERO, Vec2::new(10.0, 0.0), params, Quadrant::First)
                .unwrap();
        agent.advance(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let config = SimConfig { agent_count: 1, wall: None, ..SimConfig::default() };
        let mut sim = SimBuilder::new(config)
            .agents(AgentStore::from_agents(vec![agent]).unwrap())
            .build()
            .unwrap();

        let mut m = MetricsObserver::default();
        assert!(sim.run(10, &mut m).is_converged());
        let arrived = sim.agent(AgentId(0)).unwrap().arrival_step();
        assert_eq!(arrived, Some(Step::ZERO));
        assert_eq!(m.arrivals().len(), 1);
        assert_eq!(m.arrivals()[0].step, 0);
        assert_eq!(m.arrivals()[0].time_secs, 0.0);
    }
}
