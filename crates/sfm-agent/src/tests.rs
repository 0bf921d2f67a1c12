//! Unit tests for sfm-agent.

#[cfg(test)]
mod agent {
    use sfm_core::{AgentId, Step, Vec2};

    use crate::{Agent, PhysicalParams, Quadrant};

    fn params() -> PhysicalParams {
        PhysicalParams { radius: 5.0, mass: 60.0, desired_speed: 1.0, relaxation_time: 0.04 }
    }

    fn walker() -> Agent {
        Agent::new(
            AgentId(0),
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            params(),
            Quadrant::First,
        )
        .unwrap()
    }

    #[test]
    fn starts_at_rest() {
        let a = walker();
        assert_eq!(a.velocity(), Vec2::ZERO);
        assert_eq!(a.acceleration(), Vec2::ZERO);
        assert!(!a.target_reached());
        assert_eq!(a.total_displacement(), 0.0);
        assert_eq!(a.arrival_step(), None);
        assert_eq!(a.distance_to_goal(), 100.0);
    }

    #[test]
    fn spawn_equal_to_goal_rejected() {
        let p = Vec2::new(3.0, 4.0);
        assert!(Agent::new(AgentId(0), p, p, params(), Quadrant::First).is_err());
    }

    #[test]
    fn non_finite_spawn_rejected() {
        let nan = Vec2::new(f64::NAN, 0.0);
        assert!(Agent::new(AgentId(0), nan, Vec2::ZERO, params(), Quadrant::First).is_err());
    }

    #[test]
    fn invalid_params_rejected() {
        let (spawn, goal) = (Vec2::ZERO, Vec2::new(100.0, 0.0));
        for bad in [
            PhysicalParams { radius: -5.0, ..params() },
            PhysicalParams { mass: 0.0, ..params() },
            PhysicalParams { desired_speed: f64::NAN, ..params() },
            PhysicalParams { relaxation_time: 0.0, ..params() },
        ] {
            assert!(bad.validate().is_err(), "{bad:?}");
            assert!(Agent::new(AgentId(3), spawn, goal, bad, Quadrant::First).is_err(), "{bad:?}");
        }
        assert!(params().validate().is_ok());
    }

    #[test]
    fn advance_accumulates_path_length() {
        let mut a = walker();
        a.advance(Vec2::new(1.0, 0.0), Vec2::new(3.0, 4.0));
        a.advance(Vec2::new(1.0, 0.0), Vec2::new(-3.0, -4.0));
        assert_eq!(a.position(), Vec2::ZERO);
        assert_eq!(a.total_displacement(), 10.0);
        assert_eq!(a.speed(), 1.0);
    }

    #[test]
    fn frozen_agent_ignores_mutators() {
        let mut a = walker();
        a.advance(Vec2::new(0.5, 0.0), Vec2::new(10.0, 0.0));
        a.freeze(Step(7));
        let before = a.clone();

        a.set_acceleration(Vec2::new(4.0, 0.0));
        a.advance(Vec2::new(2.0, 2.0), Vec2::new(50.0, 0.0));
        a.freeze(Step(9));

        assert_eq!(a, before);
        assert_eq!(a.arrival_step(), Some(Step(7)));
    }
}

#[cfg(test)]
mod quadrant {
    use sfm_core::Vec2;

    use crate::Quadrant;

    #[test]
    fn classify_relative_to_center() {
        let c = Vec2::new(540.0, 355.0);
        assert_eq!(Quadrant::classify(Vec2::new(740.0, 355.0), c), Quadrant::First);
        assert_eq!(Quadrant::classify(Vec2::new(340.0, 300.0), c), Quadrant::Second);
        assert_eq!(Quadrant::classify(Vec2::new(340.0, 400.0), c), Quadrant::Third);
        assert_eq!(Quadrant::classify(Vec2::new(540.0, 555.0), c), Quadrant::Fourth);
    }

    #[test]
    fn display_and_number() {
        assert_eq!(Quadrant::Third.number(), 3);
        assert_eq!(Quadrant::Second.to_string(), "Q2");
    }
}

#[cfg(test)]
mod builder {
    use approx::assert_relative_eq;
    use sfm_core::{AgentId, ParameterRanges, Vec2};

    use crate::PopulationBuilder;

    const CENTER: Vec2 = Vec2::new(540.0, 355.0);

    #[test]
    fn correct_count_and_ids() {
        let store = PopulationBuilder::new(50, 1).build().unwrap();
        assert_eq!(store.len(), 50);
        let ids: Vec<AgentId> = store.agent_ids().take(3).collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
    }

    #[test]
    fn cardinal_points_and_antipodal_goals() {
        let store = PopulationBuilder::new(4, 0).center(CENTER).radius(200.0).build().unwrap();
        let expected = [
            Vec2::new(740.0, 355.0),
            Vec2::new(540.0, 555.0),
            Vec2::new(340.0, 355.0),
            Vec2::new(540.0, 155.0),
        ];
        for (agent, want) in store.iter().zip(expected) {
            assert_relative_eq!(agent.position().x, want.x, epsilon = 1e-9);
            assert_relative_eq!(agent.position().y, want.y, epsilon = 1e-9);
            let mid = (agent.position() + agent.goal()) * 0.5;
            assert_relative_eq!(mid.x, CENTER.x, epsilon = 1e-9);
            assert_relative_eq!(mid.y, CENTER.y, epsilon = 1e-9);
            assert_relative_eq!(agent.distance_to_goal(), 400.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn parameters_within_documented_ranges() {
        let store = PopulationBuilder::new(200, 7).build().unwrap();
        for a in &store {
            let p = a.params();
            assert!((50.0..=70.0).contains(&p.mass), "mass {}", p.mass);
            assert!((5.0..=7.5).contains(&p.radius), "radius {}", p.radius);
            assert!((0.6..=1.2).contains(&p.desired_speed), "speed {}", p.desired_speed);
            assert_eq!(p.relaxation_time, 0.04);
        }
    }

    #[test]
    fn same_seed_same_population() {
        let a = PopulationBuilder::new(10, 99).build().unwrap();
        let b = PopulationBuilder::new(10, 99).build().unwrap();
        assert_eq!(a, b);
        let c = PopulationBuilder::new(10, 100).build().unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn uniform_ranges_give_identical_agents() {
        let store = PopulationBuilder::new(6, 5)
            .ranges(ParameterRanges::uniform(60.0, 5.0, 0.9, 0.04))
            .build()
            .unwrap();
        let first = *store.iter().next().unwrap().params();
        assert!(store.iter().all(|a| *a.params() == first));
    }

    #[test]
    fn bad_radius_rejected() {
        assert!(PopulationBuilder::new(4, 0).radius(0.0).build().is_err());
    }

    #[test]
    fn zero_agents_builds_empty_store() {
        let store = PopulationBuilder::new(0, 0).build().unwrap();
        assert!(store.is_empty());
        assert!(store.all_arrived());
    }
}

#[cfg(test)]
mod store {
    use sfm_core::{AgentId, SfmError, Step, Vec2};

    use crate::{Agent, AgentStore, PhysicalParams, Quadrant};

    fn agent(id: u32, x: f64) -> Agent {
        let params =
            PhysicalParams { radius: 5.0, mass: 60.0, desired_speed: 1.0, relaxation_time: 0.04 };
        Agent::new(AgentId(id), Vec2::new(x, 0.0), Vec2::new(x, 100.0), params, Quadrant::First)
            .unwrap()
    }

    #[test]
    fn ids_must_follow_order() {
        assert!(AgentStore::from_agents(vec![agent(0, 0.0), agent(1, 10.0)]).is_ok());
        assert!(AgentStore::from_agents(vec![agent(1, 0.0)]).is_err());
    }

    #[test]
    fn lookup_and_arrivals() {
        let mut store = AgentStore::from_agents(vec![agent(0, 0.0), agent(1, 10.0)]).unwrap();
        assert_eq!(store.get(AgentId(1)).unwrap().position().x, 10.0);
        assert!(store.get(AgentId(2)).is_none());
        assert_eq!(store.require(AgentId(5)).unwrap_err(), SfmError::AgentNotFound(AgentId(5)));

        assert_eq!(store.arrived_count(), 0);
        store.get_mut(AgentId(0)).unwrap().freeze(Step(1));
        assert_eq!(store.arrived_count(), 1);
        assert!(!store.all_arrived());
        store.get_mut(AgentId(1)).unwrap().freeze(Step(2));
        assert!(store.all_arrived());
    }
}
