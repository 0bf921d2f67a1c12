//! Unit tests for sfm-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display_uses_spawn_label() {
        assert_eq!(AgentId(7).to_string(), "o7");
    }
}

#[cfg(test)]
mod vec2 {
    use approx::assert_relative_eq;

    use crate::Vec2;

    #[test]
    fn length_and_distance() {
        let v = Vec2::new(3.0, 4.0);
        assert_relative_eq!(v.length(), 5.0);
        assert_relative_eq!(Vec2::ZERO.distance_to(v), 5.0);
        assert_relative_eq!(v.length_sq(), 25.0);
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(Vec2::ZERO.try_normalize().is_none());
        assert!(Vec2::ZERO.normalize_with_length().is_none());
    }

    #[test]
    fn normalize_is_unit() {
        let n = Vec2::new(-2.0, 2.0).try_normalize().unwrap();
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn clamp_length_caps_only_long_vectors() {
        let long = Vec2::new(30.0, 40.0).clamp_length(4.0);
        assert_relative_eq!(long.length(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(long.x / long.y, 0.75, epsilon = 1e-12);

        let short = Vec2::new(1.0, 1.0);
        assert_eq!(short.clamp_length(4.0), short);
    }

    #[test]
    fn reflect_through_center() {
        let c = Vec2::new(540.0, 355.0);
        let p = Vec2::new(740.0, 355.0);
        assert_eq!(p.reflect_through(c), Vec2::new(340.0, 355.0));
    }

    #[test]
    fn sum_of_vectors() {
        let total: Vec2 = [Vec2::new(1.0, 2.0), Vec2::new(-3.0, 0.5)].into_iter().sum();
        assert_eq!(total, Vec2::new(-2.0, 2.5));
    }
}

#[cfg(test)]
mod time {
    use approx::assert_relative_eq;

    use crate::{SimClock, Step};

    #[test]
    fn step_arithmetic() {
        assert_eq!(Step(10) + 5, Step(15));
        assert_eq!(Step::ZERO + 1, Step(1));
        assert_eq!(Step(7).to_string(), "S7");
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.005);
        assert_eq!(clock.elapsed_secs(), 0.0);
        for _ in 0..200 {
            clock.advance();
        }
        assert_eq!(clock.current_step, Step(200));
        assert_relative_eq!(clock.elapsed_secs(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(clock.secs_at(Step(200)), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn advance_by_tracks_actual_dt() {
        let mut clock = SimClock::new(0.005);
        clock.advance_by(0.01);
        clock.advance();
        assert_eq!(clock.current_step, Step(2));
        assert_relative_eq!(clock.elapsed_secs(), 0.015, epsilon = 1e-12);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            assert_eq!(r1.uniform(50.0, 70.0), r2.uniform(50.0, 70.0));
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a = r0.uniform(0.0, 1.0);
        let b = r1.uniform(0.0, 1.0);
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn uniform_in_closed_bounds() {
        let mut rng = AgentRng::new(0, AgentId(0));
        for _ in 0..1000 {
            let v = rng.uniform(5.0, 7.5);
            assert!((5.0..=7.5).contains(&v));
        }
    }

    #[test]
    fn degenerate_interval_does_not_consume() {
        let mut a = AgentRng::new(9, AgentId(3));
        let mut b = AgentRng::new(9, AgentId(3));
        assert_eq!(a.uniform(0.04, 0.04), 0.04);
        assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
    }
}

#[cfg(test)]
mod config {
    use crate::{ForceParams, ParamRange, ParameterRanges, SfmError, SimConfig, Vec2, WallConfig};

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.agent_count, 50);
        assert_eq!(cfg.center, Vec2::new(540.0, 355.0));
        assert_eq!(cfg.make_clock().timestep_secs, 0.005);
    }

    #[test]
    fn zero_agents_rejected() {
        let cfg = SimConfig { agent_count: 0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(SfmError::Config(_))));
    }

    #[test]
    fn bad_timestep_rejected() {
        for dt in [0.0, -0.005, f64::NAN, f64::INFINITY] {
            let cfg = SimConfig { timestep: dt, ..SimConfig::default() };
            assert!(cfg.validate().is_err(), "timestep {dt} should be rejected");
        }
    }

    #[test]
    fn non_positive_radius_rejected() {
        let cfg = SimConfig { inner_radius: 0.0, ..SimConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("inner radius"), "{err}");

        let cfg = SimConfig { outer_radius: -1.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_param_range_rejected() {
        let mut params = ParameterRanges::default();
        params.radius = ParamRange::new(7.5, 5.0);
        let cfg = SimConfig { params, ..SimConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("radius"), "{err}");
    }

    #[test]
    fn non_positive_repulsion_range_rejected() {
        let forces = ForceParams { repulsion_range: -0.08, ..ForceParams::default() };
        assert!(forces.validate().is_err());
    }

    #[test]
    fn unordered_wall_rejected() {
        let wall = WallConfig { upper_edge: 500.0, lower_edge: 300.0, ..WallConfig::default() };
        let cfg = SimConfig { wall: Some(wall), ..SimConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = SimConfig { wall: None, ..SimConfig::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn uniform_ranges_are_constant() {
        let r = ParameterRanges::uniform(60.0, 5.0, 0.9, 0.04);
        assert!(r.mass.is_constant());
        assert!(r.relaxation_time.contains(0.04));
        assert!(r.validate().is_ok());
    }
}
