//! Deterministic per-agent RNG wrapper.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! Consequences:
//!
//! - The same run seed always draws the same physical parameters.
//! - Agent `k`'s draws do not depend on how many agents precede or follow
//!   it, so growing a population keeps existing agents' parameters.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-agent deterministic RNG, used once at population build time to draw
/// the agent's physical parameters.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run seed and an agent ID.
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let seed = run_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw in the closed interval `[min, max]`.
    ///
    /// A degenerate interval (`min == max`) returns `min` without consuming
    /// randomness, so constant parameters leave the stream untouched.
    #[inline]
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            min
        } else {
            self.0.gen_range(min..=max)
        }
    }
}
