//! Aggregate occupancy statistics over the current agent state.
//!
//! Every query is a pure function of its inputs: no caching, no side effects.
//! Two calls without an intervening integration step return identical
//! results.

use std::f64::consts::PI;

use sfm_agent::Agent;
use sfm_core::{AgentId, Vec2};

#[cfg(not(feature = "fx-hash"))]
type ZoneMap = std::collections::HashMap<ZoneKey, f64>;
#[cfg(feature = "fx-hash")]
type ZoneMap = rustc_hash::FxHashMap<ZoneKey, f64>;

/// Agents whose centre lies within `radius` of `center`, boundary inclusive.
pub fn zone_count<'a>(agents: impl IntoIterator<Item = &'a Agent>, center: Vec2, radius: f64) -> usize {
    if !(radius >= 0.0) {
        return 0;
    }
    let radius_sq = radius * radius;
    agents
        .into_iter()
        .filter(|a| a.position().distance_sq_to(center) <= radius_sq)
        .count()
}

/// [`zone_count`] per unit area of the disc.  Units: agents per
/// distance-unit².
///
/// A non-positive radius has no area and yields `0.0`.
pub fn zone_density<'a>(agents: impl IntoIterator<Item = &'a Agent>, center: Vec2, radius: f64) -> f64 {
    if !(radius > 0.0) {
        return 0.0;
    }
    zone_count(agents, center, radius) as f64 / (PI * radius * radius)
}

/// Density of *other* agents in the disc of `radius` around `agents[index]`.
pub fn local_density(agents: &[Agent], index: usize, radius: f64) -> f64 {
    if !(radius > 0.0) {
        return 0.0;
    }
    let me = &agents[index];
    let radius_sq = radius * radius;
    let count = agents
        .iter()
        .enumerate()
        .filter(|&(j, other)| {
            j != index && other.position().distance_sq_to(me.position()) <= radius_sq
        })
        .count();
    count as f64 / (PI * radius_sq)
}

/// Number of agents with `x_min <= x <= x_max` and their mean speed (m/s).
///
/// An empty selection returns `(0, 0.0)`.
pub fn corridor_occupancy_and_speed<'a>(
    agents: impl IntoIterator<Item = &'a Agent>,
    x_min: f64,
    x_max: f64,
) -> (usize, f64) {
    let (count, speed_sum) = agents
        .into_iter()
        .filter(|a| (x_min..=x_max).contains(&a.position().x))
        .fold((0usize, 0.0), |(n, sum), a| (n + 1, sum + a.speed()));
    if count == 0 {
        (0, 0.0)
    } else {
        (count, speed_sum / count as f64)
    }
}

// ── DensityMap ────────────────────────────────────────────────────────────────

/// Zone identifier in a [`DensityMap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ZoneKey {
    /// The configured inner measurement circle.
    InnerCircle,
    /// Neighbourhood of one agent.
    Agent(AgentId),
}

/// Snapshot of all zone densities, rebuilt on every request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DensityMap {
    zones: ZoneMap,
}

impl DensityMap {
    /// Compute the inner-circle density and one local density per agent.
    pub fn build(
        agents: &[Agent],
        inner_center: Vec2,
        inner_radius: f64,
        local_radius: f64,
    ) -> Self {
        let mut zones = ZoneMap::default();
        zones.insert(ZoneKey::InnerCircle, zone_density(agents, inner_center, inner_radius));
        for (i, agent) in agents.iter().enumerate() {
            zones.insert(ZoneKey::Agent(agent.id()), local_density(agents, i, local_radius));
        }
        Self { zones }
    }

    pub fn get(&self, key: ZoneKey) -> Option<f64> {
        self.zones.get(&key).copied()
    }

    pub fn inner_circle(&self) -> f64 {
        self.get(ZoneKey::InnerCircle).unwrap_or(0.0)
    }

    pub fn agent(&self, id: AgentId) -> Option<f64> {
        self.get(ZoneKey::Agent(id))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ZoneKey, f64)> + '_ {
        self.zones.iter().map(|(k, v)| (*k, *v))
    }
}
