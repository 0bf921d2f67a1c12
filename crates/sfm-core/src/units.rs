//! Unit conventions and fixed physical constants of the model.

/// Distance units (pixels) per metre.
///
/// Positions and radii are stored in distance units; the force model and
/// the velocity integrator work in metres and m/s.
pub const PIXELS_PER_METER: f64 = 100.0;

/// An agent whose centre comes closer than this (distance units) to its
/// goal is considered arrived and frozen.
pub const GOAL_PROXIMITY: f64 = 5.0;

/// Upper bound on acceleration magnitude, m/s².
///
/// Overlapping agents produce exponentially large repulsion; the cap keeps
/// a single step from launching them across the formation.
pub const MAX_ACCELERATION: f64 = 4.0;

/// Convert a length in distance units to metres.
#[inline]
pub fn to_meters(distance_units: f64) -> f64 {
    distance_units / PIXELS_PER_METER
}
