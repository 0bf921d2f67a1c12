//! `sfm-metrics` — run statistics for the Social Force crowd simulation.
//!
//! [`MetricsObserver`] implements `sfm_sim::SimObserver` and keeps three
//! tables in memory:
//!
//! | Row                  | Recorded                                            |
//! |----------------------|-----------------------------------------------------|
//! | [`DensitySampleRow`] | every sample interval: inner-circle count, density (agents/m²), mean dwell |
//! | [`ArrivalRow`]       | once per agent: arrival time, speed, path length    |
//! | [`TrajectoryRow`]    | every sample interval, per agent (opt-in)           |
//!
//! Nothing is written to disk; callers decide how to export the rows.
//!
//! # Usage
//!
//! ```rust
//! use sfm_metrics::MetricsObserver;
//! use sfm_sim::Sim;
//!
//! let mut sim = Sim::create(4, 0.005, 540.0, 355.0, 1.0, 200.0, 42).unwrap();
//! let mut metrics = MetricsObserver::default();
//! sim.run(200_000, &mut metrics);
//! assert_eq!(metrics.arrivals().len(), 4);
//! ```

pub mod error;
pub mod observer;
pub mod row;

#[cfg(test)]
mod tests;

pub use error::{MetricsError, MetricsResult};
pub use observer::MetricsObserver;
pub use row::{ArrivalRow, DensitySampleRow, TrajectoryRow};
