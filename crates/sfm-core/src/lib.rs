//! `sfm-core` — foundational types for the Social Force crowd simulation.
//!
//! This crate is a dependency of every other `sfm-*` crate.  It has no
//! `sfm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                                  |
//! | [`vec2`]        | `Vec2` (f64 planar vector)                                 |
//! | [`units`]       | pixel/metre conversion, goal proximity, acceleration cap   |
//! | [`time`]        | `Step`, `SimClock`                                         |
//! | [`rng`]         | `AgentRng` (per-agent parameter draws)                     |
//! | [`config`]      | `SimConfig`, `ForceParams`, `WallConfig`, `FrictionMode`, `ParameterRanges` |
//! | [`error`]       | `SfmError`, `SfmResult`                                    |
//!
//! # Units
//!
//! Positions and radii are in *distance units* (screen pixels of the
//! default circle scenario).  Velocities are in m/s, accelerations in m/s², and
//! the force model works in metres; [`units::PIXELS_PER_METER`] converts.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod units;
pub mod vec2;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FrictionMode, ForceParams, ParamRange, ParameterRanges, SimConfig, WallConfig};
pub use error::{SfmError, SfmResult};
pub use ids::AgentId;
pub use rng::AgentRng;
pub use time::{SimClock, Step};
pub use vec2::Vec2;
