//! `sfm-sim` — Social Force physics core for the crowd simulation.
//!
//! # Two-phase step
//!
//! ```text
//! until every agent has target_reached:
//!   ① Forces     — compute phase reads &AgentStore and yields one
//!                  ForceOutcome per agent (parallel with `parallel`).
//!                  Apply phase, ascending AgentId:
//!                    Accelerate(a) → store clamped acceleration
//!                    AtGoal        → freeze (goal direction undefined)
//!                    Frozen        → nothing
//!   ② Integrate  — v' = v + a·dt
//!                  x' = x + (v + v')/2 · dt · PIXELS_PER_METER
//!                  freeze when |x' − goal| < GOAL_PROXIMITY
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`force`]    | `ForceModel`, per-term force functions, `ForceBreakdown`  |
//! | [`density`]  | zone / local / corridor density queries, `DensityMap`     |
//! | [`sim`]      | `Sim` — state, stepping, `run`                            |
//! | [`builder`]  | `SimBuilder` — validation and population placement        |
//! | [`observer`] | `SimObserver`, `NoopObserver`, `RunOutcome`               |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the force compute phase on Rayon's thread pool.   |
//! | `fx-hash`  | FxHash instead of SipHash for `DensityMap`.            |
//!
//! # Quick-start
//!
//! ```rust
//! use sfm_sim::{NoopObserver, Sim};
//!
//! let mut sim = Sim::create(4, 0.005, 540.0, 355.0, 1.0, 200.0, 42).unwrap();
//! let outcome = sim.run(200_000, &mut NoopObserver);
//! assert!(outcome.is_converged());
//! ```

pub mod builder;
pub mod density;
pub mod error;
pub mod force;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use density::{DensityMap, ZoneKey};
pub use error::{SimError, SimResult};
pub use force::{ForceBreakdown, ForceModel, ForceOutcome};
pub use observer::{NoopObserver, RunOutcome, SimObserver};
pub use sim::{Sim, StepReport};
