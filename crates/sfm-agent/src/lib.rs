//! `sfm-agent` — pedestrian state for the Social Force crowd simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`agent`]     | `Agent`, `PhysicalParams`, `Quadrant`                       |
//! | [`store`]     | `AgentStore` — ordered, id-indexed collection of `Agent`s   |
//! | [`builder`]   | `PopulationBuilder` — evenly spaced circle formation        |
//!
//! Agents carry no behaviour of their own.  The simulation crate computes
//! forces against a shared `&AgentStore` and then applies the results through
//! the narrow mutators on [`Agent`], which refuse to move a frozen agent.

pub mod agent;
pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use agent::{Agent, PhysicalParams, Quadrant};
pub use builder::PopulationBuilder;
pub use store::AgentStore;
