//! Core error type.
//!
//! Configuration problems are the only failure the physics core reports;
//! degenerate geometry is handled fail-soft inside the force model and never
//! surfaces here.

use thiserror::Error;

use crate::AgentId;

/// The base error type for `sfm-core` and the crates built on it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SfmError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SfmError {
    /// Shorthand for `SfmError::Config(msg.into())`.
    pub fn config(msg: impl Into<String>) -> Self {
        SfmError::Config(msg.into())
    }
}

/// Shorthand result type for all `sfm-*` crates.
pub type SfmResult<T> = Result<T, SfmError>;
