//! Error types for sfm-metrics.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricsError {
    #[error("sample interval must be finite and positive, got {0}")]
    SampleInterval(f64),
}

/// Alias for `Result<T, MetricsError>`.
pub type MetricsResult<T> = Result<T, MetricsError>;
