//! Error types for trip-optimizer operations.
//!
//! Not having enough availability data is not an error: it is reported as
//! [`Recommendation::InsufficientData`](crate::recommend::Recommendation).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    /// The caller broke the input contract (e.g. `start > end`, zero duration,
    /// negative participant count).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The availability data spans more calendar days than the configured bound.
    #[error("Availability span of {span_days} days exceeds the maximum of {max_days}")]
    SpanTooLarge { span_days: i64, max_days: i64 },

    /// JSON payload could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

/// Convert a signed count from an external boundary (JSON, JS numbers, CLI)
/// into the unsigned form the core works with.
pub fn non_negative(name: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        OptimizerError::InvalidArgument(format!(
            "{} must be between 0 and {}, got {}",
            name,
            u32::MAX,
            value
        ))
    })
}

/// Like [`non_negative`], but zero is rejected too.
pub fn positive(name: &str, value: i64) -> Result<u32> {
    match non_negative(name, value)? {
        0 => Err(OptimizerError::InvalidArgument(format!(
            "{} must be at least 1, got 0",
            name
        ))),
        v => Ok(v),
    }
}
