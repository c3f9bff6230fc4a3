//! Errors at the serialization boundary.
//!
//! The transformation itself never fails: degraded input becomes a warning
//! in the output. Only decoding the JSON envelope or encoding the result can
//! go wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("component input parse error: {0}")]
    InvalidInput(#[source] serde_json::Error),

    #[error("transform options parse error: {0}")]
    InvalidOptions(#[source] serde_json::Error),

    #[error("output serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(feature = "napi")]
impl From<TransformError> for napi::Error {
    fn from(err: TransformError) -> Self {
        napi::Error::from_reason(err.to_string())
    }
}
