//! Error types for txgraph-stream.

use thiserror::Error;

/// Result type for stream operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A state snapshot could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a single input line produced no event.
///
/// Never fatal: the driver logs it and moves on to the next line.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The line is not a JSON object of the expected shape.
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is absent.
    #[error("{0} missing")]
    MissingField(&'static str),

    /// The `created_time` field could not be read as an instant.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}
