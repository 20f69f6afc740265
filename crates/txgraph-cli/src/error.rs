//! Error types for the rolling-median binary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the binary.
#[derive(Debug, Error)]
pub enum Error {
    /// Could not open or create a file.
    #[error("Cannot open {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stream run failed part way.
    #[error(transparent)]
    Stream(#[from] txgraph_stream::Error),
}

/// Rejected configuration input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag the binary does not know.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// More positional arguments than INPUT and OUTPUT.
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// An environment variable held an unusable value.
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}
