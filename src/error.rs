//! Error types for corpus loading and configuration

use std::io;
use thiserror::Error;

/// Reasons a corpus source could not be turned into an intent set.
///
/// The loading entry points degrade these to an empty set; only the
/// `try_*` variants and path reloads hand them to the caller.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("I/O error reading corpus: {0}")]
    Io(#[from] io::Error),

    /// The corpus was not valid JSON.
    #[error("JSON error in corpus: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but has no intent list where one is expected.
    #[error("Unexpected corpus shape: {0}")]
    Shape(String),
}

/// Rejected scoring configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON error in matcher config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}
