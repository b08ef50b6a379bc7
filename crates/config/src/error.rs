//! Config Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested config file doesn't exist.
    #[display("config file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The file extension isn't one of `toml`, `yaml`, `yml` or `json`.
    #[display("unsupported config format: {}", _0.display())]
    UnsupportedFormat(#[error(not(source))] PathBuf),
    /// A source couldn't be parsed into the config shape.
    #[display("malformed configuration: {_0}")]
    Parse(#[error(not(source))] String),
    /// Parsed fine, but a value is out of range.
    #[display("invalid {field}: {reason}")]
    Invalid {
        /// Dotted key, e.g. `index.concurrency`.
        field: &'static str,
        reason: String,
    },
}

impl ErrorKind {
    /// Configuration problems need a human; retrying never helps.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
