//! Render Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Templates are embedded at build time, so either of these is a bug in the
/// hub rather than anything the user did.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Embedded template is missing or not UTF-8.
    #[display("template asset not found: {_0}")]
    AssetNotFound(#[error(not(source))] String),
    /// Template failed to compile or render.
    #[display("template {_0} failed")]
    Template(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
