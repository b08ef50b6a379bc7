//! Index Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An index error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Only [`Manifest`](ErrorKind::Manifest) ever reaches callers of the
/// builder; per-library failures are turned into skipped outcomes.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The library manifest could not be read or understood. Nothing can be
    /// listed or indexed without it.
    #[display("library manifest unavailable: {_0}")]
    Manifest(#[error(not(source))] String),
    /// The library's slug does not make a usable page path.
    #[display("invalid library slug: {_0:?}")]
    InvalidSlug(#[error(not(source))] String),
    /// The library's page could not be fetched.
    #[display("library '{slug}' page unavailable: {cause}")]
    Fetch {
        /// Library slug.
        slug: String,
        /// What the site backend reported.
        cause: String,
    },
    /// The library's page took longer than the configured limit.
    #[display("library '{slug}' page timed out after {millis}ms")]
    Timeout {
        /// Library slug.
        slug: String,
        /// The configured limit.
        millis: u128,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Nothing is retried within a run; a skipped library shows up again on
    /// the next one if it has recovered.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Timeout { .. })
    }
}
