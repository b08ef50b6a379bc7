//! Extraction Error Types
//!
//! Extraction itself never fails: malformed HTML degrades to empty results.
//! The only fallible surface of this crate is validating the library
//! descriptors that come out of the manifest.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A library descriptor is missing a required value.
    #[display("invalid library descriptor, field '{field}' has value: {value:?}")]
    InvalidDescriptor {
        /// The offending field.
        field: &'static str,
        /// The value found in the manifest.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A manifest entry is either usable or it isn't.
        false
    }
}
