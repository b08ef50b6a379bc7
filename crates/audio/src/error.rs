//! Audio Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An audio error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for audio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// None of these are fatal to the hub: without sound, everything else still
/// works.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No output device could be opened; the session stays locked.
    #[display("audio output unavailable: {_0}")]
    Unavailable(#[error(not(source))] String),
    /// The tone can't be synthesized.
    #[display("invalid tone: {_0}")]
    InvalidTone(#[error(not(source))] String),
    /// The background music couldn't be loaded or played.
    #[display("music unavailable: {_0}")]
    Music(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// A device can appear later (headphones plugged in), so unlocking is
    /// worth another try. A bad tone stays bad.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Music(_))
    }
}
