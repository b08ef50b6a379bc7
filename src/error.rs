//! CLI Error Types
//!
//! Each variant names the stage that failed; the underlying crate error is
//! kept as the cause.

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not open the site")]
    Site,
    #[display("could not load the library manifest")]
    Manifest,
    #[display("no library named '{_0}' in the manifest")]
    UnknownLibrary(#[error(not(source))] String),
    #[display("could not render the hub page")]
    Render,
    #[display("could not write output")]
    Output,
    #[display("audio unavailable")]
    Audio,
}
