//! Best-effort extraction of cover previews and book records from the
//! loosely-structured HTML pages that hub libraries publish.

mod consts;
pub mod error;
mod extract;
pub mod models;
mod text;
mod truncate;
mod url;

use tracing::instrument;

pub use crate::consts::{
    DEFAULT_COVER_LIMIT, LIBRARY_PAGE, MAX_DOCUMENT_BYTES, MAX_RECORDS_PER_LIBRARY, MAX_SCANNED_CANDIDATES,
    MIN_COVER_DIMENSION, UNKNOWN_AUTHOR,
};
pub use crate::extract::Extractor;
use crate::models::{BookRecord, LibraryDescriptor};
pub use crate::truncate::safe_html_truncate;
pub use crate::url::resolve_url;

/// Cover-like image URLs found in a raw HTML document, as declared in the
/// markup (unresolved), at most `limit` of them.
///
/// Accepts raw bytes; invalid UTF-8 is replaced during parsing. Never fails.
///
/// ```rust
/// let html = r#"<img src="logo.png"><img src="covers/dune.jpg" width="200" height="300">"#;
/// assert_eq!(hub_extract::extract_covers(html, 6), vec!["covers/dune.jpg"]);
/// ```
#[instrument(skip(html), fields(html_size = html.as_ref().len()))]
pub fn extract_covers(html: impl AsRef<[u8]>, limit: usize) -> Vec<String> {
    Extractor::from_bytes(html.as_ref()).covers(limit)
}

/// Book records found in a raw HTML document, attributed to `library`.
///
/// Accepts raw bytes; invalid UTF-8 is replaced during parsing. Never fails.
///
/// ```rust
/// use hub_extract::models::LibraryDescriptor;
/// let library = LibraryDescriptor::new("ale", "ALE Gallery");
/// let books = hub_extract::extract_books("<article><h3>Dune</h3><p>by Frank Herbert</p></article>", &library);
/// assert_eq!(books[0].title, "Dune");
/// assert_eq!(books[0].author, "Frank Herbert");
/// ```
#[instrument(skip(html, library), fields(html_size = html.as_ref().len(), slug = %library.slug))]
pub fn extract_books(html: impl AsRef<[u8]>, library: &LibraryDescriptor) -> Vec<BookRecord> {
    Extractor::from_bytes(html.as_ref()).books(library)
}
