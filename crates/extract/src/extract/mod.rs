//! Heuristic extraction of covers and book records from library pages.

mod books;
mod covers;

use std::borrow::Cow;
use std::convert::Infallible;
use std::str::FromStr;

use scraper::Html;
use tracing::instrument;

use crate::models::{BookRecord, LibraryDescriptor};
use crate::{MAX_DOCUMENT_BYTES, safe_html_truncate};

/// A parsed library page, ready to be queried.
///
/// Parsing never fails: the HTML5 parser always produces a best-effort tree
/// for broken markup, so every query simply returns whatever it can find.
#[derive(Debug)]
pub struct Extractor {
    document: Html,
}
impl Extractor {
    pub fn from_document(document: Html) -> Self {
        Self { document }
    }

    /// Parses `html`, cutting pathologically large documents first.
    pub fn from_html(html: &str) -> Self {
        Self::from_document(Html::parse_document(safe_html_truncate(html, MAX_DOCUMENT_BYTES)))
    }

    /// Invalid byte sequences are replaced with U+FFFD before parsing.
    pub fn from_bytes(html: &[u8]) -> Self {
        let html: Cow<'_, str> = String::from_utf8_lossy(html);
        Self::from_html(&html)
    }

    /// Cover-like image URLs in document order, at most `limit` of them.
    ///
    /// URLs are returned exactly as declared; resolve them against the
    /// library with [`resolve_url`](crate::resolve_url).
    #[instrument(level = "trace", skip(self))]
    pub fn covers(&self, limit: usize) -> Vec<String> {
        covers::covers(&self.document, limit)
    }

    /// De-duplicated book records attributed to `library`, in document order.
    #[instrument(level = "trace", skip(self), fields(slug = %library.slug))]
    pub fn books(&self, library: &LibraryDescriptor) -> Vec<BookRecord> {
        books::books(&self.document, library)
    }
}
impl FromStr for Extractor {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_html(s))
    }
}
impl From<String> for Extractor {
    fn from(value: String) -> Self {
        Self::from_html(&value)
    }
}
impl From<Html> for Extractor {
    fn from(document: Html) -> Self {
        Self::from_document(document)
    }
}
