//! Site backend trait and implementations.
//!
//! The hub only ever *reads* the site: the manifest once per run and each
//! library's page while indexing. Backends never cache, so every fetch
//! reflects the document as it currently is.

mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::local::LocalSite;
#[cfg(feature = "mock")]
pub use self::mock::MockSite;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Unified, read-only interface to the documents of a hub site.
///
/// # Path Handling
/// All paths are relative to the site root and are validated with
/// [`validate_path`](crate::validate_path) by every implementation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use hub_site::{SiteBackend, error::Result};
///
/// async fn manifest_size(site: &dyn SiteBackend) -> Result<usize> {
///     let path = Path::new("libraries.json");
///     if site.exists(path).await? {
///         Ok(site.fetch(path).await?.len())
///     } else {
///         Ok(0)
///     }
/// }
/// ```
#[async_trait]
pub trait SiteBackend: Send + Sync {
    /// Name of the backend, used for logging only.
    fn name(&self) -> &str;

    /// Read a document's raw bytes.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the
    /// document does not exist.
    async fn fetch(&self, path: &Path) -> Result<Vec<u8>>;

    /// Read a document as text. Invalid UTF-8 sequences are replaced with
    /// U+FFFD rather than failing; pages are scraped best-effort anyway.
    async fn fetch_text(&self, path: &Path) -> Result<String> {
        let bytes = self.fetch(path).await?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }

    /// Check whether a document exists.
    async fn exists(&self, path: &Path) -> Result<bool>;
}
