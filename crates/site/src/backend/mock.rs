//! In-memory site backend for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::SiteBackend;
use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;

/// In-memory site backend for testing.
///
/// Documents live in a `HashMap` behind a [`RwLock`], and every fetch is
/// counted so tests can assert that nothing was served from a cache.
///
/// # Examples
///
/// ```
/// use hub_site::backend::MockSite;
/// use hub_site::SiteBackend;
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let site = MockSite::with_documents([
///     ("libraries.json", "[]"),
///     ("ale/index.html", "<li>Dune by Frank Herbert</li>"),
/// ]);
/// assert!(site.exists(Path::new("ale/index.html")).await.unwrap());
/// assert_eq!(site.fetches(Path::new("ale/index.html")).await, 0);
/// # }
/// ```
pub struct MockSite {
    name: String,
    documents: RwLock<HashMap<PathBuf, Vec<u8>>>,
    broken: RwLock<HashMap<PathBuf, String>>,
    fetches: RwLock<HashMap<PathBuf, usize>>,
}

impl MockSite {
    /// Create a mock site pre-populated with documents.
    ///
    /// Panics if any path fails validation; a test with a broken setup
    /// should not pass.
    pub fn with_documents(documents: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let documents = documents
            .into_iter()
            .map(|(path, data)| (Self::checked(path.into()), data.into()))
            .collect();
        Self {
            name: "mock".to_string(),
            documents: RwLock::new(documents),
            broken: RwLock::default(),
            fetches: RwLock::default(),
        }
    }

    /// Change the name of the mock site.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Make every fetch of `path` fail with a backend error, as an
    /// unreachable or misbehaving host would.
    pub fn with_broken(mut self, path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        self.broken.get_mut().insert(Self::checked(path.into()), reason.into());
        self
    }

    /// Replace (or add) a document.
    pub async fn put(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.documents.write().await.insert(Self::checked(path.into()), data.into());
    }

    /// How many times `path` has been fetched, successfully or not.
    pub async fn fetches(&self, path: &Path) -> usize {
        match validate_path(path) {
            Ok(path) => self.fetches.read().await.get(&path).copied().unwrap_or_default(),
            Err(_) => 0,
        }
    }

    fn checked(path: PathBuf) -> PathBuf {
        let Ok(validated) = validate_path(&path) else {
            // The panic here is DELIBERATE. MockSite is intended to be
            // used in tests; panics are expected. There is no error result.
            panic!("MockSite: invalid path {}", path.display());
        };
        validated
    }
}
impl Default for MockSite {
    fn default() -> Self {
        let documents: [(&str, &str); 0] = [];
        Self::with_documents(documents)
    }
}

#[async_trait]
impl SiteBackend for MockSite {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, path: &Path) -> Result<Vec<u8>> {
        let path = validate_path(path)?;
        *self.fetches.write().await.entry(path.clone()).or_default() += 1;
        if let Some(reason) = self.broken.read().await.get(&path) {
            exn::bail!(ErrorKind::BackendError(reason.clone()));
        }
        self.documents.read().await.get(&path).cloned().ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path)))
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        Ok(self.documents.read().await.contains_key(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_and_count() {
        let site = MockSite::with_documents([("ale/index.html", "page")]);
        assert_eq!(site.fetch(Path::new("ale/index.html")).await.unwrap(), b"page");
        assert_eq!(site.fetch(Path::new("./ale//index.html")).await.unwrap(), b"page");
        assert_eq!(site.fetches(Path::new("ale/index.html")).await, 2);
    }

    #[tokio::test]
    async fn test_missing_is_not_found() {
        let site = MockSite::default();
        let err = site.fetch(Path::new("bob/index.html")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        assert_eq!(site.fetches(Path::new("bob/index.html")).await, 1);
    }

    #[tokio::test]
    async fn test_broken_document() {
        let site = MockSite::with_documents([("ale/index.html", "page")]).with_broken("ale/index.html", "timeout");
        let err = site.fetch(Path::new("ale/index.html")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::BackendError(reason) if reason == "timeout"));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let site = MockSite::with_documents([("ale/index.html", "old")]);
        site.put("ale/index.html", "new").await;
        assert_eq!(site.fetch_text(Path::new("ale/index.html")).await.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let site = MockSite::default();
        assert!(site.fetch(Path::new("../etc/passwd")).await.is_err());
        assert!(site.exists(Path::new("../etc/passwd")).await.is_err());
    }

    #[test]
    #[should_panic(expected = "invalid path")]
    fn test_with_documents_panics_on_bad_path() {
        MockSite::with_documents([("../escape", "bad")]);
    }
}
