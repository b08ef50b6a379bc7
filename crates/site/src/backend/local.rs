//! Local filesystem site backend.
//!
//! Serves documents from a static site checked out (or built) on disk, using
//! `tokio::fs` for async I/O.

use async_trait::async_trait;
use exn::ResultExt;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, Result};
use crate::{SiteBackend, path::validate as validate_path};

/// Local filesystem site backend.
///
/// All paths are relative to the configured site root. The root is never
/// written to or created.
///
/// # Examples
///
/// ```no_run
/// use hub_site::backend::LocalSite;
///
/// let site = LocalSite::new("local", "/srv/hub").expect("site root should be a directory");
/// assert_eq!(site.root(), std::path::Path::new("/srv/hub"));
/// ```
#[derive(Debug, Clone)]
pub struct LocalSite {
    name: String,
    root: PathBuf,
}
impl LocalSite {
    /// Create a backend rooted at an existing, absolute directory.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if the path is not
    /// absolute or is not a directory.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() || !root.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self { name: name.into(), root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute_path(&self, path: &Path) -> Result<PathBuf> {
        Ok(self.root.join(validate_path(path)?))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            IoErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            IoErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[async_trait]
impl SiteBackend for LocalSite {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, path: &Path) -> Result<Vec<u8>> {
        let absolute = self.absolute_path(path)?;
        if tokio::fs::metadata(&absolute).await.is_ok_and(|metadata| metadata.is_dir()) {
            // Reading a directory is an I/O error on some platforms and a
            // confusing empty read on others; a page that's a directory is missing.
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        tokio::fs::read(&absolute).await.map_err(|e| exn::Exn::from(Self::map_io_error(e, path)))
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let absolute = self.absolute_path(path)?;
        tokio::fs::try_exists(&absolute)
            .await
            .or_raise(|| ErrorKind::BackendError(format!("cannot stat {}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, LocalSite) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("ale")).unwrap();
        fs::write(dir.path().join("libraries.json"), br#"[{"slug":"ale","label":"ALE"}]"#).unwrap();
        fs::write(dir.path().join("ale/index.html"), b"<li>Dune by Frank Herbert</li>").unwrap();
        let site = LocalSite::new("local", dir.path()).unwrap();
        (dir, site)
    }

    #[test]
    fn rejects_relative_or_missing_roots() {
        assert!(LocalSite::new("local", "relative/site").is_err());
        let dir = TempDir::new().unwrap();
        assert!(LocalSite::new("local", dir.path().join("missing")).is_err());
        let file = dir.path().join("file");
        fs::write(&file, b"").unwrap();
        assert!(LocalSite::new("local", &file).is_err());
    }

    #[tokio::test]
    async fn fetches_documents() {
        let (_dir, site) = site();
        let page = site.fetch_text(Path::new("ale/index.html")).await.unwrap();
        assert_eq!(page, "<li>Dune by Frank Herbert</li>");
        assert!(site.exists(Path::new("libraries.json")).await.unwrap());
        assert!(!site.exists(Path::new("bob/index.html")).await.unwrap());
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let (_dir, site) = site();
        let err = site.fetch(Path::new("bob/index.html")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn directory_is_not_found() {
        let (dir, site) = site();
        fs::create_dir_all(dir.path().join("ale/covers")).unwrap();
        for path in ["ale", "ale/covers"] {
            let err = site.fetch(Path::new(path)).await.unwrap_err();
            assert!(matches!(&*err, ErrorKind::NotFound(found) if found == Path::new(path)));
        }
        assert!(site.fetch(Path::new("ale/index.html")).await.is_ok());
    }

    #[tokio::test]
    async fn never_leaves_root() {
        let (_dir, site) = site();
        let err = site.fetch(Path::new("../etc/passwd")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[tokio::test]
    async fn reflects_current_content() {
        let (dir, site) = site();
        assert_eq!(site.fetch(Path::new("ale/index.html")).await.unwrap().len(), 30);
        fs::write(dir.path().join("ale/index.html"), b"<p>changed</p>").unwrap();
        assert_eq!(site.fetch_text(Path::new("ale/index.html")).await.unwrap(), "<p>changed</p>");
    }

    #[tokio::test]
    async fn lossy_text() {
        let (dir, site) = site();
        fs::write(dir.path().join("ale/index.html"), b"Caf\xe9").unwrap();
        assert_eq!(site.fetch_text(Path::new("ale/index.html")).await.unwrap(), "Caf\u{fffd}");
    }
}
