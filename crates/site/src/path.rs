//! Site-relative document paths.
//!
//! Every document the hub reads (the manifest, each library page) is
//! addressed relative to the site root. Paths coming from the manifest are
//! untrusted, so they're normalized here and never allowed to leave the root.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Normalizes a site-relative path, rejecting anything that would escape the
/// site root, contains NUL bytes, or names nothing at all.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use hub_site::validate_path;
/// assert_eq!(validate_path("ale/./index.html").unwrap(), Path::new("ale/index.html"));
/// assert_eq!(validate_path("/libraries.json").unwrap(), Path::new("libraries.json"));
/// assert!(validate_path("../secrets.txt").is_err());
/// assert!(validate_path("").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let invalid = || exn::Exn::from(ErrorKind::InvalidPath(original.to_path_buf()));
    let mut normalized = PathBuf::new();
    for component in original.components() {
        match component {
            Component::Normal(segment) if segment.as_encoded_bytes().contains(&0) => return Err(invalid()),
            Component::Normal(segment) => normalized.push(segment),
            // A leading slash means "site root", which is where we are anyway.
            Component::RootDir | Component::CurDir => {},
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(invalid());
                }
            },
            Component::Prefix(_) => return Err(invalid()),
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(invalid());
    }
    Ok(normalized)
}

/// Location of a library's page: `{slug}/{page}`, validated.
///
/// ```
/// use std::path::Path;
/// use hub_site::page_path;
/// assert_eq!(page_path("ale", "index.html").unwrap(), Path::new("ale/index.html"));
/// assert!(page_path("../outside", "index.html").is_err());
/// ```
pub fn page_path(slug: &str, page: &str) -> Result<PathBuf> {
    if slug.trim().is_empty() {
        exn::bail!(ErrorKind::InvalidPath(PathBuf::from(slug)));
    }
    validate(Path::new(slug).join(page))
}
