//! The library manifest: an ordered JSON array of library descriptors at the
//! site root.

use std::collections::HashSet;
use std::path::Path;

use exn::ResultExt;
use hub_extract::models::LibraryDescriptor;
use hub_site::BackendHandle;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Conventional location of the manifest, relative to the site root.
pub const DEFAULT_MANIFEST: &str = "libraries.json";

/// Fetches and parses the manifest. Any failure here is fatal to the run.
#[instrument(skip(backend), fields(backend = backend.name()))]
pub async fn load_manifest(backend: &BackendHandle, path: &Path) -> Result<Vec<LibraryDescriptor>> {
    let bytes = backend.fetch(path).await.map_err(|err| {
        let cause = (*err).to_string();
        err.raise(ErrorKind::Manifest(cause))
    })?;
    let libraries = parse_manifest(&bytes)?;
    tracing::debug!(libraries = libraries.len(), "Manifest loaded");
    Ok(libraries)
}

/// Parses manifest JSON, keeping manifest order.
///
/// Entries without a slug or label, and repeated slugs, are dropped with a
/// warning rather than failing the whole manifest.
///
/// ```
/// let libraries = hub_index::parse_manifest(br#"[
///     {"slug": "ale", "label": "ALE Gallery", "owner": "Ale", "avatar": "ale/avatar.png"},
///     {"slug": "bob", "label": "Bob's Books"}
/// ]"#).unwrap();
/// assert_eq!(libraries.len(), 2);
/// assert_eq!(libraries[1].label, "Bob's Books");
/// ```
pub fn parse_manifest(json: &[u8]) -> Result<Vec<LibraryDescriptor>> {
    let entries: Vec<LibraryDescriptor> =
        serde_json::from_slice(json).or_raise(|| ErrorKind::Manifest("not a list of libraries".to_string()))?;
    let mut seen = HashSet::new();
    let mut libraries = Vec::with_capacity(entries.len());
    for library in entries {
        if let Err(err) = library.validate() {
            let reason = (*err).to_string();
            tracing::warn!(%reason, "Ignoring manifest entry");
            continue;
        }
        if !seen.insert(library.slug.clone()) {
            tracing::warn!(slug = %library.slug, "Ignoring repeated library slug in manifest");
            continue;
        }
        libraries.push(library);
    }
    Ok(libraries)
}
