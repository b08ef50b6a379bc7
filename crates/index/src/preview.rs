//! Cover previews shown on each library's card.

use std::collections::HashMap;

use futures::future::join_all;
use hub_extract::models::LibraryDescriptor;
use hub_extract::{LIBRARY_PAGE, extract_covers, resolve_url};
use hub_site::BackendHandle;
use tracing::instrument;

/// Up to `limit` resolved cover URLs from the library's page.
///
/// Previews are decoration: a missing or broken page just means an empty row.
#[instrument(skip(backend))]
pub async fn gallery_preview(backend: &BackendHandle, slug: &str, limit: usize) -> Vec<String> {
    let Ok(path) = hub_site::page_path(slug, LIBRARY_PAGE) else {
        tracing::debug!("No preview for invalid slug");
        return Vec::new();
    };
    let html = match backend.fetch(&path).await {
        Ok(html) => html,
        Err(err) => {
            let reason = (*err).to_string();
            tracing::debug!(%reason, "No preview");
            return Vec::new();
        },
    };
    extract_covers(&html, limit).iter().map(|url| resolve_url(slug, url)).collect()
}

/// Previews for every library, keyed by slug. One library's failure never
/// affects another's row.
pub async fn gallery_previews(
    backend: &BackendHandle,
    libraries: &[LibraryDescriptor],
    limit: usize,
) -> HashMap<String, Vec<String>> {
    let previews = join_all(libraries.iter().map(move |library| async move {
        (library.slug.clone(), gallery_preview(backend, &library.slug, limit).await)
    }))
    .await;
    previews.into_iter().collect()
}
