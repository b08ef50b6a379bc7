//! Resolution of URLs found inside a library page.

use crate::consts::{self, LIBRARY_PAGE};

/// Resolves a URL found on a library's page against that library's base
/// path (its slug).
///
/// Scheme-qualified (`https:`, `data:`, ...), protocol-relative and
/// root-relative URLs are already anchored and pass through unchanged.
/// Fragments point into the library page itself.
///
/// # Examples
///
/// ```rust
/// use hub_extract::resolve_url;
/// assert_eq!(resolve_url("ale", "./covers/dune.jpg"), "ale/covers/dune.jpg");
/// assert_eq!(resolve_url("ale", "covers/dune.jpg"), "ale/covers/dune.jpg");
/// assert_eq!(resolve_url("ale", "https://cdn.example/dune.jpg"), "https://cdn.example/dune.jpg");
/// ```
pub fn resolve_url(slug: &str, url: &str) -> String {
    let url = url.trim();
    if consts::SCHEME_REGEX.is_match(url) || url.starts_with('/') {
        return url.to_string();
    }
    let base = slug.trim_end_matches('/');
    if url.starts_with('#') {
        return format!("{base}/{LIBRARY_PAGE}{url}");
    }
    let relative = url.strip_prefix("./").unwrap_or(url);
    format!("{base}/{relative}")
}
