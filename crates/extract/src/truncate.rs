//! Bounding of pathological documents before they reach the parser.

use memchr::memrchr;

/// Cuts `html` to at most `max_bytes`, backing off so the cut never lands
/// inside a tag, an entity, or a multi-byte character.
///
/// Text content may be cut mid-word; the parser copes with that and the
/// heuristics only ever see a best-effort tree anyway.
///
/// # Examples
///
/// ```rust
/// use hub_extract::safe_html_truncate;
/// let html = "<li>Dune</li><li>Emma</li>";
/// assert_eq!(safe_html_truncate(html, 100), html);
/// assert_eq!(safe_html_truncate(html, 15), "<li>Dune</li>");
/// ```
pub fn safe_html_truncate(html: &str, max_bytes: usize) -> &str {
    if html.len() <= max_bytes {
        return html;
    }
    let mut end = max_bytes;
    while !html.is_char_boundary(end) {
        end -= 1;
    }
    let candidate = &html.as_bytes()[..end];
    // An unclosed `<` means the cut is inside a tag.
    if let Some(open) = memrchr(b'<', candidate)
        && memrchr(b'>', candidate).is_none_or(|close| close < open)
    {
        return &html[..open];
    }
    // Same for an unterminated `&` entity.
    if let Some(amp) = memrchr(b'&', candidate)
        && memrchr(b';', candidate).is_none_or(|semi| semi < amp)
    {
        return &html[..amp];
    }
    &html[..end]
}
