use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Conventional document name of a library page, relative to its slug.
pub const LIBRARY_PAGE: &str = "index.html";
/// Author sentinel used when no byline could be detected.
pub const UNKNOWN_AUTHOR: &str = "Unknown";
/// Number of cover URLs returned when the caller has no preference.
pub const DEFAULT_COVER_LIMIT: usize = 6;
/// Images with both dimensions declared and either below this are icons.
pub const MIN_COVER_DIMENSION: u32 = 40;
/// Upper bound of candidate containers inspected per document.
pub const MAX_SCANNED_CANDIDATES: usize = 4000;
/// Upper bound of records accepted per library document.
pub const MAX_RECORDS_PER_LIBRARY: usize = 1200;
/// Candidates with less normalized text than this are skipped outright.
pub const MIN_CANDIDATE_CHARS: usize = 8;
/// Shortest usable title.
pub const MIN_TITLE_CHARS: usize = 2;
/// Longest usable title; anything longer is running text, not a title.
pub const MAX_TITLE_CHARS: usize = 160;
/// Longest usable author name.
pub const MAX_AUTHOR_CHARS: usize = 80;
/// Documents are cut (at a safe boundary) beyond this size before parsing.
pub const MAX_DOCUMENT_BYTES: usize = 8 * 1024 * 1024;

/// Separators that end a title when no heading element is present.
pub(crate) const TITLE_SEPARATORS: [&str; 3] = [" · ", " - ", "\n"];
/// Characters that end an author name.
pub(crate) const NAME_TERMINATORS: [char; 4] = ['·', '|', '•', '\n'];

selector!(IMAGE_SELECTOR, "img");
selector!(
    CANDIDATE_SELECTOR,
    "article, li, [class*='book'], [class*='card'], [class*='item'], [class*='entry']"
);
selector!(HEADING_SELECTOR, "h1, h2, h3, h4, h5, h6");
selector!(LINK_SELECTOR, "a[href]");
regex!(ICON_REGEX, r"(?i)icon|logo|sprite|favicon");
regex!(SCHEME_REGEX, r"^[A-Za-z][A-Za-z0-9+.\-]*:");
regex!(BYLINE_REGEX, r"(?i)\bby\s+");
regex!(AUTHOR_LABEL_REGEX, r"(?i)\b(?:author|auteur)\s*:\s*");
regex!(WHITESPACE_REGEX, r"\s+");
