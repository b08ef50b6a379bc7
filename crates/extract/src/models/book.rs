use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use super::LibraryDescriptor;

/// A (title, author) entry scraped from a library page.
///
/// Created during extraction and never mutated afterwards. The title is
/// always at least two characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BookRecord {
    pub title: String,
    /// Detected author, or [`UNKNOWN_AUTHOR`](crate::UNKNOWN_AUTHOR).
    pub author: String,
    /// Slug of the owning library.
    pub lib_slug: String,
    /// Display name of the owning library.
    pub lib_label: String,
    /// Resolved URL into the owning library.
    pub link: String,
}
impl BookRecord {
    pub(crate) fn new(library: &LibraryDescriptor, title: String, author: String, link: String) -> Self {
        Self {
            title,
            author,
            lib_slug: library.slug.clone(),
            lib_label: library.label.clone(),
            link,
        }
    }

    /// Composite identity used to suppress duplicates within one library.
    pub fn key(&self) -> BookKey {
        BookKey {
            lib_slug: self.lib_slug.clone(),
            title: self.title.to_lowercase(),
            author: self.author.to_lowercase(),
        }
    }
}

impl Display for BookRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} by {} [{}]", self.title, self.author, self.lib_label)
    }
}

/// Case-insensitive identity of a [`BookRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookKey {
    lib_slug: String,
    title: String,
    author: String,
}
