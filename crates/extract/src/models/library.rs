use serde::Deserialize;

use crate::consts::LIBRARY_PAGE;
use crate::error::{ErrorKind, Result};

/// One content library listed by the hub manifest.
///
/// Loaded once from the manifest and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct LibraryDescriptor {
    /// Unique identifier, doubling as the library's path segment.
    pub slug: String,
    /// Display name.
    pub label: String,
    /// Attribution string.
    #[serde(default)]
    pub owner: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar: String,
}
impl LibraryDescriptor {
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            label: label.into(),
            owner: String::new(),
            avatar: String::new(),
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Site-relative location of the library's own page.
    pub fn page_path(&self) -> String {
        format!("{}/{}", self.slug.trim_end_matches('/'), LIBRARY_PAGE)
    }

    /// Rejects descriptors without a slug or label; both are needed to
    /// fetch the page and attribute records.
    pub fn validate(&self) -> Result<()> {
        if self.slug.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidDescriptor {
                field: "slug",
                value: self.slug.clone(),
            });
        }
        if self.label.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidDescriptor {
                field: "label",
                value: self.label.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_optional_attribution() {
        let library: LibraryDescriptor = serde_json::from_str(r#"{"slug": "ale", "label": "ALE Gallery"}"#).unwrap();
        assert_eq!(library, LibraryDescriptor::new("ale", "ALE Gallery"));
        assert!(library.owner.is_empty());
        assert!(library.avatar.is_empty());
    }

    #[test]
    fn page_path_uses_conventional_document() {
        assert_eq!(LibraryDescriptor::new("ale", "ALE").page_path(), "ale/index.html");
        assert_eq!(LibraryDescriptor::new("ale/", "ALE").page_path(), "ale/index.html");
    }

    #[test]
    fn validate_rejects_blank_fields() {
        assert!(LibraryDescriptor::new("ale", "ALE").validate().is_ok());
        let err = LibraryDescriptor::new("  ", "ALE").validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidDescriptor { field: "slug", .. }));
        let err = LibraryDescriptor::new("ale", "").validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidDescriptor { field: "label", .. }));
    }
}
