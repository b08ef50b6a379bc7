//! Embedded HTML templates.
//!
//! Compiled into the binary with [`rust-embed`](rust_embed), so rendering
//! never touches the filesystem.

use exn::{OptionExt, ResultExt};
use rust_embed::Embed;

use crate::error::{ErrorKind, Result};

#[derive(Embed)]
#[folder = "../../assets/templates/"]
pub(crate) struct Templates;

impl Templates {
    /// Template source by file name.
    pub(crate) fn source(name: &str) -> Result<String> {
        let file = Self::get(name).ok_or_raise(|| ErrorKind::AssetNotFound(name.to_string()))?;
        String::from_utf8(file.data.into_owned()).or_raise(|| ErrorKind::AssetNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_is_embedded() {
        for name in ["cards.html", "results.html", "page.html"] {
            assert!(!Templates::source(name).unwrap().is_empty(), "{name}");
        }
    }

    #[test]
    fn unknown_template() {
        let err = Templates::source("missing.html").unwrap_err();
        assert!(matches!(&*err, ErrorKind::AssetNotFound(name) if name == "missing.html"));
    }
}
