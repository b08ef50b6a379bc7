pub mod build;
pub mod error;
mod index;
mod manifest;
mod preview;
pub mod search;

pub use crate::build::{IndexBuilder, IndexEvent, build_index, index_stream};
pub use crate::index::{GlobalIndex, LibraryOutcome, LibraryStatus};
pub use crate::manifest::{DEFAULT_MANIFEST, load_manifest, parse_manifest};
pub use crate::preview::{gallery_preview, gallery_previews};
