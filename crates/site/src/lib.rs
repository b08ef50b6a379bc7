pub mod backend;
pub mod error;
mod path;

pub use crate::backend::SiteBackend;
pub use crate::path::{page_path, validate as validate_path};
use std::sync::Arc;

pub type BackendHandle = Arc<dyn SiteBackend + Send + Sync>;
