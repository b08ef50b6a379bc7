//! Fetches every library's page and assembles the [`GlobalIndex`].
//!
//! A library whose page can't be fetched (missing, unreadable, too slow) is
//! skipped and the rest are still indexed. Nothing is cached: building twice
//! fetches every page twice.

mod stream;

use std::pin::pin;
use std::time::Duration;

use exn::ResultExt;
use futures::StreamExt;
use hub_extract::LIBRARY_PAGE;
use hub_extract::models::{BookRecord, LibraryDescriptor};
use hub_site::BackendHandle;
use tracing::instrument;

pub use self::stream::IndexEvent;
use crate::GlobalIndex;
use crate::error::{ErrorKind, Result};

/// Builds a [`GlobalIndex`] one library after another.
///
/// ```
/// # use std::sync::Arc;
/// # use hub_extract::models::LibraryDescriptor;
/// # use hub_site::{BackendHandle, backend::LocalSite};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// # let dir = std::env::temp_dir();
/// # let backend: BackendHandle = Arc::new(LocalSite::new("site", &dir).unwrap());
/// let libraries = vec![LibraryDescriptor::new("no-such-library", "Nobody")];
/// let index = hub_index::build_index(&backend, &libraries).await;
/// assert!(index.is_empty());
/// assert_eq!(index.skipped().count(), 1);
/// # }
/// ```
pub async fn build_index(backend: &BackendHandle, libraries: &[LibraryDescriptor]) -> GlobalIndex {
    IndexBuilder::new(backend.clone()).build(libraries).await
}

/// The streaming form of [`build_index`].
pub fn index_stream<'a>(
    backend: &'a BackendHandle,
    libraries: &'a [LibraryDescriptor],
) -> impl futures::Stream<Item = IndexEvent> + 'a {
    stream::events(backend, 1, None, libraries)
}

/// Index builder with tunable fetch behaviour.
#[derive(Clone)]
pub struct IndexBuilder {
    backend: BackendHandle,
    concurrency: usize,
    timeout: Option<Duration>,
}

impl IndexBuilder {
    /// Sequential builder without a per-library time limit.
    pub fn new(backend: BackendHandle) -> Self {
        Self {
            backend,
            concurrency: 1,
            timeout: None,
        }
    }

    /// How many library pages may be in flight at once. Records still come
    /// out in manifest order. Zero is treated as one.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Skip any library whose page takes longer than `limit` to fetch.
    pub fn timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// Index every library and return the finished index.
    #[instrument(skip_all, fields(backend = self.backend.name(), libraries = libraries.len()))]
    pub async fn build(&self, libraries: &[LibraryDescriptor]) -> GlobalIndex {
        let mut index = GlobalIndex::new();
        let mut events = pin!(self.stream(libraries));
        while let Some(event) = events.next().await {
            match event {
                IndexEvent::Indexed { slug, records } => index.append(slug, records),
                IndexEvent::Skipped { slug, reason } => index.skip(slug, reason),
                IndexEvent::Started { .. } | IndexEvent::Complete { .. } => {},
            }
        }
        index.finish()
    }

    /// Index every library, reporting progress as it goes.
    pub fn stream<'a>(&'a self, libraries: &'a [LibraryDescriptor]) -> impl futures::Stream<Item = IndexEvent> + 'a {
        stream::events(&self.backend, self.concurrency, self.timeout, libraries)
    }
}

/// Fetch one library page and extract its records.
pub(crate) async fn index_library(
    backend: &BackendHandle,
    timeout: Option<Duration>,
    library: &LibraryDescriptor,
) -> Result<Vec<BookRecord>> {
    let path = hub_site::page_path(&library.slug, LIBRARY_PAGE).map_err(|err| {
        let slug = library.slug.clone();
        err.raise(ErrorKind::InvalidSlug(slug))
    })?;
    let fetch = backend.fetch(&path);
    let fetched = match timeout {
        Some(limit) => tokio::time::timeout(limit, fetch).await.or_raise(|| ErrorKind::Timeout {
            slug: library.slug.clone(),
            millis: limit.as_millis(),
        })?,
        None => fetch.await,
    };
    let html = fetched.map_err(|err| {
        let cause = (*err).to_string();
        err.raise(ErrorKind::Fetch {
            slug: library.slug.clone(),
            cause,
        })
    })?;
    Ok(hub_extract::extract_books(&html, library))
}
