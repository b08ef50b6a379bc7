use std::time::Duration;

use async_stream::stream;
use futures::{Stream, StreamExt};
use hub_extract::models::{BookRecord, LibraryDescriptor};
use hub_site::BackendHandle;

use super::index_library;

/// Progress of an index build, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEvent {
    Started { libraries: usize },
    Indexed { slug: String, records: Vec<BookRecord> },
    Skipped { slug: String, reason: String },
    /// Total records across every indexed library.
    Complete { records: usize },
}

pub(super) fn events<'a>(
    backend: &'a BackendHandle,
    concurrency: usize,
    timeout: Option<Duration>,
    libraries: &'a [LibraryDescriptor],
) -> impl Stream<Item = IndexEvent> + 'a {
    stream! {
        yield IndexEvent::Started { libraries: libraries.len() };
        // `buffered` (not `buffer_unordered`): pages may arrive in any order
        // but records must be appended in manifest order.
        let pages = futures::stream::iter(libraries)
            .map(move |library| async move { (library, index_library(backend, timeout, library).await) })
            .buffered(concurrency.max(1));
        let mut total = 0;
        for await (library, result) in pages {
            match result {
                Ok(records) => {
                    tracing::debug!(slug = %library.slug, records = records.len(), "Library indexed");
                    total += records.len();
                    yield IndexEvent::Indexed { slug: library.slug.clone(), records };
                },
                Err(err) => {
                    let reason = (*err).to_string();
                    tracing::warn!(slug = %library.slug, %reason, retryable = err.is_retryable(), "Skipping library");
                    yield IndexEvent::Skipped { slug: library.slug.clone(), reason };
                },
            }
        }
        tracing::info!(libraries = libraries.len(), records = total, "Index built");
        yield IndexEvent::Complete { records: total };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_site::backend::MockSite;
    use std::sync::Arc;

    #[tokio::test]
    async fn reports_each_library_between_start_and_completion() {
        let backend: BackendHandle = Arc::new(MockSite::with_documents([(
            "ale/index.html",
            "<li>Dune by Frank Herbert</li><li>Emma by Jane Austen</li>",
        )]));
        let libraries = vec![LibraryDescriptor::new("ale", "Ale"), LibraryDescriptor::new("bob", "Bob")];
        let events: Vec<_> = crate::build::index_stream(&backend, &libraries).collect().await;
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], IndexEvent::Started { libraries: 2 });
        assert!(matches!(&events[1], IndexEvent::Indexed { slug, records } if slug == "ale" && records.len() == 2));
        assert!(matches!(&events[2], IndexEvent::Skipped { slug, .. } if slug == "bob"));
        assert_eq!(events[3], IndexEvent::Complete { records: 2 });
    }
}
