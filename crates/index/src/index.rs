use derive_more::Display;
use hub_extract::models::BookRecord;
use time::UtcDateTime;

/// Every book record found across the hub, in manifest order and then in
/// per-page discovery order.
///
/// Append-only while [`IndexBuilder`](crate::IndexBuilder) runs, read-only
/// afterwards. Lives for one run and is never persisted.
#[derive(Debug, Clone)]
pub struct GlobalIndex {
    records: Vec<BookRecord>,
    /// Lowercased `title author label` per record, same positions as `records`.
    pub(crate) haystacks: Vec<String>,
    outcomes: Vec<LibraryOutcome>,
    built_at: UtcDateTime,
}

/// What happened to one library while indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryOutcome {
    pub slug: String,
    pub status: LibraryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LibraryStatus {
    /// Page fetched and scanned; the number of records appended.
    #[display("{_0} records")]
    Indexed(usize),
    /// Page unavailable; the reason it was left out.
    #[display("skipped: {_0}")]
    Skipped(String),
}

impl GlobalIndex {
    pub(crate) fn new() -> Self {
        Self {
            records: Vec::new(),
            haystacks: Vec::new(),
            outcomes: Vec::new(),
            built_at: UtcDateTime::now(),
        }
    }

    pub(crate) fn append(&mut self, slug: String, records: Vec<BookRecord>) {
        self.outcomes.push(LibraryOutcome {
            slug,
            status: LibraryStatus::Indexed(records.len()),
        });
        self.haystacks.extend(records.iter().map(haystack));
        self.records.extend(records);
    }

    pub(crate) fn skip(&mut self, slug: String, reason: String) {
        self.outcomes.push(LibraryOutcome {
            slug,
            status: LibraryStatus::Skipped(reason),
        });
    }

    pub(crate) fn finish(mut self) -> Self {
        self.built_at = UtcDateTime::now();
        self
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One entry per manifest library, in manifest order.
    pub fn outcomes(&self) -> &[LibraryOutcome] {
        &self.outcomes
    }

    pub fn skipped(&self) -> impl Iterator<Item = &LibraryOutcome> {
        self.outcomes.iter().filter(|o| matches!(o.status, LibraryStatus::Skipped(_)))
    }

    /// When the build completed.
    pub fn built_at(&self) -> UtcDateTime {
        self.built_at
    }
}

fn haystack(record: &BookRecord) -> String {
    format!("{} {} {}", record.title, record.author, record.lib_label).to_lowercase()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hub_extract::models::LibraryDescriptor;

    /// An index assembled directly from `(slug, label, [(title, author)])`.
    pub(crate) fn index_of(libraries: Vec<(&str, &str, Vec<(&str, &str)>)>) -> GlobalIndex {
        let mut index = GlobalIndex::new();
        for (slug, label, books) in libraries {
            let library = LibraryDescriptor::new(slug, label);
            let html: String = books.iter().map(|(title, author)| format!("<li>{title} by {author}</li>")).collect();
            index.append(slug.to_string(), hub_extract::extract_books(html, &library));
        }
        index.finish()
    }

    #[test]
    fn append_keeps_order_and_outcomes() {
        let index = index_of(vec![
            ("ale", "Ale", vec![("Dune", "Frank Herbert"), ("Emma", "Jane Austen")]),
            ("bob", "Bob", vec![("Dune", "Frank Herbert")]),
        ]);
        let titles: Vec<_> = index.records().iter().map(|r| (r.lib_slug.as_str(), r.title.as_str())).collect();
        assert_eq!(titles, vec![("ale", "Dune"), ("ale", "Emma"), ("bob", "Dune")]);
        assert_eq!(index.outcomes()[0].status, LibraryStatus::Indexed(2));
        assert_eq!(index.outcomes()[1].status, LibraryStatus::Indexed(1));
        assert_eq!(index.haystacks.len(), index.len());
        assert_eq!(index.haystacks[0], "dune frank herbert ale");
    }

    #[test]
    fn skipped_libraries_add_no_records() {
        let mut index = GlobalIndex::new();
        index.skip("bob".into(), "document not found".into());
        let index = index.finish();
        assert!(index.is_empty());
        assert_eq!(index.skipped().count(), 1);
        assert_eq!(index.outcomes()[0].status.to_string(), "skipped: document not found");
    }
}
