use std::collections::HashSet;

use scraper::{ElementRef, Html};

use crate::consts::{self, MAX_RECORDS_PER_LIBRARY, MAX_SCANNED_CANDIDATES};
use crate::models::{BookRecord, LibraryDescriptor};
use crate::text::{char_len, collapse, truncate_chars, until_terminator};
use crate::url::resolve_url;

/// Scans candidate containers in document order and turns each usable one
/// into a [`BookRecord`].
pub(crate) fn books(document: &Html, library: &LibraryDescriptor) -> Vec<BookRecord> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut scanned: usize = 0;
    for candidate in document.select(&consts::CANDIDATE_SELECTOR) {
        if scanned >= MAX_SCANNED_CANDIDATES || records.len() >= MAX_RECORDS_PER_LIBRARY {
            tracing::debug!(slug = %library.slug, scanned, accepted = records.len(), "Extraction bound reached");
            break;
        }
        scanned += 1;
        // Wrappers such as `div.cards` or `ul.book-list` hold the real
        // candidates; only the innermost ones become records.
        if candidate.select(&consts::CANDIDATE_SELECTOR).next().is_some() {
            continue;
        }
        let Some(record) = self::record(candidate, library) else {
            continue;
        };
        if seen.insert(record.key()) {
            records.push(record);
        }
    }
    tracing::debug!(slug = %library.slug, scanned, accepted = records.len(), "Book candidates scanned");
    records
}

fn record(candidate: ElementRef<'_>, library: &LibraryDescriptor) -> Option<BookRecord> {
    // Join text nodes with a space so `<h3>Dune</h3><p>by X</p>` doesn't
    // become "Duneby X"; line breaks survive for the title separators.
    let raw = candidate.text().collect::<Vec<_>>().join(" ");
    let text = collapse(&raw);
    if char_len(&text) < consts::MIN_CANDIDATE_CHARS {
        return None;
    }
    let title = match heading_title(candidate) {
        Some(heading) => truncate_chars(&heading, consts::MAX_TITLE_CHARS).to_string(),
        // Without a heading, overlong text is running prose rather than a title.
        None => Some(fallback_title(&raw)).filter(|title| char_len(title) <= consts::MAX_TITLE_CHARS)?,
    };
    if char_len(&title) < consts::MIN_TITLE_CHARS {
        return None;
    }
    let author = author(&text, &title).unwrap_or_else(|| consts::UNKNOWN_AUTHOR.to_string());
    let link = candidate
        .select(&consts::LINK_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
        .map(|href| resolve_url(&library.slug, href))
        .unwrap_or_else(|| library.page_path());
    Some(BookRecord::new(library, title, author, link))
}

fn heading_title(candidate: ElementRef<'_>) -> Option<String> {
    candidate
        .select(&consts::HEADING_SELECTOR)
        .next()
        .map(|heading| collapse(&heading.text().collect::<Vec<_>>().join(" ")))
        .filter(|title| !title.is_empty())
}

/// Text up to the first separator, minus any trailing byline.
fn fallback_title(raw: &str) -> String {
    let raw = raw.trim_start();
    let end = consts::TITLE_SEPARATORS.iter().filter_map(|separator| raw.find(separator)).min().unwrap_or(raw.len());
    let segment = collapse(&raw[..end]);
    match trailing_byline(&segment) {
        Some((start, _)) => segment[..start].trim_end().to_string(),
        None => segment,
    }
}

/// `by <name>` detection first, then an explicit `author:`/`auteur:` label.
fn author(text: &str, title: &str) -> Option<String> {
    // Bylines inside the title itself ("Stand by Me") don't count.
    let rest = text.strip_prefix(title).unwrap_or(text);
    if let Some((_, name)) = trailing_byline(rest) {
        return Some(name);
    }
    let label = consts::AUTHOR_LABEL_REGEX.find(text)?;
    let name = until_terminator(&text[label.end()..]).trim();
    is_plausible_name(name).then(|| name.to_string())
}

/// Finds the last `by <name>` clause, returning where the clause starts and
/// the name it carries.
fn trailing_byline(text: &str) -> Option<(usize, String)> {
    let found = consts::BYLINE_REGEX.find_iter(text).last()?;
    let name = until_terminator(&text[found.end()..]).trim();
    is_plausible_name(name).then(|| (found.start(), name.to_string()))
}

fn is_plausible_name(name: &str) -> bool {
    (2..=consts::MAX_AUTHOR_CHARS).contains(&char_len(name)) && name.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn library() -> LibraryDescriptor {
        LibraryDescriptor::new("ale", "ALE Gallery")
    }

    fn extract(body: &str) -> Vec<BookRecord> {
        let document = Html::parse_document(&format!("<html><body>{body}</body></html>"));
        books(&document, &library())
    }

    fn pairs(records: &[BookRecord]) -> Vec<(&str, &str)> {
        records.iter().map(|r| (r.title.as_str(), r.author.as_str())).collect()
    }

    #[test]
    fn heading_and_byline() {
        let records = extract("<article><h3>Dune</h3><p>by Frank Herbert</p></article>");
        assert_eq!(pairs(&records), vec![("Dune", "Frank Herbert")]);
        assert_eq!(records[0].lib_slug, "ale");
        assert_eq!(records[0].lib_label, "ALE Gallery");
        assert_eq!(records[0].link, "ale/index.html");
    }

    #[rstest]
    #[case("<li>Dune · Frank Herbert</li>", "Dune", "Unknown")]
    #[case("<li>Dune - by Frank Herbert</li>", "Dune", "Frank Herbert")]
    #[case("<li>Dune by Frank Herbert</li>", "Dune", "Frank Herbert")]
    #[case("<li>Dune\n<span>Author: Frank Herbert</span></li>", "Dune", "Frank Herbert")]
    #[case("<li>Le Petit Prince - Auteur : Antoine de Saint-Exupéry</li>", "Le Petit Prince", "Antoine de Saint-Exupéry")]
    #[case("<li>Stand by Me · paperback</li>", "Stand", "Me")]
    #[case("<article><h2>Stand by Me</h2><p>Paperback edition</p></article>", "Stand by Me", "Unknown")]
    #[case("<div class=\"book-tile\">The Hobbit by J. R. R. Tolkien · 1937</div>", "The Hobbit", "J. R. R. Tolkien")]
    fn title_and_author(#[case] body: &str, #[case] title: &str, #[case] author: &str) {
        assert_eq!(pairs(&extract(body)), vec![(title, author)]);
    }

    #[rstest]
    // Too short to be considered at all.
    #[case("<li>Dune</li>")]
    #[case("<li>   A  b  </li>")]
    // Long enough, but no usable title before the separator.
    #[case("<li> - by Frank Herbert</li>")]
    #[case("<li>X · Frank Herbert</li>")]
    fn rejected(#[case] body: &str) {
        assert!(extract(body).is_empty());
    }

    #[test]
    fn overlong_titles_are_running_text() {
        let body = format!("<li>{}</li>", "word ".repeat(60));
        assert!(extract(&body).is_empty());
    }

    #[test]
    fn long_headings_are_cut_not_dropped() {
        let heading = "Ä".repeat(170);
        let records = extract(&format!("<article><h3>{heading}</h3><p>by Frank Herbert</p></article>"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Ä".repeat(consts::MAX_TITLE_CHARS));
        assert_eq!(records[0].author, "Frank Herbert");
    }

    #[test]
    fn first_link_is_resolved() {
        let records = extract(
            r#"<li><a href="">skip</a><a href="./books/dune.html">Dune</a> · Frank Herbert</li>
               <li><a href="https://example.com/emma">Emma</a> · Jane Austen</li>"#,
        );
        assert_eq!(records[0].link, "ale/books/dune.html");
        assert_eq!(records[1].link, "https://example.com/emma");
    }

    #[test]
    fn duplicates_are_suppressed_case_insensitively() {
        let records = extract(
            r#"<ul>
                <li>Dune by Frank Herbert</li>
                <li>DUNE by frank herbert</li>
                <li>Dune by Brian Herbert</li>
            </ul>"#,
        );
        assert_eq!(pairs(&records), vec![("Dune", "Frank Herbert"), ("Dune", "Brian Herbert")]);
    }

    #[test]
    fn nested_candidates_collapse_into_one_record() {
        let records = extract(r#"<li class="book"><article><h3>Dune</h3><p>by Frank Herbert</p></article></li>"#);
        assert_eq!(pairs(&records), vec![("Dune", "Frank Herbert")]);
    }

    #[rstest]
    #[case(r#"<div class="cards"><div class="card"><h3>Dune</h3><p>by Frank Herbert</p></div><div class="card"><h3>Emma</h3><p>by Jane Austen</p></div></div>"#)]
    #[case("<ul class=\"book-list\"><li>Dune by Frank Herbert</li><li>Emma by Jane Austen</li></ul>")]
    #[case("<section class=\"items\"><article><h3>Dune</h3><p>by Frank Herbert</p></article><article><h3>Emma</h3><p>by Jane Austen</p></article></section>")]
    fn wrappers_do_not_become_records(#[case] body: &str) {
        assert_eq!(pairs(&extract(body)), vec![("Dune", "Frank Herbert"), ("Emma", "Jane Austen")]);
    }

    #[test]
    fn keys_are_unique() {
        let body = (0..300).map(|i| format!("<li>Title {} by Author {}</li>", i % 50, i % 7)).collect::<String>();
        let records = extract(&body);
        let keys: HashSet<_> = records.iter().map(BookRecord::key).collect();
        assert_eq!(keys.len(), records.len());
    }

    #[test]
    fn accepted_records_are_bounded() {
        let body = (0..1500).map(|i| format!("<li>Book number {i}</li>")).collect::<String>();
        let records = extract(&body);
        assert_eq!(records.len(), MAX_RECORDS_PER_LIBRARY);
        assert_eq!(records.last().unwrap().title, "Book number 1199");
    }

    #[test]
    fn scanned_candidates_are_bounded() {
        // Every candidate is too short to accept, then one good record past the bound.
        let mut body = "<li>x</li>".repeat(MAX_SCANNED_CANDIDATES);
        body.push_str("<li>Dune by Frank Herbert</li>");
        assert!(extract(&body).is_empty());
    }

    #[test]
    fn malformed_html_degrades_gracefully() {
        let records = extract("<ul><li>Dune by Frank Herbert<li><article><h3>Emma</h3>by Jane Austen</ul></div></p>");
        assert_eq!(pairs(&records), vec![("Dune", "Frank Herbert"), ("Emma", "Jane Austen")]);
    }
}
