//! HTML for the hub: library cards with cover previews, search results, and
//! the page that holds them.
//!
//! Every interpolated value is HTML-escaped unless the template explicitly
//! marks it `raw` (only ever for fragments this crate rendered itself).

mod assets;
pub mod error;
mod status;

use std::collections::HashMap;
use std::fmt::Write;

use exn::ResultExt;
use hub_extract::models::{BookRecord, LibraryDescriptor};
use hub_index::search::display;
use tracing::instrument;
use upon::{Engine, Template, Value};

use crate::assets::Templates;
use crate::error::{ErrorKind, Result};
pub use crate::status::{Status, toggle_label};

/// State of the page controls, as shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    pub sfx: bool,
    pub music: bool,
    pub visuals: bool,
    /// 0 to 100.
    pub volume: u8,
}

/// Everything the full hub page shows.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub status: &'a Status,
    pub toggles: Toggles,
    pub query: &'a str,
    /// Output of [`Renderer::cards`].
    pub cards: &'a str,
    /// Output of [`Renderer::results`].
    pub results: &'a str,
}

pub struct Renderer {
    engine: Engine<'static>,
    cards: Template<'static>,
    results: Template<'static>,
    page: Template<'static>,
}

impl Renderer {
    /// Compiles the embedded templates.
    pub fn new() -> Result<Self> {
        let mut engine = Engine::new();
        engine.set_default_formatter(&escape_html);
        engine.add_formatter("raw", upon::fmt::default);
        let compile = |name: &'static str| -> Result<Template<'static>> {
            engine.compile(Templates::source(name)?).or_raise(|| ErrorKind::Template(name))
        };
        let cards = compile("cards.html")?;
        let results = compile("results.html")?;
        let page = compile("page.html")?;
        Ok(Self {
            engine,
            cards,
            results,
            page,
        })
    }

    /// One card per library, in manifest order. `previews` holds each
    /// library's cover URLs by slug; a library without an entry gets an
    /// empty preview row.
    #[instrument(skip_all, fields(libraries = libraries.len()))]
    pub fn cards(&self, libraries: &[LibraryDescriptor], previews: &HashMap<String, Vec<String>>) -> Result<String> {
        let cards: Vec<Value> = libraries
            .iter()
            .map(|library| {
                let covers: Vec<Value> = previews
                    .get(&library.slug)
                    .map(|covers| covers.iter().map(|url| Value::from(url.as_str())).collect())
                    .unwrap_or_default();
                upon::value! {
                    slug: library.slug.as_str(),
                    label: library.label.as_str(),
                    owner: library.owner.as_str(),
                    avatar: library.avatar.as_str(),
                    link: library.page_path(),
                    covers: Value::List(covers),
                }
            })
            .collect();
        self.cards
            .render(&self.engine, upon::value! { cards: Value::List(cards) })
            .to_string()
            .or_raise(|| ErrorKind::Template("cards.html"))
    }

    /// The displayed part of a search. A blank query gets the idle prompt,
    /// any other query without matches gets "no results".
    #[instrument(skip(self, results), fields(results = results.len()))]
    pub fn results(&self, query: &str, results: &[&BookRecord]) -> Result<String> {
        let shown = display(results);
        let hits: Vec<Value> = shown
            .iter()
            .map(|record| {
                upon::value! {
                    title: record.title.as_str(),
                    author: record.author.as_str(),
                    library: record.lib_label.as_str(),
                    link: record.link.as_str(),
                }
            })
            .collect();
        let context = upon::value! {
            idle: query.trim().is_empty(),
            query: query.trim(),
            found: !results.is_empty(),
            truncated: shown.len() < results.len(),
            shown: shown.len() as u64,
            total: results.len() as u64,
            hits: Value::List(hits),
        };
        self.results
            .render(&self.engine, context)
            .to_string()
            .or_raise(|| ErrorKind::Template("results.html"))
    }

    /// The whole hub page around already-rendered cards and results.
    pub fn page(&self, page: &Page<'_>) -> Result<String> {
        let Toggles {
            sfx,
            music,
            visuals,
            volume,
        } = page.toggles;
        let context = upon::value! {
            status: page.status.to_string(),
            sfx: sfx,
            sfx_label: toggle_label("SFX", sfx),
            music: music,
            music_label: toggle_label("MUSIC", music),
            visuals: visuals,
            visuals_label: toggle_label("VISUALS", visuals),
            volume: u64::from(volume),
            query: page.query,
            cards: page.cards,
            results: page.results,
        };
        self.page
            .render(&self.engine, context)
            .to_string()
            .or_raise(|| ErrorKind::Template("page.html"))
    }
}

/// Default formatter: strings are HTML-escaped, everything else is written
/// the way [`upon::fmt::default`] would.
fn escape_html(f: &mut upon::fmt::Formatter<'_>, value: &Value) -> upon::fmt::Result {
    match value {
        Value::String(s) => {
            for c in s.chars() {
                match c {
                    '&' => f.write_str("&amp;")?,
                    '<' => f.write_str("&lt;")?,
                    '>' => f.write_str("&gt;")?,
                    '"' => f.write_str("&quot;")?,
                    '\'' => f.write_str("&#x27;")?,
                    c => f.write_char(c)?,
                }
            }
        },
        v => upon::fmt::default(f, v)?,
    };
    Ok(())
}
