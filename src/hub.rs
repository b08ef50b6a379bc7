//! The hub's commands, run against one site with one configuration.

use std::path::{Path, PathBuf};
use std::pin::pin;
use std::sync::Arc;

use exn::{OptionExt, ResultExt};
use futures::StreamExt;
use hub_audio::{Controls, Volume};
use hub_config::Config;
use hub_extract::models::LibraryDescriptor;
use hub_index::search::display;
use hub_index::{GlobalIndex, IndexBuilder, IndexEvent, gallery_previews, load_manifest};
use hub_render::{Page, Renderer, Status, Toggles};
use hub_site::BackendHandle;
use hub_site::backend::LocalSite;

use crate::error::{ErrorKind, Result};

pub struct Hub {
    config: Config,
    backend: BackendHandle,
}

impl Hub {
    /// Opens the configured site root.
    pub fn open(config: Config) -> Result<Self> {
        let root = std::path::absolute(&config.site.root).or_raise(|| ErrorKind::Site)?;
        let site = LocalSite::new("local", &root).or_raise(|| ErrorKind::Site)?;
        tracing::debug!(root = %root.display(), "Site opened");
        Ok(Self {
            config,
            backend: Arc::new(site),
        })
    }

    /// The switches as configured.
    pub fn controls(&self) -> Controls {
        let audio = &self.config.audio;
        Controls {
            sfx: audio.sfx,
            music: audio.music,
            visuals: audio.visuals,
            volume: Volume::from_percent(f32::from(audio.volume)),
        }
    }

    async fn manifest(&self) -> hub_index::error::Result<Vec<LibraryDescriptor>> {
        tracing::info!(status = %Status::Loading);
        let libraries = load_manifest(&self.backend, &self.config.site.manifest).await?;
        tracing::info!(status = %Status::Ready(libraries.len()));
        Ok(libraries)
    }

    async fn libraries(&self) -> Result<Vec<LibraryDescriptor>> {
        match self.manifest().await {
            Ok(libraries) => Ok(libraries),
            Err(err) => {
                eprintln!("{}", manifest_status(&err));
                Err(err).or_raise(|| ErrorKind::Manifest)
            },
        }
    }

    fn builder(&self) -> IndexBuilder {
        IndexBuilder::new(self.backend.clone())
            .concurrency(self.config.index.concurrency)
            .timeout(self.config.index.timeout())
    }

    async fn build(&self, libraries: &[LibraryDescriptor]) -> GlobalIndex {
        self.builder().build(libraries).await
    }

    pub async fn index(&self) -> Result<()> {
        let libraries = self.libraries().await?;
        let builder = self.builder();
        let mut events = pin!(builder.stream(&libraries));
        while let Some(event) = events.next().await {
            match event {
                IndexEvent::Started { libraries } => println!("Indexing {libraries} libraries"),
                IndexEvent::Indexed { slug, records } => println!("  {slug}: {} records", records.len()),
                IndexEvent::Skipped { slug, reason } => println!("  {slug}: skipped ({reason})"),
                IndexEvent::Complete { records } => println!("{records} records indexed"),
            }
        }
        Ok(())
    }

    pub async fn search(&self, query: &str, all: bool, json: bool) -> Result<()> {
        let libraries = self.libraries().await?;
        let index = self.build(&libraries).await;
        let results = index.search(query);
        let shown = if all { &results[..] } else { display(&results) };
        if json {
            let json = serde_json::to_string_pretty(shown).or_raise(|| ErrorKind::Output)?;
            println!("{json}");
            return Ok(());
        }
        if query.trim().is_empty() {
            println!("Type something to search {} books", index.len());
            return Ok(());
        }
        if results.is_empty() {
            println!("No results");
            return Ok(());
        }
        for record in shown {
            println!("{record}\t{}", record.link);
        }
        if shown.len() < results.len() {
            println!("... {} more (use --all)", results.len() - shown.len());
        }
        Ok(())
    }

    pub async fn covers(&self, slug: Option<&str>) -> Result<()> {
        let mut libraries = self.libraries().await?;
        if let Some(slug) = slug {
            let library = libraries
                .into_iter()
                .find(|library| library.slug == slug)
                .ok_or_raise(|| ErrorKind::UnknownLibrary(slug.to_string()))?;
            libraries = vec![library];
        }
        let previews = gallery_previews(&self.backend, &libraries, self.config.index.cover_limit).await;
        for library in &libraries {
            println!("{} ({})", library.label, library.slug);
            for url in previews.get(&library.slug).into_iter().flatten() {
                println!("  {url}");
            }
        }
        Ok(())
    }

    pub async fn render(&self, output: Option<&Path>, query: Option<&str>) -> Result<()> {
        let renderer = Renderer::new().or_raise(|| ErrorKind::Render)?;
        let controls = self.controls();
        let toggles = Toggles {
            sfx: controls.sfx,
            music: controls.music,
            visuals: controls.visuals,
            volume: controls.volume.percent(),
        };
        let query = query.unwrap_or_default();
        let libraries = match self.manifest().await {
            Ok(libraries) => libraries,
            Err(err) => {
                // Nothing but the status is shown when the manifest is unusable.
                let status = manifest_status(&err);
                let empty = renderer.results("", &[]).or_raise(|| ErrorKind::Render)?;
                let page = Page {
                    status: &status,
                    toggles,
                    query: "",
                    cards: "",
                    results: &empty,
                };
                write(output, &renderer.page(&page).or_raise(|| ErrorKind::Render)?).await?;
                return Err(err).or_raise(|| ErrorKind::Manifest);
            },
        };
        let previews = gallery_previews(&self.backend, &libraries, self.config.index.cover_limit).await;
        let cards = renderer.cards(&libraries, &previews).or_raise(|| ErrorKind::Render)?;
        let results = if query.trim().is_empty() {
            renderer.results(query, &[])
        } else {
            let index = self.build(&libraries).await;
            renderer.results(query, &index.search(query))
        }
        .or_raise(|| ErrorKind::Render)?;
        let page = Page {
            status: &Status::Ready(libraries.len()),
            toggles,
            query,
            cards: &cards,
            results: &results,
        };
        write(output, &renderer.page(&page).or_raise(|| ErrorKind::Render)?).await
    }

    #[cfg(feature = "playback")]
    pub async fn sfx(&self, effect: hub_audio::Effect, volume: Option<u8>) -> Result<()> {
        use hub_audio::{AudioSession, RodioDevice};

        let mut controls = self.controls();
        if let Some(volume) = volume {
            controls.volume = Volume::from_percent(f32::from(volume));
        }
        // One-off effects never start the background music.
        controls.music = false;
        if !controls.sfx {
            tracing::warn!("Sound effects are switched off in the configuration");
        }
        let session = AudioSession::new(RodioDevice::new(self.config.audio.sample_rate), controls);
        if let Err(err) = session.unlock() {
            eprintln!("{}", Status::AudioError);
            return Err(err).or_raise(|| ErrorKind::Audio);
        }
        session.play(effect);
        let length = effect.tones().iter().map(|(delay, tone)| *delay + tone.length()).max().unwrap_or_default();
        tokio::time::sleep(length + std::time::Duration::from_millis(50)).await;
        Ok(())
    }
}

async fn write(output: Option<&Path>, html: &str) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, html).await.or_raise(|| ErrorKind::Output)?;
            tracing::info!(path = %path.display(), "Hub page written");
        },
        None => print!("{html}"),
    }
    Ok(())
}

/// What the status line says when the library manifest is unusable.
fn manifest_status(err: &hub_index::error::Error) -> Status {
    Status::ManifestError((**err).to_string())
}

/// The config with any command-line root override applied.
pub fn with_root(mut config: Config, root: Option<PathBuf>) -> Config {
    if let Some(root) = root {
        config.site.root = root;
    }
    config
}
