//! Configuration for the hub, layered from (lowest to highest priority):
//!
//! 1. built-in defaults,
//! 2. the user's `config.toml` in the platform config directory,
//! 3. an explicitly requested file (TOML, YAML or JSON),
//! 4. `HUB_`-prefixed environment variables, `__` separating sections
//!    (`HUB_INDEX__CONCURRENCY=4`).
//!
//! Every loaded config is validated before it's handed out.

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use exn::Exn;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};

/// Prefix of the environment variables read by [`ConfigLoader`].
pub const ENV_PREFIX: &str = "HUB_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub index: IndexConfig,
    pub audio: AudioConfig,
}

/// Where the hub site lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root directory. Relative paths are taken from the working directory.
    pub root: PathBuf,
    /// Library manifest, relative to the site root.
    pub manifest: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            manifest: PathBuf::from("libraries.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Library pages fetched at once.
    pub concurrency: usize,
    /// Per-library fetch limit; unlimited when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Covers shown per library card.
    pub cover_limit: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            timeout_secs: None,
            cover_limit: 6,
        }
    }
}

impl IndexConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume, 0 to 100.
    pub volume: u8,
    pub sfx: bool,
    pub music: bool,
    pub visuals: bool,
    /// Background music, relative to the site root.
    pub music_file: PathBuf,
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 50,
            sfx: true,
            music: true,
            visuals: true,
            music_file: PathBuf::from("assets/audio/bgm_butterfly_chiptune.mp3"),
            sample_rate: 44_100,
        }
    }
}

impl Config {
    /// Rejects values the hub can't work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field, reason: &str| {
            Err(Exn::from(ErrorKind::Invalid {
                field,
                reason: reason.to_string(),
            }))
        };
        if self.site.manifest.as_os_str().is_empty() {
            return invalid("site.manifest", "must name a file");
        }
        if self.index.concurrency == 0 {
            return invalid("index.concurrency", "must be at least 1");
        }
        if self.index.timeout_secs == Some(0) {
            return invalid("index.timeout_secs", "must be at least 1 when set");
        }
        if self.index.cover_limit == 0 {
            return invalid("index.cover_limit", "must be at least 1");
        }
        if self.audio.volume > 100 {
            return invalid("audio.volume", "must be between 0 and 100");
        }
        if self.audio.sample_rate == 0 {
            return invalid("audio.sample_rate", "must be positive");
        }
        Ok(())
    }

    /// The music file, resolved against the site root.
    pub fn music_path(&self) -> PathBuf {
        self.site.root.join(&self.audio.music_file)
    }
}

/// Assembles a [`Config`] from its layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_file: Option<PathBuf>,
    file: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            user_file: user_config_file(),
            file: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace (or, with `None`, skip) the user config file.
    pub fn with_user_file(mut self, path: Option<PathBuf>) -> Self {
        self.user_file = path;
        self
    }

    /// An explicitly requested file. Unlike the user file, it must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// The layered sources, not yet extracted.
    pub fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = self.user_file.as_deref().filter(|path| path.is_file()) {
            tracing::debug!(path = %path.display(), "Using user config");
            figment = merge_file(figment, path)?;
        }
        if let Some(path) = self.file.as_deref() {
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            tracing::debug!(path = %path.display(), "Using config file");
            figment = merge_file(figment, path)?;
        }
        Ok(figment.merge(Env::prefixed(&self.env_prefix).split("__")))
    }

    pub fn load(&self) -> Result<Config> {
        let config: Config = self
            .figment()?
            .extract()
            .map_err(|err| Exn::from(ErrorKind::Parse(err.to_string())))?;
        config.validate()?;
        Ok(config)
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}

/// `config.toml` in the platform's config directory for the hub, if the
/// platform has one.
pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hub").map(|dirs| dirs.config_dir().join("config.toml"))
}
