//! Command-line interface, defined with Clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
#[cfg(feature = "playback")]
use clap::ValueEnum;

#[derive(Debug, Parser)]
#[command(name = "hub", version, about = "Library hub: cover previews, a global book search and chiptune sound effects")]
pub struct Args {
    /// Config file (TOML, YAML or JSON), layered over the user config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Site root directory, overriding the configured one
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Index every library and report what each one contributed
    Index,
    /// Search book titles, authors and library names
    Search {
        /// Case-insensitive text to look for
        query: String,
        /// Print every match instead of the first page
        #[arg(long)]
        all: bool,
        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// List cover previews for each library
    Covers {
        /// Only this library
        slug: Option<String>,
    },
    /// Render the hub page as static HTML
    Render {
        /// Write here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include results for this search
        #[arg(long)]
        query: Option<String>,
    },
    /// Play an interface sound effect
    #[cfg(feature = "playback")]
    Sfx {
        effect: SfxEffect,
        /// Volume from 0 to 100, overriding the configured one
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        volume: Option<u8>,
    },
}

#[cfg(feature = "playback")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SfxEffect {
    Hover,
    Click,
    ToggleOff,
}

#[cfg(feature = "playback")]
impl From<SfxEffect> for hub_audio::Effect {
    fn from(effect: SfxEffect) -> Self {
        match effect {
            SfxEffect::Hover => Self::Hover,
            SfxEffect::Click => Self::Click,
            SfxEffect::ToggleOff => Self::ToggleOff,
        }
    }
}

impl Args {
    /// Log filter directive for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        }
    }
}
