mod cli;
mod error;
mod hub;

use std::process::ExitCode;

use clap::Parser;
use exn::ResultExt;
use hub_config::ConfigLoader;
use hub_render::Status;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};
use crate::error::{ErrorKind, Result};
use crate::hub::Hub;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    // RUST_LOG, when set, wins over -v/-q.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    tracing::info!(status = %Status::Boot);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(args: Args) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    let config = loader.load().or_raise(|| ErrorKind::Config)?;
    let hub = Hub::open(hub::with_root(config, args.root))?;
    match args.command {
        Command::Index => hub.index().await,
        Command::Search { query, all, json } => hub.search(&query, all, json).await,
        Command::Covers { slug } => hub.covers(slug.as_deref()).await,
        Command::Render { output, query } => hub.render(output.as_deref(), query.as_deref()).await,
        #[cfg(feature = "playback")]
        Command::Sfx { effect, volume } => hub.sfx(effect.into(), volume).await,
    }
}
