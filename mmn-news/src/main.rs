//! mmn-news - Collection reconciliation tool
//!
//! `process` checks every artist folder against MusicBrainz and reports the
//! release groups missing locally, optionally exporting an interchange file.
//! `update` reads an edited interchange file back and stores each artist's
//! exclusions in its `artist.toml`.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{info, warn};

use mmn_common::config::{load_toml_config, resolve_config_path, TomlConfig};
use mmn_common::logging::init_tracing;
use mmn_news::config::{CliOverrides, RunSettings};
use mmn_news::models::ReleaseTypeFilter;
use mmn_news::services::{InterchangeWriter, MusicBrainzClient};
use mmn_news::workflow::{import_preferences, Orchestrator};

/// Command-line arguments for mmn-news
#[derive(Parser, Debug)]
#[command(name = "mmn-news")]
#[command(about = "Find releases missing from a local music collection")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log file, or a directory to receive a timestamped log file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare local artists with the remote catalog
    Process {
        /// Folder holding one sub-folder per artist
        #[arg(short = 'a', long)]
        album_folder: PathBuf,

        /// Write every classified release to this interchange file
        #[arg(short = 'c', long)]
        csv_output: Option<PathBuf>,

        /// Release category to check: all, live or comp
        #[arg(long)]
        category: Option<ReleaseTypeFilter>,

        /// Seconds to wait after each artist looked up remotely
        #[arg(long)]
        pacing_delay_secs: Option<u64>,
    },

    /// Store exclusions from an edited interchange file
    Update {
        /// Folder holding one sub-folder per artist
        #[arg(short = 'a', long)]
        album_folder: PathBuf,

        /// Interchange file to read
        #[arg(short = 'i', long)]
        csv_input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let loaded = load_toml_config(config_path.as_deref())
        .context("Failed to load configuration")?;
    let mut toml_config = loaded.config;
    if let Some(log_file) = &args.log_file {
        toml_config.logging.file = Some(log_file.clone());
    }

    let log_path = init_tracing(&toml_config.logging, "mmn-news")
        .context("Failed to initialize logging")?;

    info!("Starting mmn-news");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    loaded.source.log();
    if let Some(path) = &log_path {
        info!("Logging to {}", path.display());
    }

    tokio::select! {
        result = run(args.command, &toml_config) => result,
        interrupted = signal::ctrl_c() => {
            if let Err(e) = interrupted {
                warn!("Ctrl+C handler failed: {}", e);
            }
            println!("Shutdown requested. Exiting");
            Ok(())
        }
    }
}

async fn run(command: Command, toml_config: &TomlConfig) -> Result<()> {
    match command {
        Command::Process {
            album_folder,
            csv_output,
            category,
            pacing_delay_secs,
        } => {
            let overrides = CliOverrides {
                pacing_delay_secs,
                category,
            };
            let settings = RunSettings::resolve(toml_config, &overrides);
            process(&album_folder, csv_output.as_deref(), &settings).await
        }
        Command::Update {
            album_folder,
            csv_input,
        } => {
            info!("Updating preferences under {}", album_folder.display());
            let summary = import_preferences(&album_folder, &csv_input)
                .with_context(|| format!("Failed to import {}", csv_input.display()))?;
            summary.log();
            Ok(())
        }
    }
}

async fn process(
    album_folder: &Path,
    csv_output: Option<&Path>,
    settings: &RunSettings,
) -> Result<()> {
    info!("Album folder: {}", album_folder.display());
    info!("Category: {}", settings.category);

    let client = MusicBrainzClient::new(
        &settings.musicbrainz_url,
        &settings.user_agent,
        settings.request_timeout,
    )
    .context("Failed to create MusicBrainz client")?;
    let orchestrator = Orchestrator::new(&client, settings);

    let summary = match csv_output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = InterchangeWriter::new(BufWriter::new(file));
            let summary = orchestrator
                .run(album_folder, Some(&mut writer))
                .await
                .context("Process run failed")?;
            writer.finish().context("Failed to finish interchange file")?;
            info!("Wrote interchange file {}", path.display());
            summary
        }
        None => orchestrator
            .run::<BufWriter<File>>(album_folder, None)
            .await
            .context("Process run failed")?,
    };

    summary.log();
    Ok(())
}
