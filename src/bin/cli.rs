//! tglake CLI
//!
//! Validates configuration and inspects the lake tree. Crawling itself
//! is driven through the library's `CrawlOrchestrator` with a concrete
//! `TelegramClient` implementation supplied by the embedder.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tglake::{
    error::Result,
    models::Config,
    storage::{PartitionKind, PathScheme},
};

/// tglake - Telegram channel ingestion into a partitioned data lake
#[derive(Parser, Debug)]
#[command(name = "tglake", version, about = "Telegram data lake ingestion tool")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration file
    Validate,

    /// Report what the lake currently contains, per partition and date
    Inspect,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Validate => {
            log::info!("Validating configuration from {}", cli.config.display());

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} message channels, {} media channels, lake at {})",
                config.channels.messages.len(),
                config.channels.media.len(),
                config.lake.base_path.display()
            );
        }

        Command::Inspect => {
            let paths = PathScheme::new(&config.lake.base_path);
            log::info!("Lake base: {}", paths.base().display());

            for kind in PartitionKind::ALL {
                inspect_partition(kind, &paths.partition_root(kind))?;
            }
        }
    }

    Ok(())
}

/// Print a per-date census of one partition tree.
fn inspect_partition(kind: PartitionKind, root: &Path) -> Result<()> {
    if !root.exists() {
        log::info!("{}: not created yet", kind.dir_name());
        return Ok(());
    }

    let mut dates: Vec<PathBuf> = std::fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dates.sort();

    if dates.is_empty() {
        log::info!("{}: empty", kind.dir_name());
        return Ok(());
    }

    for date_dir in dates {
        let mut channels = 0usize;
        let mut items = 0usize;

        for entry in std::fs::read_dir(&date_dir)? {
            let channel_dir = entry?.path();
            if !channel_dir.is_dir() {
                continue;
            }
            channels += 1;
            items += std::fs::read_dir(&channel_dir)?
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .count();
        }

        log::info!(
            "{}/{}: {} channels, {} items",
            kind.dir_name(),
            date_dir.file_name().unwrap_or_default().to_string_lossy(),
            channels,
            items
        );
    }

    Ok(())
}
