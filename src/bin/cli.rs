//! stock-watch CLI
//!
//! One invocation performs one pass. Scheduling is left to cron or a
//! systemd timer.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use stock_watch::{
    error::Result,
    models::{Availability, Config},
    pipeline::StockWatcher,
    storage::{LocalSnapshotStore, SnapshotStore},
};

/// stock-watch - Listing Page Stock Watcher
#[derive(Parser, Debug)]
#[command(
    name = "stock-watch",
    version,
    about = "Reports sold-out and restocked products from a shop listing page"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "stock-watch.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, compare, notify and update the baseline (default)
    Run,

    /// Fetch and compare, print the message; nothing is sent or saved
    Check,

    /// Validate configuration
    Validate,

    /// Show the stored baseline
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };
    config.apply_env(|key| std::env::var(key).ok());

    match execute(cli.command.unwrap_or(Command::Run), &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Run => {
            config.validate()?;
            let watcher = StockWatcher::from_config(config)?;
            let report = watcher.run().await?;

            log::info!(
                "Done in {} ms: {} changes, notification {}",
                report.elapsed().num_milliseconds(),
                report.changes.len(),
                if report.notified { "sent" } else { "not sent" }
            );
        }

        Command::Check => {
            config.validate()?;
            let watcher = StockWatcher::from_config(config)?;
            let report = watcher.check().await?;
            println!("{}", report.message);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Target: {}", config.target.url);
            log::info!("✓ State file: {}", config.storage.state_file.display());
            log::info!(
                "✓ Webhook: {}",
                if config.notify.webhook_url.is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
            log::info!("All validations passed!");
        }

        Command::Info => {
            let store = LocalSnapshotStore::new(&config.storage.state_file);
            log::info!("State file: {}", store.path().display());

            let baseline = store.load().await?;
            if baseline.is_empty() {
                log::info!("No baseline recorded yet.");
                return Ok(());
            }
            log::info!(
                "Baseline: {} products ({} available, {} sold out)",
                baseline.len(),
                baseline.count(Availability::Available),
                baseline.count(Availability::SoldOut)
            );
            for (name, state) in baseline.iter() {
                log::info!("    {}: {}", name, state);
            }
        }
    }

    Ok(())
}
