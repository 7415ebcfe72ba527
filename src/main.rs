use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use compose_drift::check::check_all;
use compose_drift::config::Config;
use compose_drift::logging;
use compose_drift::notify::dispatch;
use compose_drift::report::{format_results, has_changes_or_errors};

#[derive(Debug, Parser)]
#[command(
    name = "compose-drift",
    about = "Detects image drift between local Docker Compose files and their upstream sources"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
    /// Print the notification to the console instead of the configured backend
    #[arg(short, long)]
    debug: bool,
    /// Write a config template to the --config path and exit
    #[arg(long)]
    init: bool,
    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.init {
        Config::write_template(&cli.config)?;
        println!("Wrote config template to {}", cli.config.display());
        return Ok(());
    }

    let config = Config::load(&cli.config)?;
    let backend = config.notifications.resolve_backend(cli.debug)?;
    if cli.debug {
        info!("debug mode enabled - notifications will be printed to the console");
    }

    let outcomes = check_all(&config.files).await;

    if has_changes_or_errors(&outcomes) {
        let message = format_results(&outcomes);
        dispatch(&message, &backend)
            .await
            .context("error sending notification")?;
    } else {
        info!("no changes or errors detected - no notification sent");
    }

    Ok(())
}
