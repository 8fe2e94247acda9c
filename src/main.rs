//! Precis CLI entry point.

use anyhow::Result;
use clap::Parser;
use precis::cli::{commands, Cli, Commands};
use precis::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| format!("precis={},tower_http={}", log_level, log_level));

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match cli.command {
        None => {
            commands::run_serve(None, None, settings).await?;
        }

        Some(Commands::Serve { host, port }) => {
            commands::run_serve(host, port, settings).await?;
        }

        Some(Commands::Summarize { url }) => {
            commands::run_summarize(&url, settings).await?;
        }

        Some(Commands::Doctor) => {
            commands::run_doctor(&settings, cli.config.as_deref())?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(&action, settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
