//! CLI module for Precis.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Precis - YouTube video summaries
///
/// Fetches a video's transcript and summarizes it with a map-reduce LLM pipeline.
#[derive(Parser, Debug)]
#[command(name = "precis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web UI (default)
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Summarize a single video in the terminal
    Summarize {
        /// YouTube video URL
        url: String,
    },

    /// Check configuration and API key
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the current configuration to the config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::parse_from(["precis", "-vv", "summarize", "https://youtu.be/abc123"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Summarize { url }) => assert_eq!(url, "https://youtu.be/abc123"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::parse_from(["precis", "--config", "/tmp/precis.toml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config.as_deref(), Some("/tmp/precis.toml"));
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["precis", "serve", "--host", "0.0.0.0", "-p", "9000"]);
        match cli.command {
            Some(Commands::Serve { host, port }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
