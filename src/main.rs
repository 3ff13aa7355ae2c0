//! pfftx CLI - Build orchestrator for PFFT-based native extensions
//!
//! Entry point for the pfftx command-line application.

use anyhow::Result;
use clap::Parser;

use pfftx::cli::output::{display_error, OutputConfig};
use pfftx::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber; -v raises the level, -q drops it
    let default_level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    // Apply output configuration globally
    let output_config = OutputConfig::new(cli.quiet, cli.json);
    output_config.apply_global();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
