//! Metrics dashboard CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, DEFAULT_CONFIG_PATH};
use metrics_config::load_config;
use metrics_monitor::{setup_logging, LogTarget};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&config_path, cli.config.is_some())
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|l| l.as_str())
        .unwrap_or(config.logging.level.as_str());
    let target = LogTarget::resolve(
        config.logging.file.as_deref().map(Path::new),
        cli.command.owns_terminal(),
    );
    let _log_guard = setup_logging(
        log_level,
        cli.json_logs || config.logging.is_json(),
        target,
    )
    .context("Failed to open log file")?;

    // Execute command
    match cli.command {
        Commands::Watch(args) => cli::commands::watch::run(args, &config).await,
        Commands::Once(args) => cli::commands::once::run(args, &config).await,
        Commands::ValidateConfig => {
            cli::commands::validate::run(&config_path, cli.config.is_some()).await
        }
    }
}
