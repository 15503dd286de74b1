//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Config file used when `--config` is not given. Optional.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "metrics-dash")]
#[command(author, version, about = "Live-updating dashboard for a JSON metrics endpoint")]
pub struct Cli {
    /// Configuration file path (must exist when given)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (overrides logging.level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show live metrics, refreshed on a fixed cadence
    Watch(WatchArgs),
    /// Fetch once, print the metrics and exit
    Once(OnceArgs),
    /// Validate configuration
    ValidateConfig,
}

impl Commands {
    /// Whether the command takes over the terminal screen.
    pub fn owns_terminal(&self) -> bool {
        matches!(self, Commands::Watch(args) if !args.plain)
    }
}

#[derive(clap::Args)]
pub struct WatchArgs {
    /// Metrics endpoint URL (overrides endpoint.url)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Seconds between refreshes (overrides display.refresh_interval_secs)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Print each update as plain text instead of drawing the dashboard
    #[arg(long)]
    pub plain: bool,
}

#[derive(clap::Args)]
pub struct OnceArgs {
    /// Metrics endpoint URL (overrides endpoint.url)
    #[arg(short, long)]
    pub url: Option<String>,
}
