//! Validate configuration command.

use anyhow::Result;
use metrics_config::{load_and_validate, to_toml, AppConfig};
use std::io::{self, Write};
use std::path::Path;

pub async fn run(config_path: &Path, required: bool) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_and_validate(config_path, required) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            write_summary(&mut io::stdout(), &config)?;
        }
        Err(e) => {
            println!("{}", e);
            return Err(e.into());
        }
    }

    Ok(())
}

fn write_summary<W: Write>(out: &mut W, config: &AppConfig) -> Result<()> {
    writeln!(out, "App: {}", config.app.name)?;
    writeln!(out, "Endpoint: {}", config.endpoint.url)?;
    writeln!(out, "Refresh interval: {}s", config.display.refresh_interval_secs)?;
    writeln!(out, "Request timeout: {}s", config.endpoint.timeout_secs)?;
    writeln!(out, "Log level: {}", config.logging.level)?;
    writeln!(out)?;
    write!(out, "{}", to_toml(config)?)?;
    out.flush()?;
    Ok(())
}
