//! Console command handler.

use anyhow::{Context, Result};
use crt_core::{config, logging};

pub fn run(config: &config::Config, url_override: Option<&str>) -> Result<()> {
    let raw_url = url_override.unwrap_or(&config.server_url);
    let server_url = config::parse_server_url(raw_url)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = logging::init(config).context("init logging")?;

    crt_tui::run_console(config, &server_url).context("console failed")?;

    tracing::info!("Console closed");
    Ok(())
}
