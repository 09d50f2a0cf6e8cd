//! File logging for the console.
//!
//! The terminal belongs to the TUI, so log lines go to
//! `${CRT_HOME}/logs/crt.log` instead of stdout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, paths};

/// Environment variable overriding `log_level`.
pub const LOG_ENV: &str = "CRT_LOG";

const LOG_FILE: &str = "crt.log";

/// Installs the global subscriber writing to the default log directory.
///
/// Keep the returned guard alive for the lifetime of the process; dropping it
/// flushes and stops the background writer.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    init_in(&paths::logs_dir(), config)
}

/// Installs the global subscriber writing to `crt.log` inside `dir`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn init_in(dir: &Path, config: &Config) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter_for(config))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    if installed.is_err() {
        // Another subscriber owns the process (tests, embedding); keep it.
        tracing::debug!("Global tracing subscriber already installed");
    }

    Ok(guard)
}

/// Builds the filter: `CRT_LOG` wins, then `log_level`, then `info`.
fn filter_for(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_init_in_creates_log_directory() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");

        let guard = init_in(&logs, &Config::default()).unwrap();
        tracing::info!("logging ready");
        drop(guard);

        assert!(logs.is_dir());
        assert!(logs.join(LOG_FILE).exists());
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = Config {
            log_level: "[[not a directive".to_string(),
            ..Config::default()
        };
        // Must not panic on a bad directive.
        let _filter = filter_for(&config);
    }
}
