//! Configuration management for the console.
//!
//! Loads configuration from ${CRT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, run `cargo xtask update-default-config`.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for configuration and log directories.
    //!
    //! CRT_HOME resolution order:
    //! 1. CRT_HOME environment variable (if set)
    //! 2. ~/.config/crt (default)
    //! 3. ./.crt when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the CRT home directory.
    pub fn crt_home() -> PathBuf {
        if let Ok(home) = std::env::var("CRT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".crt"),
            |h| h.join(".config").join("crt"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        crt_home().join("config.toml")
    }

    /// Returns the directory holding log files.
    pub fn logs_dir() -> PathBuf {
        crt_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WebSocket endpoint of the game server.
    pub server_url: String,

    /// Log filter directive (overridden by `CRT_LOG`).
    pub log_level: String,

    /// Maximum commands kept for history navigation (0 = unlimited).
    pub history_limit: usize,

    /// Idle UI poll interval in milliseconds.
    pub tick_ms: u64,
}

impl Config {
    pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8000/ws/game";
    const DEFAULT_LOG_LEVEL: &str = "info";
    const DEFAULT_TICK_MS: u64 = 100;
    /// Lower bound so a bad config can't spin the event loop.
    const MIN_TICK_MS: u64 = 10;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the UI idle poll interval.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(Self::MIN_TICK_MS))
    }

    /// Returns the history limit, `None` when unlimited.
    pub fn history_limit(&self) -> Option<usize> {
        (self.history_limit > 0).then_some(self.history_limit)
    }

    /// Saves only the `server_url` field to the config file.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_server_url(server_url: &str) -> Result<()> {
        Self::save_server_url_to(&paths::config_path(), server_url)
    }

    /// Saves only the `server_url` field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_server_url_to(path: &Path, server_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let url = parse_server_url(server_url)?;

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["server_url"] = value(url.as_str());

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// This is used by `xtask update-default-config` to keep
    /// `default_config.toml` in sync with Rust default values.
    ///
    /// # Errors
    /// Returns an error if the template or the generated values fail to parse.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let config = Config::default();
        let generated_toml =
            toml::to_string(&config).context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;

        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: Self::DEFAULT_SERVER_URL.to_string(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
            history_limit: 0,
            tick_ms: Self::DEFAULT_TICK_MS,
        }
    }
}

/// Parses and validates a game server URL (`ws://` or `wss://`).
///
/// # Errors
/// Returns an error if the URL is malformed or uses another scheme.
pub fn parse_server_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid server URL '{raw}'"))?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => bail!("Unsupported server URL scheme '{other}' (expected ws or wss)"),
    }
}
