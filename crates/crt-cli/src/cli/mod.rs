//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use crt_core::config;

mod commands;

#[derive(Parser)]
#[command(name = "crt")]
#[command(version)]
#[command(about = "Terminal console for the CRT hacking game")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Game server WebSocket URL (overrides `server_url` from config)
    #[arg(long, value_name = "WS_URL")]
    url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
    /// Save the game server URL to the config file
    SetUrl {
        /// WebSocket URL, e.g. ws://localhost:8000/ws/game
        #[arg(value_name = "WS_URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // default to the console
    let Some(command) = cli.command else {
        let config = config::Config::load().context("load config")?;
        return commands::console::run(&config, cli.url.as_deref());
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
