//! Full-screen game console.
//!
//! A ratatui front end for the game server: a line editor with history and
//! tab completion, a scrolling transcript, and a status line mirroring the
//! remote session.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr, stdout};

use anyhow::Result;
use crt_core::config::Config;
pub use features::{autocomplete, input, session, statusline, transcript};
pub use runtime::ConsoleRuntime;
use url::Url;

/// Runs the console against `server_url` until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal fails.
pub fn run_console(config: &Config, server_url: &Url) -> Result<()> {
    // The console draws to stdout
    if !stdout().is_terminal() {
        anyhow::bail!("The console requires a terminal.");
    }

    tracing::info!(url = %server_url, "Starting console");

    let mut runtime = ConsoleRuntime::new(config, server_url)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
