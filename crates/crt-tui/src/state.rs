//! Application state composition.
//!
//! ```text
//! AppState
//! ├── input: EditorState        (prompt line, history, suggestions)
//! ├── transcript: TranscriptState
//! ├── session: SessionState     (mirror of the remote session)
//! └── connection: ConnectionStatus
//! ```
//!
//! Everything here is owned by the controller and only changed from the
//! event-processing path.

use crt_core::config::Config;

use crate::input::EditorState;
use crate::session::SessionState;
use crate::statusline::ConnectionStatus;
use crate::transcript::TranscriptState;

pub struct AppState {
    pub input: EditorState,
    pub transcript: TranscriptState,
    pub session: SessionState,
    pub connection: ConnectionStatus,
    /// Server endpoint, shown in connection notices.
    pub server_url: String,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config, server_url: impl Into<String>) -> Self {
        Self {
            input: EditorState::new(config.history_limit()),
            transcript: TranscriptState::default(),
            session: SessionState::default(),
            connection: ConnectionStatus::default(),
            server_url: server_url.into(),
            should_quit: false,
        }
    }
}
