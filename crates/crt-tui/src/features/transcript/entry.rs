//! Transcript entry types.

use crt_protocol::{OutputStyle, SystemLevel};

/// One immutable line group in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    /// Command output from the server.
    Output { text: String, style: OutputStyle },
    /// A submitted command shown behind the prompt it was typed at.
    InputEcho { prompt: String, command: String },
    /// Notice from the server or from the console itself.
    System { message: String, level: SystemLevel },
    /// Error reported by the server.
    ErrorNote { error: String, code: Option<String> },
}

impl TranscriptEntry {
    pub fn system(message: impl Into<String>, level: SystemLevel) -> Self {
        TranscriptEntry::System {
            message: message.into(),
            level,
        }
    }

    pub fn input_echo(prompt: impl Into<String>, command: impl Into<String>) -> Self {
        TranscriptEntry::InputEcho {
            prompt: prompt.into(),
            command: command.into(),
        }
    }
}
