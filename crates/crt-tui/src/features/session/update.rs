//! Session reducer.

use crt_protocol::ServerMessage;

use super::SessionState;
use crate::transcript::TranscriptEntry;

/// Folds one server message into the session.
///
/// Returns the transcript entry the message produces, if any. Total over
/// every message: unknown kinds change nothing.
pub fn reduce(session: &mut SessionState, message: &ServerMessage) -> Option<TranscriptEntry> {
    match message {
        ServerMessage::Output { text, style } => Some(TranscriptEntry::Output {
            text: text.clone(),
            style: *style,
        }),
        ServerMessage::StateUpdate(update) => {
            session.apply_update(update);
            None
        }
        ServerMessage::Prompt { prompt } => {
            session.prompt.clone_from(prompt);
            None
        }
        ServerMessage::System { message, level } => {
            Some(TranscriptEntry::system(message.clone(), *level))
        }
        ServerMessage::Error { error, code } => Some(TranscriptEntry::ErrorNote {
            error: error.clone(),
            code: code.clone(),
        }),
        ServerMessage::Input { prompt, command } => {
            Some(TranscriptEntry::input_echo(prompt.clone(), command.clone()))
        }
        ServerMessage::Unknown { kind } => {
            tracing::debug!(%kind, "Ignoring unknown server message");
            None
        }
    }
}
