//! Messages sent from the console to the game server.

use anyhow::{Context, Result};
use serde::Serialize;

/// Outbound message.
///
/// Serialized with the kind in `type` and the fields under `payload`,
/// e.g. `{"type":"command","payload":{"command":"ls -la","args":[]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A command line exactly as the user typed it.
    Command { command: String, args: Vec<String> },
    /// Session closed by the client.
    Disconnect {},
}

impl ClientMessage {
    /// Builds a command message. The server tokenizes the line itself, so
    /// `args` is always empty.
    pub fn command(command: impl Into<String>) -> Self {
        ClientMessage::Command {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Encodes the message as a JSON text frame.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to encode client message")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn encoded(message: &ClientMessage) -> Value {
        serde_json::from_str(&message.encode().unwrap()).unwrap()
    }

    #[test]
    fn command_is_sent_verbatim() {
        let message = ClientMessage::command("  cat /etc/passwd ");
        assert_eq!(
            encoded(&message),
            json!({
                "type": "command",
                "payload": { "command": "  cat /etc/passwd ", "args": [] }
            })
        );
    }

    #[test]
    fn disconnect_carries_empty_payload() {
        assert_eq!(
            encoded(&ClientMessage::Disconnect {}),
            json!({ "type": "disconnect", "payload": {} })
        );
    }
}
