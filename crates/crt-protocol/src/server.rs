//! Messages pushed from the game server to the console.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Display style of an `output` line. Unknown names decode as `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    Success,
    Error,
    Warning,
    Info,
    #[default]
    #[serde(other)]
    Normal,
}

/// Severity of a `system` notice. Unknown names decode as `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemLevel {
    Warning,
    Critical,
    #[default]
    #[serde(other)]
    Info,
}

/// Snapshot of the player's position and progress.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateUpdate {
    pub current_host: String,
    pub current_path: String,
    pub user: String,
    pub level: i64,
    pub score: i64,
}

/// A decoded server message.
///
/// `Unknown` keeps newer server kinds decodable; consumers ignore it.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Output {
        text: String,
        style: OutputStyle,
    },
    Error {
        error: String,
        code: Option<String>,
    },
    StateUpdate(StateUpdate),
    Prompt {
        prompt: String,
    },
    System {
        message: String,
        level: SystemLevel,
    },
    /// Server-side echo of a command line.
    Input {
        prompt: String,
        command: String,
    },
    Unknown {
        kind: String,
    },
}

impl ServerMessage {
    /// Returns the wire kind of this message.
    pub fn kind(&self) -> &str {
        match self {
            ServerMessage::Output { .. } => "output",
            ServerMessage::Error { .. } => "error",
            ServerMessage::StateUpdate(_) => "state_update",
            ServerMessage::Prompt { .. } => "prompt",
            ServerMessage::System { .. } => "system",
            ServerMessage::Input { .. } => "input",
            ServerMessage::Unknown { kind } => kind,
        }
    }
}

/// A decoded frame: the message plus the server's optional send time.
#[derive(Debug, Clone, PartialEq)]
pub struct Inbound {
    pub message: ServerMessage,
    pub timestamp: Option<f64>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
    #[serde(default)]
    timestamp: Option<f64>,
}

#[derive(Deserialize)]
struct OutputPayload {
    text: String,
    #[serde(default)]
    style: Option<OutputStyle>,
}

#[derive(Deserialize)]
struct ErrorPayload {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Deserialize)]
struct PromptPayload {
    prompt: String,
}

#[derive(Deserialize)]
struct SystemPayload {
    message: String,
    #[serde(default)]
    level: Option<SystemLevel>,
}

#[derive(Deserialize)]
struct InputPayload {
    prompt: String,
    command: String,
}

fn payload<T: DeserializeOwned>(kind: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).with_context(|| format!("Invalid payload for '{kind}' message"))
}

/// Decodes one JSON text frame.
///
/// # Errors
/// Returns an error if the frame is not a JSON envelope, or if a known kind
/// carries a payload of the wrong shape. Unknown kinds are not errors.
pub fn decode_server_message(text: &str) -> Result<Inbound> {
    let envelope: Envelope =
        serde_json::from_str(text).context("Failed to parse message envelope")?;
    let Envelope {
        kind,
        payload: body,
        timestamp,
    } = envelope;

    let message = match kind.as_str() {
        "output" => {
            let p: OutputPayload = payload(&kind, body)?;
            ServerMessage::Output {
                text: p.text,
                style: p.style.unwrap_or_default(),
            }
        }
        "error" => {
            let p: ErrorPayload = payload(&kind, body)?;
            ServerMessage::Error {
                error: p.error,
                code: p.code,
            }
        }
        "state_update" => ServerMessage::StateUpdate(payload(&kind, body)?),
        "prompt" => {
            let p: PromptPayload = payload(&kind, body)?;
            ServerMessage::Prompt { prompt: p.prompt }
        }
        "system" => {
            let p: SystemPayload = payload(&kind, body)?;
            ServerMessage::System {
                message: p.message,
                level: p.level.unwrap_or_default(),
            }
        }
        "input" => {
            let p: InputPayload = payload(&kind, body)?;
            ServerMessage::Input {
                prompt: p.prompt,
                command: p.command,
            }
        }
        _ => {
            tracing::debug!(kind = %kind, "Unrecognized server message kind");
            ServerMessage::Unknown { kind }
        }
    };

    Ok(Inbound { message, timestamp })
}
