//! Wire types shared between the console and the game server.
//!
//! Every frame on the socket is a JSON envelope:
//!
//! ```text
//! { "type": "<kind>", "payload": { ... }, "timestamp": 1712345678.9 }
//! ```
//!
//! Inbound frames decode into [`ServerMessage`]; outbound frames are built
//! from [`ClientMessage`].

mod client;
mod server;

pub use client::ClientMessage;
pub use server::{
    Inbound, OutputStyle, ServerMessage, StateUpdate, SystemLevel, decode_server_message,
};
