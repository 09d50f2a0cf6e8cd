//! Session feature slice.
//!
//! Mirrors the player's remote session (host, path, user, progress and
//! prompt) by folding server messages in arrival order.

mod state;
mod update;

pub use state::SessionState;
pub use update::reduce;
