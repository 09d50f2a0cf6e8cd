//! Status line feature slice.
//!
//! One row under the prompt: connection indicator, where the player is,
//! and their progress.

mod render;
mod state;

pub use render::render_status_line;
pub use state::ConnectionStatus;
