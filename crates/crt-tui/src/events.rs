//! Unified event enum for the console.
//!
//! All inputs are converted to [`UiEvent`] before processing; the reducer
//! (`update`) pattern-matches on them one at a time.

use crossterm::event::Event as CrosstermEvent;
use crt_core::channel::ChannelEvent;

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick. Triggers a render.
    Tick,

    /// Emitted once per frame before other events, with the terminal size.
    Frame { width: u16, height: u16 },

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// Connection lifecycle or an inbound server message.
    Session(ChannelEvent),
}
