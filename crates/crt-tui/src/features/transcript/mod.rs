//! Transcript feature slice.
//!
//! The transcript is the scrolling log above the prompt: server output,
//! echoed commands, and system and error notices. Entries are only ever
//! appended; the clear-screen effect empties it wholesale.

mod entry;
mod render;
mod state;
mod update;

pub use entry::TranscriptEntry;
pub use render::{entry_lines, render_transcript};
pub use state::TranscriptState;
pub use update::{TranscriptMutation, apply_mutation};
