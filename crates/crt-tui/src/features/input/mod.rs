//! Input feature slice.
//!
//! The prompt line: a single-line editor with history, tab completion and
//! a selection, plus the key bindings that drive it.

mod line_buffer;
mod render;
mod state;
mod update;

pub use line_buffer::{CursorMove, LineBuffer};
pub use render::{input_height, render_input};
pub use state::{DeleteDirection, EditorEffect, EditorState};
pub use update::{InputContext, OFFLINE_NOTICE, apply_editor_effect, handle_main_key, handle_paste};
