//! Line editor state.
//!
//! Owns the prompt line, the submitted-command history and the completion
//! suggestions. Every operation is a synchronous transition; only
//! [`EditorState::on_submit`] and [`EditorState::on_clear_shortcut`] produce
//! an [`EditorEffect`] for the controller.

use super::{CursorMove, LineBuffer};
use crate::autocomplete;
use crate::common::sanitize_for_display;

/// Commands handled locally that wipe the transcript.
const CLEAR_COMMANDS: &[&str] = &["clear", "cls"];

/// Effect emitted by the editor for the controller to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEffect {
    /// Send this command line, exactly as typed.
    SubmitCommand(String),
    /// Empty the transcript.
    ClearScreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDirection {
    /// Backspace.
    Backward,
    /// Delete key.
    Forward,
}

/// Editor state: line buffer, history and suggestions.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    buffer: LineBuffer,

    /// Submitted commands, oldest first.
    history: Vec<String>,

    /// Position while navigating history, counted from the newest entry
    /// (0 = newest). `None` when not navigating.
    history_cursor: Option<usize>,

    /// Completion candidates from the last ambiguous Tab.
    suggestions: Vec<String>,

    /// Oldest entries are dropped beyond this many. `None` keeps everything.
    history_limit: Option<usize>,
}

impl EditorState {
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            history_limit,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Inserts typed text at the cursor, replacing any selection.
    pub fn on_character_input(&mut self, text: &str) {
        self.buffer.insert_str(text);
        self.after_edit();
    }

    /// Inserts pasted text. The prompt is a single line, so line breaks
    /// become spaces.
    pub fn on_paste(&mut self, text: &str) {
        let flattened = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
        let sanitized = sanitize_for_display(&flattened);
        if sanitized.is_empty() {
            return;
        }
        self.on_character_input(&sanitized);
    }

    /// Submits the line. Blank lines are ignored.
    pub fn on_submit(&mut self) -> Option<EditorEffect> {
        let raw = self.buffer.text().to_string();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let is_clear = CLEAR_COMMANDS.contains(&trimmed.to_lowercase().as_str());
        self.push_history(raw.clone());
        self.buffer.clear();
        self.after_edit();

        if is_clear {
            Some(EditorEffect::ClearScreen)
        } else {
            Some(EditorEffect::SubmitCommand(raw))
        }
    }

    /// Steps to an older history entry, stopping at the oldest.
    pub fn on_history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let oldest = self.history.len() - 1;
        let next = self.history_cursor.map_or(0, |idx| (idx + 1).min(oldest));
        self.show_history_entry(next);
    }

    /// Steps to a newer history entry. Past the newest it leaves navigation
    /// with an empty line. Does nothing when not navigating.
    pub fn on_history_next(&mut self) {
        match self.history_cursor {
            None => {}
            Some(0) => {
                self.history_cursor = None;
                self.buffer.clear();
                self.suggestions.clear();
            }
            Some(idx) => self.show_history_entry(idx - 1),
        }
    }

    pub fn on_cursor_left(&mut self) {
        self.buffer.move_cursor(CursorMove::Back, false);
    }

    pub fn on_cursor_right(&mut self) {
        self.buffer.move_cursor(CursorMove::Forward, false);
    }

    pub fn on_home(&mut self) {
        self.buffer.move_cursor(CursorMove::Head, false);
    }

    pub fn on_end(&mut self) {
        self.buffer.move_cursor(CursorMove::End, false);
    }

    pub fn on_word_left(&mut self) {
        self.buffer.move_cursor(CursorMove::WordBack, false);
    }

    pub fn on_word_right(&mut self) {
        self.buffer.move_cursor(CursorMove::WordForward, false);
    }

    /// Moves the cursor while growing the selection.
    pub fn on_select(&mut self, movement: CursorMove) {
        self.buffer.move_cursor(movement, true);
    }

    /// Completes the line and records the candidates of an ambiguous match.
    pub fn on_tab_complete(&mut self) {
        let current = self.buffer.text().to_string();
        let result = autocomplete::complete(&current);
        let completed = result.apply(&current);

        if completed != current {
            self.buffer.set_text(&completed);
            self.history_cursor = None;
        }

        self.suggestions = if result.multiple_matches {
            result.matches
        } else {
            Vec::new()
        };
    }

    /// Clear-terminal chord.
    pub fn on_clear_shortcut(&mut self) -> EditorEffect {
        EditorEffect::ClearScreen
    }

    pub fn on_delete(&mut self, direction: DeleteDirection) {
        match direction {
            DeleteDirection::Backward => self.buffer.delete_prev_char(),
            DeleteDirection::Forward => self.buffer.delete_next_char(),
        }
        self.after_edit();
    }

    pub fn on_delete_word(&mut self) {
        self.buffer.delete_word_left();
        self.after_edit();
    }

    pub fn on_kill_to_end(&mut self) {
        self.buffer.delete_line_by_end();
        self.after_edit();
    }

    pub fn on_kill_to_head(&mut self) {
        self.buffer.delete_line_by_head();
        self.after_edit();
    }

    /// Empties the line and leaves history navigation.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.after_edit();
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    fn show_history_entry(&mut self, cursor: usize) {
        let idx = self.history.len() - 1 - cursor;
        self.history_cursor = Some(cursor);
        self.buffer.set_text(&self.history[idx]);
        self.suggestions.clear();
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if let Some(limit) = self.history_limit
            && self.history.len() > limit
        {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
    }

    /// Direct edits clear suggestions and leave history navigation.
    fn after_edit(&mut self) {
        self.suggestions.clear();
        self.history_cursor = None;
    }
}
