//! Single-line text buffer for the command prompt.
//!
//! The cursor and selection anchor are measured in chars, never bytes, so
//! they always sit on a char boundary.

/// Cursor movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Forward,
    Back,
    Head,
    End,
    WordForward,
    WordBack,
}

/// Line buffer with a char cursor and an optional selection anchor.
///
/// The selection spans from `anchor` to `cursor` (either order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
    anchor: Option<usize>,
}

impl LineBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars, always within `0..=len_chars()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the selected char range, if it is non-empty.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        let (start, end) = if anchor <= self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        };
        (start < end).then_some((start, end))
    }

    /// Replaces the whole line and puts the cursor at its end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len_chars();
        self.anchor = None;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.anchor = None;
    }

    /// Inserts at the cursor, replacing the selection if there is one.
    pub fn insert_str(&mut self, text: &str) {
        self.delete_selection();
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text.insert_str(byte_idx, text);
        self.cursor += text.chars().count();
    }

    /// Backspace semantics. Removes the selection instead when present.
    pub fn delete_prev_char(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        self.delete_range(self.cursor - 1, self.cursor);
        self.cursor -= 1;
    }

    /// Delete-key semantics. Removes the selection instead when present.
    pub fn delete_next_char(&mut self) {
        if self.delete_selection() || self.cursor >= self.len_chars() {
            return;
        }
        self.delete_range(self.cursor, self.cursor + 1);
    }

    /// Deletes the word immediately to the left of the cursor.
    pub fn delete_word_left(&mut self) {
        if self.delete_selection() {
            return;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let start = scan_left_segment(&chars, self.cursor);
        self.delete_range(start, self.cursor);
        self.cursor = start;
    }

    /// Deletes from the cursor to the end of the line.
    pub fn delete_line_by_end(&mut self) {
        self.anchor = None;
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text.truncate(byte_idx);
    }

    /// Deletes from the start of the line to the cursor.
    pub fn delete_line_by_head(&mut self) {
        self.anchor = None;
        self.delete_range(0, self.cursor);
        self.cursor = 0;
    }

    /// Moves the cursor. With `select`, the selection grows from where the
    /// cursor was; without it, any selection is dropped.
    pub fn move_cursor(&mut self, movement: CursorMove, select: bool) {
        if select {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }

        let len = self.len_chars();
        self.cursor = match movement {
            CursorMove::Forward => (self.cursor + 1).min(len),
            CursorMove::Back => self.cursor.saturating_sub(1),
            CursorMove::Head => 0,
            CursorMove::End => len,
            CursorMove::WordForward => {
                let chars: Vec<char> = self.text.chars().collect();
                scan_right_segment(&chars, self.cursor)
            }
            CursorMove::WordBack => {
                let chars: Vec<char> = self.text.chars().collect();
                scan_left_segment(&chars, self.cursor)
            }
        };
    }

    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.delete_range(start, end);
        self.cursor = start;
        self.anchor = None;
        true
    }

    fn delete_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let start = char_to_byte_index(&self.text, start);
        let end = char_to_byte_index(&self.text, end);
        self.text.replace_range(start..end, "");
    }
}

/// Returns true if the character is a word character (alphanumeric or underscore).
/// Punctuation and other symbols are treated as word boundaries.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CharClass {
    Whitespace,
    Word,
    Punct,
}

fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if is_word_char(c) {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

fn scan_left_segment(chars: &[char], idx: usize) -> usize {
    let mut idx = idx.min(chars.len());
    if idx == 0 {
        return 0;
    }
    let class = char_class(chars[idx - 1]);
    while idx > 0 && char_class(chars[idx - 1]) == class {
        idx -= 1;
    }
    idx
}

fn scan_right_segment(chars: &[char], mut idx: usize) -> usize {
    if idx >= chars.len() {
        return chars.len();
    }
    let class = char_class(chars[idx]);
    while idx < chars.len() && char_class(chars[idx]) == class {
        idx += 1;
    }
    idx
}

/// Converts a char index into a byte index.
pub(crate) fn char_to_byte_index(line: &str, col: usize) -> usize {
    if col == 0 {
        return 0;
    }
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> LineBuffer {
        let mut buf = LineBuffer::default();
        buf.set_text(text);
        buf
    }

    #[test]
    fn insert_in_the_middle_of_multibyte_text() {
        let mut buf = buffer("héllo");
        buf.move_cursor(CursorMove::Head, false);
        buf.move_cursor(CursorMove::Forward, false);
        buf.move_cursor(CursorMove::Forward, false);
        buf.insert_str("ü");
        assert_eq!(buf.text(), "héüllo");
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn cursor_is_clamped_at_both_ends() {
        let mut buf = buffer("ab");
        buf.move_cursor(CursorMove::Forward, false);
        assert_eq!(buf.cursor(), 2);
        buf.move_cursor(CursorMove::Head, false);
        buf.move_cursor(CursorMove::Back, false);
        assert_eq!(buf.cursor(), 0);
        buf.delete_prev_char();
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn delete_next_char_at_end_is_noop() {
        let mut buf = buffer("ab");
        buf.delete_next_char();
        assert_eq!(buf.text(), "ab");
        buf.move_cursor(CursorMove::Head, false);
        buf.delete_next_char();
        assert_eq!(buf.text(), "b");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn typing_replaces_selection() {
        let mut buf = buffer("cat /etc/passwd");
        buf.move_cursor(CursorMove::WordBack, true);
        assert_eq!(buf.selection(), Some((9, 15)));
        buf.insert_str("shadow");
        assert_eq!(buf.text(), "cat /etc/shadow");
        assert_eq!(buf.selection(), None);
    }

    #[test]
    fn backspace_removes_selection_only() {
        let mut buf = buffer("scan 10.0.0.1");
        buf.move_cursor(CursorMove::Head, false);
        for _ in 0..4 {
            buf.move_cursor(CursorMove::Forward, true);
        }
        buf.delete_prev_char();
        assert_eq!(buf.text(), " 10.0.0.1");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn plain_move_drops_selection() {
        let mut buf = buffer("help");
        buf.move_cursor(CursorMove::Head, true);
        assert!(buf.selection().is_some());
        buf.move_cursor(CursorMove::End, false);
        assert_eq!(buf.selection(), None);
    }

    #[test]
    fn delete_word_left_path_segments() {
        let mut buf = buffer("cd /home/user");

        buf.delete_word_left();
        assert_eq!(buf.text(), "cd /home/");

        buf.delete_word_left();
        assert_eq!(buf.text(), "cd /home");

        buf.delete_word_left();
        assert_eq!(buf.text(), "cd /");
    }

    #[test]
    fn word_movement() {
        let mut buf = buffer("connect 10.0.0.5");
        buf.move_cursor(CursorMove::Head, false);
        buf.move_cursor(CursorMove::WordForward, false);
        assert_eq!(buf.cursor(), 7);
        buf.move_cursor(CursorMove::WordForward, false);
        assert_eq!(buf.cursor(), 8);
        buf.move_cursor(CursorMove::End, false);
        buf.move_cursor(CursorMove::WordBack, false);
        assert_eq!(buf.cursor(), 15);
    }

    #[test]
    fn kill_to_head_and_end() {
        let mut buf = buffer("cat file");
        buf.move_cursor(CursorMove::Head, false);
        for _ in 0..3 {
            buf.move_cursor(CursorMove::Forward, false);
        }
        buf.delete_line_by_end();
        assert_eq!(buf.text(), "cat");

        buf.set_text("cat file");
        for _ in 0..4 {
            buf.move_cursor(CursorMove::Back, false);
        }
        buf.delete_line_by_head();
        assert_eq!(buf.text(), "file");
        assert_eq!(buf.cursor(), 0);
    }
}
