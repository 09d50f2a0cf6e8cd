//! Transcript state: entries plus scroll position.

use super::{TranscriptEntry, entry_lines};

/// Append-only transcript with a bottom-relative scroll offset.
///
/// `offset_from_bottom == 0` means the view follows new output.
#[derive(Debug, Default)]
pub struct TranscriptState {
    entries: Vec<TranscriptEntry>,
    offset_from_bottom: usize,
    viewport_width: usize,
    viewport_height: usize,
    /// Rendered row count of all entries at `viewport_width`.
    wrapped_rows: usize,
}

impl TranscriptState {
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry. A scrolled-back view stays on the same rows.
    pub fn push(&mut self, entry: TranscriptEntry) {
        if self.viewport_width > 0 {
            let rows = entry_lines(&entry, self.viewport_width).len();
            self.wrapped_rows += rows;
            if !self.is_following() {
                self.offset_from_bottom += rows;
            }
        }
        self.entries.push(entry);
    }

    /// Empties the transcript and resumes following.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.offset_from_bottom = 0;
        self.wrapped_rows = 0;
    }

    /// Records the size of the transcript pane from the last frame.
    /// Rows are re-wrapped only when the width changes.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        if width != self.viewport_width {
            self.viewport_width = width;
            self.wrapped_rows = self.wrap_all();
        }
        self.viewport_height = height;
        self.offset_from_bottom = self.offset_from_bottom.min(self.max_offset());
    }

    pub fn is_following(&self) -> bool {
        self.offset_from_bottom == 0
    }

    pub fn page_up(&mut self) {
        let target = self.offset_from_bottom + self.page_size();
        self.offset_from_bottom = target.min(self.max_offset());
    }

    pub fn page_down(&mut self) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(self.page_size());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset_from_bottom = self.max_offset();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset_from_bottom = 0;
    }

    /// First visible row for `total` rendered rows in a pane of `height`.
    pub fn window_start(&self, total: usize, height: usize) -> usize {
        let bottom_start = total.saturating_sub(height);
        bottom_start.saturating_sub(self.offset_from_bottom)
    }

    fn page_size(&self) -> usize {
        self.viewport_height.saturating_sub(1).max(1)
    }

    fn wrap_all(&self) -> usize {
        if self.viewport_width == 0 {
            return 0;
        }
        self.entries
            .iter()
            .map(|entry| entry_lines(entry, self.viewport_width).len())
            .sum()
    }

    fn max_offset(&self) -> usize {
        self.wrapped_rows.saturating_sub(self.viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use crt_protocol::OutputStyle;

    use super::*;

    fn output(text: &str) -> TranscriptEntry {
        TranscriptEntry::Output {
            text: text.to_string(),
            style: OutputStyle::Normal,
        }
    }

    fn filled(lines: usize) -> TranscriptState {
        let mut state = TranscriptState::default();
        state.set_viewport(20, 5);
        for i in 0..lines {
            state.push(output(&format!("line {i}")));
        }
        state
    }

    #[test]
    fn push_keeps_arrival_order() {
        let state = filled(3);
        assert_eq!(state.entries(), [output("line 0"), output("line 1"), output("line 2")]);
    }

    #[test]
    fn follows_bottom_by_default() {
        let state = filled(12);
        assert!(state.is_following());
        assert_eq!(state.window_start(12, 5), 7);
    }

    #[test]
    fn page_up_is_clamped_to_top() {
        let mut state = filled(12);
        state.page_up();
        assert_eq!(state.window_start(12, 5), 3);
        state.page_up();
        state.page_up();
        assert_eq!(state.window_start(12, 5), 0);

        state.page_down();
        state.page_down();
        state.page_down();
        assert!(state.is_following());
    }

    #[test]
    fn scrolled_view_is_pinned_when_output_arrives() {
        let mut state = filled(12);
        state.page_up();
        let before = state.window_start(12, 5);
        state.push(output("late"));
        assert_eq!(state.window_start(13, 5), before);
    }

    #[test]
    fn row_count_tracks_pushes_and_width_changes() {
        let mut state = filled(12);
        assert_eq!(state.wrapped_rows, 12);

        // "line N" splits into two rows at width 4.
        state.set_viewport(4, 5);
        assert_eq!(state.wrapped_rows, 24);
        state.push(output("line x"));
        assert_eq!(state.wrapped_rows, 26);

        state.set_viewport(4, 8);
        assert_eq!(state.wrapped_rows, 26);
        state.scroll_to_top();
        assert_eq!(state.window_start(26, 8), 0);

        state.set_viewport(20, 5);
        assert_eq!(state.wrapped_rows, 13);

        state.clear();
        assert_eq!(state.wrapped_rows, 0);
    }

    #[test]
    fn clear_empties_and_follows() {
        let mut state = filled(12);
        state.scroll_to_top();
        state.clear();
        assert!(state.is_empty());
        assert!(state.is_following());
    }
}
