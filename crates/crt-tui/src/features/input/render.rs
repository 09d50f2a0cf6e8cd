//! Input feature view.
//!
//! The prompt line scrolls horizontally so the cursor always stays on
//! screen. Widths are terminal columns, not chars.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{EditorState, LineBuffer};
use crate::common::{sanitize_for_display, truncate_with_ellipsis};

/// Rows needed by the input area: the prompt line plus the suggestion row
/// when there is something to suggest.
pub fn input_height(input: &EditorState) -> u16 {
    if input.suggestions().is_empty() { 1 } else { 2 }
}

/// Renders suggestions (if any) and the prompt line, and places the cursor.
pub fn render_input(input: &EditorState, prompt: &str, frame: &mut Frame, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let mut prompt_row = area;
    if !input.suggestions().is_empty() && area.height > 1 {
        let suggestion_row = Rect::new(area.x, area.y, area.width, 1);
        prompt_row = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        let text = truncate_with_ellipsis(&input.suggestions().join("  "), area.width as usize);
        let line = Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(line), suggestion_row);
    }

    let view = layout_prompt_line(prompt, input.buffer(), prompt_row.width as usize);
    frame.render_widget(Paragraph::new(Line::from(view.spans)), prompt_row);

    let cursor_x = prompt_row.x + view.cursor_col as u16;
    frame.set_cursor_position((cursor_x, prompt_row.y));
}

/// Prompt line clipped to the available width.
struct PromptLine {
    spans: Vec<Span<'static>>,
    /// Display column of the cursor, relative to the row start.
    cursor_col: usize,
}

fn layout_prompt_line(prompt: &str, buffer: &LineBuffer, width: usize) -> PromptLine {
    let prompt = sanitize_for_display(prompt).replace('\n', " ");
    let prompt = truncate_with_ellipsis(&prompt, width.saturating_sub(1));
    let prompt_width = prompt.width();
    let text_width = width.saturating_sub(prompt_width);

    let chars: Vec<(char, usize)> = buffer
        .text()
        .chars()
        .map(|c| (c, c.width().unwrap_or(0)))
        .collect();
    let cursor = buffer.cursor().min(chars.len());

    // First visible char: scroll right until the cursor cell fits.
    let mut start = 0;
    let mut before_cursor: usize = chars[..cursor].iter().map(|(_, w)| w).sum();
    while start < cursor && before_cursor >= text_width {
        before_cursor -= chars[start].1;
        start += 1;
    }

    let selection = buffer.selection();
    let text_style = Style::default().fg(Color::White);
    let selected_style = text_style.add_modifier(Modifier::REVERSED);

    let mut spans = vec![Span::styled(
        prompt,
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )];
    let mut run = String::new();
    let mut run_selected = false;
    let mut used = 0;

    for (idx, &(c, w)) in chars.iter().enumerate().skip(start) {
        if used + w > text_width {
            break;
        }
        let selected = selection.is_some_and(|(from, to)| idx >= from && idx < to);
        if selected != run_selected && !run.is_empty() {
            let style = if run_selected { selected_style } else { text_style };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_selected = selected;
        run.push(c);
        used += w;
    }
    if !run.is_empty() {
        let style = if run_selected { selected_style } else { text_style };
        spans.push(Span::styled(run, style));
    }

    PromptLine {
        spans,
        cursor_col: (prompt_width + before_cursor).min(width.saturating_sub(1)),
    }
}
