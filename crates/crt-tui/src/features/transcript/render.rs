//! Transcript rendering.

use crt_protocol::{OutputStyle, SystemLevel};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{TranscriptEntry, TranscriptState};
use crate::common::{sanitize_for_display, wrap_to_width};

/// Converts one entry into width-wrapped, styled rows.
pub fn entry_lines(entry: &TranscriptEntry, width: usize) -> Vec<Line<'static>> {
    match entry {
        TranscriptEntry::Output { text, style } => {
            styled_rows(&sanitize_for_display(text), width, output_style(*style))
        }
        TranscriptEntry::InputEcho { prompt, command } => {
            let prompt = sanitize_for_display(prompt);
            let command = sanitize_for_display(command);
            echo_rows(&prompt, &command, width)
        }
        TranscriptEntry::System { message, level } => {
            styled_rows(&sanitize_for_display(message), width, system_style(*level))
        }
        TranscriptEntry::ErrorNote { error, code } => {
            let text = match code {
                Some(code) => format!("ERROR: {error} [{code}]"),
                None => format!("ERROR: {error}"),
            };
            styled_rows(
                &sanitize_for_display(&text),
                width,
                Style::default().fg(Color::Red),
            )
        }
    }
}

/// Renders the visible window of the transcript, bottom-aligned.
pub fn render_transcript(state: &TranscriptState, frame: &mut Frame, area: Rect) {
    let width = area.width as usize;
    let height = area.height as usize;

    let all_lines: Vec<Line<'static>> = state
        .entries()
        .iter()
        .flat_map(|entry| entry_lines(entry, width))
        .collect();

    let start = state.window_start(all_lines.len(), height);
    let mut visible: Vec<Line<'static>> = all_lines.into_iter().skip(start).take(height).collect();

    // Bottom-align: pad the top when content doesn't fill the pane
    if visible.len() < height {
        let mut padded = vec![Line::default(); height - visible.len()];
        padded.append(&mut visible);
        visible = padded;
    }

    frame.render_widget(Paragraph::new(visible), area);
}

fn styled_rows(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    wrap_to_width(text, width)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect()
}

fn echo_rows(prompt: &str, command: &str, width: usize) -> Vec<Line<'static>> {
    let prompt_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let command_style = Style::default().fg(Color::White);

    let mut rows = wrap_to_width(&format!("{prompt}{command}"), width).into_iter();
    let mut lines = Vec::new();

    if let Some(first) = rows.next() {
        match first.strip_prefix(prompt) {
            Some(rest) if !prompt.is_empty() => lines.push(Line::from(vec![
                Span::styled(prompt.to_string(), prompt_style),
                Span::styled(rest.to_string(), command_style),
            ])),
            _ => lines.push(Line::from(Span::styled(first, command_style))),
        }
    }
    lines.extend(rows.map(|row| Line::from(Span::styled(row, command_style))));
    lines
}

fn output_style(style: OutputStyle) -> Style {
    let base = Style::default();
    match style {
        OutputStyle::Normal => base.fg(Color::Green),
        OutputStyle::Success => base.fg(Color::LightGreen).add_modifier(Modifier::BOLD),
        OutputStyle::Error => base.fg(Color::Red),
        OutputStyle::Warning => base.fg(Color::Yellow),
        OutputStyle::Info => base.fg(Color::Cyan),
    }
}

fn system_style(level: SystemLevel) -> Style {
    let base = Style::default().add_modifier(Modifier::ITALIC);
    match level {
        SystemLevel::Info => base.fg(Color::Cyan),
        SystemLevel::Warning => base.fg(Color::Yellow),
        SystemLevel::Critical => base.fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}
