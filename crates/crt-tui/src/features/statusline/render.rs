//! Status line rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::ConnectionStatus;
use crate::common::truncate_with_ellipsis;
use crate::session::SessionState;

/// Columns kept for the location before it is truncated.
const MAX_LOCATION_WIDTH: usize = 48;

/// Renders the status line below the prompt.
pub fn render_status_line(
    session: &SessionState,
    status: ConnectionStatus,
    scrolled_back: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let status_color = match status {
        ConnectionStatus::Connecting => Color::Yellow,
        ConnectionStatus::Online => Color::Green,
        ConnectionStatus::Offline => Color::Red,
    };
    let dim = Style::default().fg(Color::DarkGray);
    let location = format!(
        "{}@{}:{}",
        session.user, session.current_host, session.current_path
    );

    let mut spans = vec![
        Span::styled(
            format!("[{}]", status.label()),
            Style::default()
                .fg(status_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            truncate_with_ellipsis(&location, MAX_LOCATION_WIDTH),
            Style::default().fg(Color::Green),
        ),
        Span::styled("  LVL ", dim),
        Span::styled(session.level.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled("  SCORE ", dim),
        Span::styled(session.score.to_string(), Style::default().fg(Color::Cyan)),
    ];

    if scrolled_back {
        spans.extend([
            Span::raw("  "),
            Span::styled("PgDn", dim),
            Span::raw(" latest"),
        ]);
    }

    spans.extend([
        Span::raw("  "),
        Span::styled("Ctrl+L", dim),
        Span::raw(" clear  "),
        Span::styled("Ctrl+C", dim),
        Span::raw(" quit"),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
