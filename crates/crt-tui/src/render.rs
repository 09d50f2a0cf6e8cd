//! Pure view/render functions for the console.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::state::AppState;
use crate::statusline::render_status_line;
use crate::{input, transcript};

/// Height of status line below input.
const STATUS_HEIGHT: u16 = 1;

/// Renders the entire console to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let input_height = input::input_height(&app.input);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(input_height),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    transcript::render_transcript(&app.transcript, frame, chunks[0]);
    input::render_input(&app.input, &app.session.prompt, frame, chunks[1]);
    render_status_line(
        &app.session,
        app.connection,
        !app.transcript.is_following(),
        frame,
        chunks[2],
    );
}

/// Rows left for the transcript in a terminal `height` rows tall.
pub fn transcript_height(app: &AppState, height: u16) -> u16 {
    height.saturating_sub(input::input_height(&app.input) + STATUS_HEIGHT)
}
