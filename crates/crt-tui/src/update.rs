//! Console reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Each event is fully applied before
//! the next one is looked at.

use crossterm::event::{Event, KeyEvent};
use crt_core::channel::ChannelEvent;
use crt_protocol::SystemLevel;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::input::InputContext;
use crate::state::AppState;
use crate::statusline::ConnectionStatus;
use crate::transcript::{TranscriptEntry, TranscriptMutation};
use crate::{input, render, session, transcript};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Session(channel_event) => {
            handle_session_event(app, channel_event);
            vec![]
        }
    }
}

/// Applies transcript mutations returned by feature reducers.
fn apply_mutations(app: &mut AppState, mutations: Vec<TranscriptMutation>) {
    for mutation in mutations {
        transcript::apply_mutation(&mut app.transcript, mutation);
    }
}

fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    let viewport_height = render::transcript_height(app, height);
    app.transcript
        .set_viewport(width as usize, viewport_height as usize);
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            input::handle_paste(&mut app.input, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctx = InputContext {
        prompt: &app.session.prompt,
        online: app.connection.is_online(),
    };
    let (effects, mutations) = input::handle_main_key(&mut app.input, &ctx, key);
    apply_mutations(app, mutations);

    for effect in &effects {
        if let UiEffect::SendCommand { command } = effect {
            tracing::debug!(%command, "Submitting command");
        }
    }
    effects
}

// ============================================================================
// Session Event Handlers
// ============================================================================

fn handle_session_event(app: &mut AppState, event: ChannelEvent) {
    match event {
        ChannelEvent::Connected => {
            app.connection = ConnectionStatus::Online;
            let notice = format!("Connected to {}", app.server_url);
            app.transcript
                .push(TranscriptEntry::system(notice, SystemLevel::Info));
        }
        ChannelEvent::Message(message) => {
            if let Some(entry) = session::reduce(&mut app.session, &message) {
                app.transcript.push(entry);
            }
        }
        ChannelEvent::Disconnected { reason } => {
            app.connection = ConnectionStatus::Offline;
            let entry = match reason {
                Some(reason) => TranscriptEntry::system(
                    format!("Disconnected: {reason}"),
                    SystemLevel::Critical,
                ),
                None => TranscriptEntry::system("Disconnected from server", SystemLevel::Warning),
            };
            app.transcript.push(entry);
        }
    }
}
