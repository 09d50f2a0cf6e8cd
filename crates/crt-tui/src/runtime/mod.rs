//! Console runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and produces
//! effects; this module executes them.
//!
//! Session traffic arrives on an unbounded channel fed by the session
//! worker thread. The loop drains it every pass, so server messages and
//! keystrokes are fed to the reducer one at a time in arrival order.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crt_core::channel::{ChannelEvent, SessionChannel, SessionHandle};
use crt_core::config::Config;
use crt_protocol::{ClientMessage, SystemLevel};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use url::Url;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::transcript::TranscriptEntry;
use crate::{render, terminal, update};

/// Tick cadence while the user is typing (60fps = ~16ms per frame).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Full-screen console runtime.
///
/// Terminal state is restored on drop and on panic; dropping the runtime
/// also closes the session.
pub struct ConsoleRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// `None` once the console has disconnected.
    session: Option<SessionHandle>,
    channel_rx: mpsc::UnboundedReceiver<ChannelEvent>,
    /// Tick cadence when idle.
    idle_poll: Duration,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl ConsoleRuntime {
    /// Opens the session to `server_url` and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the session thread cannot start or the terminal
    /// cannot be configured.
    pub fn new(config: &Config, server_url: &Url) -> Result<Self> {
        let (events_tx, channel_rx) = mpsc::unbounded_channel();
        let session = SessionChannel::spawn(server_url, events_tx)?;

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let mut state = AppState::new(config, server_url.as_str());
        state.transcript.push(TranscriptEntry::system(
            format!("Connecting to {server_url}..."),
            SystemLevel::Info,
        ));

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            session: Some(session),
            channel_rx,
            idle_poll: config.tick_interval(),
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if reading terminal events or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            // Layout updates happen before other events
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            if events.iter().any(|event| matches!(event, UiEvent::Terminal(_))) {
                self.last_terminal_event = Instant::now();
            }
            // Only Tick triggers render; other events batch until then
            if events.iter().any(|event| matches!(event, UiEvent::Tick)) {
                dirty = true;
            }

            let session = &mut self.session;
            reduce_batch(&mut self.state, events, |state, effect| {
                execute_effect(session, state, effect);
            });

            if dirty && !self.state.should_quit {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(channel_event) = self.channel_rx.try_recv() {
            events.push(UiEvent::Session(channel_event));
        }

        let tick_interval = if self.last_terminal_event.elapsed() < self.idle_poll {
            FRAME_DURATION
        } else {
            self.idle_poll
        };

        // Session traffic goes straight to render, so don't block on input
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        let session_traffic = events
            .iter()
            .any(|event| matches!(event, UiEvent::Session(_)));
        if session_traffic || self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }
}

// ============================================================================
// Effect Dispatch
// ============================================================================

/// Feeds `events` to the reducer in order, executing each event's effects
/// before the next event. Stops as soon as an effect ends the console.
fn reduce_batch(
    state: &mut AppState,
    events: Vec<UiEvent>,
    mut execute: impl FnMut(&mut AppState, UiEffect),
) {
    for event in events {
        for effect in update::update(state, event) {
            execute(state, effect);
        }
        if state.should_quit {
            break;
        }
    }
}

fn execute_effect(session: &mut Option<SessionHandle>, state: &mut AppState, effect: UiEffect) {
    match effect {
        UiEffect::Quit => {
            if let Some(session) = session.take() {
                session.disconnect();
            }
            state.should_quit = true;
        }
        UiEffect::SendCommand { command } => match session {
            Some(session) => session.send(ClientMessage::command(command)),
            None => tracing::warn!(%command, "No session; command dropped"),
        },
    }
}

impl Drop for ConsoleRuntime {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.disconnect();
        }
        let _ = terminal::restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use crt_protocol::{OutputStyle, ServerMessage};

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, modifiers)))
    }

    fn output(text: &str) -> UiEvent {
        UiEvent::Session(ChannelEvent::Message(ServerMessage::Output {
            text: text.to_string(),
            style: OutputStyle::Normal,
        }))
    }

    fn quit_on_effect(state: &mut AppState, effect: UiEffect) {
        if effect == UiEffect::Quit {
            state.should_quit = true;
        }
    }

    #[test]
    fn events_after_quit_are_not_reduced() {
        let mut state = AppState::new(&Config::default(), "ws://localhost:8000/ws/game");
        let events = vec![
            output("before"),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            output("after"),
            key(KeyCode::Char('x'), KeyModifiers::NONE),
        ];

        reduce_batch(&mut state, events, quit_on_effect);

        assert!(state.should_quit);
        assert_eq!(
            state.transcript.entries(),
            [TranscriptEntry::Output {
                text: "before".to_string(),
                style: OutputStyle::Normal,
            }]
        );
        assert_eq!(state.input.text(), "");
    }

    #[test]
    fn effects_run_in_event_order() {
        let mut state = AppState::new(&Config::default(), "ws://localhost:8000/ws/game");
        let mut executed = Vec::new();
        let events = vec![
            UiEvent::Session(ChannelEvent::Connected),
            key(KeyCode::Char('l'), KeyModifiers::NONE),
            key(KeyCode::Char('s'), KeyModifiers::NONE),
            key(KeyCode::Enter, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ];

        reduce_batch(&mut state, events, |state, effect| {
            executed.push(effect.clone());
            quit_on_effect(state, effect);
        });

        assert_eq!(
            executed,
            [
                UiEffect::SendCommand {
                    command: "ls".to_string()
                },
                UiEffect::Quit,
            ]
        );
    }
}
