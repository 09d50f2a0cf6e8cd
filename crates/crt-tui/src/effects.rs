//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never touches the socket or the terminal itself.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Disconnect and leave the console.
    Quit,

    /// Send a command line to the game server, exactly as typed.
    SendCommand { command: String },
}
