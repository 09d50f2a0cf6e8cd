//! Status line state types.

/// Connectivity of the game session, kept apart from the session mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Online,
    Offline,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "CONNECTING",
            ConnectionStatus::Online => "ONLINE",
            ConnectionStatus::Offline => "OFFLINE",
        }
    }

    pub fn is_online(self) -> bool {
        self == ConnectionStatus::Online
    }
}
