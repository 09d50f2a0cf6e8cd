//! Session state.

use crt_protocol::StateUpdate;

/// Mirror of the remote session. Changed only by [`super::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_host: String,
    pub current_path: String,
    pub user: String,
    pub level: i64,
    pub score: i64,
    pub prompt: String,
}

impl SessionState {
    /// Overwrites everything but the prompt.
    pub(super) fn apply_update(&mut self, update: &StateUpdate) {
        self.current_host.clone_from(&update.current_host);
        self.current_path.clone_from(&update.current_path);
        self.user.clone_from(&update.user);
        self.level = update.level;
        self.score = update.score;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_host: "localhost".to_string(),
            current_path: "/home/user".to_string(),
            user: "anonymous".to_string(),
            level: 1,
            score: 0,
            prompt: "$ ".to_string(),
        }
    }
}
