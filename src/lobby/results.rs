//! Lobby result types
//!
//! Defines result structures returned by lobby queries.

use std::fmt;

/// Snapshot of lobby occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LobbyStats {
    pub clients: usize,
    pub waiting_chat: usize,
    pub waiting_call: usize,
    pub sessions: usize,
}

impl fmt::Display for LobbyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} clients, {} waiting for chat, {} waiting for call, {} sessions",
            self.clients, self.waiting_chat, self.waiting_call, self.sessions
        )
    }
}
