//! Match modes
//!
//! The two independent kinds of random pairing.

use serde::{Deserialize, Serialize};

use crate::client::ClientStatus;

/// Kind of session a client searches for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Chat,
    Call,
}

impl MatchMode {
    /// Status both peers take once paired in this mode.
    pub fn session_status(self) -> ClientStatus {
        match self {
            MatchMode::Chat => ClientStatus::Chatting,
            MatchMode::Call => ClientStatus::Calling,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Chat => "chat",
            MatchMode::Call => "call",
        }
    }
}
