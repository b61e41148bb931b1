//! Module `commands`
//!
//! Defines the closed set of events a client may send. Connect and
//! disconnect are transport-level and never appear on the wire.

use serde::Deserialize;
use serde_json::Value;

/// An event received from a client.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    SetUserData { username: Option<String> },
    FindRandomChat,
    FindRandomCall,
    CancelSearch,
    ChatMessage { content: String },
    EndChat,
    EndCall,
    RtcOffer(Value),
    RtcAnswer(Value),
    IceCandidate(Value),
}

impl InboundEvent {
    /// Wire name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::SetUserData { .. } => "set_user_data",
            InboundEvent::FindRandomChat => "find_random_chat",
            InboundEvent::FindRandomCall => "find_random_call",
            InboundEvent::CancelSearch => "cancel_search",
            InboundEvent::ChatMessage { .. } => "chat_message",
            InboundEvent::EndChat => "end_chat",
            InboundEvent::EndCall => "end_call",
            InboundEvent::RtcOffer(_) => "rtc_offer",
            InboundEvent::RtcAnswer(_) => "rtc_answer",
            InboundEvent::IceCandidate(_) => "ice_candidate",
        }
    }
}

/// Envelope of every inbound frame. `data` defaults to null when absent.
#[derive(Debug, Deserialize)]
pub struct RawFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Payload of `set_user_data`
#[derive(Debug, Default, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub username: Option<String>,
}

/// Payload of `chat_message`
#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    pub content: String,
}

/// Peer-to-peer negotiation messages relayed opaquely between partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
}
