//! Outbound events
//!
//! Defines the events the server emits and their JSON encoding.

use serde::Serialize;
use serde_json::Value;

use crate::client::ClientId;
use crate::matching::MatchMode;
use crate::protocol::SignalKind;

/// Why a session ended, from the receiver's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EndReason {
    PartnerLeft,
    YouLeft,
}

/// A relayed chat message, sent to the partner and echoed to the sender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageEnvelope {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: String,
    pub sender: String,
    /// Milliseconds since the Unix epoch, taken at relay time.
    pub timestamp: i64,
}

impl MessageEnvelope {
    pub fn text(content: String, sender: String) -> Self {
        Self {
            kind: "text",
            content,
            sender,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// An event sent to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum OutboundEvent {
    Searching {
        mode: MatchMode,
    },
    #[serde(rename_all = "camelCase")]
    ChatConnected {
        partner_id: ClientId,
        partner_name: String,
    },
    #[serde(rename_all = "camelCase")]
    CallConnected {
        partner_id: ClientId,
        partner_name: String,
    },
    ChatEnded {
        reason: EndReason,
    },
    CallEnded {
        reason: EndReason,
    },
    SearchCancelled,
    ChatMessage(MessageEnvelope),
    MessageSent(MessageEnvelope),
    RtcOffer(Value),
    RtcAnswer(Value),
    IceCandidate(Value),
}

impl OutboundEvent {
    pub fn connected(mode: MatchMode, partner_id: ClientId, partner_name: String) -> Self {
        match mode {
            MatchMode::Chat => OutboundEvent::ChatConnected {
                partner_id,
                partner_name,
            },
            MatchMode::Call => OutboundEvent::CallConnected {
                partner_id,
                partner_name,
            },
        }
    }

    pub fn ended(mode: MatchMode, reason: EndReason) -> Self {
        match mode {
            MatchMode::Chat => OutboundEvent::ChatEnded { reason },
            MatchMode::Call => OutboundEvent::CallEnded { reason },
        }
    }

    pub fn signal(kind: SignalKind, payload: Value) -> Self {
        match kind {
            SignalKind::Offer => OutboundEvent::RtcOffer(payload),
            SignalKind::Answer => OutboundEvent::RtcAnswer(payload),
            SignalKind::IceCandidate => OutboundEvent::IceCandidate(payload),
        }
    }

    /// Wire name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Searching { .. } => "searching",
            OutboundEvent::ChatConnected { .. } => "chat_connected",
            OutboundEvent::CallConnected { .. } => "call_connected",
            OutboundEvent::ChatEnded { .. } => "chat_ended",
            OutboundEvent::CallEnded { .. } => "call_ended",
            OutboundEvent::SearchCancelled => "search_cancelled",
            OutboundEvent::ChatMessage(_) => "chat_message",
            OutboundEvent::MessageSent(_) => "message_sent",
            OutboundEvent::RtcOffer(_) => "rtc_offer",
            OutboundEvent::RtcAnswer(_) => "rtc_answer",
            OutboundEvent::IceCandidate(_) => "ice_candidate",
        }
    }
}

/// Encode an outbound event as a JSON text frame body
pub fn encode_event(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}
