//! Session relay
//!
//! Forwards chat messages and peer-to-peer signaling between partners.

use log::{debug, info};
use serde_json::Value;

use crate::client::{ClientId, ClientStatus};
use crate::lobby::Lobby;
use crate::matching::MatchMode;
use crate::protocol::{EndReason, MessageEnvelope, OutboundEvent, SignalKind};

impl Lobby {
    /// Delivers a text message to the chat partner and confirms it back to
    /// the sender with the same envelope.
    ///
    /// If the partner is gone the message is dropped and the sender is
    /// released from the dead session with `chat_ended{partnerLeft}`.
    pub fn relay_message(&mut self, client_id: ClientId, content: String) {
        let Some(sender) = self.registry.get(&client_id) else {
            return;
        };
        if sender.status() != ClientStatus::Chatting {
            debug!("Client {} is not chatting, dropping message", client_id);
            return;
        }
        let Some(partner_id) = sender.partner_id() else {
            return;
        };

        if !self.registry.contains(&partner_id) {
            info!(
                "Partner {} of client {} vanished, closing the chat",
                partner_id, client_id
            );
            if let Some(sender) = self.registry.get_mut(&client_id) {
                sender.release();
            }
            self.emit(
                &client_id,
                OutboundEvent::ended(MatchMode::Chat, EndReason::PartnerLeft),
            );
            return;
        }

        let envelope = MessageEnvelope::text(content, sender.display_name().to_string());
        self.emit(&partner_id, OutboundEvent::ChatMessage(envelope.clone()));
        self.emit(&client_id, OutboundEvent::MessageSent(envelope));
    }

    /// Forwards an opaque signaling payload to the partner of a paired
    /// client. Dropped when there is no live partner.
    pub fn relay_signal(&mut self, client_id: ClientId, kind: SignalKind, payload: Value) {
        let partner_id = self
            .registry
            .get(&client_id)
            .filter(|record| record.is_paired())
            .and_then(|record| record.partner_id());

        match partner_id {
            Some(partner_id) if self.registry.contains(&partner_id) => {
                self.emit(&partner_id, OutboundEvent::signal(kind, payload));
            }
            _ => debug!("No partner for {:?} from client {}", kind, client_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::ClientStatus;
    use crate::lobby::Lobby;
    use crate::lobby::core::test_support::*;
    use crate::matching::MatchMode;
    use crate::protocol::{EndReason, OutboundEvent, SignalKind};

    fn paired(mode: MatchMode) -> (Lobby, TestClient, TestClient) {
        let mut lobby = Lobby::new();
        let mut a = connect(&mut lobby);
        let mut b = connect(&mut lobby);
        lobby.on_set_display_name(a.id, "alice".into());
        lobby.find(a.id, mode);
        lobby.find(b.id, mode);
        a.events();
        b.events();
        (lobby, a, b)
    }

    #[test]
    fn message_reaches_partner_and_is_confirmed() {
        let (mut lobby, mut a, mut b) = paired(MatchMode::Chat);

        lobby.relay_message(a.id, "hi".into());

        let received = b.events();
        let confirmed = a.events();
        assert_eq!(received.len(), 1);
        assert_eq!(confirmed.len(), 1);

        let OutboundEvent::ChatMessage(envelope) = &received[0] else {
            panic!("expected chat_message, got {:?}", received[0]);
        };
        assert_eq!(envelope.kind, "text");
        assert_eq!(envelope.content, "hi");
        assert_eq!(envelope.sender, "alice");
        assert_eq!(confirmed[0], OutboundEvent::MessageSent(envelope.clone()));
    }

    #[test]
    fn message_outside_chat_is_dropped() {
        let (mut lobby, mut a, mut b) = paired(MatchMode::Call);

        lobby.relay_message(a.id, "hi".into());

        assert!(a.events().is_empty());
        assert!(b.events().is_empty());
    }

    #[test]
    fn message_to_vanished_partner_ends_chat() {
        let (mut lobby, mut a, b) = paired(MatchMode::Chat);
        lobby.registry.remove(&b.id);

        lobby.relay_message(a.id, "anyone?".into());

        assert_eq!(
            a.events(),
            vec![OutboundEvent::ChatEnded {
                reason: EndReason::PartnerLeft
            }]
        );
        let record = lobby.get(&a.id).unwrap();
        assert_eq!(record.status(), ClientStatus::Available);
        assert_eq!(record.partner_id(), None);
    }

    #[test]
    fn signaling_is_forwarded_during_call() {
        let (mut lobby, mut a, mut b) = paired(MatchMode::Call);
        let offer = json!({ "type": "offer", "sdp": "v=0" });

        lobby.relay_signal(a.id, SignalKind::Offer, offer.clone());
        lobby.relay_signal(b.id, SignalKind::IceCandidate, json!({ "candidate": "x" }));

        assert_eq!(b.events(), vec![OutboundEvent::RtcOffer(offer)]);
        assert_eq!(
            a.events(),
            vec![OutboundEvent::IceCandidate(json!({ "candidate": "x" }))]
        );
    }

    #[test]
    fn signaling_without_partner_is_dropped() {
        let mut lobby = Lobby::new();
        let mut a = connect(&mut lobby);

        lobby.relay_signal(a.id, SignalKind::Answer, json!({}));

        assert!(a.events().is_empty());
    }
}
