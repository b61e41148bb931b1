//! Module `state`
//!
//! Defines the `ClientRecord` struct kept for every live connection, together
//! with the identifiers and the outbound connection handle it references.

use log::{debug, warn};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

use crate::matching::MatchMode;
use crate::protocol::OutboundEvent;

/// Process-unique client identifier, generated at connect time.
pub type ClientId = Uuid;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Transport-level connection identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Allocates a fresh identifier for an accepted socket.
    pub fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// Lifecycle status of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
    Available,
    Searching,
    Chatting,
    Calling,
}

impl ClientStatus {
    /// The mode of the session this status represents, if any.
    pub fn session_mode(self) -> Option<MatchMode> {
        match self {
            ClientStatus::Chatting => Some(MatchMode::Chat),
            ClientStatus::Calling => Some(MatchMode::Call),
            ClientStatus::Available | ClientStatus::Searching => None,
        }
    }
}

/// Handle used to target outbound events at one connection.
///
/// Owned by the gateway task; the record only keeps a clone of the sending
/// half. Delivery never blocks: an event for a full queue is dropped.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    outbox: mpsc::Sender<OutboundEvent>,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, outbox: mpsc::Sender<OutboundEvent>) -> Self {
        Self { id, outbox }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queues an event for the connection. Returns whether it was queued.
    pub fn deliver(&self, event: OutboundEvent) -> bool {
        match self.outbox.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!("Outbound queue full for {}, dropping {}", self.id, event.name());
                false
            }
            Err(TrySendError::Closed(event)) => {
                debug!("{} already closed, dropping {}", self.id, event.name());
                false
            }
        }
    }
}

/// Represents the state of one connected client.
///
/// `partner_id` is only set while the status is `Chatting` or `Calling`.
#[derive(Debug, Clone)]
pub struct ClientRecord {
    client_id: ClientId,
    connection: ConnectionHandle,
    display_name: String,
    status: ClientStatus,
    partner_id: Option<ClientId>,
}

impl ClientRecord {
    /// Creates an `Available` record with a placeholder display name.
    pub fn new(client_id: ClientId, connection: ConnectionHandle) -> Self {
        Self {
            client_id,
            connection,
            display_name: default_display_name(&client_id),
            status: ClientStatus::Available,
            partner_id: None,
        }
    }

    /// Pairs this record with `partner` for a session of the given mode.
    pub fn pair_with(&mut self, partner: ClientId, mode: MatchMode) {
        self.status = mode.session_status();
        self.partner_id = Some(partner);
    }

    /// Returns the record to `Available`, dropping any partner link.
    ///
    /// Returns the partner that was linked, if any.
    pub fn release(&mut self) -> Option<ClientId> {
        self.status = ClientStatus::Available;
        self.partner_id.take()
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn connection(&self) -> &ConnectionHandle {
        &self.connection
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn status(&self) -> ClientStatus {
        self.status
    }

    pub fn partner_id(&self) -> Option<ClientId> {
        self.partner_id
    }

    /// Returns whether the client is in a chat or call session.
    pub fn is_paired(&self) -> bool {
        self.status.session_mode().is_some()
    }

    // --------------------
    // Setter methods
    // --------------------

    pub fn set_display_name(&mut self, name: String) {
        self.display_name = name;
    }

    pub fn set_status(&mut self, status: ClientStatus) {
        self.status = status;
    }
}

/// Placeholder name derived from the first eight characters of the id.
pub fn default_display_name(client_id: &ClientId) -> String {
    let id = client_id.to_string();
    format!("user_{}", &id[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> (ClientRecord, mpsc::Receiver<OutboundEvent>) {
        let (tx, rx) = mpsc::channel(1);
        let handle = ConnectionHandle::new(ConnectionId::next(), tx);
        (ClientRecord::new(Uuid::new_v4(), handle), rx)
    }

    #[test]
    fn new_record_is_available_with_placeholder_name() {
        let (record, _rx) = record();
        assert_eq!(record.status(), ClientStatus::Available);
        assert_eq!(record.partner_id(), None);
        assert!(record.display_name().starts_with("user_"));
        assert_eq!(record.display_name().len(), "user_".len() + 8);
        assert!(record.client_id().to_string().starts_with(&record.display_name()[5..]));
    }

    #[test]
    fn pair_and_release() {
        let (mut record, _rx) = record();
        let partner = Uuid::new_v4();

        record.pair_with(partner, MatchMode::Call);
        assert_eq!(record.status(), ClientStatus::Calling);
        assert!(record.is_paired());

        assert_eq!(record.release(), Some(partner));
        assert_eq!(record.status(), ClientStatus::Available);
        assert_eq!(record.release(), None);
    }

    #[test]
    fn deliver_drops_when_queue_full() {
        let (record, mut rx) = record();
        assert!(record.connection().deliver(OutboundEvent::SearchCancelled));
        assert!(!record.connection().deliver(OutboundEvent::SearchCancelled));
        assert_eq!(rx.try_recv().ok(), Some(OutboundEvent::SearchCancelled));
    }

    #[test]
    fn deliver_to_closed_connection_is_dropped() {
        let (record, rx) = record();
        drop(rx);
        assert!(!record.connection().deliver(OutboundEvent::SearchCancelled));
    }

    #[test]
    fn connection_ids_are_unique() {
        assert_ne!(ConnectionId::next(), ConnectionId::next());
    }
}
