//! Lobby core
//!
//! Connection lifecycle, inbound event dispatch and outbound emission.

use log::{debug, info};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::client::{ClientId, ClientRecord, ConnectionHandle, ConnectionId, Registry};
use crate::lobby::LobbyStats;
use crate::matching::{MatchMode, MatchingPool};
use crate::protocol::{InboundEvent, OutboundEvent, SignalKind};

/// The lobby shared between all connection tasks.
pub type SharedLobby = Arc<Mutex<Lobby>>;

/// Registry plus the chat and call pools.
///
/// Invariants maintained by every transition:
/// - partner links are symmetric while both records exist;
/// - an id sits in at most one pool, and never while paired.
#[derive(Debug, Default)]
pub struct Lobby {
    pub(crate) registry: Registry,
    pub(crate) chat_pool: MatchingPool,
    pub(crate) call_pool: MatchingPool,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedLobby {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Registers a new connection as an `Available` client.
    pub fn on_connect(&mut self, connection: ConnectionHandle) -> ClientId {
        let client_id = Uuid::new_v4();
        let record = ClientRecord::new(client_id, connection);
        info!(
            "Client {} connected on {} as {}",
            client_id,
            record.connection().id(),
            record.display_name()
        );
        self.registry.insert(record);
        client_id
    }

    /// Updates the display name. Unknown clients are ignored.
    pub fn on_set_display_name(&mut self, client_id: ClientId, name: String) {
        match self.registry.get_mut(&client_id) {
            Some(record) => {
                debug!("Client {} is now known as {}", client_id, name);
                record.set_display_name(name);
            }
            None => debug!("Ignoring display name for unknown client {}", client_id),
        }
    }

    /// Tears down the client's search or session and forgets it.
    ///
    /// Idempotent: an id that is no longer registered is ignored.
    pub fn on_disconnect(&mut self, client_id: ClientId) {
        let Some(record) = self.registry.get(&client_id) else {
            debug!("Disconnect for unknown client {} ignored", client_id);
            return;
        };

        let session = record.status().session_mode();
        self.leave_pools(&client_id);
        if let Some(mode) = session {
            self.release_partner(client_id, mode);
        }

        self.registry.remove(&client_id);
        info!("Client {} disconnected", client_id);
    }

    pub fn lookup_by_connection(&self, connection: ConnectionId) -> Option<ClientId> {
        self.registry.lookup_by_connection(&connection)
    }

    /// Routes an inbound event from a connection to its transition.
    ///
    /// Events from unregistered connections are dropped silently.
    pub fn dispatch(&mut self, connection: ConnectionId, event: InboundEvent) {
        let Some(client_id) = self.lookup_by_connection(connection) else {
            debug!("Dropping {} from unregistered {}", event.name(), connection);
            return;
        };
        debug!("Client {} sent {}", client_id, event.name());

        match event {
            InboundEvent::SetUserData { username } => {
                if let Some(name) = username {
                    self.on_set_display_name(client_id, name);
                }
            }
            InboundEvent::FindRandomChat => self.find(client_id, MatchMode::Chat),
            InboundEvent::FindRandomCall => self.find(client_id, MatchMode::Call),
            InboundEvent::CancelSearch => self.cancel(client_id),
            InboundEvent::ChatMessage { content } => self.relay_message(client_id, content),
            InboundEvent::EndChat => self.end(client_id, MatchMode::Chat),
            InboundEvent::EndCall => self.end(client_id, MatchMode::Call),
            InboundEvent::RtcOffer(payload) => {
                self.relay_signal(client_id, SignalKind::Offer, payload)
            }
            InboundEvent::RtcAnswer(payload) => {
                self.relay_signal(client_id, SignalKind::Answer, payload)
            }
            InboundEvent::IceCandidate(payload) => {
                self.relay_signal(client_id, SignalKind::IceCandidate, payload)
            }
        }
    }

    pub fn client_count(&self) -> usize {
        self.registry.len()
    }

    pub fn get(&self, client_id: &ClientId) -> Option<&ClientRecord> {
        self.registry.get(client_id)
    }

    pub fn stats(&self) -> LobbyStats {
        let paired = self.registry.records().filter(|r| r.is_paired()).count();
        LobbyStats {
            clients: self.registry.len(),
            waiting_chat: self.chat_pool.len(),
            waiting_call: self.call_pool.len(),
            sessions: paired / 2,
        }
    }

    /// Sends an event to a client if it is still registered.
    pub(crate) fn emit(&self, client_id: &ClientId, event: OutboundEvent) {
        match self.registry.get(client_id) {
            Some(record) => {
                record.connection().deliver(event);
            }
            None => debug!("Not sending {} to departed client {}", event.name(), client_id),
        }
    }

    pub(crate) fn pool_mut(&mut self, mode: MatchMode) -> &mut MatchingPool {
        match mode {
            MatchMode::Chat => &mut self.chat_pool,
            MatchMode::Call => &mut self.call_pool,
        }
    }

    /// Removes the id from both pools. Returns whether it was queued.
    pub(crate) fn leave_pools(&mut self, client_id: &ClientId) -> bool {
        let in_chat = self.chat_pool.remove(client_id);
        let in_call = self.call_pool.remove(client_id);
        in_chat || in_call
    }
}
