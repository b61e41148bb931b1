//! Client registry
//!
//! Authoritative mapping from client id (and from connection id) to the
//! `ClientRecord`. Pools and partner links only hold ids into this map.

use crate::client::{ClientId, ClientRecord, ConnectionId};
use std::collections::HashMap;

/// Registry for tracking live clients
#[derive(Debug, Default)]
pub struct Registry {
    clients: HashMap<ClientId, ClientRecord>,
    connections: HashMap<ConnectionId, ClientId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: ClientRecord) {
        self.connections
            .insert(record.connection().id(), record.client_id());
        self.clients.insert(record.client_id(), record);
    }

    pub fn remove(&mut self, client_id: &ClientId) -> Option<ClientRecord> {
        let record = self.clients.remove(client_id)?;
        self.connections.remove(&record.connection().id());
        Some(record)
    }

    pub fn get(&self, client_id: &ClientId) -> Option<&ClientRecord> {
        self.clients.get(client_id)
    }

    pub fn get_mut(&mut self, client_id: &ClientId) -> Option<&mut ClientRecord> {
        self.clients.get_mut(client_id)
    }

    pub fn contains(&self, client_id: &ClientId) -> bool {
        self.clients.contains_key(client_id)
    }

    /// Resolves a connection to its client, if it is registered.
    pub fn lookup_by_connection(&self, connection: &ConnectionId) -> Option<ClientId> {
        self.connections.get(connection).copied()
    }

    pub fn records(&self) -> impl Iterator<Item = &ClientRecord> {
        self.clients.values()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
