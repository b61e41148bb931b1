//! Pairing engine
//!
//! `available -> searching -> chatting|calling -> available`, with
//! `searching -> available` through cancel. Every transition first
//! normalizes pool membership instead of trusting callers not to repeat
//! events.

use log::{debug, info};

use crate::client::{ClientId, ClientStatus};
use crate::lobby::Lobby;
use crate::matching::MatchMode;
use crate::protocol::{EndReason, OutboundEvent};

impl Lobby {
    /// Pairs the client with the longest-waiting live peer in `mode`, or
    /// queues it and replies `searching`.
    ///
    /// A client that is still in a session ends it first, so a repeated
    /// search can never leave a one-sided partner link behind.
    pub fn find(&mut self, client_id: ClientId, mode: MatchMode) {
        let Some(record) = self.registry.get(&client_id) else {
            return;
        };

        if let Some(current) = record.status().session_mode() {
            debug!("Client {} searching again, ending its {} first", client_id, current.as_str());
            self.end(client_id, current);
        }

        self.leave_pools(&client_id);
        if let Some(record) = self.registry.get_mut(&client_id) {
            record.set_status(ClientStatus::Available);
        }

        while let Some(peer_id) = self.pool_mut(mode).pop_front() {
            let live = self
                .registry
                .get(&peer_id)
                .is_some_and(|peer| peer.status() == ClientStatus::Searching);
            if live && peer_id != client_id {
                self.pair(client_id, peer_id, mode);
                return;
            }
            debug!("Discarding stale {} pool entry {}", mode.as_str(), peer_id);
        }

        self.pool_mut(mode).enqueue(client_id);
        if let Some(record) = self.registry.get_mut(&client_id) {
            record.set_status(ClientStatus::Searching);
        }
        debug!("Client {} waiting for {}", client_id, mode.as_str());
        self.emit(&client_id, OutboundEvent::Searching { mode });
    }

    /// Leaves any pool and returns to `available`.
    ///
    /// A no-op for paired clients; otherwise always acknowledged with
    /// `search_cancelled`, so repeating it changes nothing.
    pub fn cancel(&mut self, client_id: ClientId) {
        let Some(record) = self.registry.get(&client_id) else {
            return;
        };
        if record.is_paired() {
            debug!("Ignoring cancel from paired client {}", client_id);
            return;
        }

        self.leave_pools(&client_id);
        if let Some(record) = self.registry.get_mut(&client_id) {
            record.set_status(ClientStatus::Available);
        }
        self.emit(&client_id, OutboundEvent::SearchCancelled);
    }

    /// Ends the client's session of the given mode.
    ///
    /// Ignored unless the client is in a session of exactly that mode. A
    /// partner that already left is tolerated.
    pub fn end(&mut self, client_id: ClientId, mode: MatchMode) {
        let Some(record) = self.registry.get(&client_id) else {
            return;
        };
        if record.status() != mode.session_status() {
            debug!("Ignoring end_{} from client {} in {:?}", mode.as_str(), client_id, record.status());
            return;
        }

        self.release_partner(client_id, mode);
        if let Some(record) = self.registry.get_mut(&client_id) {
            record.release();
        }
        info!("Client {} ended its {}", client_id, mode.as_str());
        self.emit(&client_id, OutboundEvent::ended(mode, EndReason::YouLeft));
    }

    /// Frees the client's partner, if it is still linked back, and tells it
    /// `partnerLeft`. The client's own link is cleared either way.
    pub(crate) fn release_partner(&mut self, client_id: ClientId, mode: MatchMode) {
        let Some(partner_id) = self
            .registry
            .get_mut(&client_id)
            .and_then(|record| record.release())
        else {
            return;
        };

        match self.registry.get_mut(&partner_id) {
            Some(partner) if partner.partner_id() == Some(client_id) => {
                partner.release();
                self.emit(&partner_id, OutboundEvent::ended(mode, EndReason::PartnerLeft));
            }
            _ => debug!("Partner {} of client {} already gone", partner_id, client_id),
        }
    }

    /// Links two searching clients and notifies both.
    fn pair(&mut self, client_id: ClientId, peer_id: ClientId, mode: MatchMode) {
        let (Some(client_name), Some(peer_name)) = (
            self.registry.get(&client_id).map(|r| r.display_name().to_string()),
            self.registry.get(&peer_id).map(|r| r.display_name().to_string()),
        ) else {
            return;
        };

        if let Some(record) = self.registry.get_mut(&client_id) {
            record.pair_with(peer_id, mode);
        }
        if let Some(record) = self.registry.get_mut(&peer_id) {
            record.pair_with(client_id, mode);
        }

        info!("Paired {} with {} for {}", client_id, peer_id, mode.as_str());
        self.emit(&client_id, OutboundEvent::connected(mode, peer_id, peer_name));
        self.emit(&peer_id, OutboundEvent::connected(mode, client_id, client_name));
    }
}
