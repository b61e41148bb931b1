//! Matching pool
//!
//! Strict arrival-order queue. The longest-waiting client is always popped
//! first; there is no priority and no randomization.

use std::collections::VecDeque;

use crate::client::ClientId;

#[derive(Debug, Default)]
pub struct MatchingPool {
    waiting: VecDeque<ClientId>,
}

impl MatchingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the tail. The caller must ensure the id is not queued yet.
    pub fn enqueue(&mut self, client_id: ClientId) {
        debug_assert!(!self.contains(&client_id), "duplicate enqueue");
        self.waiting.push_back(client_id);
    }

    /// Removes the id wherever it occurs. Returns whether it was present.
    pub fn remove(&mut self, client_id: &ClientId) -> bool {
        match self.waiting.iter().position(|id| id == client_id) {
            Some(index) => {
                self.waiting.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pop_front(&mut self) -> Option<ClientId> {
        self.waiting.pop_front()
    }

    pub fn contains(&self, client_id: &ClientId) -> bool {
        self.waiting.contains(client_id)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
