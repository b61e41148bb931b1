//! Rate limiting middleware
//!
//! Sliding-window limit on inbound frames for a single connection.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Simple sliding-window rate limiter
pub struct RateLimiter {
    requests: VecDeque<Instant>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            requests: VecDeque::with_capacity(max_requests),
            max_requests,
            window,
        }
    }

    pub fn is_allowed(&mut self) -> bool {
        self.is_allowed_at(Instant::now())
    }

    fn is_allowed_at(&mut self, now: Instant) -> bool {
        // Remove old requests
        while let Some(&oldest) = self.requests.front() {
            if now.duration_since(oldest) > self.window {
                self.requests.pop_front();
            } else {
                break;
            }
        }

        if self.requests.len() < self.max_requests {
            self.requests.push_back(now);
            true
        } else {
            false
        }
    }
}
