//! Gateway middleware
//!
//! Per-connection inbound rate limiting.

pub mod rate_limit;

pub use rate_limit::RateLimiter;
