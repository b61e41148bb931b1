//! Error handling
//!
//! Defines error types and handling for the gateway.

pub mod handlers;
pub mod types;

pub use handlers::handle_error;
pub use types::*;
