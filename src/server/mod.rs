//! Server core functionality
//!
//! This module contains the listener and accept loop of the pairing server.

pub mod core;

pub use self::core::Server;
