//! Client management system
//!
//! Handles client records, the connection registry, and the per-connection
//! gateway task.

pub mod handler;
pub mod registry;
pub mod state;

pub use handler::handle_connection;
pub use registry::Registry;
pub use state::{ClientId, ClientRecord, ClientStatus, ConnectionHandle, ConnectionId};
