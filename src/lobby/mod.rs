//! Random-pairing lobby
//!
//! Owns the registry and both matching pools behind a single serialization
//! boundary. All transitions are synchronous and run to completion while the
//! caller holds the lobby lock.

pub mod core;
pub mod pairing;
pub mod relay;
pub mod results;

pub use self::core::{Lobby, SharedLobby};
pub use results::LobbyStats;
