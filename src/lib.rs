pub mod client;
pub mod config;
pub mod error;
pub mod lobby;
pub mod matching;
pub mod middleware;
pub mod protocol;
pub mod server;
pub mod utils;

pub use self::config::ServerConfig;
pub use lobby::{Lobby, LobbyStats};
pub use server::Server;
