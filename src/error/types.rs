//! Error types
//!
//! Defines the error types of the gateway. The lobby itself never fails:
//! invalid transitions are no-ops and stale references are recovered locally.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use tokio_tungstenite::tungstenite;

/// Inbound frame errors. The frame is dropped; the connection stays open.
#[derive(Debug)]
pub enum ProtocolError {
    Malformed(serde_json::Error),
    UnknownEvent(String),
    InvalidUtf8,
    FrameTooLarge { size: usize, limit: usize },
    MessageTooLong { length: usize, limit: usize },
    RateLimited,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed(e) => write!(f, "Malformed event: {}", e),
            ProtocolError::UnknownEvent(name) => write!(f, "Unknown event: {}", name),
            ProtocolError::InvalidUtf8 => write!(f, "Binary frame is not valid UTF-8"),
            ProtocolError::FrameTooLarge { size, limit } => {
                write!(f, "Frame of {} bytes exceeds limit of {}", size, limit)
            }
            ProtocolError::MessageTooLong { length, limit } => {
                write!(f, "Message of {} characters exceeds limit of {}", length, limit)
            }
            ProtocolError::RateLimited => write!(f, "Rate limit exceeded"),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<serde_json::Error> for ProtocolError {
    fn from(error: serde_json::Error) -> Self {
        ProtocolError::Malformed(error)
    }
}

/// General gateway error that encompasses all error types
#[derive(Debug)]
pub enum GatewayError {
    Io(io::Error),
    WebSocket(tungstenite::Error),
    Protocol(ProtocolError),
    ServerFull(SocketAddr),
    Encode(serde_json::Error),
    Config(config::ConfigError),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Io(e) => write!(f, "I/O error: {}", e),
            GatewayError::WebSocket(e) => write!(f, "WebSocket error: {}", e),
            GatewayError::Protocol(e) => write!(f, "Protocol error: {}", e),
            GatewayError::ServerFull(addr) => write!(f, "Server full, rejected {}", addr),
            GatewayError::Encode(e) => write!(f, "Failed to encode event: {}", e),
            GatewayError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<io::Error> for GatewayError {
    fn from(error: io::Error) -> Self {
        GatewayError::Io(error)
    }
}

impl From<tungstenite::Error> for GatewayError {
    fn from(error: tungstenite::Error) -> Self {
        GatewayError::WebSocket(error)
    }
}

impl From<ProtocolError> for GatewayError {
    fn from(error: ProtocolError) -> Self {
        GatewayError::Protocol(error)
    }
}

impl From<config::ConfigError> for GatewayError {
    fn from(error: config::ConfigError) -> Self {
        GatewayError::Config(error)
    }
}
