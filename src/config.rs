//! Configuration management for the random-pairing server
//!
//! Values come from an optional `config.toml` in the working directory,
//! overridden by `RANDOMCHAT_*` environment variables. Every field has a
//! default, so an empty environment yields a usable configuration.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Complete server configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    // ═══ NETWORK ═══
    /// IP address the WebSocket listener binds to
    pub bind_address: String,

    /// Port for the WebSocket listener
    pub port: u16,

    /// Maximum concurrently registered connections
    pub max_clients: usize,

    // ═══ INBOUND LIMITS ═══
    /// Largest accepted inbound frame, in bytes
    pub max_frame_bytes: usize,

    /// Longest accepted chat message, in characters
    pub max_message_length: usize,

    /// Display names are truncated to this many characters
    pub max_display_name_length: usize,

    /// Frames a single connection may submit per rate window
    pub rate_limit_events: usize,
    pub rate_limit_window_secs: u64,

    // ═══ OUTBOUND ═══
    /// Events buffered per connection before new ones are dropped
    pub outbound_queue_capacity: usize,

    /// Interval between keepalive pings
    pub ping_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5001,
            max_clients: 1000,
            max_frame_bytes: 16 * 1024,
            max_message_length: 2000,
            max_display_name_length: 32,
            rate_limit_events: 50,
            rate_limit_window_secs: 10,
            outbound_queue_capacity: 256,
            ping_interval_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("RANDOMCHAT").try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.max_clients == 0 {
            return Err(config::ConfigError::Message(
                "max_clients must be greater than 0".into(),
            ));
        }

        if self.outbound_queue_capacity == 0 {
            return Err(config::ConfigError::Message(
                "outbound_queue_capacity must be greater than 0".into(),
            ));
        }

        if self.ping_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "ping_interval_secs must be greater than 0".into(),
            ));
        }

        if self.rate_limit_events == 0 || self.rate_limit_window_secs == 0 {
            return Err(config::ConfigError::Message(
                "rate limit events and window must be greater than 0".into(),
            ));
        }

        if self.max_display_name_length == 0 {
            return Err(config::ConfigError::Message(
                "max_display_name_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = ServerConfig {
            outbound_queue_capacity: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn listen_socket_joins_address_and_port() {
        let config = ServerConfig {
            bind_address: "0.0.0.0".into(),
            port: 7000,
            ..ServerConfig::default()
        };
        assert_eq!(config.listen_socket(), "0.0.0.0:7000");
    }
}
