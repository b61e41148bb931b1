//! Error handlers
//!
//! Maps errors to log levels: client faults are warnings, server faults are
//! errors.

use crate::error::types::GatewayError;
use log::{Level, log};
use tokio_tungstenite::tungstenite;

/// Log a gateway error at its level
pub fn handle_error(err: &GatewayError) {
    log!(error_level(err), "{}", err);
}

/// Log level an error should be reported at
pub fn error_level(err: &GatewayError) -> Level {
    match err {
        GatewayError::Protocol(_) | GatewayError::ServerFull(_) => Level::Warn,
        GatewayError::WebSocket(
            tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed,
        ) => Level::Debug,
        GatewayError::WebSocket(
            tungstenite::Error::Protocol(_) | tungstenite::Error::Capacity(_),
        ) => Level::Warn,
        GatewayError::WebSocket(_)
        | GatewayError::Io(_)
        | GatewayError::Encode(_)
        | GatewayError::Config(_) => Level::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use std::io;

    #[test]
    fn client_faults_are_warnings() {
        let err = GatewayError::from(ProtocolError::RateLimited);
        assert_eq!(error_level(&err), Level::Warn);

        let err = GatewayError::ServerFull("127.0.0.1:9000".parse().unwrap());
        assert_eq!(error_level(&err), Level::Warn);
    }

    #[test]
    fn oversized_message_is_a_warning() {
        let err = GatewayError::from(tungstenite::Error::Capacity(
            tungstenite::error::CapacityError::MessageTooLong {
                size: 200,
                max_size: 128,
            },
        ));
        assert_eq!(error_level(&err), Level::Warn);
    }

    #[test]
    fn bad_configuration_is_an_error() {
        let err = GatewayError::from(config::ConfigError::Message("port cannot be 0".into()));
        assert_eq!(error_level(&err), Level::Error);
        assert_eq!(err.to_string(), "Configuration error: port cannot be 0");
    }

    #[test]
    fn server_faults_are_errors() {
        let err = GatewayError::from(io::Error::other("boom"));
        assert_eq!(error_level(&err), Level::Error);
    }

    #[test]
    fn closed_socket_is_debug() {
        let err = GatewayError::from(tungstenite::Error::ConnectionClosed);
        assert_eq!(error_level(&err), Level::Debug);
    }

    #[test]
    fn display_includes_cause() {
        let err = GatewayError::from(ProtocolError::MessageTooLong {
            length: 10,
            limit: 5,
        });
        assert_eq!(
            err.to_string(),
            "Protocol error: Message of 10 characters exceeds limit of 5"
        );
    }
}
