//! Frame parsing
//!
//! Turns raw frame text into a validated `InboundEvent`. Malformed payloads
//! are rejected here so the lobby only sees well-formed events.

use crate::config::ServerConfig;
use crate::error::ProtocolError;
use crate::protocol::InboundEvent;
use crate::protocol::commands::{ChatPayload, RawFrame, UserData};
use crate::utils::sanitize_display_name;

/// Parse one frame into an event, enforcing the frame size limit.
///
/// Unknown fields inside `data` are ignored, including any `data` sent with
/// an event that takes no payload.
pub fn parse_frame(raw: &str, max_frame_bytes: usize) -> Result<InboundEvent, ProtocolError> {
    if raw.len() > max_frame_bytes {
        return Err(ProtocolError::FrameTooLarge {
            size: raw.len(),
            limit: max_frame_bytes,
        });
    }

    let RawFrame { event, data } = serde_json::from_str(raw)?;
    match event.as_str() {
        "set_user_data" => {
            let UserData { username } = if data.is_null() {
                UserData::default()
            } else {
                serde_json::from_value(data)?
            };
            Ok(InboundEvent::SetUserData { username })
        }
        "find_random_chat" => Ok(InboundEvent::FindRandomChat),
        "find_random_call" => Ok(InboundEvent::FindRandomCall),
        "cancel_search" => Ok(InboundEvent::CancelSearch),
        "chat_message" => {
            let ChatPayload { content } = serde_json::from_value(data)?;
            Ok(InboundEvent::ChatMessage { content })
        }
        "end_chat" => Ok(InboundEvent::EndChat),
        "end_call" => Ok(InboundEvent::EndCall),
        "rtc_offer" => Ok(InboundEvent::RtcOffer(data)),
        "rtc_answer" => Ok(InboundEvent::RtcAnswer(data)),
        "ice_candidate" => Ok(InboundEvent::IceCandidate(data)),
        _ => Err(ProtocolError::UnknownEvent(event)),
    }
}

/// Apply payload limits and sanitation to a parsed event.
///
/// A display name that sanitizes to nothing becomes `username: None`, which
/// the lobby ignores.
pub fn validate_event(
    event: InboundEvent,
    config: &ServerConfig,
) -> Result<InboundEvent, ProtocolError> {
    match event {
        InboundEvent::ChatMessage { content } => {
            let length = content.chars().count();
            if length > config.max_message_length {
                return Err(ProtocolError::MessageTooLong {
                    length,
                    limit: config.max_message_length,
                });
            }
            Ok(InboundEvent::ChatMessage { content })
        }
        InboundEvent::SetUserData { username } => Ok(InboundEvent::SetUserData {
            username: username
                .and_then(|name| sanitize_display_name(&name, config.max_display_name_length)),
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_events_without_payload() {
        assert_eq!(
            parse_frame(r#"{"event":"find_random_chat"}"#, 1024).unwrap(),
            InboundEvent::FindRandomChat
        );
        assert_eq!(
            parse_frame(r#"{"event":"find_random_call"}"#, 1024).unwrap(),
            InboundEvent::FindRandomCall
        );
        assert_eq!(
            parse_frame(r#"{"event":"cancel_search"}"#, 1024).unwrap(),
            InboundEvent::CancelSearch
        );
        assert_eq!(
            parse_frame(r#"{"event":"end_chat"}"#, 1024).unwrap(),
            InboundEvent::EndChat
        );
        assert_eq!(
            parse_frame(r#"{"event":"end_call"}"#, 1024).unwrap(),
            InboundEvent::EndCall
        );
    }

    #[test]
    fn test_parse_events_with_payload() {
        assert_eq!(
            parse_frame(
                r#"{"event":"chat_message","data":{"content":"hi","extra":1}}"#,
                1024
            )
            .unwrap(),
            InboundEvent::ChatMessage {
                content: "hi".to_string()
            }
        );
        assert_eq!(
            parse_frame(r#"{"event":"set_user_data","data":{"username":"ann"}}"#, 1024).unwrap(),
            InboundEvent::SetUserData {
                username: Some("ann".to_string())
            }
        );
        assert_eq!(
            parse_frame(r#"{"event":"set_user_data","data":{}}"#, 1024).unwrap(),
            InboundEvent::SetUserData { username: None }
        );
        assert_eq!(
            parse_frame(r#"{"event":"ice_candidate","data":{"candidate":"c"}}"#, 1024).unwrap(),
            InboundEvent::IceCandidate(json!({ "candidate": "c" }))
        );
    }

    #[test]
    fn test_payload_on_bare_events_is_ignored() {
        for (raw, expected) in [
            (r#"{"event":"find_random_chat","data":{}}"#, InboundEvent::FindRandomChat),
            (r#"{"event":"find_random_call","data":null}"#, InboundEvent::FindRandomCall),
            (r#"{"event":"cancel_search","data":{"x":1}}"#, InboundEvent::CancelSearch),
            (r#"{"event":"end_chat","data":"bye"}"#, InboundEvent::EndChat),
            (r#"{"event":"end_call","data":[1]}"#, InboundEvent::EndCall),
        ] {
            assert_eq!(parse_frame(raw, 1024).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn test_set_user_data_without_payload() {
        assert_eq!(
            parse_frame(r#"{"event":"set_user_data"}"#, 1024).unwrap(),
            InboundEvent::SetUserData { username: None }
        );
    }

    #[test]
    fn test_unknown_event() {
        assert!(matches!(
            parse_frame(r#"{"event":"teleport","data":{}}"#, 1024),
            Err(ProtocolError::UnknownEvent(name)) if name == "teleport"
        ));
    }

    #[test]
    fn test_malformed_frames() {
        for raw in [
            "not json",
            r#"{"event":"chat_message"}"#,
            r#"{"event":"chat_message","data":{}}"#,
            r#"{"data":{}}"#,
        ] {
            assert!(
                matches!(parse_frame(raw, 1024), Err(ProtocolError::Malformed(_))),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn test_frame_too_large() {
        let raw = r#"{"event":"find_random_chat"}"#;
        assert!(matches!(
            parse_frame(raw, 8),
            Err(ProtocolError::FrameTooLarge { limit: 8, .. })
        ));
    }

    #[test]
    fn test_validate_message_length() {
        let config = ServerConfig {
            max_message_length: 3,
            ..ServerConfig::default()
        };
        let ok = InboundEvent::ChatMessage {
            content: "héy".into(),
        };
        assert_eq!(validate_event(ok.clone(), &config).unwrap(), ok);

        let long = InboundEvent::ChatMessage {
            content: "hello".into(),
        };
        assert!(matches!(
            validate_event(long, &config),
            Err(ProtocolError::MessageTooLong { length: 5, limit: 3 })
        ));
    }

    #[test]
    fn test_validate_sanitizes_username() {
        let config = ServerConfig::default();
        let event = InboundEvent::SetUserData {
            username: Some("  bob\n".into()),
        };
        assert_eq!(
            validate_event(event, &config).unwrap(),
            InboundEvent::SetUserData {
                username: Some("bob".into())
            }
        );

        let blank = InboundEvent::SetUserData {
            username: Some("   ".into()),
        };
        assert_eq!(
            validate_event(blank, &config).unwrap(),
            InboundEvent::SetUserData { username: None }
        );
    }
}
