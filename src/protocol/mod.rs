//! Wire protocol
//!
//! Inbound event parsing and validation, and outbound event encoding. Every
//! WebSocket frame carries one JSON object `{"event": ..., "data": ...}`.

pub mod commands;
pub mod parser;
pub mod responses;

pub use commands::{InboundEvent, SignalKind};
pub use parser::{parse_frame, validate_event};
pub use responses::{EndReason, MessageEnvelope, OutboundEvent, encode_event};
