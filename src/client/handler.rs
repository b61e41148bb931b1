//! Connection handler
//!
//! The transport boundary: one task per WebSocket client that registers it
//! with the lobby, feeds it validated events and writes its outbound queue.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use log::{debug, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{Message, Utf8Bytes};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::{WebSocketStream, accept_async_with_config};

use crate::client::{ClientId, ConnectionHandle, ConnectionId};
use crate::config::ServerConfig;
use crate::error::{GatewayError, ProtocolError, handle_error};
use crate::lobby::SharedLobby;
use crate::middleware::RateLimiter;
use crate::protocol::{InboundEvent, OutboundEvent, encode_event, parse_frame, validate_event};

/// Handles one WebSocket client from handshake to disconnect.
///
/// - Registers the client once the handshake completes, or closes with
///   1013 when the lobby is full.
/// - Feeds validated inbound events to the lobby.
/// - Writes the client's outbound queue to the socket and sends keepalive pings.
/// - Unregisters the client exactly once, however the session ends.
pub async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    lobby: SharedLobby,
    config: Arc<ServerConfig>,
) -> Result<(), GatewayError> {
    let mut ws = accept_async_with_config(stream, Some(transport_config(&config))).await?;
    let connection = ConnectionId::next();
    let (outbox, inbox) = mpsc::channel(config.outbound_queue_capacity);

    let client_id = {
        let mut lobby = lobby.lock().await;
        if lobby.client_count() >= config.max_clients {
            drop(lobby);
            let frame = CloseFrame {
                code: CloseCode::Again,
                reason: Utf8Bytes::from_static("server full"),
            };
            ws.send(Message::Close(Some(frame))).await?;
            return Err(GatewayError::ServerFull(peer_addr));
        }

        let client_id = lobby.on_connect(ConnectionHandle::new(connection, outbox));
        info!("{} connected from {} ({})", connection, peer_addr, lobby.stats());
        client_id
    };

    let (sink, stream) = ws.split();
    let result = run_session(sink, stream, connection, client_id, inbox, &lobby, &config).await;

    {
        let mut lobby = lobby.lock().await;
        lobby.on_disconnect(client_id);
        info!("{} from {} closed ({})", connection, peer_addr, lobby.stats());
    }

    result
}

/// Pumps frames in both directions until the client goes away.
async fn run_session(
    mut sink: SplitSink<WebSocketStream<TcpStream>, Message>,
    mut stream: SplitStream<WebSocketStream<TcpStream>>,
    connection: ConnectionId,
    client_id: ClientId,
    mut inbox: mpsc::Receiver<OutboundEvent>,
    lobby: &SharedLobby,
    config: &ServerConfig,
) -> Result<(), GatewayError> {
    let mut limiter = RateLimiter::new(config.rate_limit_events, config.rate_limit_window());
    let mut keepalive = tokio::time::interval(config.ping_interval());
    // The first tick completes immediately.
    keepalive.tick().await;

    loop {
        tokio::select! {
            inbound = stream.next() => {
                let frame = match inbound {
                    Some(Ok(Message::Text(text))) => Ok(text.as_str().to_owned()),
                    Some(Ok(Message::Binary(data))) => {
                        String::from_utf8(data.to_vec()).map_err(|_| ProtocolError::InvalidUtf8)
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("Client {} closed the connection", client_id);
                        return Ok(());
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                };

                match admit_frame(frame, &mut limiter, config) {
                    Ok(event) => lobby.lock().await.dispatch(connection, event),
                    Err(e) => {
                        debug!("Dropping frame from client {}", client_id);
                        handle_error(&e.into());
                    }
                }
            }
            outbound = inbox.recv() => {
                let Some(event) = outbound else {
                    return Ok(());
                };
                let json = encode_event(&event).map_err(GatewayError::Encode)?;
                sink.send(Message::text(json)).await?;
            }
            _ = keepalive.tick() => {
                sink.send(Message::Ping(Default::default())).await?;
            }
        }
    }
}

/// Rate-limit, parse and validate one inbound frame.
fn admit_frame(
    frame: Result<String, ProtocolError>,
    limiter: &mut RateLimiter,
    config: &ServerConfig,
) -> Result<InboundEvent, ProtocolError> {
    if !limiter.is_allowed() {
        return Err(ProtocolError::RateLimited);
    }

    let event = parse_frame(&frame?, config.max_frame_bytes)?;
    validate_event(event, config)
}

/// Transport limits. Frames somewhat over `max_frame_bytes` still reach
/// `parse_frame` and are dropped there; far larger ones fail the connection
/// before they are buffered.
fn transport_config(config: &ServerConfig) -> WebSocketConfig {
    let limit = config.max_frame_bytes.saturating_mul(2);
    WebSocketConfig::default()
        .max_message_size(Some(limit))
        .max_frame_size(Some(limit))
}
