use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::client::handle_connection;
use crate::config::ServerConfig;
use crate::error::{GatewayError, handle_error};
use crate::lobby::{Lobby, SharedLobby};

pub struct Server {
    lobby: SharedLobby,
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Binds the WebSocket listener.
    pub async fn new(config: ServerConfig) -> Result<Self, GatewayError> {
        let socket = config.listen_socket();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e.into());
            }
        };

        Ok(Self {
            lobby: Lobby::shared(),
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, GatewayError> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle to the lobby shared by all connections.
    pub fn lobby(&self) -> SharedLobby {
        Arc::clone(&self.lobby)
    }

    /// Accepts connections until the task is dropped.
    pub async fn start(&self) {
        info!(
            "Starting random-pairing server on {} (max {} clients)",
            self.config.listen_socket(),
            self.config.max_clients
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let lobby = Arc::clone(&self.lobby);
                    let config = Arc::clone(&self.config);

                    // Spawn a task for each client so accept loop doesn't block
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, addr, lobby, config).await {
                            handle_error(&e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
