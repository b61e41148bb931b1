//! Random-pairing chat server - Entry Point
//!
//! Pairs anonymous WebSocket clients for text chat or calls.

use log::info;

use randomchat_server::error::{GatewayError, handle_error};
use randomchat_server::{Server, ServerConfig};

#[tokio::main]
async fn main() {
    // Initialize the logger (RUST_LOG overrides the default filter)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), GatewayError> {
    let config = ServerConfig::load()?;

    info!("Launching random-pairing server...");
    let server = Server::new(config).await?;

    tokio::select! {
        _ = server.start() => {}
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
    Ok(())
}
