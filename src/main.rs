//! Single-Room TCP Chat Server - Entry Point
//!
//! Starts the TCP listener and ChatServer actor, accepting connections.

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use minirc::{handle_connection, ChatServer};

/// Single-room chat server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct ServerArgs {
    /// Host address to bind the listener to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 9000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=minirc=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("minirc=info")),
        )
        .init();

    let args = ServerArgs::parse();
    let addr = format!("{}:{}", args.host, args.port);

    // Start TCP listener
    let listener = TcpListener::bind(&addr).await?;
    info!("chat server listening on {}", addr);

    // Create ChatServer actor channel and start
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let server = ChatServer::new(cmd_rx);
    tokio::spawn(server.run());

    // Connection accept loop
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("new connection from {}", addr);
                let cmd_tx = cmd_tx.clone();

                // Spawn a session task for each connection
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, cmd_tx).await {
                        error!("connection handler error: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("failed to accept connection: {}", e);
            }
        }
    }
}
