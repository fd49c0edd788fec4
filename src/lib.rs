//! Single-Room TCP Chat Server Library
//!
//! A line-oriented chat server built on tokio using the Actor pattern for
//! state management.
//!
//! # Features
//! - Username registration (first line of the connection)
//! - Room-wide broadcast of chat lines
//! - Direct messages between users
//! - Admin role for the reserved username `admin`
//! - Slash commands: /users, /msg, /time, /user, /kick
//! - Disconnection and kick handling
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `ChatServer` is the central actor owning the client registry
//! - Each connection has a session task communicating with the server
//! - No locks needed - all state access goes through message passing
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use minirc::{ChatServer, handle_connection};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:9000").await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
//!
//!     tokio::spawn(ChatServer::new(cmd_rx).run());
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         let cmd_tx = cmd_tx.clone();
//!         tokio::spawn(handle_connection(stream, cmd_tx));
//!     }
//! }
//! ```

pub mod client;
pub mod command;
pub mod error;
pub mod handler;
pub mod message;
pub mod server;
pub mod types;

// Re-export main types for convenience
pub use client::Client;
pub use command::CommandEffect;
pub use error::{AppError, SendError};
pub use handler::handle_connection;
pub use message::InputLine;
pub use server::{ChatServer, ServerCommand};
pub use types::{ClientId, Role, ADMIN_USERNAME};
