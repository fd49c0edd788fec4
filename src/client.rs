//! Client struct definition
//!
//! Represents a registered client with their identity, role, remote address
//! and outbox channel.

use std::net::SocketAddr;

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::types::{ClientId, Role};

/// Registered client information
///
/// Holds all state the registry keeps for one connection: the unique ID,
/// the username chosen at registration, the role derived from it, the
/// remote address, and the outbox for server-to-client lines.
#[derive(Debug)]
pub struct Client {
    /// Unique identifier for this client
    pub id: ClientId,
    /// Username, set once during the registration handshake
    pub username: String,
    /// Role derived from the username at registration
    pub role: Role,
    /// Remote address of the connection
    pub addr: SocketAddr,
    /// Event loop → session outbox; each entry is one line to deliver
    outbox: mpsc::UnboundedSender<String>,
}

impl Client {
    /// Create a new client record; the role is derived from the username
    pub fn new(
        id: ClientId,
        username: String,
        addr: SocketAddr,
        outbox: mpsc::UnboundedSender<String>,
    ) -> Self {
        let role = Role::from_username(&username);
        Self {
            id,
            username,
            role,
            addr,
            outbox,
        }
    }

    /// Queue a line for delivery to this client
    ///
    /// The send never blocks; the session task performs the actual socket
    /// write. Returns an error if the session has already ended.
    pub fn send_line(&self, line: impl Into<String>) -> Result<(), SendError> {
        self.outbox
            .send(line.into())
            .map_err(|_| SendError::ChannelClosed)
    }

    /// Check if this client holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_addr() -> SocketAddr {
        "127.0.0.1:9000".parse().unwrap()
    }

    #[test]
    fn test_client_creation() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let client = Client::new(ClientId::new(), "alice".to_string(), test_addr(), tx);

        assert_eq!(client.username, "alice");
        assert_eq!(client.role, Role::Member);
        assert!(!client.is_admin());
    }

    #[test]
    fn test_admin_client_creation() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let client = Client::new(ClientId::new(), "admin".to_string(), test_addr(), tx);

        assert_eq!(client.role, Role::Admin);
        assert!(client.is_admin());
    }

    #[test]
    fn test_send_line_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client = Client::new(ClientId::new(), "alice".to_string(), test_addr(), tx);

        client.send_line("hello").unwrap();
        assert_eq!(rx.try_recv().unwrap(), "hello");
    }

    #[test]
    fn test_send_line_after_session_end() {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = Client::new(ClientId::new(), "alice".to_string(), test_addr(), tx);

        drop(rx);
        assert!(matches!(
            client.send_line("hello"),
            Err(SendError::ChannelClosed)
        ));
    }
}
