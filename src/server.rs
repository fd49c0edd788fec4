//! ChatServer Actor implementation
//!
//! The central actor that owns the client registry and serializes every
//! join, leave, broadcast and command dispatch. Uses the Actor pattern with
//! mpsc channels for message passing; no locks are needed because all
//! registry access goes through this one task.

use std::net::SocketAddr;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::Client;
use crate::command::{self, CommandEffect, Registry};
use crate::types::ClientId;

/// Events sent from session tasks to the ChatServer actor
#[derive(Debug)]
pub enum ServerCommand {
    /// A session finished the registration handshake; admit the client
    Join {
        id: ClientId,
        username: String,
        addr: SocketAddr,
        outbox: mpsc::UnboundedSender<String>,
    },
    /// A session ended; evict the client if still registered
    Leave {
        id: ClientId,
    },
    /// Deliver a chat line to every registered client
    Broadcast {
        text: String,
    },
    /// Execute a slash command on behalf of a client
    Dispatch {
        id: ClientId,
        tokens: Vec<String>,
    },
}

/// The main ChatServer actor
///
/// Sole owner of the registry. Processes events strictly one at a time in
/// arrival order, so every event is atomic with respect to the registry.
pub struct ChatServer {
    /// All registered clients: ClientId -> Client
    registry: Registry,
    /// Event receiver channel
    receiver: mpsc::UnboundedReceiver<ServerCommand>,
}

impl ChatServer {
    /// Create a new ChatServer with the given event receiver
    pub fn new(receiver: mpsc::UnboundedReceiver<ServerCommand>) -> Self {
        Self {
            registry: Registry::new(),
            receiver,
        }
    }

    /// Run the ChatServer event loop
    ///
    /// Continuously receives and processes events until all senders are dropped.
    pub async fn run(mut self) {
        info!("chat server ready for new clients");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("chat server shutting down");
    }

    /// Process a single event
    fn handle_command(&mut self, cmd: ServerCommand) {
        match cmd {
            ServerCommand::Join {
                id,
                username,
                addr,
                outbox,
            } => {
                self.handle_join(id, username, addr, outbox);
            }
            ServerCommand::Leave { id } => {
                self.handle_leave(id);
            }
            ServerCommand::Broadcast { text } => {
                self.handle_broadcast(&text);
            }
            ServerCommand::Dispatch { id, tokens } => {
                self.handle_dispatch(id, &tokens);
            }
        }
    }

    /// Handle a completed registration
    fn handle_join(
        &mut self,
        id: ClientId,
        username: String,
        addr: SocketAddr,
        outbox: mpsc::UnboundedSender<String>,
    ) {
        let client = Client::new(id, username, addr, outbox);
        info!("new connected user [{}]", client.username);
        if client.is_admin() {
            info!("[{}] was promoted to channel admin", client.username);
        }

        self.registry.insert(id, client);
        debug!("registered clients: {}", self.registry.len());
    }

    /// Handle a session ending
    ///
    /// Idempotent: a kick and the kicked session's own exit both request
    /// eviction for the same client.
    fn handle_leave(&mut self, id: ClientId) {
        if let Some(client) = self.registry.remove(&id) {
            info!("[{}] left", client.username);
            debug!("registered clients: {}", self.registry.len());
        }
    }

    /// Handle a broadcast to the whole room
    ///
    /// A failed delivery to one client is logged and skipped; the rest of
    /// the room still receives the line.
    fn handle_broadcast(&self, text: &str) {
        for client in self.registry.values() {
            if client.send_line(text).is_err() {
                warn!("failed to deliver to [{}]", client.username);
            }
        }
    }

    /// Handle a command dispatch request
    fn handle_dispatch(&mut self, id: ClientId, tokens: &[String]) {
        if let Some(CommandEffect::Kick(target)) = command::dispatch(&self.registry, id, tokens) {
            self.handle_leave(target);
        }
    }
}
