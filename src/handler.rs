//! Client connection handler
//!
//! Owns the read side of one connection: performs the registration
//! handshake, then forwards classified input to the ChatServer actor while
//! draining the client's outbox to the socket.

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::message::{self, InputLine};
use crate::server::ServerCommand;
use crate::types::ClientId;

/// Handle a new TCP connection
///
/// Reads the first line as the username, registers the client with the
/// event loop, then runs the session loop until the stream ends, a write
/// fails, or the client is evicted. Exactly one `Leave` is submitted on the
/// way out, whichever way the session terminates.
pub async fn handle_connection(
    stream: TcpStream,
    cmd_tx: mpsc::UnboundedSender<ServerCommand>,
) -> Result<(), AppError> {
    let peer_addr = stream.peer_addr()?;
    debug!("new connection from {}", peer_addr);

    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // Registration handshake: the first line is the username. A connection
    // that ends before sending one is discarded without registering.
    let username = match lines.next_line().await {
        Ok(Some(line)) => line.trim().to_string(),
        Ok(None) => {
            info!("{} closed before registering", peer_addr);
            return Ok(());
        }
        Err(err) => {
            info!("{} failed during registration: {}", peer_addr, err);
            return Ok(());
        }
    };

    let client_id = ClientId::new();
    let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<String>();

    cmd_tx
        .send(ServerCommand::Join {
            id: client_id,
            username: username.clone(),
            addr: peer_addr,
            outbox: outbox_tx,
        })
        .map_err(|_| AppError::ChannelSend)?;

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !forward_input(&cmd_tx, client_id, &username, &line) {
                        break;
                    }
                }
                Ok(None) => {
                    debug!("[{}] closed the connection", username);
                    break;
                }
                Err(err) => {
                    warn!("read failed for [{}]: {}", username, err);
                    break;
                }
            },
            outbound = outbox_rx.recv() => match outbound {
                Some(text) => {
                    if let Err(err) = write_line(&mut write_half, &text).await {
                        warn!("write failed for [{}]: {}", username, err);
                        break;
                    }
                }
                None => {
                    // Outbox closed: the event loop evicted this client
                    debug!("[{}] was evicted", username);
                    break;
                }
            },
        }
    }

    // Exactly one leave request per session; eviction is idempotent, so a
    // kicked session requesting it again is harmless.
    let _ = cmd_tx.send(ServerCommand::Leave { id: client_id });
    Ok(())
}

/// Classify one inbound line and forward it to the event loop
///
/// Returns false when the event loop is gone and the session should end.
fn forward_input(
    cmd_tx: &mpsc::UnboundedSender<ServerCommand>,
    client_id: ClientId,
    username: &str,
    line: &str,
) -> bool {
    let cmd = match message::classify(line) {
        InputLine::Empty => return true,
        InputLine::Command(tokens) => ServerCommand::Dispatch {
            id: client_id,
            tokens,
        },
        InputLine::Chat(text) => ServerCommand::Broadcast {
            text: message::broadcast_line(username, &text),
        },
    };
    cmd_tx.send(cmd).is_ok()
}

/// Write one line plus the newline delimiter
async fn write_line<W>(writer: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_input_ignores_empty_lines() {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
        let id = ClientId::new();

        assert!(forward_input(&cmd_tx, id, "alice", "   "));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn test_forward_input_formats_chat() {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
        let id = ClientId::new();

        assert!(forward_input(&cmd_tx, id, "alice", "hello"));
        match cmd_rx.try_recv().unwrap() {
            ServerCommand::Broadcast { text } => assert_eq!(text, "alice> hello"),
            other => panic!("expected a broadcast, got {:?}", other),
        }
    }

    #[test]
    fn test_forward_input_tokenizes_commands() {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
        let id = ClientId::new();

        assert!(forward_input(&cmd_tx, id, "alice", "/msg bob hi"));
        match cmd_rx.try_recv().unwrap() {
            ServerCommand::Dispatch { tokens, .. } => {
                assert_eq!(tokens, vec!["/msg", "bob", "hi"]);
            }
            other => panic!("expected a dispatch, got {:?}", other),
        }
    }

    #[test]
    fn test_forward_input_reports_closed_loop() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let id = ClientId::new();

        drop(cmd_rx);
        assert!(!forward_input(&cmd_tx, id, "alice", "hello"));
    }
}
