//! Error types for the chat server
//!
//! Defines application-level errors and message send errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// Every error here is terminal for a single connection only; the server
/// keeps running and other clients are unaffected.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error on the connection (fatal for the session)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send error (fatal - the event loop is gone)
    #[error("Channel send error")]
    ChannelSend,
}

/// Message send errors
///
/// Occurs when attempting to send lines through closed channels.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}
