//! Message types for the chat-source boundary.
//!
//! These define the protocol between the chat source and a [`Session`].
//!
//! [`Session`]: super::Session

use crate::message::ChatMessage;
use thiserror::Error;

/// Connection state as observed by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// No target, or the last connection failed.
    #[default]
    Idle,
    /// A target was submitted and the source is starting up.
    Connecting,
    /// The source is delivering messages.
    Ready,
}

/// A failure reported by the chat source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConnectionError {
    /// Human-readable description, shown to the user as is.
    pub message: String,
}

impl ConnectionError {
    /// Create a connection error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Events from the chat source.
///
/// These represent data arriving from the external subscription, in the
/// order it was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The source is about to connect.
    Starting,

    /// The source connected and will deliver messages.
    Started,

    /// The full message history seen by the source so far.
    Messages(Vec<ChatMessage>),

    /// The source failed.
    Error(ConnectionError),
}
