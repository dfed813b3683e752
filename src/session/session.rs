//! Session: Connection lifecycle driving the stream buffer.
//!
//! ```text
//!            submit                 on_start
//!   Idle ─────────────▶ Connecting ─────────▶ Ready
//!    ▲                      │                   │
//!    └────── on_error ──────┴───────────────────┘
//!                   (buffer reset, user notified)
//! ```
//!
//! Every entry into `Connecting` resets the buffer so nothing from a previous
//! target leaks into the new one.

use super::messages::{ChatEvent, ConnectionError, ConnectionState};
use super::notify::{Notification, Notifier};
use super::target::Target;
use crate::buffer::{MergeResult, StreamBuffer, StreamConfig};
use crate::message::{ChatMessage, RenderMessage};

/// Owned state for one chat view: connection state, target and rows.
#[derive(Debug)]
pub struct Session<N> {
    /// Current connection state.
    state: ConnectionState,
    /// Target of the current (or pending) subscription.
    target: Option<Target>,
    /// Merged rows.
    buffer: StreamBuffer,
    /// Where connection failures are surfaced.
    notifier: N,
}

impl<N: Notifier> Session<N> {
    /// Create an idle session.
    pub fn new(notifier: N) -> Self {
        Self::with_config(StreamConfig::default(), notifier)
    }

    /// Create an idle session with a custom buffer configuration.
    pub const fn with_config(config: StreamConfig, notifier: N) -> Self {
        Self {
            state: ConnectionState::Idle,
            target: None,
            buffer: StreamBuffer::with_config(config),
            notifier,
        }
    }

    /// Start (or restart) a subscription to `target`.
    ///
    /// Allowed from any state. Rows from the previous target are discarded.
    pub fn submit(&mut self, target: Target) {
        tracing::debug!(from = ?self.state, stream = %target, "connecting");
        self.buffer.reset();
        self.target = Some(target);
        self.state = ConnectionState::Connecting;
    }

    /// The source reports that it has connected.
    pub fn on_start(&mut self) {
        if self.state == ConnectionState::Connecting {
            tracing::debug!(stream = ?self.target, "ready");
            self.state = ConnectionState::Ready;
        } else {
            tracing::trace!(state = ?self.state, "ignoring start outside of connecting");
        }
    }

    /// The source delivered its history so far.
    ///
    /// Returns `None` when the update was dropped because the session is idle.
    pub fn on_update(&mut self, messages: &[ChatMessage]) -> Option<MergeResult> {
        if self.state == ConnectionState::Idle {
            tracing::trace!(messages = messages.len(), "dropping update while idle");
            return None;
        }
        Some(self.buffer.merge(messages))
    }

    /// The source failed. The session returns to idle and the user is told.
    ///
    /// Errors arriving while already idle come from a source that was torn
    /// down and are only logged.
    pub fn on_error(&mut self, error: &ConnectionError) {
        if self.state == ConnectionState::Idle {
            tracing::debug!(%error, "ignoring error while idle");
            return;
        }

        tracing::warn!(from = ?self.state, stream = ?self.target, %error, "connection failed");
        self.teardown();
        self.notifier
            .notify(Notification::connection_error(error.message.clone()));
    }

    /// Explicitly tear down the session.
    pub fn reset(&mut self) {
        tracing::debug!(from = ?self.state, "reset");
        self.teardown();
    }

    fn teardown(&mut self) {
        self.buffer.reset();
        self.target = None;
        self.state = ConnectionState::Idle;
    }

    /// Apply a single event from the chat source.
    pub fn handle(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Starting => {
                if self.state != ConnectionState::Connecting {
                    tracing::trace!(state = ?self.state, "source starting outside of connecting");
                }
            }
            ChatEvent::Started => self.on_start(),
            ChatEvent::Messages(messages) => {
                self.on_update(&messages);
            }
            ChatEvent::Error(error) => self.on_error(&error),
        }
    }

    /// Current connection state.
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether a subscription is starting up.
    pub fn is_loading(&self) -> bool {
        self.state == ConnectionState::Connecting
    }

    /// Whether messages are flowing.
    pub fn is_ready(&self) -> bool {
        self.state == ConnectionState::Ready
    }

    /// Target of the current subscription.
    pub const fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Merged rows.
    pub const fn buffer(&self) -> &StreamBuffer {
        &self.buffer
    }

    /// Merged rows in display order.
    pub fn snapshot(&self) -> &[RenderMessage] {
        self.buffer.snapshot()
    }

    /// Get the notifier.
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Get a mutable reference to the notifier.
    pub const fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}
