//! Event pump: Ordered delivery of chat-source events to a session.
//!
//! The chat source may run on any thread and holds a [`ChatSender`]. The
//! thread that owns the [`Session`] drains the matching [`EventPump`], so
//! batches are merged one at a time in the order they were sent.

use super::messages::{ChatEvent, ConnectionError};
use super::notify::Notifier;
use super::session::Session;
use crate::message::ChatMessage;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::cell::Cell;
use std::time::Duration;

/// Message reported when the source goes away without an error.
pub const DISCONNECTED_MESSAGE: &str = "Chat source disconnected";

/// Create a connected sender/pump pair.
///
/// `capacity` bounds the number of undelivered events; a full channel blocks
/// the sender.
pub fn channel(capacity: usize) -> (ChatSender, EventPump) {
    let (tx, rx) = bounded::<ChatEvent>(capacity);
    (
        ChatSender { tx },
        EventPump {
            rx,
            disconnected: Cell::new(false),
        },
    )
}

/// Sending half, held by the chat source.
#[derive(Debug, Clone)]
pub struct ChatSender {
    tx: Sender<ChatEvent>,
}

impl ChatSender {
    /// Send an event. Returns `false` if the pump was dropped.
    pub fn send(&self, event: ChatEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Report that the source is about to connect.
    pub fn starting(&self) -> bool {
        self.send(ChatEvent::Starting)
    }

    /// Report that the source connected.
    pub fn started(&self) -> bool {
        self.send(ChatEvent::Started)
    }

    /// Deliver the full history seen so far.
    pub fn messages(&self, history: Vec<ChatMessage>) -> bool {
        self.send(ChatEvent::Messages(history))
    }

    /// Report a failure.
    pub fn error(&self, message: impl Into<String>) -> bool {
        self.send(ChatEvent::Error(ConnectionError::new(message)))
    }
}

/// Receiving half, drained on the session's thread.
#[derive(Debug)]
pub struct EventPump {
    rx: Receiver<ChatEvent>,
    /// Set once a disconnect has been reported.
    disconnected: Cell<bool>,
}

impl EventPump {
    /// Apply every pending event to `session` without blocking.
    ///
    /// Returns the number of events applied. If every sender has been dropped
    /// the session receives a single connection error.
    pub fn pump<N: Notifier>(&self, session: &mut Session<N>) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    session.handle(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.report_disconnect(session);
                    break;
                }
            }
        }
        applied
    }

    /// Wait up to `timeout` for an event, then drain the rest.
    pub fn pump_timeout<N: Notifier>(&self, session: &mut Session<N>, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                session.handle(event);
                1 + self.pump(session)
            }
            Err(RecvTimeoutError::Timeout) => 0,
            Err(RecvTimeoutError::Disconnected) => {
                self.report_disconnect(session);
                0
            }
        }
    }

    /// Whether the source side has gone away.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected.get()
    }

    fn report_disconnect<N: Notifier>(&self, session: &mut Session<N>) {
        if self.disconnected.replace(true) {
            return;
        }
        tracing::debug!("chat source channel closed");
        session.on_error(&ConnectionError::new(DISCONNECTED_MESSAGE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ConnectionState, Notification, Target};

    fn connecting() -> Session<Vec<Notification>> {
        let mut s = Session::new(Vec::new());
        s.submit(Target::parse("video").unwrap());
        s
    }

    #[test]
    fn test_pump_applies_in_order() {
        let (tx, pump) = channel(16);
        let mut s = connecting();

        tx.starting();
        tx.started();
        tx.messages(vec![ChatMessage::new("a", "1")]);
        tx.messages(vec![ChatMessage::new("a", "1"), ChatMessage::new("b", "2")]);

        assert_eq!(pump.pump(&mut s), 4);
        assert_eq!(s.state(), ConnectionState::Ready);
        let authors: Vec<&str> = s.snapshot().iter().map(|m| m.author()).collect();
        assert_eq!(authors, vec!["a", "b"]);
        assert_eq!(pump.pump(&mut s), 0);
    }

    #[test]
    fn test_pump_across_threads() {
        let (tx, pump) = channel(4);
        let _keep_open = tx.clone();
        let mut s = connecting();

        let handle = std::thread::spawn(move || {
            tx.started();
            let mut history = Vec::new();
            for i in 0..20 {
                history.push(ChatMessage::new(format!("user{i}"), "msg"));
                tx.messages(history.clone());
            }
        });

        let mut applied = 0;
        while applied < 21 {
            applied += pump.pump_timeout(&mut s, Duration::from_secs(5));
        }
        handle.join().unwrap();

        assert_eq!(s.snapshot().len(), 20);
        assert_eq!(s.snapshot()[19].author(), "user19");
    }

    #[test]
    fn test_disconnect_reported_once() {
        let (tx, pump) = channel(4);
        let mut s = connecting();
        tx.started();
        drop(tx);

        pump.pump(&mut s);
        assert!(pump.is_disconnected());
        assert_eq!(s.state(), ConnectionState::Idle);
        assert_eq!(s.notifier().len(), 1);
        assert_eq!(s.notifier()[0].description, DISCONNECTED_MESSAGE);

        pump.pump(&mut s);
        assert_eq!(s.notifier().len(), 1);
    }

    #[test]
    fn test_error_event() {
        let (tx, pump) = channel(4);
        let mut s = connecting();
        tx.started();
        tx.error("private video");

        pump.pump(&mut s);
        assert_eq!(s.state(), ConnectionState::Idle);
        assert_eq!(s.notifier()[0].description, "private video");
    }
    #[test]
    fn test_pump_timeout_without_events() {
        let (_tx, pump) = channel(4);
        let mut s = connecting();

        assert_eq!(pump.pump_timeout(&mut s, Duration::from_millis(10)), 0);
        assert!(!pump.is_disconnected());
        assert_eq!(s.state(), ConnectionState::Connecting);
        assert!(s.notifier().is_empty());
    }

    #[test]
    fn test_pump_timeout_reports_disconnect() {
        let (tx, pump) = channel(4);
        let mut s = connecting();
        drop(tx);

        assert_eq!(pump.pump_timeout(&mut s, Duration::from_secs(5)), 0);
        assert!(pump.is_disconnected());
        assert_eq!(s.state(), ConnectionState::Idle);
        assert_eq!(s.notifier().len(), 1);
        assert_eq!(s.notifier()[0].description, DISCONNECTED_MESSAGE);

        pump.pump_timeout(&mut s, Duration::from_millis(10));
        assert_eq!(s.notifier().len(), 1);
    }
}
