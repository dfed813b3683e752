//! Session module: Connection lifecycle and the chat-source boundary.
//!
//! - **Session**: owns the stream buffer and the connection state machine
//! - **Event pump**: delivers chat-source events to the session in order
//! - **Notifier**: port for user-visible error notifications
//! - **Target**: the subscription target taken from the page route
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ChatEvent      ┌──────────────┐   Notification   ┌──────────┐
//! │ Chat Source  │ ─────────────────▶ │   Session    │ ───────────────▶ │ Notifier │
//! └──────────────┘    (EventPump)     │              │                  └──────────┘
//!                                     │ StreamBuffer │
//!                                     └──────────────┘
//!                                            │ rows
//!                                            ▼
//!                                     ┌──────────────┐
//!                                     │   ChatView   │
//!                                     └──────────────┘
//! ```

mod messages;
mod notify;
mod pump;
#[allow(clippy::module_inception)]
mod session;
mod target;

pub use messages::{ChatEvent, ConnectionError, ConnectionState};
pub use notify::{LogNotifier, Notification, NotificationVariant, Notifier, NullNotifier};
pub use pump::{channel, ChatSender, EventPump, DISCONNECTED_MESSAGE};
pub use session::Session;
pub use target::Target;
