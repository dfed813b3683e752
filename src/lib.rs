//! # Livechat
//!
//! Stable, virtualizable render lists for live-chat streams.
//!
//! A live-chat source typically re-sends its whole history on every update.
//! This crate turns that feed into an append-only list of rows that a
//! virtualized list can draw without re-rendering or reordering what is
//! already on screen.
//!
//! ## Core Concepts
//!
//! - **Append-only merge**: only the unseen suffix of each batch is converted
//! - **Character-count sizing**: row heights come from message length alone
//! - **Incremental layout**: offsets are extended, never recomputed, as rows arrive
//! - **Explicit lifecycle**: every new subscription starts from an empty list
//!
//! ## Example
//!
//! ```rust,ignore
//! use livechat::{ChatEvent, ChatMessage, ChatView, LogNotifier, RowSource, Target, ViewConfig};
//!
//! let mut view = ChatView::new(LogNotifier, &ViewConfig::default())?;
//! view.submit(Target::parse("https://www.youtube.com/watch?v=abc")?);
//! view.apply(ChatEvent::Started);
//! view.apply(ChatEvent::Messages(vec![ChatMessage::new("amy", "hi")]));
//!
//! assert_eq!(view.row_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod layout;
pub mod message;
pub mod session;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use buffer::{MergeResult, ShrinkPolicy, StreamBuffer, StreamConfig};
pub use config::ViewConfig;
pub use error::{Error, Result};
pub use layout::{RowLayout, RowSizer, SizerConfig};
pub use message::{ChatMessage, RenderMessage};
pub use session::{
    channel, ChatEvent, ChatSender, ConnectionError, ConnectionState, EventPump, LogNotifier,
    Notification, NotificationVariant, Notifier, NullNotifier, Session, Target,
};
pub use widget::{ChatView, FollowState, RowSource};
