//! Message module: Chat messages as delivered and as rendered.
//!
//! [`ChatMessage`] is what the chat source hands over. [`RenderMessage`] is the
//! same message annotated with the metadata the list needs to size its row.

mod chat;

pub use chat::{ChatMessage, RenderMessage};
