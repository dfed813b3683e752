//! Chat message values.

use serde::Deserialize;

/// A chat message as delivered by the chat source.
///
/// Messages carry no identity of their own. Position within a batch is the
/// only thing the [`StreamBuffer`](crate::buffer::StreamBuffer) relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatMessage {
    /// Display name of the sender.
    pub author: String,
    /// Message body.
    pub text: String,
    /// Avatar image URL, if the source provides one.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl ChatMessage {
    /// Create a message without an avatar.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            avatar: None,
        }
    }

    /// Attach an avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// A chat message ready for display.
///
/// `length` is the number of Unicode scalar values in `text` and is fixed at
/// creation. Fields are private so a created row cannot change under the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderMessage {
    author: String,
    text: String,
    avatar: Option<String>,
    length: usize,
}

impl RenderMessage {
    /// Create a render message directly.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self::from(ChatMessage::new(author, text))
    }

    /// Sender display name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Avatar image URL, if any.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Character count of the body.
    pub const fn length(&self) -> usize {
        self.length
    }
}

impl From<ChatMessage> for RenderMessage {
    fn from(message: ChatMessage) -> Self {
        let length = message.text.chars().count();
        Self {
            author: message.author,
            text: message.text,
            avatar: message.avatar,
            length,
        }
    }
}

impl From<&ChatMessage> for RenderMessage {
    fn from(message: &ChatMessage) -> Self {
        Self::from(message.clone())
    }
}
