//! Stream buffer: Append-only merge of re-sent chat history.
//!
//! The chat source delivers its *whole* history on every update. The buffer
//! remembers how long the previous delivery was and only converts the new
//! suffix, so rows already handed to the list are never rebuilt or reordered.

use crate::message::{ChatMessage, RenderMessage};
use serde::Deserialize;

/// What to do when a batch is shorter than the previous one.
///
/// A shorter batch usually means the source reset its own history (for
/// example after reconnecting), so positions no longer line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkPolicy {
    /// Drop everything and re-merge the shorter batch from the start.
    #[default]
    Resync,
    /// Append nothing and adopt the shorter length as the new cursor.
    Ignore,
}

/// Configuration for the stream buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Handling of batches that shrink.
    pub shrink_policy: ShrinkPolicy,
}

/// Result of a merge operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeResult {
    /// The batch held nothing new.
    Unchanged,
    /// New rows were appended after the existing ones.
    Appended {
        /// Number of rows appended.
        count: usize,
    },
    /// The batch shrank; the buffer was cleared and rebuilt from it.
    Resynced {
        /// Number of rows now in the buffer.
        count: usize,
    },
}

impl MergeResult {
    /// Whether the rows visible before the merge are still valid.
    pub const fn preserves_rows(&self) -> bool {
        !matches!(self, Self::Resynced { .. })
    }
}

/// Stable, append-only list of render-ready chat messages.
#[derive(Debug, Default, Clone)]
pub struct StreamBuffer {
    /// Rows in display order.
    rows: Vec<RenderMessage>,
    /// Length of the previous batch passed to `merge` (not `rows.len()`).
    last_seen_len: usize,
    /// Bumped whenever existing rows are discarded.
    epoch: u64,
    /// Configuration.
    config: StreamConfig,
}

impl StreamBuffer {
    /// Create an empty buffer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with a custom configuration.
    pub const fn with_config(config: StreamConfig) -> Self {
        Self {
            rows: Vec::new(),
            last_seen_len: 0,
            epoch: 0,
            config,
        }
    }

    /// Merge the latest full history from the chat source.
    ///
    /// Only the suffix past the previously seen length is converted and
    /// appended. Merging the same batch twice is a no-op.
    pub fn merge(&mut self, latest_batch: &[ChatMessage]) -> MergeResult {
        let batch_len = latest_batch.len();

        if batch_len < self.last_seen_len {
            return self.handle_shrink(latest_batch);
        }

        let new_messages = &latest_batch[self.last_seen_len..];
        self.last_seen_len = batch_len;

        if new_messages.is_empty() {
            return MergeResult::Unchanged;
        }

        self.rows.extend(new_messages.iter().map(RenderMessage::from));
        tracing::trace!(appended = new_messages.len(), rows = self.rows.len(), "merged batch");

        MergeResult::Appended {
            count: new_messages.len(),
        }
    }

    fn handle_shrink(&mut self, latest_batch: &[ChatMessage]) -> MergeResult {
        tracing::warn!(
            previous = self.last_seen_len,
            current = latest_batch.len(),
            policy = ?self.config.shrink_policy,
            "chat history shrank"
        );

        match self.config.shrink_policy {
            ShrinkPolicy::Resync => {
                self.reset();
                self.rows.extend(latest_batch.iter().map(RenderMessage::from));
                self.last_seen_len = latest_batch.len();
                MergeResult::Resynced {
                    count: self.rows.len(),
                }
            }
            ShrinkPolicy::Ignore => {
                self.last_seen_len = latest_batch.len();
                MergeResult::Unchanged
            }
        }
    }

    /// Current rows in display order.
    pub fn snapshot(&self) -> &[RenderMessage] {
        &self.rows
    }

    /// Get a row by index.
    pub fn get(&self, index: usize) -> Option<&RenderMessage> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the buffer holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of the most recently merged batch.
    pub const fn last_seen_len(&self) -> usize {
        self.last_seen_len
    }

    /// Counter that changes every time previously returned rows become invalid.
    ///
    /// Caches keyed by row index compare this to know when to rebuild.
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Get the configuration.
    pub const fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Empty the buffer and forget the previous batch length.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.last_seen_len = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }
}
