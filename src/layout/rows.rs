//! RowLayout: Cached row heights and offsets for list virtualization.
//!
//! Heights are measured once per row. Because the stream buffer only ever
//! appends, a sync measures just the rows added since the previous sync and
//! extends the cumulative offsets. A reset or resync of the buffer (detected
//! through its epoch) rebuilds the cache from scratch.

use super::sizer::RowSizer;
use crate::buffer::StreamBuffer;
use crate::error::{Error, Result};
use std::ops::Range;

/// Prefix-sum cache of row heights.
#[derive(Debug, Default, Clone)]
pub struct RowLayout {
    /// Height of each row.
    heights: Vec<u32>,
    /// Bottom edge of each row (running sum of `heights`).
    ends: Vec<u64>,
    /// Buffer epoch the cache was built against.
    epoch: u64,
}

impl RowLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cache up to date with `buffer`.
    ///
    /// Returns the number of rows measured during this call.
    pub fn sync(&mut self, sizer: &RowSizer, buffer: &StreamBuffer) -> usize {
        if buffer.epoch() != self.epoch || buffer.len() < self.heights.len() {
            tracing::debug!(rows = buffer.len(), "rebuilding row layout");
            self.heights.clear();
            self.ends.clear();
            self.epoch = buffer.epoch();
        }

        let start = self.heights.len();
        let new_rows = &buffer.snapshot()[start..];
        let mut bottom = self.total_height();

        self.heights.reserve(new_rows.len());
        self.ends.reserve(new_rows.len());
        for message in new_rows {
            let height = sizer.height_of(message);
            bottom += u64::from(height);
            self.heights.push(height);
            self.ends.push(bottom);
        }

        new_rows.len()
    }

    /// Number of measured rows.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Check if no rows are measured.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Cached height of row `index`.
    pub fn height(&self, index: usize) -> Result<u32> {
        self.heights
            .get(index)
            .copied()
            .ok_or_else(|| Error::out_of_range(index, self.len()))
    }

    /// Top edge of row `index`.
    pub fn offset_of(&self, index: usize) -> Result<u64> {
        if index >= self.len() {
            return Err(Error::out_of_range(index, self.len()));
        }
        Ok(if index == 0 { 0 } else { self.ends[index - 1] })
    }

    /// Combined height of all rows.
    pub fn total_height(&self) -> u64 {
        self.ends.last().copied().unwrap_or(0)
    }

    /// Row containing the vertical position `y`, if any.
    pub fn row_at_offset(&self, y: u64) -> Option<usize> {
        let index = self.ends.partition_point(|&end| end <= y);
        (index < self.len()).then_some(index)
    }

    /// Rows intersecting the viewport, widened by `overscan` on each side.
    pub fn visible_range(&self, scroll_top: u64, viewport_height: u64, overscan: usize) -> Range<usize> {
        let len = self.len();
        if len == 0 || viewport_height == 0 {
            return 0..0;
        }

        let first = self.ends.partition_point(|&end| end <= scroll_top);
        if first >= len {
            return len..len;
        }

        let bottom = scroll_top.saturating_add(viewport_height);
        let last = (self.ends.partition_point(|&end| end < bottom) + 1).min(len);

        first.saturating_sub(overscan)..(last + overscan).min(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SizerConfig;
    use crate::message::ChatMessage;

    fn uniform_sizer() -> RowSizer {
        // Every short message is 60px tall.
        RowSizer::default()
    }

    fn buffer_with(count: usize) -> StreamBuffer {
        let batch: Vec<ChatMessage> = (0..count)
            .map(|i| ChatMessage::new(format!("user{i}"), "hello"))
            .collect();
        let mut buf = StreamBuffer::new();
        buf.merge(&batch);
        buf
    }

    #[test]
    fn test_offsets() {
        let buf = buffer_with(4);
        let mut layout = RowLayout::new();
        assert_eq!(layout.sync(&uniform_sizer(), &buf), 4);

        assert_eq!(layout.offset_of(0).unwrap(), 0);
        assert_eq!(layout.offset_of(3).unwrap(), 180);
        assert_eq!(layout.total_height(), 240);
        assert!(layout.offset_of(4).is_err());
    }

    #[test]
    fn test_incremental_sync_measures_only_new_rows() {
        let batch: Vec<ChatMessage> = (0..5)
            .map(|i| ChatMessage::new("a", "x".repeat(i * 40)))
            .collect();
        let mut buf = StreamBuffer::new();
        let sizer = RowSizer::new(SizerConfig {
            base_height: 30,
            unit_height: 11,
            chars_per_unit: 40,
        })
        .unwrap();
        let mut layout = RowLayout::new();

        buf.merge(&batch[..2]);
        assert_eq!(layout.sync(&sizer, &buf), 2);
        buf.merge(&batch);
        assert_eq!(layout.sync(&sizer, &buf), 3);
        assert_eq!(layout.sync(&sizer, &buf), 0);

        let heights: Vec<u32> = (0..5).map(|i| layout.height(i).unwrap()).collect();
        assert_eq!(heights, vec![30, 41, 52, 63, 74]);
        assert_eq!(layout.total_height(), 260);
    }

    #[test]
    fn test_sync_rebuilds_after_reset() {
        let mut buf = buffer_with(3);
        let mut layout = RowLayout::new();
        layout.sync(&uniform_sizer(), &buf);

        buf.reset();
        buf.merge(&[
            ChatMessage::new("a", "x".repeat(80)),
            ChatMessage::new("b", "y"),
            ChatMessage::new("c", "z"),
            ChatMessage::new("d", "w"),
        ]);
        assert_eq!(layout.sync(&uniform_sizer(), &buf), 4);
        assert_eq!(layout.height(0).unwrap(), 104);
        assert_eq!(layout.total_height(), 104 + 3 * 60);
    }

    #[test]
    fn test_row_at_offset() {
        let buf = buffer_with(3);
        let mut layout = RowLayout::new();
        layout.sync(&uniform_sizer(), &buf);

        assert_eq!(layout.row_at_offset(0), Some(0));
        assert_eq!(layout.row_at_offset(59), Some(0));
        assert_eq!(layout.row_at_offset(60), Some(1));
        assert_eq!(layout.row_at_offset(179), Some(2));
        assert_eq!(layout.row_at_offset(180), None);
    }

    #[test]
    fn test_visible_range() {
        let buf = buffer_with(10);
        let mut layout = RowLayout::new();
        layout.sync(&uniform_sizer(), &buf);

        assert_eq!(layout.visible_range(0, 130, 0), 0..3);
        assert_eq!(layout.visible_range(120, 60, 0), 2..3);
        assert_eq!(layout.visible_range(130, 60, 0), 2..4);
        assert_eq!(layout.visible_range(0, 130, 3), 0..6);
        assert_eq!(layout.visible_range(300, 120, 3), 2..10);
        assert_eq!(layout.visible_range(10_000, 120, 3), 10..10);
        assert_eq!(layout.visible_range(0, 0, 3), 0..0);
    }

    #[test]
    fn test_empty_layout() {
        let layout = RowLayout::new();
        assert!(layout.is_empty());
        assert_eq!(layout.total_height(), 0);
        assert_eq!(layout.row_at_offset(0), None);
        assert_eq!(layout.visible_range(0, 500, 3), 0..0);
    }
}
