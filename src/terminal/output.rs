//! `OutputBuffer`: Single-syscall output buffer for painting chat rows.
//!
//! Rows are measured in terminal lines here: configure the sizer with
//! `base_height = 1` and `unit_height = 1` so every row height is a line
//! count. The sizer counts characters while wrapping counts display columns
//! and loses the `author: ` label on the first line, so a row can need more
//! lines than it was given. Such a row is cut at its height and its last
//! line ends in [`ELLIPSIS`]. A `chars_per_unit` of half the width or less
//! keeps that rare.

use crate::error::Result;
use crate::message::RenderMessage;
use crate::session::Notifier;
use crate::widget::{ChatView, RowSource};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Marker painted at the end of a row that did not fit its height.
pub const ELLIPSIS: &str = "…";

/// Colors used when painting rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyle {
    /// Author label color.
    pub author_fg: Color,
    /// Message body color.
    pub text_fg: Color,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self {
            author_fg: Color::Rgb { r: 74, g: 222, b: 128 },
            text_fg: Color::Rgb { r: 229, g: 231, b: 235 },
        }
    }
}

/// Screen area a chat list is painted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First screen row.
    pub top: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
    style: RowStyle,
}

impl OutputBuffer {
    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_style(RowStyle::default())
    }

    /// Create a buffer with custom row colors.
    pub fn with_style(style: RowStyle) -> Self {
        Self {
            data: Vec::with_capacity(4096),
            style,
        }
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Paint the rows of `view` visible at `scroll_top` into `viewport`.
    ///
    /// Every line of the viewport is cleared first. Rows are clipped to
    /// their measured height, with [`ELLIPSIS`] marking the cut.
    pub fn paint_view<N: Notifier>(&mut self, view: &ChatView<N>, viewport: Viewport, scroll_top: u64) -> Result<()> {
        for line in 0..viewport.height {
            queue!(
                self.data,
                MoveTo(0, viewport.top.saturating_add(line)),
                Clear(ClearType::UntilNewLine)
            )?;
        }

        let height = u64::from(viewport.height);
        let bottom = scroll_top + height;

        for index in view.visible_range(scroll_top, height) {
            let message = view.render_row(index)?;
            let offset = view.offset_of(index)?;
            let row_height = view.height_of(index)?;
            let width = usize::from(viewport.width);
            let lines = fit_lines(
                wrap_message(message, width),
                usize::try_from(row_height).unwrap_or(usize::MAX),
                width,
            );

            for (line_no, line) in (0u64..).zip(lines) {
                let y = offset + line_no;
                if y < scroll_top || y >= bottom {
                    continue;
                }
                #[allow(clippy::cast_possible_truncation)]
                let screen_y = viewport.top.saturating_add((y - scroll_top) as u16);
                self.paint_line(screen_y, line)?;
            }
        }

        queue!(self.data, ResetColor)?;
        Ok(())
    }

    fn paint_line(&mut self, y: u16, line: WrappedLine<'_>) -> Result<()> {
        let style = self.style;
        queue!(self.data, MoveTo(0, y))?;
        if let Some(author) = line.author {
            queue!(
                self.data,
                SetForegroundColor(style.author_fg),
                SetAttribute(Attribute::Bold),
                Print(author),
                SetAttribute(Attribute::Reset),
                Print(": "),
            )?;
        }
        queue!(self.data, SetForegroundColor(style.text_fg), Print(line.text))?;
        if line.clipped {
            queue!(self.data, Print(ELLIPSIS))?;
        }
        Ok(())
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

/// One screen line of a painted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WrappedLine<'a> {
    /// Author label, on the first line only.
    author: Option<&'a str>,
    /// Slice of the body shown on this line.
    text: &'a str,
    /// The row continues past this line but has no room for it.
    clipped: bool,
}

/// Split a message into screen lines no wider than `width` columns.
///
/// The first line carries the author label and `": "`, which take columns
/// away from the body. Wrapping happens on grapheme boundaries.
fn wrap_message(message: &RenderMessage, width: usize) -> Vec<WrappedLine<'_>> {
    let author = truncate_to_width(message.author(), width.saturating_sub(2));
    let first_width = width.saturating_sub(author.width() + 2);

    let mut lines = Vec::new();
    let text = message.text();
    let mut line_start = 0;
    let mut line_width = 0;
    let mut limit = first_width;

    for (offset, grapheme) in text.grapheme_indices(true) {
        let g_width = grapheme.width();
        if line_width + g_width > limit && offset > line_start {
            lines.push(&text[line_start..offset]);
            line_start = offset;
            line_width = 0;
            limit = width;
        }
        line_width += g_width;
    }
    lines.push(&text[line_start..]);

    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| WrappedLine {
            author: (i == 0).then_some(author),
            text,
            clipped: false,
        })
        .collect()
}

/// Cut `lines` to at most `max_lines`, marking the last kept line when
/// anything was dropped. The marker takes one column from that line.
fn fit_lines(mut lines: Vec<WrappedLine<'_>>, max_lines: usize, width: usize) -> Vec<WrappedLine<'_>> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let available = last
            .author
            .map_or(width, |author| width.saturating_sub(author.width() + 2));
        last.text = truncate_to_width(last.text, available.saturating_sub(ELLIPSIS.width()));
        last.clipped = true;
    }
    lines
}

/// Longest prefix of `text` that fits in `width` columns.
fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        used += grapheme.width();
        if used > width {
            return &text[..offset];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::layout::SizerConfig;
    use crate::message::ChatMessage;
    use crate::session::{ChatEvent, NullNotifier, Target};

    fn texts<'a>(lines: &[WrappedLine<'a>]) -> Vec<&'a str> {
        lines.iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_wrap_short_message() {
        let message = RenderMessage::new("amy", "hello");
        let lines = wrap_message(&message, 20);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].author, Some("amy"));
        assert_eq!(lines[0].text, "hello");
    }

    #[test]
    fn test_wrap_accounts_for_label() {
        // "bo: " takes 4 columns of the first line.
        let message = RenderMessage::new("bo", "abcdefghij");
        let lines = wrap_message(&message, 8);
        assert_eq!(texts(&lines), vec!["abcd", "efghij"]);
        assert_eq!(lines[1].author, None);
    }

    #[test]
    fn test_wrap_wide_graphemes() {
        let message = RenderMessage::new("x", "日本語です");
        // 3 columns left on the first line fits one wide glyph.
        let lines = wrap_message(&message, 6);
        assert_eq!(texts(&lines), vec!["日", "本語で", "す"]);
    }

    #[test]
    fn test_fit_lines_marks_cut_row() {
        // "bob: " leaves 35 columns; 36 characters need a second line.
        let text = format!("{}TAIL", "x".repeat(32));
        let message = RenderMessage::new("bob", text);
        let lines = fit_lines(wrap_message(&message, 40), 1, 40);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].clipped);
        assert_eq!(lines[0].text, "x".repeat(32) + "TA");

        let untouched = fit_lines(wrap_message(&message, 40), 2, 40);
        assert_eq!(texts(&untouched), vec!["x".repeat(32) + "TAI", "L".to_string()]);
        assert!(untouched.iter().all(|l| !l.clipped));
    }

    #[test]
    fn test_paint_view_marks_rows_taller_than_measured() {
        let config = ViewConfig {
            sizer: SizerConfig {
                base_height: 1,
                unit_height: 1,
                chars_per_unit: 40,
            },
            ..ViewConfig::default()
        };
        let mut view = ChatView::new(NullNotifier, &config).unwrap();
        view.submit(Target::parse("video").unwrap());
        view.apply(ChatEvent::Messages(vec![
            ChatMessage::new("bob", format!("{}TAIL", "x".repeat(32))),
            ChatMessage::new("amy", format!("{}END", "語".repeat(21))),
        ]));
        assert_eq!(view.height_of(0).unwrap(), 1);
        assert_eq!(view.height_of(1).unwrap(), 1);

        let mut out = OutputBuffer::new();
        let viewport = Viewport { top: 0, width: 40, height: 5 };
        out.paint_view(&view, viewport, 0).unwrap();

        let painted = String::from_utf8_lossy(out.as_bytes());
        assert_eq!(painted.matches(ELLIPSIS).count(), 2);
        assert!(!painted.contains("END"));
    }

    #[test]
    fn test_paint_view_near_bottom_of_screen_does_not_overflow() {
        let mut view = ChatView::new(NullNotifier, &ViewConfig::default()).unwrap();
        view.submit(Target::parse("video").unwrap());
        view.apply(ChatEvent::Messages(vec![ChatMessage::new("a", "hi")]));

        let mut out = OutputBuffer::new();
        let viewport = Viewport { top: u16::MAX - 1, width: 20, height: 10 };
        assert!(out.paint_view(&view, viewport, 0).is_ok());
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("ab", 10), "ab");
    }

    #[test]
    fn test_paint_view_writes_visible_rows() {
        let config = ViewConfig {
            sizer: SizerConfig {
                base_height: 1,
                unit_height: 1,
                chars_per_unit: 40,
            },
            ..ViewConfig::default()
        };
        let mut view = ChatView::new(NullNotifier, &config).unwrap();
        view.submit(Target::parse("video").unwrap());
        view.apply(ChatEvent::Messages(vec![
            ChatMessage::new("alice", "first"),
            ChatMessage::new("bob", "second"),
            ChatMessage::new("carol", "third"),
        ]));

        let mut out = OutputBuffer::new();
        let viewport = Viewport { top: 0, width: 40, height: 2 };
        out.paint_view(&view, viewport, 1).unwrap();

        let painted = String::from_utf8_lossy(out.as_bytes());
        assert!(!painted.contains("alice"));
        assert!(painted.contains("bob"));
        assert!(painted.contains("second"));
        assert!(painted.contains("carol"));

        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink.len(), out.len());

        out.clear();
        assert!(out.is_empty());
    }
}
