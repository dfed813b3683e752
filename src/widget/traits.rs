//! Row source trait for virtualized list renderers.

use crate::error::Result;
use crate::message::RenderMessage;

/// What a virtualized list needs to lay out and draw its rows.
///
/// The renderer asks for `row_count`, then only measures and draws the rows
/// it decides are visible.
pub trait RowSource {
    /// Number of rows in the list.
    fn row_count(&self) -> usize;

    /// Pixel height of the row at `index`.
    ///
    /// Fails with [`IndexOutOfRange`](crate::Error::IndexOutOfRange) when
    /// `index >= row_count()`.
    fn height_of(&self, index: usize) -> Result<u32>;

    /// Content of the row at `index`.
    fn render_row(&self, index: usize) -> Result<&RenderMessage>;
}
