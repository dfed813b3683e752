//! Terminal module: ANSI painting of a chat view.
//!
//! Used by the replay demo to show the virtualized list in a terminal.

mod output;

pub use output::{OutputBuffer, RowStyle, Viewport};
