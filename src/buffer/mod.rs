//! Buffer module: The append-only store of render-ready chat rows.
//!
//! - [`StreamBuffer`]: merges full-history batches into a stable row list

mod stream;

pub use stream::{MergeResult, ShrinkPolicy, StreamBuffer, StreamConfig};
