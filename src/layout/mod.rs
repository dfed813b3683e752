//! Layout module: Row sizing for virtualized chat lists.
//!
//! Heights are a pure function of a message's character count. The
//! [`RowLayout`] cache turns those heights into scroll offsets and visible
//! windows without rescanning the whole list on every frame.

mod rows;
mod sizer;

pub use rows::RowLayout;
pub use sizer::{RowSizer, SizerConfig};
