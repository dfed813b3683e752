//! Widget module: The list-facing side of a chat session.
//!
//! [`ChatView`] implements [`RowSource`], the contract a virtualized list
//! renderer consumes: a row count, per-row heights and per-row content.
//! [`FollowState`] keeps the list pinned to the newest message while the
//! user is at the bottom.

mod chat_view;
mod follow;
mod traits;

pub use chat_view::ChatView;
pub use follow::FollowState;
pub use traits::RowSource;
