//! Chat View: The render-facing side of a chat session.
//!
//! A `ChatView` owns a [`Session`] and everything a virtualized list needs
//! on top of it: the row sizer, the cached layout and the follow state.
//!
//! # Usage
//!
//! ```ignore
//! let mut view = ChatView::new(LogNotifier, &ViewConfig::default())?;
//! view.submit(Target::parse(url)?);
//!
//! // on each frame
//! pump.pump(view.session_mut());
//! view.sync();
//! for index in view.visible_range(scroll_top, viewport_height) {
//!     draw(view.render_row(index)?, view.height_of(index)?);
//! }
//! ```

use super::follow::FollowState;
use super::traits::RowSource;
use crate::config::ViewConfig;
use crate::error::{Error, Result};
use crate::layout::{RowLayout, RowSizer};
use crate::message::RenderMessage;
use crate::session::{ChatEvent, Notifier, Session, Target};
use std::ops::Range;

/// A chat session wired up for a virtualized list.
#[derive(Debug)]
pub struct ChatView<N> {
    /// Connection state and rows.
    session: Session<N>,
    /// Height heuristic.
    sizer: RowSizer,
    /// Cached heights and offsets.
    layout: RowLayout,
    /// Auto-scroll tracking.
    follow: FollowState,
    /// Rows rendered past each viewport edge.
    overscan: usize,
}

impl<N: Notifier> ChatView<N> {
    /// Create a view with an idle session.
    pub fn new(notifier: N, config: &ViewConfig) -> Result<Self> {
        Self::with_session(Session::with_config(config.stream, notifier), config)
    }

    /// Wrap an existing session.
    pub fn with_session(session: Session<N>, config: &ViewConfig) -> Result<Self> {
        Ok(Self {
            session,
            sizer: RowSizer::new(config.sizer)?,
            layout: RowLayout::new(),
            follow: FollowState::new(config.follow_threshold),
            overscan: config.overscan,
        })
    }

    /// Subscribe to a new target, discarding the current rows.
    pub fn submit(&mut self, target: Target) {
        self.session.submit(target);
        self.sync();
    }

    /// Apply one chat-source event and refresh the layout.
    pub fn apply(&mut self, event: ChatEvent) {
        self.session.handle(event);
        self.sync();
    }

    /// Bring the cached layout up to date with the session's rows.
    ///
    /// Returns the number of newly measured rows.
    pub fn sync(&mut self) -> usize {
        self.layout.sync(&self.sizer, self.session.buffer())
    }

    /// Record a scroll event from the list. Returns whether it is following.
    pub const fn on_scroll(&mut self, scroll_top: u64, client_height: u64, scroll_height: u64) -> bool {
        self.follow.on_scroll(scroll_top, client_height, scroll_height)
    }

    /// Row the list should scroll to after new messages, if following.
    pub fn scroll_target(&self) -> Option<usize> {
        self.follow.scroll_target(self.row_count())
    }

    /// Rows to draw for the given viewport, including overscan.
    ///
    /// Uses the cached layout; call [`sync`](Self::sync) after mutating the
    /// session directly.
    pub fn visible_range(&self, scroll_top: u64, viewport_height: u64) -> Range<usize> {
        self.layout.visible_range(scroll_top, viewport_height, self.overscan)
    }

    /// Combined height of all rows.
    pub fn total_height(&self) -> u64 {
        self.layout.total_height()
    }

    /// Top edge of the row at `index`.
    pub fn offset_of(&self, index: usize) -> Result<u64> {
        self.layout.offset_of(index)
    }

    /// The underlying session.
    pub const fn session(&self) -> &Session<N> {
        &self.session
    }

    /// Mutable access to the session, for pumping events directly.
    pub const fn session_mut(&mut self) -> &mut Session<N> {
        &mut self.session
    }

    /// The row sizer.
    pub const fn sizer(&self) -> &RowSizer {
        &self.sizer
    }

    /// Follow state.
    pub const fn follow(&self) -> &FollowState {
        &self.follow
    }

    /// Mutable follow state.
    pub const fn follow_mut(&mut self) -> &mut FollowState {
        &mut self.follow
    }
}

impl<N: Notifier> RowSource for ChatView<N> {
    fn row_count(&self) -> usize {
        self.session.buffer().len()
    }

    fn height_of(&self, index: usize) -> Result<u32> {
        self.sizer.height_at(self.session.buffer(), index)
    }

    fn render_row(&self, index: usize) -> Result<&RenderMessage> {
        self.session
            .buffer()
            .get(index)
            .ok_or_else(|| Error::out_of_range(index, self.row_count()))
    }
}
