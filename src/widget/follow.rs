//! Follow state: Keeps the list pinned to the newest row.
//!
//! Following switches on when the user scrolls to within `threshold` pixels
//! of the bottom and off as soon as they scroll away.

/// Auto-scroll tracking for a chat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowState {
    following: bool,
    threshold: u64,
}

impl FollowState {
    /// Create a tracker that starts detached.
    pub const fn new(threshold: u64) -> Self {
        Self {
            following: false,
            threshold,
        }
    }

    /// Update from a scroll event. Returns whether the list is following.
    pub const fn on_scroll(&mut self, scroll_top: u64, client_height: u64, scroll_height: u64) -> bool {
        self.following =
            scroll_top.saturating_add(client_height).saturating_add(self.threshold) >= scroll_height;
        self.following
    }

    /// Whether new rows should scroll into view.
    pub const fn is_following(&self) -> bool {
        self.following
    }

    /// Pin to the bottom regardless of scroll position.
    pub const fn follow(&mut self) {
        self.following = true;
    }

    /// Stop following.
    pub const fn detach(&mut self) {
        self.following = false;
    }

    /// Row to scroll to for a list of `row_count` rows, if following.
    pub const fn scroll_target(&self, row_count: usize) -> Option<usize> {
        if self.following && row_count > 0 {
            Some(row_count - 1)
        } else {
            None
        }
    }
}

impl Default for FollowState {
    fn default() -> Self {
        Self::new(20)
    }
}
