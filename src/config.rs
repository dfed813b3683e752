//! View configuration.
//!
//! Every field has a default, so a configuration file only needs the values
//! it wants to change:
//!
//! ```toml
//! overscan = 5
//!
//! [sizer]
//! base_height = 30
//! unit_height = 11
//!
//! [stream]
//! shrink_policy = "ignore"
//! ```

use crate::buffer::StreamConfig;
use crate::error::Result;
use crate::layout::{RowSizer, SizerConfig};
use serde::Deserialize;

/// Configuration for a [`ChatView`](crate::widget::ChatView).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Row height heuristic.
    pub sizer: SizerConfig,
    /// Stream buffer behavior.
    pub stream: StreamConfig,
    /// Rows rendered beyond each edge of the viewport.
    pub overscan: usize,
    /// Distance from the bottom, in pixels, within which the list keeps
    /// following new messages.
    pub follow_threshold: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            sizer: SizerConfig::default(),
            stream: StreamConfig::default(),
            overscan: 3,
            follow_threshold: 20,
        }
    }
}

impl ViewConfig {
    /// Parse a configuration from TOML and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        RowSizer::new(self.sizer).map(|_| ())
    }
}
