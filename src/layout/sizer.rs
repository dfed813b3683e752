//! RowSizer: Character-count height heuristic for chat rows.

use crate::buffer::StreamBuffer;
use crate::error::{Error, Result};
use crate::message::RenderMessage;
use serde::Deserialize;

/// Height constants for the row heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SizerConfig {
    /// Height of a row with a short body, in pixels.
    pub base_height: u32,
    /// Extra height per `chars_per_unit` characters, in pixels.
    pub unit_height: u32,
    /// Characters per extra unit of height. Must be non-zero.
    pub chars_per_unit: u32,
}

impl Default for SizerConfig {
    fn default() -> Self {
        Self {
            base_height: 60,
            unit_height: 22,
            chars_per_unit: 40,
        }
    }
}

/// Maps render messages to pixel heights.
///
/// Holds nothing but its configuration, so a single sizer can be shared by
/// any number of render passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSizer {
    config: SizerConfig,
}

impl RowSizer {
    /// Create a sizer, rejecting a zero `chars_per_unit`.
    pub fn new(config: SizerConfig) -> Result<Self> {
        if config.chars_per_unit == 0 {
            return Err(Error::InvalidConfig(
                "chars_per_unit must be greater than zero".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Get the configuration.
    pub const fn config(&self) -> &SizerConfig {
        &self.config
    }

    /// Height of a row for a body of `length` characters.
    ///
    /// `base_height + floor(length / chars_per_unit) * unit_height`, saturating.
    #[inline]
    pub fn height_for_length(&self, length: usize) -> u32 {
        let units = length / self.config.chars_per_unit as usize;
        let units = u32::try_from(units).unwrap_or(u32::MAX);
        self.config
            .base_height
            .saturating_add(units.saturating_mul(self.config.unit_height))
    }

    /// Height of the row for `message`.
    #[inline]
    pub fn height_of(&self, message: &RenderMessage) -> u32 {
        self.height_for_length(message.length())
    }

    /// Height of the row at `index` in `buffer`.
    pub fn height_at(&self, buffer: &StreamBuffer, index: usize) -> Result<u32> {
        buffer
            .get(index)
            .map(|message| self.height_of(message))
            .ok_or_else(|| Error::out_of_range(index, buffer.len()))
    }
}

impl Default for RowSizer {
    fn default() -> Self {
        Self {
            config: SizerConfig::default(),
        }
    }
}
