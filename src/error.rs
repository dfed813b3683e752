//! Error types for the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by this crate's own operations.
///
/// Failures reported by the chat source are not errors of this crate; they
/// arrive as [`ConnectionError`](crate::session::ConnectionError) values.
#[derive(Debug, Error)]
pub enum Error {
    /// A row index outside `[0, len)` was requested.
    ///
    /// This indicates a bug in the list integration, not a runtime condition.
    #[error("row index {index} out of range for {len} rows")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of rows available.
        len: usize,
    },

    /// A subscription target with no content was submitted.
    #[error("subscription target is empty")]
    EmptyTarget,

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Writing terminal output failed.
    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::IndexOutOfRange`] for the given index and length.
    pub const fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
