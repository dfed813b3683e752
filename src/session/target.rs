//! Subscription targets taken from the page route.

use crate::error::{Error, Result};
use std::fmt;

/// Identifier of the stream to subscribe to (a URL or path).
///
/// The value is forwarded to the chat source exactly as received.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    /// Accept a target string, rejecting one that is empty or blank.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(Error::EmptyTarget);
        }
        Ok(Self(raw))
    }

    /// Rebuild a target from catch-all route segments.
    ///
    /// A route like `/https:/www.youtube.com/watch?v=x` arrives split on `/`;
    /// joining with `/` restores the submitted value.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self> {
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/");
        Self::parse(joined)
    }

    /// The target as forwarded to the chat source.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Route path that leads back to this target.
    pub fn route_path(&self) -> String {
        format!("/{}", self.0)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.0)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
