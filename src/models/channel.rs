//! Channel identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An unresolved channel locator from configuration, e.g. a `t.me` URL
/// or an `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelRef(String);

impl ChannelRef {
    pub fn new(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelRef {
    fn from(link: &str) -> Self {
        Self::new(link)
    }
}

/// A channel resolved by the remote client.
///
/// Resolved once at the start of each channel's crawl; the title drives
/// directory naming in the lake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntity {
    /// Numeric channel id assigned by the remote source
    pub id: i64,

    /// Display title of the channel
    pub title: String,
}
