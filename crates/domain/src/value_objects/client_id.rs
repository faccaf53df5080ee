//! Client identifier value object
//!
//! An opaque key naming the caller for rate-limit bookkeeping. No address
//! format is enforced: whatever the proxy headers carry is used verbatim
//! (after trimming), so the value must never be treated as a verified IP.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for the caller of an admin request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    /// Sentinel used when no proxy header identifies the caller.
    ///
    /// Every such caller shares one rate-limit bucket.
    pub const UNKNOWN: &'static str = "unknown";

    /// Create a client ID from a raw header value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The shared identifier for callers without proxy headers
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// Whether this is the shared `unknown` bucket
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
