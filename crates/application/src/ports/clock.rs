//! Clock port

use std::{fmt, time::Instant};

/// Source of monotonic time for window bookkeeping
///
/// Injected so window expiry can be driven deterministically in tests.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current instant
    fn now(&self) -> Instant;
}
