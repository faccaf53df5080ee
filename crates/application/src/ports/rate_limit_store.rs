//! Rate-limit storage port

use std::{fmt, time::Instant};

use domain::{ClientId, RateLimitEntry};

/// Shared client -> window counter mapping
///
/// Implementations must make [`RateLimitStore::upsert`] atomic per client
/// while letting different clients proceed without contending on one lock.
/// [`RateLimitStore::remove_expired`] must not hold a store-wide lock for
/// the whole scan.
pub trait RateLimitStore: Send + Sync + fmt::Debug {
    /// Replace the entry for `client` with `update(current)` and return it.
    ///
    /// `update` is called exactly once, while the client's slot is locked.
    fn upsert(
        &self,
        client: &ClientId,
        update: &mut dyn FnMut(Option<RateLimitEntry>) -> RateLimitEntry,
    ) -> RateLimitEntry;

    /// Drop every entry whose window closed before `now`; returns how many
    fn remove_expired(&self, now: Instant) -> usize;

    /// Number of tracked clients
    fn len(&self) -> usize;

    /// Whether no client is tracked
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
