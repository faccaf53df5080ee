//! Fixed-window rate limiter
//!
//! Counts requests per client in fixed windows. The first request of a
//! client (or the first after its window closed) opens a new window with a
//! count of one; later requests inside the window bump the count and are
//! refused once it exceeds the policy limit. Refusals keep the original
//! `window_reset_at` so callers know how long to back off.
//!
//! Expired entries are removed by [`RateLimiter::sweep`], driven by a
//! periodic background task rather than by request traffic.

use std::{sync::Arc, time::Instant};

use domain::{ClientId, RateLimitDecision, RateLimitEntry, RatePolicy};
use tracing::debug;

use crate::ports::{Clock, RateLimitStore};

/// Shared rate limiter handle
///
/// Cheap to clone; all clones share the same store.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Create a limiter over the given store and clock
    pub fn new(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record a request from `client` and decide whether to admit it
    pub fn check(&self, client: &ClientId, policy: &RatePolicy) -> RateLimitDecision {
        let now = self.clock.now();
        let entry = self.store.upsert(client, &mut |current| match current {
            Some(entry) if !entry.is_expired(now) => entry.hit(),
            _ => RateLimitEntry::open(now, policy),
        });
        entry.decision(policy)
    }

    /// Remove every entry whose window has closed; returns how many
    pub fn sweep(&self) -> usize {
        let removed = self.store.remove_expired(self.clock.now());
        debug!(
            removed,
            remaining = self.store.len(),
            "Swept expired rate-limit windows"
        );
        removed
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.store.len()
    }

    /// Current instant according to the limiter's clock
    pub fn now(&self) -> Instant {
        self.clock.now()
    }
}
