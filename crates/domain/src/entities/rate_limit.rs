//! Fixed-window rate-limit state
//!
//! A window opens on the first request from a client and closes at
//! `window_reset_at`. Every request inside the window bumps the counter;
//! once the counter passes the policy limit the client is refused until the
//! window closes. A new window opens on the first request after that.
//!
//! Windows are fixed, not sliding: a client may land `max_requests` hits just
//! before `window_reset_at` and another `max_requests` just after it.

use std::time::{Duration, Instant};

use crate::value_objects::RatePolicy;

/// Counter state for one client within its current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    /// Requests seen in this window, including refused ones
    pub count: u32,
    /// Instant at which this window closes
    pub window_reset_at: Instant,
}

impl RateLimitEntry {
    /// Open a fresh window for the request arriving at `now`
    pub fn open(now: Instant, policy: &RatePolicy) -> Self {
        Self {
            count: 1,
            window_reset_at: now + policy.window(),
        }
    }

    /// Whether the window has closed at `now`
    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.window_reset_at
    }

    /// Count one more request inside the same window
    #[must_use]
    pub const fn hit(self) -> Self {
        Self {
            count: self.count.saturating_add(1),
            window_reset_at: self.window_reset_at,
        }
    }

    /// Admission decision for the request that produced this state
    pub fn decision(&self, policy: &RatePolicy) -> RateLimitDecision {
        let limit = policy.max_requests();
        let allowed = self.count <= limit;
        RateLimitDecision {
            allowed,
            limit,
            remaining: if allowed { limit - self.count } else { 0 },
            window_reset_at: self.window_reset_at,
        }
    }
}

/// Result of a single admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub window_reset_at: Instant,
}

impl RateLimitDecision {
    /// Time left until the window closes, zero if it already has
    pub fn retry_after(&self, now: Instant) -> Duration {
        self.window_reset_at.saturating_duration_since(now)
    }

    /// Whole seconds until the window closes, rounded up, at least 1
    pub fn retry_after_secs(&self, now: Instant) -> u64 {
        let wait = self.retry_after(now);
        let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
        secs.max(1)
    }
}
