//! Sharded in-memory rate-limit store
//!
//! Backed by [`DashMap`]: each client's read-modify-write runs under its
//! shard's lock only, so clients on other shards are never blocked.
//! Expiry sweeps walk the map shard by shard instead of locking it whole.

use std::time::Instant;

use application::ports::RateLimitStore;
use dashmap::{DashMap, mapref::entry::Entry};
use domain::{ClientId, RateLimitEntry};

/// Process-local [`RateLimitStore`]
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    entries: DashMap<ClientId, RateLimitEntry>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn upsert(
        &self,
        client: &ClientId,
        update: &mut dyn FnMut(Option<RateLimitEntry>) -> RateLimitEntry,
    ) -> RateLimitEntry {
        match self.entries.entry(client.clone()) {
            Entry::Occupied(mut slot) => {
                let next = update(Some(*slot.get()));
                *slot.get_mut() = next;
                next
            },
            Entry::Vacant(slot) => {
                let next = update(None);
                slot.insert(next);
                next
            },
        }
    }

    fn remove_expired(&self, now: Instant) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use application::RateLimiter;
    use domain::RatePolicy;

    use super::*;
    use crate::adapters::ManualClock;

    fn entry(count: u32, reset_at: Instant) -> RateLimitEntry {
        RateLimitEntry {
            count,
            window_reset_at: reset_at,
        }
    }

    #[test]
    fn upsert_sees_previous_value() {
        let store = InMemoryRateLimitStore::new();
        let client = ClientId::from("1.2.3.4");
        let reset = Instant::now();

        let first = store.upsert(&client, &mut |current| {
            assert!(current.is_none());
            entry(1, reset)
        });
        assert_eq!(first.count, 1);

        let second = store.upsert(&client, &mut |current| {
            current.map_or(entry(1, reset), RateLimitEntry::hit)
        });
        assert_eq!(second.count, 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_expired_counts_removals() {
        let store = InMemoryRateLimitStore::new();
        let now = Instant::now();
        store.upsert(&ClientId::from("old"), &mut |_| entry(3, now));
        store.upsert(&ClientId::from("live"), &mut |_| {
            entry(1, now + Duration::from_secs(60))
        });

        assert_eq!(store.remove_expired(now), 0);
        assert_eq!(store.remove_expired(now + Duration::from_millis(1)), 1);
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[test]
    fn sweep_returns_map_to_empty() {
        let clock = Arc::new(ManualClock::new());
        let store = Arc::new(InMemoryRateLimitStore::new());
        let limiter = RateLimiter::new(store.clone(), clock.clone());
        let policy = RatePolicy::from_millis(2, 1000).unwrap();

        limiter.check(&ClientId::from("1.2.3.4"), &policy);
        assert_eq!(store.len(), 1);

        clock.advance(Duration::from_millis(1001));
        assert_eq!(limiter.sweep(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_checks_on_one_client_are_not_lost() {
        let clock = Arc::new(ManualClock::new());
        let limiter = RateLimiter::new(Arc::new(InMemoryRateLimitStore::new()), clock);
        let policy = RatePolicy::from_millis(100, 60_000).unwrap();
        let client = ClientId::from("shared");

        let admitted: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..25)
                            .filter(|_| limiter.check(&client, &policy).allowed)
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(admitted, 100);
    }
}
