//! Wall-clock adapter

use std::time::Instant;

use application::ports::Clock;

/// [`Clock`] backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
