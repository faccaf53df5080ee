//! Rate-limit sweep task
//!
//! Periodically drops rate-limit windows that have closed, so identities that
//! stop sending requests do not stay in memory.

use std::time::Duration;

use application::RateLimiter;
use tracing::{debug, info};

/// Default sweep interval: every 5 minutes
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Spawn a background task that sweeps expired rate-limit entries.
///
/// The task ticks on `interval`, skipping the immediate first tick, and runs
/// until the runtime shuts down or the returned handle is aborted.
///
/// # Example
///
/// ```ignore
/// let sweep_handle = spawn_rate_limit_sweep_task(limiter.clone(), Duration::from_secs(300));
///
/// // On shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_rate_limit_sweep_task(
    limiter: RateLimiter,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        interval_secs = interval.as_secs(),
        "Starting rate-limit sweep task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = limiter.sweep();
            if removed > 0 {
                info!(
                    removed,
                    tracked = limiter.tracked_clients(),
                    "Swept expired rate-limit windows"
                );
            } else {
                debug!("No expired rate-limit windows");
            }
        }
    })
}
