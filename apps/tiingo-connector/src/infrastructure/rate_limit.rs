//! Per-run request-rate limiter.
//!
//! Spaces provider requests to a minimum interval derived from a
//! requests-per-minute budget. Each run owns its own limiter; nothing is
//! shared between concurrently scheduled runs.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::application::error::RunError;

/// Seconds assumed per provider rate window. One second wider than a real
/// minute so a full budget never lands exactly on the quota boundary.
const WINDOW_SECONDS: f64 = 61.0;

/// Minimum-interval request limiter.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_ready: Instant,
}

impl RateLimiter {
    /// Create a limiter for the given requests-per-minute budget.
    #[must_use]
    pub fn per_minute(requests_per_minute: u32) -> Self {
        let interval = Duration::from_secs_f64(WINDOW_SECONDS / f64::from(requests_per_minute.max(1)));
        Self {
            interval,
            next_ready: Instant::now(),
        }
    }

    /// Wait until the next request slot is available.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Cancelled`] if the cancellation signal fires
    /// while waiting.
    pub async fn acquire(&mut self, cancel: &CancellationToken) -> Result<(), RunError> {
        let now = Instant::now();

        if self.next_ready > now {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(RunError::Cancelled),
                () = sleep_until(self.next_ready) => {}
            }
        }

        self.next_ready = self.next_ready.max(now) + self.interval;
        Ok(())
    }
}
