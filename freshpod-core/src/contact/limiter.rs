//! Advisory client-side limit between successful submissions

use chrono::{DateTime, Duration, Utc};

use crate::cache::FileCache;
use crate::error::ContactError;

/// Cache key for the last successful submission time
const LAST_SUCCESS_KEY: &str = "contact:last_success";

/// Rejects a submission within `window` of the last successful one
///
/// Only successes arm the limiter; a failed or rejected submission can be
/// retried immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRateLimiter {
    window: Duration,
    last_success: Option<DateTime<Utc>>,
}

impl SubmitRateLimiter {
    pub fn new(window: std::time::Duration) -> Self {
        Self {
            window: Duration::from_std(window).unwrap_or(Duration::MAX),
            last_success: None,
        }
    }

    pub fn window_seconds(&self) -> u64 {
        u64::try_from(self.window.num_seconds()).unwrap_or(0)
    }

    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.last_success
    }

    /// Check whether a submission at `now` may go out
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), ContactError> {
        let Some(last) = self.last_success else {
            return Ok(());
        };

        let elapsed = now.signed_duration_since(last);
        if elapsed >= self.window {
            return Ok(());
        }

        let remaining = self.window - elapsed;
        let mut retry_in = remaining.num_seconds();
        if remaining > Duration::seconds(retry_in) {
            retry_in += 1;
        }

        tracing::debug!(retry_in, "contact submission throttled");

        Err(ContactError::RateLimited {
            limit_seconds: self.window_seconds(),
            retry_in: u64::try_from(retry_in).unwrap_or(0),
        })
    }

    /// Arm the limiter after a successful submission
    pub fn record_success(&mut self, at: DateTime<Utc>) {
        self.last_success = Some(at);
    }

    /// Restore the last success time from a cache
    ///
    /// Unreadable entries are ignored.
    pub fn restore(window: std::time::Duration, cache: &FileCache) -> Self {
        let mut limiter = Self::new(window);

        match cache.load::<DateTime<Utc>>(LAST_SUCCESS_KEY) {
            Ok(Some(entry)) => limiter.last_success = Some(entry.body),
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring unreadable contact limiter state: {:#}", e),
        }

        limiter
    }

    /// Persist the last success time, if any
    pub fn persist(&self, cache: &FileCache) -> anyhow::Result<()> {
        match self.last_success {
            Some(at) => cache.store(LAST_SUCCESS_KEY, &at),
            None => Ok(()),
        }
    }

    /// Drop any persisted success time
    pub fn forget(cache: &FileCache) -> anyhow::Result<()> {
        cache.remove(LAST_SUCCESS_KEY)
    }
}
