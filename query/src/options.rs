//! Client-wide defaults and per-query overrides.

use std::time::Duration;

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;

pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_RETRY: u32 = 1;
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_RETRY_MAX_DELAY: Duration = Duration::from_secs(30);

/// Defaults applied to every query of a [`crate::QueryClient`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryConfig {
    /// How long fetched data counts as fresh.
    pub stale_time: Duration,
    /// Extra attempts after the first failure.
    pub retry: u32,
    /// How long unobserved, idle entries survive garbage collection.
    pub gc_time: Duration,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            retry: DEFAULT_RETRY,
            gc_time: DEFAULT_GC_TIME,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            retry_max_delay: DEFAULT_RETRY_MAX_DELAY,
        }
    }
}

impl QueryConfig {
    /// Back-off before retry number `attempt` (0-based): doubles from the
    /// base delay, capped at the max delay.
    #[must_use]
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1_u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.retry_base_delay.saturating_mul(factor).min(self.retry_max_delay)
    }
}

/// Per-query settings; unset fields fall back to [`QueryConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    pub enabled: bool,
    pub stale_time: Option<Duration>,
    pub retry: Option<u32>,
    /// Poll interval while the query is observed (browser only).
    pub refetch_interval: Option<Duration>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { enabled: true, stale_time: None, retry: None, refetch_interval: None }
    }
}

impl QueryOptions {
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = Some(stale_time);
        self
    }

    #[must_use]
    pub fn retry(mut self, retry: u32) -> Self {
        self.retry = Some(retry);
        self
    }

    #[must_use]
    pub fn refetch_interval(mut self, interval: Duration) -> Self {
        self.refetch_interval = Some(interval);
        self
    }
}
