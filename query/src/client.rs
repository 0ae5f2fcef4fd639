//! Shared query cache with in-flight deduplication and prefix invalidation.
//!
//! DESIGN
//! ======
//! One `Mutex<Inner>` guards all entries. The lock is never held across an
//! await: `fetch` decides under the lock whether to serve cached data, join
//! an in-flight fetch (by parking a oneshot sender on the entry), or become
//! the fetching caller, then releases it before running the fetcher.
//!
//! Values are stored type-erased (`Arc<dyn Any + Send + Sync>`) so one cache
//! holds every page's data; reads downcast and clone.
//!
//! Invalidation bumps an entry's epoch. A fetch that started under an older
//! epoch still stores its data but leaves the entry stale, so the next read
//! refetches instead of trusting a response that may predate the mutation.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use futures::channel::oneshot;

use crate::clock::{Clock, ImmediateTimer, SystemClock, Timer};
use crate::error::QueryError;
use crate::key::QueryKey;
use crate::options::{QueryConfig, QueryOptions};

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

type Data = Arc<dyn Any + Send + Sync>;
type Outcome = Result<Data, QueryError>;
type Callback = Arc<dyn Fn() + Send + Sync>;

// =============================================================================
// PUBLIC STATE
// =============================================================================

/// Lifecycle of a query as seen by a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never fetched.
    Idle,
    /// First fetch in flight, no data yet.
    Loading,
    /// Data present and the last fetch succeeded.
    Success,
    /// The last fetch failed (data from earlier fetches may remain).
    Error,
}

/// Snapshot of one cache entry.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub data: Option<T>,
    pub error: Option<QueryError>,
    pub is_fetching: bool,
    pub is_stale: bool,
    pub updated_at: Option<u64>,
    pub failure_count: u32,
}

impl<T> QueryState<T> {
    fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
            is_stale: true,
            updated_at: None,
            failure_count: 0,
        }
    }

    /// No data yet and a fetch is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }
}

// =============================================================================
// INTERNALS
// =============================================================================

#[derive(Default)]
struct Entry {
    data: Option<Data>,
    error: Option<QueryError>,
    updated_at: Option<u64>,
    last_access: u64,
    invalidated: bool,
    epoch: u64,
    fetching: bool,
    failure_count: u32,
    waiters: Vec<oneshot::Sender<Outcome>>,
}

impl Entry {
    fn is_stale(&self, now: u64, stale_time: Duration) -> bool {
        if self.invalidated {
            return true;
        }
        match self.updated_at {
            Some(at) => now.saturating_sub(at) >= duration_ms(stale_time),
            None => true,
        }
    }

    fn status(&self) -> QueryStatus {
        if self.error.is_some() {
            QueryStatus::Error
        } else if self.data.is_some() {
            QueryStatus::Success
        } else if self.fetching {
            QueryStatus::Loading
        } else {
            QueryStatus::Idle
        }
    }
}

struct Subscriber {
    id: u64,
    key: QueryKey,
    callback: Callback,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    subscribers: Vec<Subscriber>,
    next_subscriber_id: u64,
}

impl Inner {
    fn callbacks_matching(&self, prefix: &QueryKey) -> Vec<Callback> {
        self.subscribers
            .iter()
            .filter(|s| s.key.starts_with(prefix))
            .map(|s| Arc::clone(&s.callback))
            .collect()
    }

    fn is_observed(&self, key: &QueryKey) -> bool {
        self.subscribers.iter().any(|s| &s.key == key)
    }
}

enum Plan {
    Cached(Data),
    Wait(oneshot::Receiver<Outcome>),
    Fetch(u64),
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn notify(callbacks: Vec<Callback>) {
    for callback in callbacks {
        callback();
    }
}

// =============================================================================
// QUERY CLIENT
// =============================================================================

/// Shared cache handle. Cloning is cheap; all clones see the same entries.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Mutex<Inner>>,
    config: QueryConfig,
    clock: Arc<dyn Clock>,
    timer: Arc<dyn Timer>,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(QueryConfig::default())
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = lock(&self.inner).entries.len();
        f.debug_struct("QueryClient")
            .field("config", &self.config)
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}

impl QueryClient {
    #[must_use]
    pub fn new(config: QueryConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            config,
            clock: Arc::new(SystemClock),
            timer: Arc::new(ImmediateTimer),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_timer(mut self, timer: Arc<dyn Timer>) -> Self {
        self.timer = timer;
        self
    }

    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Resolve `key`: fresh cached data, else join an in-flight fetch, else
    /// run `fetcher` (retrying per options).
    ///
    /// # Errors
    ///
    /// [`QueryError::Disabled`] when the options disable the query,
    /// [`QueryError::Failed`] after the last failed attempt,
    /// [`QueryError::Cancelled`] if the fetch being joined was dropped, and
    /// [`QueryError::TypeMismatch`] if the key holds another type.
    pub async fn fetch<T, E, F, Fut>(&self, key: &QueryKey, options: &QueryOptions, fetcher: F) -> Result<T, QueryError>
    where
        T: Clone + Send + Sync + 'static,
        E: Display,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !options.enabled {
            return Err(QueryError::Disabled);
        }
        let stale_time = options.stale_time.unwrap_or(self.config.stale_time);
        let now = self.clock.now_ms();

        let plan = {
            let mut inner = lock(&self.inner);
            let entry = inner.entries.entry(key.clone()).or_default();
            entry.last_access = now;
            match &entry.data {
                Some(data) if !entry.is_stale(now, stale_time) => Plan::Cached(Arc::clone(data)),
                _ if entry.fetching => {
                    let (tx, rx) = oneshot::channel();
                    entry.waiters.push(tx);
                    Plan::Wait(rx)
                }
                _ => {
                    entry.fetching = true;
                    Plan::Fetch(entry.epoch)
                }
            }
        };

        let data = match plan {
            Plan::Cached(data) => data,
            Plan::Wait(rx) => {
                log::debug!("query {key}: joining in-flight fetch");
                rx.await.unwrap_or(Err(QueryError::Cancelled))?
            }
            Plan::Fetch(epoch) => self.run_fetch(key, options, epoch, fetcher).await?,
        };
        downcast(key, &data)
    }

    async fn run_fetch<T, E, F, Fut>(&self, key: &QueryKey, options: &QueryOptions, epoch: u64, fetcher: F) -> Outcome
    where
        T: Send + Sync + 'static,
        E: Display,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut guard = FetchGuard { client: self, key, finished: false };
        let retries = options.retry.unwrap_or(self.config.retry);
        let mut attempt = 0_u32;

        let outcome = loop {
            match fetcher().await {
                Ok(value) => break Ok(Arc::new(value) as Data),
                Err(err) => {
                    let message = err.to_string();
                    self.record_failure(key);
                    if attempt >= retries {
                        log::warn!("query {key}: failed after {} attempt(s): {message}", attempt + 1);
                        break Err(QueryError::Failed { message, attempts: attempt + 1 });
                    }
                    let delay = self.config.retry_delay(attempt);
                    log::debug!("query {key}: attempt {} failed, retrying in {delay:?}", attempt + 1);
                    attempt += 1;
                    self.timer.sleep(delay).await;
                }
            }
        };

        guard.finish(&outcome, epoch);
        outcome
    }

    fn record_failure(&self, key: &QueryKey) {
        if let Some(entry) = lock(&self.inner).entries.get_mut(key) {
            entry.failure_count += 1;
        }
    }

    /// Cached data for `key`, fresh or not.
    #[must_use]
    pub fn get_query_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let inner = lock(&self.inner);
        let data = inner.entries.get(key)?.data.as_ref()?;
        data.downcast_ref::<T>().cloned()
    }

    /// Seed or overwrite the cached value for `key`, marking it fresh.
    pub fn set_query_data<T: Send + Sync + 'static>(&self, key: &QueryKey, value: T) {
        let now = self.clock.now_ms();
        let callbacks = {
            let mut inner = lock(&self.inner);
            let entry = inner.entries.entry(key.clone()).or_default();
            entry.data = Some(Arc::new(value));
            entry.error = None;
            entry.updated_at = Some(now);
            entry.last_access = now;
            entry.invalidated = false;
            inner.callbacks_matching(key)
        };
        notify(callbacks);
    }

    /// Snapshot of the entry under `key`, judged with the default stale time.
    #[must_use]
    pub fn state<T: Clone + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let now = self.clock.now_ms();
        let inner = lock(&self.inner);
        let Some(entry) = inner.entries.get(key) else {
            return QueryState::idle();
        };
        QueryState {
            status: entry.status(),
            data: entry.data.as_ref().and_then(|d| d.downcast_ref::<T>().cloned()),
            error: entry.error.clone(),
            is_fetching: entry.fetching,
            is_stale: entry.is_stale(now, self.config.stale_time),
            updated_at: entry.updated_at,
            failure_count: entry.failure_count,
        }
    }

    /// Mark every entry under `prefix` stale and wake its observers.
    ///
    /// Returns the number of cached entries affected.
    pub fn invalidate_queries(&self, prefix: &QueryKey) -> usize {
        let (count, callbacks) = {
            let mut inner = lock(&self.inner);
            let mut count = 0;
            for (key, entry) in &mut inner.entries {
                if key.starts_with(prefix) {
                    entry.invalidated = true;
                    entry.epoch += 1;
                    count += 1;
                }
            }
            (count, inner.callbacks_matching(prefix))
        };
        log::debug!("query {prefix}: invalidated {count} entr(ies)");
        notify(callbacks);
        count
    }

    /// Drop every entry under `prefix`. Callers waiting on a removed fetch
    /// receive [`QueryError::Cancelled`].
    pub fn remove_queries(&self, prefix: &QueryKey) -> usize {
        let mut inner = lock(&self.inner);
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        before - inner.entries.len()
    }

    /// Run `callback` whenever `key` (or a prefix of it) is invalidated or
    /// its data is replaced. Observed entries are never garbage collected.
    pub fn subscribe(&self, key: QueryKey, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut inner = lock(&self.inner);
        let id = inner.next_subscriber_id;
        inner.next_subscriber_id += 1;
        inner.subscribers.push(Subscriber { id, key, callback: Arc::new(callback) });
        Subscription { inner: Arc::downgrade(&self.inner), id }
    }

    /// Evict unobserved, idle entries not read within `gc_time`.
    pub fn collect_garbage(&self) -> usize {
        let now = self.clock.now_ms();
        let gc_ms = duration_ms(self.config.gc_time);
        let mut inner = lock(&self.inner);
        let expired: Vec<QueryKey> = inner
            .entries
            .iter()
            .filter(|(key, entry)| {
                !entry.fetching && now.saturating_sub(entry.last_access) >= gc_ms && !inner.is_observed(key)
            })
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            inner.entries.remove(key);
        }
        expired.len()
    }

    /// Number of queries currently fetching.
    #[must_use]
    pub fn fetching_count(&self) -> usize {
        lock(&self.inner).entries.values().filter(|e| e.fetching).count()
    }

    /// Await `mutation`; on success invalidate every key prefix in
    /// `invalidates`. Failures leave the cache untouched.
    ///
    /// # Errors
    ///
    /// Returns the mutation's own error.
    pub async fn mutate<T, E, Fut>(&self, invalidates: &[QueryKey], mutation: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let result = mutation.await;
        if result.is_ok() {
            for prefix in invalidates {
                self.invalidate_queries(prefix);
            }
        }
        result
    }
}

fn downcast<T: Clone + 'static>(key: &QueryKey, data: &Data) -> Result<T, QueryError> {
    data.downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| QueryError::TypeMismatch { key: key.to_string() })
}

// =============================================================================
// FETCH GUARD
// =============================================================================

/// Settles an entry when its fetch ends, including when the fetching future
/// is dropped mid-flight (waiters then see [`QueryError::Cancelled`]).
struct FetchGuard<'a> {
    client: &'a QueryClient,
    key: &'a QueryKey,
    finished: bool,
}

impl FetchGuard<'_> {
    fn finish(&mut self, outcome: &Outcome, epoch: u64) {
        self.finished = true;
        let now = self.client.clock.now_ms();
        let waiters = {
            let mut inner = lock(&self.client.inner);
            let Some(entry) = inner.entries.get_mut(self.key) else {
                return;
            };
            entry.fetching = false;
            match outcome {
                Ok(data) => {
                    entry.data = Some(Arc::clone(data));
                    entry.error = None;
                    entry.updated_at = Some(now);
                    entry.failure_count = 0;
                    entry.invalidated = entry.epoch != epoch;
                }
                Err(err) => {
                    entry.error = Some(err.clone());
                }
            }
            std::mem::take(&mut entry.waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        log::debug!("query {}: fetch dropped before completion", self.key);
        let mut inner = lock(&self.client.inner);
        if let Some(entry) = inner.entries.get_mut(self.key) {
            entry.fetching = false;
            entry.waiters.clear();
        }
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle returned by [`QueryClient::subscribe`]; dropping it unsubscribes.
pub struct Subscription {
    inner: Weak<Mutex<Inner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).subscribers.retain(|s| s.id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
