//! Query hooks binding the shared cache to Leptos resources.
//!
//! DESIGN
//! ======
//! `use_query*` wraps one cache entry in a `LocalResource`. The resource
//! re-runs when its key changes or when a version signal is bumped; the
//! bump comes from a cache subscription, so `invalidate_queries` anywhere in
//! the app refreshes every mounted view of that key. Whether a re-run hits
//! the network is the cache's decision (fresh data is served as-is).
//!
//! SYSTEM CONTEXT
//! ==============
//! Resources are local: on the server they stay pending and render the
//! `Suspense` fallback, so SSR never talks to the backend. Polling, retry
//! sleeps, and garbage collection only run under `hydrate`.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use query::{MutationState, QueryClient, QueryConfig, QueryError, QueryKey, QueryOptions, Subscription};
use wire::ApiError;

#[cfg(test)]
#[path = "queries_test.rs"]
mod queries_test;

/// Cache keys used by the pages. Invalidation matches on prefixes, so
/// `posts()` also covers `recent_posts()`.
pub mod keys {
    use query::{QueryKey, query_key};
    use wire::StatsProvider;

    pub fn sources() -> QueryKey {
        query_key!("sources")
    }

    /// Kept apart from `sources()` so a collection run does not refetch
    /// the group picker.
    pub fn source_groups() -> QueryKey {
        query_key!("source_groups")
    }

    pub fn posts() -> QueryKey {
        query_key!("posts")
    }

    pub fn recent_posts() -> QueryKey {
        query_key!("posts", "recent")
    }

    pub fn post(id: &str) -> QueryKey {
        query_key!("post", id)
    }

    pub fn factcheck(post_id: &str) -> QueryKey {
        query_key!("factcheck", post_id)
    }

    pub fn factchecks() -> QueryKey {
        query_key!("factchecks")
    }

    pub fn recent_factchecks() -> QueryKey {
        query_key!("factchecks", "recent")
    }

    pub fn dataset_search(provider: StatsProvider, query: &str) -> QueryKey {
        query_key!(provider.slug(), query)
    }

    pub fn health() -> QueryKey {
        query_key!("health")
    }
}

// =============================================================================
// CLIENT CONTEXT
// =============================================================================

/// Create the app-wide cache and provide it as context.
pub fn provide_query_client() -> QueryClient {
    let client = QueryClient::new(QueryConfig::default());
    #[cfg(feature = "hydrate")]
    let client = client
        .with_clock(std::sync::Arc::new(browser::BrowserClock))
        .with_timer(std::sync::Arc::new(browser::GlooTimer));
    provide_context(client.clone());
    #[cfg(feature = "hydrate")]
    browser::spawn_garbage_collector(client.clone());
    client
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::time::Duration;

    use futures::future::{FutureExt, LocalBoxFuture};
    use query::{Clock, QueryClient, Timer};

    /// `Date.now()`; `SystemTime` does not exist on wasm32.
    pub struct BrowserClock;

    impl Clock for BrowserClock {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        fn now_ms(&self) -> u64 {
            js_sys::Date::now().max(0.0) as u64
        }
    }

    pub struct GlooTimer;

    impl Timer for GlooTimer {
        fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
            gloo_timers::future::sleep(delay).boxed_local()
        }
    }

    pub fn spawn_garbage_collector(client: QueryClient) {
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(client.config().gc_time).await;
                let evicted = client.collect_garbage();
                if evicted > 0 {
                    log::debug!("query cache: evicted {evicted} idle entr(ies)");
                }
            }
        });
    }
}

// =============================================================================
// QUERIES
// =============================================================================

/// Rendering state derived from a query resource.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryView<T> {
    /// No result yet.
    Loading,
    /// The query is disabled (e.g. search input too short).
    Idle,
    Ready(T),
    Failed(String),
}

/// Classify a resource read for rendering.
pub fn query_view<T>(result: Option<Result<T, QueryError>>) -> QueryView<T> {
    match result {
        None => QueryView::Loading,
        Some(Ok(value)) => QueryView::Ready(value),
        Some(Err(QueryError::Disabled)) => QueryView::Idle,
        Some(Err(err)) => QueryView::Failed(err.to_string()),
    }
}

/// Query with a fixed key.
pub fn use_query<T, F, Fut>(key: QueryKey, options: QueryOptions, fetcher: F) -> LocalResource<Result<T, QueryError>>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    use_query_with(move || (key.clone(), options, ()), move |()| fetcher())
}

/// Query whose key, options, and fetcher arguments come from reactive
/// state. `input` is tracked; a change re-keys the resource.
pub fn use_query_with<A, T, I, F, Fut>(input: I, fetcher: F) -> LocalResource<Result<T, QueryError>>
where
    A: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    I: Fn() -> (QueryKey, QueryOptions, A) + Send + Sync + 'static,
    F: Fn(A) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = expect_context::<QueryClient>();
    let input = Memo::new(move |_| input());
    let version = RwSignal::new(0_u64);

    // Dropped (and thereby unsubscribed) with the owner or on re-key.
    let subscription = StoredValue::new(None::<Subscription>);
    Effect::new({
        let client = client.clone();
        move |_| {
            let key = input.with(|(key, _, _)| key.clone());
            let sub = client.subscribe(key, move || {
                let _ = version.try_update(|v| *v += 1);
            });
            subscription.set_value(Some(sub));
        }
    });

    #[cfg(feature = "hydrate")]
    {
        if let Some(every) = input.with_untracked(|(_, options, _)| options.refetch_interval) {
            let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
            let alive_task = alive.clone();
            let client = client.clone();
            leptos::task::spawn_local(async move {
                loop {
                    gloo_timers::future::sleep(every).await;
                    if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                        break;
                    }
                    let key = input.with_untracked(|(key, _, _)| key.clone());
                    client.invalidate_queries(&key);
                }
            });
            on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
        }
    }

    let fetcher = Rc::new(fetcher);
    LocalResource::new(move || {
        version.track();
        let (key, options, args) = input.get();
        let client = client.clone();
        let fetcher = Rc::clone(&fetcher);
        async move { client.fetch(&key, &options, || fetcher(args.clone())).await }
    })
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// A user-triggered write. One run at a time; a successful run invalidates
/// the keys it was given.
#[derive(Clone, Copy)]
pub struct Mutation {
    state: RwSignal<MutationState>,
    client: StoredValue<QueryClient>,
}

pub fn use_mutation() -> Mutation {
    Mutation {
        state: RwSignal::new(MutationState::Idle),
        client: StoredValue::new(expect_context::<QueryClient>()),
    }
}

impl Mutation {
    pub fn state(self) -> MutationState {
        self.state.get()
    }

    pub fn is_pending(self) -> bool {
        self.state.with(MutationState::is_pending)
    }

    /// Forget a settled outcome so a reopened form starts clean. A pending
    /// run is left alone.
    pub fn reset(self) {
        if !self.state.with_untracked(MutationState::is_pending) {
            self.state.set(MutationState::Idle);
        }
    }

    /// Start `mutation` unless one is already pending.
    pub fn run<T, Fut>(self, invalidates: Vec<QueryKey>, mutation: Fut)
    where
        T: 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        self.run_and_then(invalidates, mutation, |_: &Result<T, ApiError>| {});
    }

    /// Like [`Mutation::run`], then hand the outcome to `on_settled` while
    /// the owning view is still mounted. Returns `false` when a run was
    /// already pending and nothing started.
    pub fn run_and_then<T, Fut, F>(self, invalidates: Vec<QueryKey>, mutation: Fut, on_settled: F) -> bool
    where
        T: 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
        F: FnOnce(&Result<T, ApiError>) + 'static,
    {
        if self.state.with_untracked(MutationState::is_pending) {
            return false;
        }
        self.state.set(MutationState::Pending);

        #[cfg(feature = "hydrate")]
        {
            let client = self.client.get_value();
            let state = self.state;
            leptos::task::spawn_local(async move {
                let result = client.mutate(&invalidates, mutation).await;
                if let Err(err) = &result {
                    log::warn!("mutation failed: {err}");
                }
                if state.try_set(MutationState::from_result(&result)).is_none() {
                    on_settled(&result);
                }
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (invalidates, mutation, self.client, on_settled);
            self.state.set(MutationState::Idle);
        }
        true
    }
}
