//! REST calls against the fact-check backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and tests: every call returns
//! [`ApiError::Unavailable`], since data is only fetched in the browser.
//!
//! ERROR HANDLING
//! ==============
//! All calls return `Result<_, ApiError>`. Non-2xx answers become
//! `ApiError::Status` with the first line of the body, so the query cache can
//! show it verbatim and retry without panicking during hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use wire::endpoints::{collection, factcheck, news, sources, statistics};
use wire::{
    ApiError, CollectionStatus, CollectionTrigger, DatasetCollection, DatasetInfo, DatasetSearch, Endpoint,
    FactCheckFilter, FactCheckResult, FactCheckTrigger, Health, Listing, NewSource, NewSourceGroup, Post, PostFilter,
    Source, SourceGroup, StatsProvider,
};

/// API base used when the bundle was built without `FACTDESK_API_URL`.
pub const DEFAULT_API_BASE: &str = "/api";

/// Base URL every endpoint path is appended to.
pub fn api_base() -> &'static str {
    resolve_base(option_env!("FACTDESK_API_URL"))
}

fn resolve_base(configured: Option<&'static str>) -> &'static str {
    configured.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_API_BASE)
}

/// Owner id used for source groups when the bundle was built without
/// `FACTDESK_USER_ID`.
pub const DEFAULT_OPERATOR: &str = "default";

/// Owner id sent with source-group calls. The dashboard has no login, so one
/// operator id is baked into the bundle.
pub fn operator_id() -> &'static str {
    resolve_operator(option_env!("FACTDESK_USER_ID"))
}

fn resolve_operator(configured: Option<&'static str>) -> &'static str {
    configured.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_OPERATOR)
}

// =============================================================================
// TRANSPORT
// =============================================================================

async fn send<T: DeserializeOwned>(endpoint: Endpoint) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::Request;
        use wire::Method;

        let url = endpoint.url(api_base());
        let builder = match endpoint.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        let response = match &endpoint.body {
            Some(body) => builder.json(body).map_err(transport)?.send().await,
            None => builder.send().await,
        }
        .map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        if !(200..300).contains(&status) {
            log::warn!("{} {} -> {status}", endpoint.method.as_str(), endpoint.path);
        }
        decode_response(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = endpoint;
        Err(ApiError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Map a raw HTTP answer to a typed result. An empty 2xx body decodes as
/// JSON `null`, which lets `()` and `Option` targets accept 204 responses.
#[cfg(any(test, feature = "hydrate"))]
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_status(status, body));
    }
    let body = if body.trim().is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}

/// List endpoints answer with either a bare array or a page envelope.
async fn list<T: DeserializeOwned>(endpoint: Endpoint) -> Result<Vec<T>, ApiError> {
    send::<Listing<T>>(endpoint).await.map(Listing::into_items)
}

async fn discard(endpoint: Endpoint) -> Result<(), ApiError> {
    send::<IgnoredAny>(endpoint).await.map(|_| ())
}

/// Treat a 404 as "nothing there yet" instead of an error.
fn not_found_as_none<T>(result: Result<T, ApiError>) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

// =============================================================================
// SOURCES
// =============================================================================

/// Fetch every configured source.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn list_sources() -> Result<Vec<Source>, ApiError> {
    list(sources::list()).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn get_source(id: &str) -> Result<Source, ApiError> {
    send(sources::get(id)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the body cannot be encoded, the request fails,
/// or the backend rejects the source.
pub async fn create_source(source: &NewSource) -> Result<Source, ApiError> {
    send(sources::create(source)?).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the body cannot be encoded, the request fails,
/// or the backend rejects the update.
pub async fn update_source(id: &str, source: &NewSource) -> Result<Source, ApiError> {
    send(sources::update(id, source)?).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn delete_source(id: &str) -> Result<(), ApiError> {
    discard(sources::delete(id)).await
}

/// Groups owned by the dashboard operator.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn list_source_groups() -> Result<Vec<SourceGroup>, ApiError> {
    list(sources::groups(operator_id())).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn get_source_group(id: &str) -> Result<SourceGroup, ApiError> {
    send(sources::group(id)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the body cannot be encoded, the request fails,
/// or the backend rejects the group.
pub async fn create_source_group(group: &NewSourceGroup) -> Result<SourceGroup, ApiError> {
    send(sources::create_group(operator_id(), group)?).await
}

// =============================================================================
// COLLECTION
// =============================================================================

/// Ask the backend to collect from `source_id` now.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn trigger_collection(source_id: &str) -> Result<CollectionTrigger, ApiError> {
    send(collection::trigger(source_id, None)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn collection_status(source_id: &str) -> Result<CollectionStatus, ApiError> {
    send(collection::status(source_id)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn list_posts(filter: &PostFilter) -> Result<Vec<Post>, ApiError> {
    list(collection::posts(filter)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn get_post(id: &str) -> Result<Post, ApiError> {
    send(collection::post(id)).await
}

// =============================================================================
// FACT-CHECKS
// =============================================================================

/// Start a fact-check run for a post.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn run_factcheck(post_id: &str) -> Result<FactCheckTrigger, ApiError> {
    send(factcheck::run(post_id, None)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the post has no result
/// (404), or the body does not decode.
pub async fn get_factcheck(post_id: &str) -> Result<FactCheckResult, ApiError> {
    send(factcheck::result(post_id)).await
}

/// Like [`get_factcheck`], but a post that was never checked yields `None`.
///
/// # Errors
///
/// Returns an [`ApiError`] for any failure other than 404.
pub async fn find_factcheck(post_id: &str) -> Result<Option<FactCheckResult>, ApiError> {
    not_found_as_none(get_factcheck(post_id).await)
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn list_factchecks(filter: &FactCheckFilter) -> Result<Vec<FactCheckResult>, ApiError> {
    list(factcheck::list(filter)).await
}

// =============================================================================
// STATISTICS
// =============================================================================

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn search_datasets(provider: StatsProvider, query: &str) -> Result<DatasetSearch, ApiError> {
    send(statistics::search(provider, query)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn get_dataset(provider: StatsProvider, code: &str) -> Result<DatasetInfo, ApiError> {
    send(statistics::dataset(provider, code)).await
}

/// Collect a dataset with the provider's default filters.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn collect_dataset(provider: StatsProvider, code: &str) -> Result<DatasetCollection, ApiError> {
    let endpoint = match provider {
        StatsProvider::Eurostat => statistics::collect_eurostat(code, None),
        StatsProvider::Ksh => statistics::collect_ksh(code, None),
    };
    send(endpoint).await
}

// =============================================================================
// NEWS
// =============================================================================

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn mti_feeds() -> Result<Value, ApiError> {
    send(news::mti_feeds()).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn collect_mti(feed_type: &str, max_items: Option<u32>) -> Result<Value, ApiError> {
    send(news::mti_collect(feed_type, max_items)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn search_mti(query: &str) -> Result<Value, ApiError> {
    send(news::mti_search(query)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn collect_rss(feed_url: &str, max_items: Option<u32>) -> Result<Value, ApiError> {
    send(news::rss_collect(feed_url, max_items)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn validate_rss(feed_url: &str) -> Result<Value, ApiError> {
    send(news::rss_validate(feed_url)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn search_rss(query: &str) -> Result<Value, ApiError> {
    send(news::rss_search(query)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn collect_kozlony(max_items: Option<u32>, year: Option<i32>) -> Result<Value, ApiError> {
    send(news::kozlony_collect(max_items, year)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn search_kozlony(query: &str, year: Option<i32>) -> Result<Value, ApiError> {
    send(news::kozlony_search(query, year)).await
}

// =============================================================================
// HEALTH
// =============================================================================

/// # Errors
///
/// Returns an [`ApiError`] if the backend is unreachable or unhealthy enough
/// to answer with an error status.
pub async fn health() -> Result<Health, ApiError> {
    send(wire::endpoints::health()).await
}
