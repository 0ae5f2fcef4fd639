//! Typed catalogue of backend API operations.
//!
//! Every function returns an [`Endpoint`]: method, path relative to the API
//! base URL, query parameters, and an optional JSON body. Transports decide
//! how to send it; this module only decides *what* is sent.
//!
//! Ids used as path segments are percent-encoded. Optional query parameters
//! are omitted entirely rather than sent empty.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::types::{FactCheckFilter, PostFilter, StatsProvider};

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

/// Default item cap for news collectors.
pub const DEFAULT_MAX_ITEMS: u32 = 50;

/// HTTP method of an [`Endpoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A single API call, relative to the API base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl Endpoint {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None }
    }

    fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    fn param_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    fn body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(Value::Object(body));
        self
    }

    fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?);
        Ok(self)
    }

    /// Path plus percent-encoded query string.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }

    /// Absolute (or origin-relative) URL under `base`.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path_and_query())
    }
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn object<const N: usize>(entries: [(&str, Option<Value>); N]) -> Map<String, Value> {
    entries
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_owned(), v)))
        .collect()
}

/// Source CRUD and source groups.
pub mod sources {
    use super::*;
    use crate::types::{NewSource, NewSourceGroup};

    #[must_use]
    pub fn list() -> Endpoint {
        Endpoint::get("/sources")
    }

    /// Sources of one group.
    #[must_use]
    pub fn list_in_group(group_id: &str) -> Endpoint {
        list().param("source_group_id", group_id)
    }

    /// Groups owned by `user_id`.
    #[must_use]
    pub fn groups(user_id: &str) -> Endpoint {
        Endpoint::get("/sources/groups").param("user_id", user_id)
    }

    #[must_use]
    pub fn group(id: &str) -> Endpoint {
        Endpoint::get(format!("/sources/groups/{}", segment(id)))
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the body cannot be serialized.
    pub fn create_group(user_id: &str, group: &NewSourceGroup) -> Result<Endpoint, ApiError> {
        Endpoint::post("/sources/groups").param("user_id", user_id).json(group)
    }

    #[must_use]
    pub fn get(id: &str) -> Endpoint {
        Endpoint::get(format!("/sources/{}", segment(id)))
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the body cannot be serialized.
    pub fn create(source: &NewSource) -> Result<Endpoint, ApiError> {
        Endpoint::post("/sources").json(source)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the body cannot be serialized.
    pub fn update(id: &str, source: &NewSource) -> Result<Endpoint, ApiError> {
        Endpoint::new(Method::Put, format!("/sources/{}", segment(id))).json(source)
    }

    #[must_use]
    pub fn delete(id: &str) -> Endpoint {
        Endpoint::new(Method::Delete, format!("/sources/{}", segment(id)))
    }
}

/// Collection jobs and collected posts.
pub mod collection {
    use super::*;

    /// Ask the backend to collect from one source now.
    #[must_use]
    pub fn trigger(source_id: &str, max_posts: Option<u32>) -> Endpoint {
        Endpoint::post(format!("/collection/trigger/{}", segment(source_id)))
            .body(object([("max_posts", max_posts.map(Value::from))]))
    }

    #[must_use]
    pub fn status(source_id: &str) -> Endpoint {
        Endpoint::get(format!("/collection/status/{}", segment(source_id)))
    }

    #[must_use]
    pub fn posts(filter: &PostFilter) -> Endpoint {
        Endpoint::get("/collection/posts")
            .param_opt("source_id", filter.source_id.as_deref())
            .param_opt("limit", filter.limit)
            .param_opt("offset", filter.offset)
    }

    #[must_use]
    pub fn post(id: &str) -> Endpoint {
        Endpoint::get(format!("/collection/posts/{}", segment(id)))
    }
}

/// Fact-check runs and results.
pub mod factcheck {
    use super::*;

    /// Run the fact-check pipeline for a post.
    #[must_use]
    pub fn run(post_id: &str, manual_sources: Option<&[String]>) -> Endpoint {
        Endpoint::post(format!("/factcheck/{}", segment(post_id))).body(object([(
            "manual_sources",
            manual_sources.map(|s| Value::from(s.to_vec())),
        )]))
    }

    #[must_use]
    pub fn result(post_id: &str) -> Endpoint {
        Endpoint::get(format!("/factcheck/{}", segment(post_id)))
    }

    #[must_use]
    pub fn list(filter: &FactCheckFilter) -> Endpoint {
        Endpoint::get("/factcheck/results/list")
            .param_opt("post_id", filter.post_id.as_deref())
            .param_opt("verdict", filter.verdict.as_ref().map(|v| v.as_str().to_owned()))
            .param_opt("limit", filter.limit)
    }
}

/// Statistics dataset search and collection.
pub mod statistics {
    use std::collections::BTreeMap;

    use super::*;

    #[must_use]
    pub fn search(provider: StatsProvider, query: &str) -> Endpoint {
        Endpoint::get(format!("/statistics/{}/search", provider.slug())).param("query", query)
    }

    #[must_use]
    pub fn dataset(provider: StatsProvider, code: &str) -> Endpoint {
        Endpoint::get(format!("/statistics/{}/dataset/{}", provider.slug(), segment(code)))
    }

    /// Collect a Eurostat dataset, optionally filtered by dimension values.
    #[must_use]
    pub fn collect_eurostat(code: &str, filters: Option<&BTreeMap<String, Vec<String>>>) -> Endpoint {
        let filters = filters.map(|f| {
            f.iter()
                .map(|(k, v)| (k.clone(), Value::from(v.clone())))
                .collect::<Map<String, Value>>()
        });
        Endpoint::post(format!("/statistics/eurostat/collect/{}", segment(code)))
            .body(object([("filters", filters.map(Value::Object))]))
    }

    /// Collect a KSH dataset, optionally naming the KSH sub-source.
    #[must_use]
    pub fn collect_ksh(code: &str, source: Option<&str>) -> Endpoint {
        Endpoint::post(format!("/statistics/ksh/collect/{}", segment(code)))
            .body(object([("source", source.map(Value::from))]))
    }
}

/// News collectors: MTI, arbitrary RSS feeds, and Magyar Közlöny.
pub mod news {
    use super::*;

    #[must_use]
    pub fn mti_collect(feed_type: &str, max_items: Option<u32>) -> Endpoint {
        Endpoint::post("/collection/mti/collect")
            .param("feed_type", feed_type)
            .param("max_items", max_items.unwrap_or(DEFAULT_MAX_ITEMS))
    }

    #[must_use]
    pub fn mti_feeds() -> Endpoint {
        Endpoint::get("/collection/mti/feeds")
    }

    #[must_use]
    pub fn mti_search(query: &str) -> Endpoint {
        Endpoint::get("/collection/mti/search").param("query", query)
    }

    #[must_use]
    pub fn rss_collect(feed_url: &str, max_items: Option<u32>) -> Endpoint {
        Endpoint::post("/collection/rss/collect")
            .param("feed_url", feed_url)
            .param("max_items", max_items.unwrap_or(DEFAULT_MAX_ITEMS))
    }

    #[must_use]
    pub fn rss_validate(feed_url: &str) -> Endpoint {
        Endpoint::post("/collection/rss/validate").param("feed_url", feed_url)
    }

    #[must_use]
    pub fn rss_search(query: &str) -> Endpoint {
        Endpoint::get("/collection/rss/search").param("query", query)
    }

    #[must_use]
    pub fn kozlony_collect(max_items: Option<u32>, year: Option<i32>) -> Endpoint {
        Endpoint::post("/collection/kozlony/collect")
            .param("max_items", max_items.unwrap_or(DEFAULT_MAX_ITEMS))
            .param_opt("year", year)
    }

    #[must_use]
    pub fn kozlony_search(query: &str, year: Option<i32>) -> Endpoint {
        Endpoint::get("/collection/kozlony/search")
            .param("query", query)
            .param_opt("year", year)
    }
}

/// Backend liveness probe.
#[must_use]
pub fn health() -> Endpoint {
    Endpoint::get("/health")
}
