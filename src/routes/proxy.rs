//! `/api/*` pass-through to the fact-check backend.
//!
//! DESIGN
//! ======
//! The proxy is transparent: method, path tail, query string, body, and the
//! content negotiation headers go upstream unchanged, and the upstream status
//! and body come back unchanged. Only transport failures are answered here.
//!
//! The tail is cut from the raw request path, never from a decoded `Path`
//! extractor, so percent-encoded id segments (`a%2Fb`) stay one segment.
//!
//! ERROR HANDLING
//! ==============
//! An unreachable or timed-out backend becomes `502` with a JSON `detail`
//! message, the same shape the backend uses for its own errors, so the
//! browser client decodes both the same way.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend response unreadable: {0}")]
    BadUpstream(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_GATEWAY, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Join the backend root, the captured path tail, and the raw query string.
pub fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Mount point of the proxy on the host.
pub const API_PREFIX: &str = "/api";

/// Raw (still percent-encoded) path below [`API_PREFIX`].
pub fn api_tail(raw_path: &str) -> &str {
    raw_path.strip_prefix(API_PREFIX).unwrap_or(raw_path)
}

/// `ANY /api/{*path}`: forward to `{backend_url}/{path}`.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream_url(&state.backend_url, api_tail(uri.path()), uri.query());

    let mut upstream = state.http.request(method.clone(), &url);
    for name in [CONTENT_TYPE, ACCEPT] {
        if let Some(value) = headers.get(&name) {
            upstream = upstream.header(name, value.clone());
        }
    }
    if !body.is_empty() {
        upstream = upstream.body(body);
    }

    let response = upstream.send().await.map_err(|e| {
        tracing::warn!(%method, %url, error = %e, "backend unreachable");
        ProxyError::Unreachable(e.to_string())
    })?;
    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ProxyError::BadUpstream(e.to_string()))?;
    tracing::debug!(%method, %url, status = status.as_u16(), "proxied");

    let mut out = (status, bytes).into_response();
    if let Some(content_type) = content_type {
        out.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;
