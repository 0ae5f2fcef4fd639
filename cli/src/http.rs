//! Executes `wire` endpoints over `reqwest`.

use serde_json::Value;
use wire::{ApiError, Endpoint, Method};

use crate::CliError;

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Send `endpoint` under `base_url` and return the decoded JSON body.
///
/// Empty bodies (204, some deletes) come back as `null`.
pub async fn send(client: &reqwest::Client, base_url: &str, endpoint: &Endpoint) -> Result<Value, CliError> {
    let url = endpoint.url(base_url);
    tracing::debug!(method = endpoint.method.as_str(), %url, "request");

    let request = client.request(method(endpoint.method), &url);
    let request = match &endpoint.body {
        Some(body) => request.json(body),
        None => request,
    };

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    tracing::debug!(status = status.as_u16(), bytes = text.len(), "response");

    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), &text).into());
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;
