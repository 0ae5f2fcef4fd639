//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into the proxy handler via the `State` extractor.
//! It holds one pooled `reqwest` client and the backend root URL; both are
//! cheap to clone per request.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub backend_url: Arc<str>,
}

impl AppState {
    /// Build the upstream HTTP client from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.proxy_timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { http, backend_url: Arc::from(config.backend_url.as_str()) })
    }
}
