//! Error type shared by every transport that executes [`crate::Endpoint`]s.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of a single API call.
///
/// `Clone` so cached query results can hand the same error to every waiter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The request body could not be serialized.
    #[error("invalid request body: {0}")]
    Encode(String),
    /// No transport exists in this build (server-side rendering, tests).
    #[error("api not available in this environment")]
    Unavailable,
}

impl ApiError {
    /// Whether the backend reported that the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Build a status error, keeping only the first line of long bodies.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let first_line = body.lines().next().unwrap_or_default().trim();
        Self::Status { status, body: crate::format::truncate_chars(first_line, 200).to_owned() }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
