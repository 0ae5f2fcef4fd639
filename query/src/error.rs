/// Why a query produced no value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Every attempt failed; `message` is the last fetcher error.
    #[error("{message}")]
    Failed { message: String, attempts: u32 },
    /// The query is switched off by its options.
    #[error("query is disabled")]
    Disabled,
    /// Cached data under this key was stored with another type.
    #[error("cached value for {key} has a different type")]
    TypeMismatch { key: String },
    /// The fetch this caller was waiting on was dropped or removed.
    #[error("fetch was cancelled")]
    Cancelled,
}
