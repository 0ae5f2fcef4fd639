//! # query
//!
//! Client-side data-fetching cache for the dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never call the API directly; they ask a shared [`QueryClient`] for
//! the value under a [`QueryKey`]. The client returns fresh cached data,
//! joins an in-flight fetch for the same key, or runs the fetcher with the
//! configured retry policy. Mutations invalidate key prefixes so dependent
//! views refetch.
//!
//! The crate has no runtime dependency: time comes from a [`Clock`], retry
//! back-off from a [`Timer`]. The browser build supplies both from web APIs.

pub mod clock;
pub mod client;
pub mod error;
pub mod key;
pub mod mutation;
pub mod options;

pub use clock::{Clock, ImmediateTimer, ManualClock, SystemClock, Timer};
pub use client::{QueryClient, QueryState, QueryStatus, Subscription};
pub use error::QueryError;
pub use key::QueryKey;
pub use mutation::MutationState;
pub use options::{QueryConfig, QueryOptions};
