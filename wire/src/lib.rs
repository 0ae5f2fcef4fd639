//! Shared REST schema for the fact-check dashboard.
//!
//! This crate owns the request/response shapes exchanged with the backend
//! API and a catalogue of typed endpoint descriptions. It performs no I/O:
//! the browser client executes endpoints over `gloo-net`, the CLI over
//! `reqwest`, and both decode into the same types.
//!
//! DESIGN
//! ======
//! Backend payloads are produced by several collectors and have drifted over
//! time (`_id` vs `id`, bare arrays vs paginated envelopes, new verdict
//! strings). Decoding is deliberately lenient at those seams so a new backend
//! value degrades to a raw label instead of failing a whole page.

pub mod endpoints;
pub mod error;
pub mod format;
pub mod types;

pub use endpoints::{Endpoint, Method};
pub use error::ApiError;
pub use types::*;
