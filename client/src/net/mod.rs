//! Networking for the dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` executes the `wire` endpoint catalogue over HTTP. Request shapes,
//! response types, and error kinds all live in `wire` so the CLI speaks the
//! same contract.

pub mod api;
