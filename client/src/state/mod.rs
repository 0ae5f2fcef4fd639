//! Shared client-side state.
//!
//! DESIGN
//! ======
//! Server data lives in the `query` cache, reached through the hooks in
//! `queries`. Pages keep only local form/input state in their own signals.

pub mod queries;
