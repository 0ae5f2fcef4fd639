//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its queries and mutations and delegates shared display
//! pieces to `components`. Row/card formatting lives in plain functions
//! next to each page so it can be tested without a reactive runtime.

pub mod dashboard;
pub mod factchecks;
pub mod post_detail;
pub mod posts;
pub mod settings;
pub mod sources;
pub mod statistics;

/// `For` key for a list row: the backend id, or the row position when the
/// backend sent none. Ids never start with `#`.
pub(crate) fn list_key(id: &str, index: usize) -> String {
    if id.is_empty() { format!("#{index}") } else { id.to_owned() }
}
