//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shell chrome and shared display pieces (verdict
//! badges, stat cards, notices). They take plain props; data fetching stays
//! in `pages`.

pub mod layout;
pub mod notice;
pub mod stat_card;
pub mod verdict;
