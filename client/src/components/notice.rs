//! Centered placeholder text for loading, empty, and error states.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Loading,
    Empty,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            Self::Loading => "notice notice--loading",
            Self::Empty => "notice notice--empty",
            Self::Error => "notice notice--error",
        }
    }
}

/// Shared loading text.
pub const LOADING: &str = "Betöltés...";

#[component]
pub fn Notice(kind: NoticeKind, #[prop(into)] text: String) -> impl IntoView {
    view! { <div class=kind.class()>{text}</div> }
}

/// Error notice for a failed query.
#[component]
pub fn ErrorNotice(#[prop(into)] message: String) -> impl IntoView {
    view! { <Notice kind=NoticeKind::Error text=format!("Hiba: {message}")/> }
}
