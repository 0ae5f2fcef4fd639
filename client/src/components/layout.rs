//! Application shell: sidebar navigation plus the routed page area.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once inside the router. Reads the current location to highlight
//! the matching sidebar entry and set the document title.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_location;

use crate::routes::{NAV, resolve};

/// Sidebar + main content frame around every page.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let location = use_location();
    let current = Memo::new(move |_| resolve(&location.pathname.get()));

    view! {
        <Title text=move || current.get().title()/>
        <div class="layout">
            <aside class="layout__sidebar">
                <a class="layout__brand" href="/dashboard">"FactDesk"</a>
                <nav class="layout__nav">
                    {NAV
                        .into_iter()
                        .map(|route| {
                            let href = route.href();
                            let label = route.title();
                            let is_active = move || current.get().highlights(&route);
                            view! {
                                <a
                                    class="layout__link"
                                    class:layout__link--active=is_active.clone()
                                    aria-current=move || is_active().then_some("page")
                                    href=href
                                >
                                    {label}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
            </aside>
            <main class="layout__main">{children()}</main>
        </div>
    }
}
