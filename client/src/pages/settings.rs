//! Settings: backend health (polled) and API-key hints.

use std::time::Duration;

use leptos::prelude::*;
use query::{QueryError, QueryOptions};
use wire::Health;

use crate::net::api;
use crate::state::queries::{keys, use_query};

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

pub const HEALTH_POLL: Duration = Duration::from_secs(30);

const API_KEYS: [&str; 2] = ["Google Search API", "Bing Search API"];

/// Anything but a healthy answer counts as an error, including "no answer
/// yet".
fn backend_status(health: Option<&Result<Health, QueryError>>) -> (&'static str, &'static str, &'static str) {
    match health {
        Some(Ok(h)) if h.is_healthy() => ("✓", "Működik", "status status--ok"),
        _ => ("!", "Hiba", "status status--error"),
    }
}

fn health_options() -> QueryOptions {
    QueryOptions::default().refetch_interval(HEALTH_POLL)
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let health = use_query(keys::health(), health_options(), api::health);
    let status = move || {
        let current = health.get();
        backend_status(current.as_ref())
    };

    view! {
        <div class="page settings-page">
            <header class="page__header">
                <h1>"Beállítások"</h1>
                <p class="page__subtitle">"Rendszerbeállítások és API konfiguráció"</p>
            </header>

            <section class="panel">
                <h2 class="panel__title">"Rendszer Állapot"</h2>
                <div class="settings-row">
                    <span>"Backend API"</span>
                    {move || {
                        let (icon, text, class) = status();
                        view! {
                            <span class=class>
                                <span aria-hidden="true">{icon}</span>
                                " "
                                {text}
                            </span>
                        }
                    }}
                </div>
            </section>

            <section class="panel">
                <h2 class="panel__title">"API Kulcsok Állapota"</h2>
                {API_KEYS
                    .iter()
                    .map(|name| view! {
                        <div class="settings-row">
                            <span>{*name}</span>
                            <span class="settings-row__hint">"Ellenőrizd a backend logokat"</span>
                        </div>
                    })
                    .collect_view()}
            </section>
        </div>
    }
}
