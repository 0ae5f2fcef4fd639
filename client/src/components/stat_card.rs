//! Summary tile for the dashboard stats grid.

use leptos::prelude::*;

#[component]
pub fn StatCard(label: &'static str, value: String, accent: &'static str) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__body">
                <p class="stat-card__label">{label}</p>
                <p class="stat-card__value">{value}</p>
            </div>
            <span class=format!("stat-card__accent stat-card__accent--{accent}") aria-hidden="true"></span>
        </div>
    }
}
