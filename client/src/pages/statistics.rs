//! Statistics page: live dataset search against EUROSTAT and KSH.
//!
//! Each panel owns its input signal; the query key carries the trimmed
//! input, so every distinct search term is its own cache entry and
//! revisiting a term within the stale window is free. Short inputs keep the
//! query disabled.

use leptos::prelude::*;
use query::QueryOptions;
use wire::{DatasetHit, StatsProvider};

use crate::components::notice::{ErrorNotice, Notice, NoticeKind};
use crate::net::api;
use crate::state::queries::{QueryView, keys, query_view, use_mutation, use_query_with};

#[cfg(test)]
#[path = "statistics_test.rs"]
mod statistics_test;

const MIN_QUERY_CHARS: usize = 3;
const SEARCHING: &str = "Keresés...";

fn normalize_query(raw: &str) -> String {
    raw.trim().to_owned()
}

fn searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

fn search_options(query: &str) -> QueryOptions {
    QueryOptions::default().enabled(searchable(query))
}

fn panel_copy(provider: StatsProvider) -> (String, &'static str) {
    let placeholder = match provider {
        StatsProvider::Eurostat => "Keresés EUROSTAT adatkészletekben...",
        StatsProvider::Ksh => "Keresés KSH statisztikákban...",
    };
    (format!("{} Keresés", provider.label()), placeholder)
}

fn collect_message(hit: &DatasetHit) -> String {
    format!("Gyűjtés elindítva: {}", hit.code)
}

#[component]
pub fn StatisticsPage() -> impl IntoView {
    view! {
        <div class="page statistics-page">
            <header class="page__header">
                <h1>"Statisztikák"</h1>
                <p class="page__subtitle">"EUROSTAT és KSH statisztikai adatok keresése"</p>
            </header>
            <DatasetSearchPanel provider=StatsProvider::Eurostat/>
            <DatasetSearchPanel provider=StatsProvider::Ksh/>
        </div>
    }
}

#[component]
fn DatasetSearchPanel(provider: StatsProvider) -> impl IntoView {
    let (title, placeholder) = panel_copy(provider);
    let input = RwSignal::new(String::new());
    let term = Memo::new(move |_| input.with(|raw| normalize_query(raw)));

    let results = use_query_with(
        move || {
            let q = term.get();
            (keys::dataset_search(provider, &q), search_options(&q), q)
        },
        move |q: String| async move { api::search_datasets(provider, &q).await },
    );

    let collect = use_mutation();
    let collected = RwSignal::new(None::<String>);
    let on_collect = Callback::new(move |hit: DatasetHit| {
        if collect.is_pending() {
            return;
        }
        collected.set(Some(collect_message(&hit)));
        collect.run(Vec::new(), async move { api::collect_dataset(provider, &hit.code).await });
    });

    view! {
        <section class="panel dataset-search">
            <h2 class="panel__title">{title}</h2>
            <input
                class="dataset-search__input"
                type="search"
                placeholder=placeholder
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
            />
            {move || match query_view(results.get()) {
                QueryView::Idle => ().into_any(),
                QueryView::Loading => view! { <Notice kind=NoticeKind::Loading text=SEARCHING/> }.into_any(),
                QueryView::Failed(message) => view! { <ErrorNotice message=message/> }.into_any(),
                QueryView::Ready(search) => {
                    let hits = search.hits();
                    if hits.is_empty() {
                        view! { <Notice kind=NoticeKind::Empty text="Nincs találat"/> }.into_any()
                    } else {
                        view! {
                            <ul class="dataset-search__results">
                                {hits
                                    .into_iter()
                                    .map(|hit| view! { <DatasetRow hit=hit collect=on_collect pending=Signal::derive(move || collect.is_pending())/> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }
                }
            }}
            {move || collected.get().map(|text| view! { <p class="dataset-search__status">{text}</p> })}
            {move || collect.state().error().map(|message| view! { <ErrorNotice message=message.to_owned()/> })}
        </section>
    }
}

#[component]
fn DatasetRow(hit: DatasetHit, collect: Callback<DatasetHit>, pending: Signal<bool>) -> impl IntoView {
    let code = hit.code.clone();
    let label = hit.label.clone();
    view! {
        <li class="dataset-search__row">
            <div>
                <span class="dataset-search__code">{code}</span>
                <span class="dataset-search__label">{label}</span>
            </div>
            <button class="btn btn--small" disabled=move || pending.get() on:click=move |_| collect.run(hit.clone())>
                "Gyűjtés"
            </button>
        </li>
    }
}
