//! Fact-check results list; each row links to the checked post.

use leptos::prelude::*;
use query::{QueryError, QueryOptions};
use wire::format::{format_date_time, percent};
use wire::{FactCheckFilter, FactCheckResult, Verdict};

use crate::components::notice::{ErrorNotice, LOADING, Notice, NoticeKind};
use crate::components::verdict::{VerdictBadge, VerdictIcon};
use crate::net::api;
use crate::routes::AppRoute;
use crate::state::queries::{keys, use_query};

#[cfg(test)]
#[path = "factchecks_test.rs"]
mod factchecks_test;

pub const PAGE_LIMIT: u32 = 50;

#[derive(Clone, Debug, PartialEq)]
struct FactCheckRow {
    key: String,
    href: String,
    post_label: String,
    verdict: Verdict,
    counts: String,
    confidence: String,
    checked_at: String,
}

fn factcheck_row(index: usize, result: &FactCheckResult) -> FactCheckRow {
    FactCheckRow {
        key: super::list_key(result.row_key(), index),
        href: AppRoute::PostDetail(result.post_id.clone()).href(),
        post_label: format!("Poszt #{}...", result.short_post_id()),
        verdict: result.verdict.clone(),
        counts: format!("{} állítás • {} hivatkozás", result.claims.len(), result.references.len()),
        confidence: format!("Bizonyosság: {}%", percent(result.confidence)),
        checked_at: format_date_time(&result.checked_at),
    }
}

#[component]
pub fn FactChecksPage() -> impl IntoView {
    let results = use_query(keys::factchecks(), QueryOptions::default(), || async {
        api::list_factchecks(&FactCheckFilter::recent(PAGE_LIMIT)).await
    });

    view! {
        <div class="page factchecks-page">
            <header class="page__header">
                <h1>"Tényellenőrzések"</h1>
                <p class="page__subtitle">"Összes tényellenőrzési eredmény"</p>
            </header>
            <Suspense fallback=move || view! { <Notice kind=NoticeKind::Loading text=LOADING/> }>
                {move || results.get().map(render_results)}
            </Suspense>
        </div>
    }
}

fn render_results(result: Result<Vec<FactCheckResult>, QueryError>) -> AnyView {
    match result {
        Ok(list) if list.is_empty() => {
            view! { <Notice kind=NoticeKind::Empty text="Nincsenek tényellenőrzési eredmények"/> }.into_any()
        }
        Ok(list) => {
            let rows: Vec<FactCheckRow> = list.iter().enumerate().map(|(i, result)| factcheck_row(i, result)).collect();
            view! {
                <div class="factchecks-page__list">
                    <For each=move || rows.clone() key=|row| row.key.clone() let:row>
                        <a class="factcheck-row" href=row.href>
                            <VerdictIcon verdict=row.verdict.clone()/>
                            <div class="factcheck-row__body">
                                <div class="factcheck-row__title">
                                    <span class="factcheck-row__post">{row.post_label}</span>
                                    <VerdictBadge verdict=row.verdict/>
                                </div>
                                <p class="factcheck-row__counts">{row.counts}</p>
                                <p class="factcheck-row__meta">
                                    <span>{row.confidence}</span>
                                    <span>{row.checked_at}</span>
                                </p>
                            </div>
                        </a>
                    </For>
                </div>
            }
            .into_any()
        }
        Err(err) => view! { <ErrorNotice message=err.to_string()/> }.into_any(),
    }
}
