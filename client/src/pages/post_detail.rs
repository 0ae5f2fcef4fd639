//! Post detail: the post body, its fact-check result, and the trigger for a
//! new fact-check run.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both queries are keyed by the `:id` route segment and stay disabled while
//! it is empty. A missing fact-check is not an error: the backend answers
//! 404 until the first run finishes, which `find_factcheck` maps to `None`.
//! A successful run invalidates only `["factcheck", id]`.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use query::{QueryError, QueryOptions};
use wire::format::{format_date_time, percent};
use wire::{FactCheckResult, Post, Reference};

use crate::components::notice::{ErrorNotice, LOADING, Notice, NoticeKind};
use crate::components::verdict::{ConfidenceBar, VerdictBadge};
use crate::net::api;
use crate::routes::AppRoute;
use crate::state::queries::{QueryView, keys, query_view, use_mutation, use_query_with};

#[cfg(test)]
#[path = "post_detail_test.rs"]
mod post_detail_test;

fn factcheck_button_label(pending: bool) -> &'static str {
    if pending { "Ellenőrzés..." } else { "Tényellenőrzés" }
}

fn post_title(post: &Post) -> String {
    post.title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Poszt")
        .to_owned()
}

fn query_options(id: &str) -> QueryOptions {
    QueryOptions::default().enabled(!id.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ReferenceRow {
    heading: String,
    url: Option<String>,
    summary: Option<String>,
    source: String,
    relevance: String,
}

fn reference_row(reference: &Reference) -> ReferenceRow {
    ReferenceRow {
        heading: reference.heading().to_owned(),
        url: reference.url.clone().filter(|u| !u.is_empty()),
        summary: reference.summary(),
        source: reference.source.clone(),
        relevance: format!("Relevancia: {}%", percent(reference.relevance_score)),
    }
}

// =============================================================================
// PAGE
// =============================================================================

#[component]
pub fn PostDetailPage() -> impl IntoView {
    let params = use_params_map();
    let post_id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));

    let post = use_query_with(
        move || {
            let id = post_id.get();
            (keys::post(&id), query_options(&id), id)
        },
        |id: String| async move { api::get_post(&id).await },
    );
    let factcheck = use_query_with(
        move || {
            let id = post_id.get();
            (keys::factcheck(&id), query_options(&id), id)
        },
        |id: String| async move { api::find_factcheck(&id).await },
    );
    let run = use_mutation();

    let on_run = Callback::new(move |()| {
        let id = post_id.get_untracked();
        if id.is_empty() {
            return;
        }
        run.run(vec![keys::factcheck(&id)], async move { api::run_factcheck(&id).await });
    });

    view! {
        <div class="page post-detail-page">
            <a class="back-link" href=AppRoute::Posts.href()>
                "← Vissza a posztokhoz"
            </a>
            <Suspense fallback=move || view! { <Notice kind=NoticeKind::Loading text=LOADING/> }>
                {move || match query_view(post.get()) {
                    QueryView::Loading | QueryView::Idle => {
                        view! { <Notice kind=NoticeKind::Loading text=LOADING/> }.into_any()
                    }
                    QueryView::Failed(_) => {
                        view! { <Notice kind=NoticeKind::Empty text="Poszt nem található"/> }.into_any()
                    }
                    QueryView::Ready(post) => view! {
                        <PostBody
                            post=post
                            pending=Signal::derive(move || run.is_pending())
                            on_run=on_run
                        />
                    }
                    .into_any(),
                }}
            </Suspense>
            {move || run.state().error().map(|message| view! { <ErrorNotice message=message.to_owned()/> })}
            <Suspense fallback=|| ()>
                {move || factcheck.get().map(render_factcheck)}
            </Suspense>
        </div>
    }
}

#[component]
fn PostBody(post: Post, pending: Signal<bool>, on_run: Callback<()>) -> impl IntoView {
    let title = post_title(&post);
    let meta = format!("{} • {}", format_date_time(&post.posted_at), post.source_label());
    let link = post.original_link().map(str::to_owned);

    view! {
        <article class="panel post-detail">
            <header class="post-detail__header">
                <div>
                    <h1 class="post-detail__title">{title}</h1>
                    <p class="post-detail__meta">{meta}</p>
                </div>
                <button
                    class="btn btn--primary"
                    disabled=move || pending.get()
                    on:click=move |_| on_run.run(())
                >
                    {move || factcheck_button_label(pending.get())}
                </button>
            </header>
            <p class="post-detail__content">{post.content}</p>
            {link.map(|href| view! {
                <a class="post-detail__link" href=href target="_blank" rel="noopener noreferrer">
                    "Eredeti poszt megtekintése →"
                </a>
            })}
        </article>
    }
}

fn render_factcheck(result: Result<Option<FactCheckResult>, QueryError>) -> AnyView {
    match result {
        Ok(Some(result)) => view! { <FactCheckPanel result=result/> }.into_any(),
        // Disabled (no id) or not checked yet: nothing to show.
        Ok(None) | Err(QueryError::Disabled) => ().into_any(),
        Err(err) => view! { <ErrorNotice message=err.to_string()/> }.into_any(),
    }
}

#[component]
fn FactCheckPanel(result: FactCheckResult) -> impl IntoView {
    let claims_heading = format!("Kinyert Állítások ({})", result.claims.len());
    let references_heading = format!("Hivatkozások ({})", result.references.len());
    let references: Vec<ReferenceRow> = result.references.iter().map(reference_row).collect();

    view! {
        <section class="panel factcheck-panel">
            <div class="factcheck-panel__header">
                <h2>"Tényellenőrzés Eredménye"</h2>
                <VerdictBadge verdict=result.verdict.clone()/>
            </div>
            <ConfidenceBar confidence=result.confidence/>

            {(!result.claims.is_empty()).then(|| view! {
                <h3 class="factcheck-panel__subtitle">{claims_heading}</h3>
                <ul class="factcheck-panel__claims">
                    {result
                        .claims
                        .iter()
                        .map(|claim| view! { <li class="claim">{claim.text.clone()}</li> })
                        .collect_view()}
                </ul>
            })}

            {(!references.is_empty()).then(|| view! {
                <h3 class="factcheck-panel__subtitle">{references_heading}</h3>
                <ul class="factcheck-panel__references">
                    {references.into_iter().map(|row| view! { <ReferenceItem row=row/> }).collect_view()}
                </ul>
            })}
        </section>
    }
}

#[component]
fn ReferenceItem(row: ReferenceRow) -> impl IntoView {
    let heading = match row.url {
        Some(url) => view! {
            <a class="reference__title" href=url target="_blank" rel="noopener noreferrer">
                {row.heading}
            </a>
        }
        .into_any(),
        None => view! { <span class="reference__title">{row.heading}</span> }.into_any(),
    };

    view! {
        <li class="reference">
            {heading}
            {row.summary.map(|text| view! { <p class="reference__snippet">{text}</p> })}
            <div class="reference__meta">
                <span class="chip">{row.source}</span>
                <span class="reference__relevance">{row.relevance}</span>
            </div>
        </li>
    }
}
