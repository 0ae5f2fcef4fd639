//! Dashboard: headline numbers and the most recent posts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route (`/` redirects here). Shares the `sources`,
//! `posts/recent`, and `factchecks/recent` cache entries with the other
//! pages, so navigating back and forth within the stale window costs no
//! requests.

use leptos::prelude::*;
use query::{QueryError, QueryOptions};
use wire::format::format_date;
use wire::{FactCheckFilter, Post, PostFilter, Source};

use crate::components::notice::{ErrorNotice, LOADING, Notice, NoticeKind};
use crate::components::stat_card::StatCard;
use crate::net::api;
use crate::routes::AppRoute;
use crate::state::queries::{keys, use_query};

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

/// How many posts and fact-checks the dashboard asks for.
pub const RECENT_LIMIT: u32 = 10;
const HEADLINE_CHARS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
struct StatTile {
    label: &'static str,
    value: String,
    accent: &'static str,
}

/// The four summary tiles. Missing data counts as zero.
fn stat_tiles(sources: Option<&[Source]>, posts: Option<usize>, factchecks: Option<usize>) -> Vec<StatTile> {
    let active_sources = sources.map_or(0, |list| list.iter().filter(|s| s.is_active).count());
    vec![
        StatTile { label: "Aktív Források", value: active_sources.to_string(), accent: "blue" },
        StatTile { label: "Összes Poszt", value: posts.unwrap_or(0).to_string(), accent: "green" },
        StatTile { label: "Tényellenőrzések", value: factchecks.unwrap_or(0).to_string(), accent: "purple" },
        StatTile { label: "Aktivitás", value: "Magas".to_owned(), accent: "orange" },
    ]
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct RecentPostRow {
    href: String,
    headline: String,
    meta: String,
}

fn recent_post_row(post: &Post) -> RecentPostRow {
    RecentPostRow {
        href: AppRoute::PostDetail(post.id.clone()).href(),
        headline: post.headline(HEADLINE_CHARS),
        meta: format!("{} • {}", post.source_label(), format_date(&post.posted_at)),
    }
}

fn ok_len<T>(result: Option<Result<Vec<T>, QueryError>>) -> Option<usize> {
    result.and_then(Result::ok).map(|items| items.len())
}

/// Dashboard page: stats grid plus the latest posts.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let sources = use_query(keys::sources(), QueryOptions::default(), api::list_sources);
    let posts = use_query(keys::recent_posts(), QueryOptions::default(), || async {
        api::list_posts(&PostFilter::recent(RECENT_LIMIT)).await
    });
    let factchecks = use_query(keys::recent_factchecks(), QueryOptions::default(), || async {
        api::list_factchecks(&FactCheckFilter::recent(RECENT_LIMIT)).await
    });

    let tiles = move || {
        let sources = sources.get().and_then(Result::ok);
        stat_tiles(sources.as_deref(), ok_len(posts.get()), ok_len(factchecks.get()))
    };

    view! {
        <div class="page dashboard-page">
            <header class="page__header">
                <h1>"Dashboard"</h1>
                <p class="page__subtitle">"Áttekintés a tényellenőrző platform állapotáról"</p>
            </header>

            <div class="dashboard-page__stats">
                {move || {
                    tiles()
                        .into_iter()
                        .map(|tile| view! { <StatCard label=tile.label value=tile.value accent=tile.accent/> })
                        .collect_view()
                }}
            </div>

            <section class="panel">
                <h2 class="panel__title">"Legutóbbi Posztok"</h2>
                <Suspense fallback=move || view! { <Notice kind=NoticeKind::Loading text=LOADING/> }>
                    {move || posts.get().map(render_recent_posts)}
                </Suspense>
            </section>
        </div>
    }
}

fn render_recent_posts(result: Result<Vec<Post>, QueryError>) -> AnyView {
    match result {
        Ok(list) if list.is_empty() => view! { <Notice kind=NoticeKind::Empty text="Nincsenek posztok"/> }.into_any(),
        Ok(list) => view! {
            <ul class="panel__list">
                {list
                    .iter()
                    .map(|post| {
                        let row = recent_post_row(post);
                        view! {
                            <li class="panel__row">
                                <a class="recent-post" href=row.href>
                                    <h3 class="recent-post__headline">{row.headline}</h3>
                                    <p class="recent-post__meta">{row.meta}</p>
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
        .into_any(),
        Err(err) => view! { <ErrorNotice message=err.to_string()/> }.into_any(),
    }
}
