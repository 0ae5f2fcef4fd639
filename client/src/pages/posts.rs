//! Posts page: the latest collected posts, each linking to its detail view.

use leptos::prelude::*;
use query::{QueryError, QueryOptions};
use wire::format::format_date;
use wire::{Post, PostFilter, excerpt};

use crate::components::notice::{ErrorNotice, LOADING, Notice, NoticeKind};
use crate::net::api;
use crate::routes::AppRoute;
use crate::state::queries::{keys, use_query};

#[cfg(test)]
#[path = "posts_test.rs"]
mod posts_test;

pub const PAGE_LIMIT: u32 = 50;
const HEADLINE_CHARS: usize = 150;
const EXCERPT_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
struct PostRow {
    key: String,
    href: String,
    headline: String,
    excerpt: String,
    date: String,
    source: String,
}

fn post_row(index: usize, post: &Post) -> PostRow {
    PostRow {
        key: super::list_key(&post.id, index),
        href: AppRoute::PostDetail(post.id.clone()).href(),
        headline: post.headline(HEADLINE_CHARS),
        excerpt: excerpt(&post.content, EXCERPT_CHARS),
        date: format_date(&post.posted_at),
        source: post.source_label().to_owned(),
    }
}

#[component]
pub fn PostsPage() -> impl IntoView {
    let posts = use_query(keys::posts(), QueryOptions::default(), || async {
        api::list_posts(&PostFilter::recent(PAGE_LIMIT)).await
    });

    view! {
        <div class="page posts-page">
            <header class="page__header">
                <h1>"Posztok"</h1>
                <p class="page__subtitle">"Összes gyűjtött poszt és hír"</p>
            </header>
            <Suspense fallback=move || view! { <Notice kind=NoticeKind::Loading text=LOADING/> }>
                {move || posts.get().map(render_posts)}
            </Suspense>
        </div>
    }
}

fn render_posts(result: Result<Vec<Post>, QueryError>) -> AnyView {
    match result {
        Ok(list) if list.is_empty() => view! { <Notice kind=NoticeKind::Empty text="Nincsenek posztok"/> }.into_any(),
        Ok(list) => {
            let rows: Vec<PostRow> = list.iter().enumerate().map(|(i, post)| post_row(i, post)).collect();
            view! {
                <div class="posts-page__list">
                    <For each=move || rows.clone() key=|row| row.key.clone() let:row>
                        <a class="post-card" href=row.href>
                            <h3 class="post-card__headline">{row.headline}</h3>
                            <p class="post-card__excerpt">{row.excerpt}</p>
                            <div class="post-card__meta">
                                <span class="post-card__date">{row.date}</span>
                                <span class="chip">{row.source}</span>
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
