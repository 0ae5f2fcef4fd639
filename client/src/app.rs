//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::layout::Layout;
use crate::pages::{
    dashboard::DashboardPage, factchecks::FactChecksPage, post_detail::PostDetailPage, posts::PostsPage,
    settings::SettingsPage, sources::SourcesPage, statistics::StatisticsPage,
};
use crate::routes::{AppRoute, DEFAULT_PATH};
use crate::state::queries::provide_query_client;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="hu">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the query cache and sets up client-side routing inside the
/// sidebar layout.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_query_client();

    view! {
        <Stylesheet id="leptos" href="/pkg/factdesk.css"/>

        <Router>
            <Layout>
                <Routes fallback=NotFound>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=DEFAULT_PATH/> }/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("sources") view=SourcesPage/>
                    <Route path=StaticSegment("posts") view=PostsPage/>
                    <Route path=(StaticSegment("posts"), ParamSegment("id")) view=PostDetailPage/>
                    <Route path=StaticSegment("factchecks") view=FactChecksPage/>
                    <Route path=StaticSegment("statistics") view=StatisticsPage/>
                    <Route path=StaticSegment("settings") view=SettingsPage/>
                </Routes>
            </Layout>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page not-found">
            <h1>"Az oldal nem található"</h1>
            <a class="back-link" href=AppRoute::Dashboard.href()>
                "← Vissza a Dashboardra"
            </a>
        </div>
    }
}
