//! Route table for the dashboard shell.
//!
//! DESIGN
//! ======
//! The Leptos router in `app` does the actual matching; this module is the
//! single place that knows every path, its navigation label, and how an
//! arbitrary location maps onto a page. The layout uses [`resolve`] to
//! highlight the active navigation entry and title the document.

use std::borrow::Cow;

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Where `/` sends the browser.
pub const DEFAULT_PATH: &str = "/dashboard";

/// A page of the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Dashboard,
    Sources,
    Posts,
    PostDetail(String),
    FactChecks,
    Statistics,
    Settings,
}

/// Sidebar entries, in display order.
pub const NAV: [AppRoute; 6] = [
    AppRoute::Dashboard,
    AppRoute::Sources,
    AppRoute::Posts,
    AppRoute::FactChecks,
    AppRoute::Statistics,
    AppRoute::Settings,
];

impl AppRoute {
    #[must_use]
    pub fn href(&self) -> String {
        match self {
            Self::Dashboard => "/dashboard".to_owned(),
            Self::Sources => "/sources".to_owned(),
            Self::Posts => "/posts".to_owned(),
            Self::PostDetail(id) => format!("/posts/{}", urlencoding::encode(id)),
            Self::FactChecks => "/factchecks".to_owned(),
            Self::Statistics => "/statistics".to_owned(),
            Self::Settings => "/settings".to_owned(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Sources => "Források",
            Self::Posts => "Posztok",
            Self::PostDetail(_) => "Poszt",
            Self::FactChecks => "Tényellenőrzések",
            Self::Statistics => "Statisztikák",
            Self::Settings => "Beállítások",
        }
    }

    /// The sidebar entry this page belongs to.
    #[must_use]
    pub fn nav_parent(&self) -> AppRoute {
        match self {
            Self::PostDetail(_) => Self::Posts,
            other => other.clone(),
        }
    }
}

/// Outcome of matching a browser path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    Redirect(&'static str),
    Page(AppRoute),
    NotFound,
}

impl Resolved {
    /// Whether the sidebar entry `nav` should render as active.
    #[must_use]
    pub fn highlights(&self, nav: &AppRoute) -> bool {
        match self {
            Self::Page(route) => &route.nav_parent() == nav,
            Self::Redirect(_) | Self::NotFound => false,
        }
    }

    /// Document title for this location.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Page(route) => format!("{} · FactDesk", route.title()),
            Self::Redirect(_) => "FactDesk".to_owned(),
            Self::NotFound => "Nem található · FactDesk".to_owned(),
        }
    }
}

/// Match a path (query string and fragment ignored, trailing slash
/// tolerated) against the route table.
#[must_use]
pub fn resolve(path: &str) -> Resolved {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let route = match segments.as_slice() {
        [] => return Resolved::Redirect(DEFAULT_PATH),
        ["dashboard"] => AppRoute::Dashboard,
        ["sources"] => AppRoute::Sources,
        ["posts"] => AppRoute::Posts,
        ["posts", id] => AppRoute::PostDetail(urlencoding::decode(id).map_or_else(|_| (*id).to_owned(), Cow::into_owned)),
        ["factchecks"] => AppRoute::FactChecks,
        ["statistics"] => AppRoute::Statistics,
        ["settings"] => AppRoute::Settings,
        _ => return Resolved::NotFound,
    };
    Resolved::Page(route)
}
