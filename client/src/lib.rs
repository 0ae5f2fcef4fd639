//! # client
//!
//! Leptos + WASM dashboard for the fact-check platform.
//!
//! This crate contains the router shell, pages, shared components, the
//! typed HTTP client, and the query hooks that bind the `query` cache to
//! Leptos resources. It is compiled twice: as a WASM bundle (`hydrate`) for
//! the browser and as an rlib (`ssr`) the host uses to render the HTML shell.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;

/// Browser entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
