//! Folio Dashboard
//!
//! Shows the content of a fixed Notion page to signed-in users, built with
//! Leptos (WASM).
//!
//! The page is fetched through the Folio relay, never from Notion directly,
//! so the integration token stays on the server.

use leptos::*;

mod api;
mod app;
mod components;
mod content;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
