//! Index Page
//!
//! Dashboard with the page content for signed-in users, landing page
//! otherwise.

use leptos::*;
use leptos_router::*;

use crate::components::{Loading, NotionContent};
use crate::state::session::use_session;

/// Index page component
#[component]
pub fn Index() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="min-h-screen bg-gray-100">
            {move || {
                if !session.ready.get() {
                    view! { <Loading /> }.into_view()
                } else if session.is_authenticated() {
                    view! { <Dashboard /> }.into_view()
                } else {
                    view! { <Landing /> }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    view! {
        <div class="container mx-auto px-4 py-8">
            <h1 class="text-4xl font-bold mb-8">"Welcome to Your Dashboard"</h1>
            <div class="bg-white rounded-lg shadow-md p-6">
                <NotionContent />
            </div>
        </div>
    }
}

#[component]
fn Landing() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen">
            <div class="text-center">
                <h1 class="text-4xl font-bold mb-4">"Welcome to Your App"</h1>
                <p class="text-xl text-gray-600 mb-8">
                    "Start by logging in or creating an account!"
                </p>
                <A
                    href="/auth"
                    class="px-6 py-3 bg-gray-900 hover:bg-gray-700 text-white rounded-lg font-medium transition-colors"
                >
                    "Login / Sign Up"
                </A>
            </div>
        </div>
    }
}
