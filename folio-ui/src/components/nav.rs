//! Navigation Component
//!
//! Header bar with the brand and the session control.

use leptos::*;
use leptos_router::*;

use crate::state::session::use_session;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();

    view! {
        <nav class="bg-white border-b border-gray-200">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="text-xl font-bold text-gray-900">"Folio"</A>

                    {move || {
                        match session.user.get() {
                            Some(user) => view! {
                                <div class="flex items-center space-x-4">
                                    <span class="text-sm text-gray-600">
                                        {user.email.unwrap_or(user.id)}
                                    </span>
                                    <button
                                        class="px-4 py-2 rounded-lg text-gray-700 hover:bg-gray-100 transition-colors"
                                        on:click=move |_| session.clear()
                                    >
                                        "Sign out"
                                    </button>
                                </div>
                            }.into_view(),
                            None => view! {
                                <A
                                    href="/auth"
                                    class="px-4 py-2 rounded-lg text-gray-700 hover:bg-gray-100 transition-colors"
                                    active_class="bg-gray-100"
                                >
                                    "Login"
                                </A>
                            }.into_view(),
                        }
                    }}
                </div>
            </div>
        </nav>
    }
}
