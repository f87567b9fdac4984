//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, Toast};
use crate::pages::{Auth, Index};
use crate::state::{provide_global_state, provide_session};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    // Session is checked once here; pages read it from context
    provide_session();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-100 text-gray-900 flex flex-col">
                <Nav />

                <main class="flex-1">
                    <Routes>
                        <Route path="/" view=Index />
                        <Route path="/auth" view=Auth />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-gray-900 hover:bg-gray-700 text-white rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
