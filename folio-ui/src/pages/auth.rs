//! Auth Page
//!
//! Email/password sign-in against the auth provider.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::GlobalState;
use crate::state::session::use_session;

/// Sign-in page component
#[component]
pub fn Auth() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let session = use_session();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if email_value.trim().is_empty() || password_value.is_empty() {
            state.show_error("Email and password are required");
            return;
        }

        set_submitting.set(true);
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::sign_in(email_value.trim(), &password_value).await {
                Ok(user) => {
                    session.populate(user);
                    state.show_success("Signed in");
                    navigate("/", Default::default());
                }
                Err(e) => state.show_error(&format!("Sign-in failed: {}", e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <form class="w-full max-w-sm bg-white rounded-lg shadow-md p-6 space-y-4" on:submit=on_submit>
                <h1 class="text-2xl font-bold">"Login"</h1>

                <input
                    type="email"
                    placeholder="Email"
                    class="w-full border border-gray-300 rounded-lg px-3 py-2"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />

                <input
                    type="password"
                    placeholder="Password"
                    class="w-full border border-gray-300 rounded-lg px-3 py-2"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                <button
                    type="submit"
                    class="w-full px-4 py-2 bg-gray-900 hover:bg-gray-700 text-white rounded-lg font-medium transition-colors disabled:opacity-50"
                    disabled=move || submitting.get()
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
