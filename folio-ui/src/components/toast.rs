//! Toast Notification Component
//!
//! Shows success and error messages. Both auto-dismiss; errors can also be
//! closed by hand.

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let dismiss_state = state.clone();

    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2">
            // Success toast
            {move || {
                state.success.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Success />
                })
            }}

            // Error toast
            {move || {
                let state = dismiss_state.clone();
                dismiss_state.error.get().map(|msg| view! {
                    <ToastMessage
                        message=msg
                        variant=ToastVariant::Error
                        on_dismiss=Callback::new(move |_| state.clear_error())
                    />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Error,
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
    #[prop(optional)]
    on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    let (icon, title, bg_class) = match variant {
        ToastVariant::Success => ("✓", "Success", "bg-green-600"),
        ToastVariant::Error => ("✕", "Error", "bg-red-600"),
    };

    view! {
        <div class=format!(
            "flex items-start space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
             transform transition-all duration-300 ease-out animate-slide-in",
            bg_class
        )>
            <span class="text-lg">{icon}</span>
            <div class="flex-1">
                <p class="text-sm font-semibold">{title}</p>
                <p class="text-sm">{message}</p>
            </div>
            {on_dismiss.map(|dismiss| view! {
                <button
                    class="text-white/80 hover:text-white"
                    aria-label="Dismiss"
                    on:click=move |_| dismiss.call(())
                >
                    "×"
                </button>
            })}
        </div>
    }
}
