//! Notion Content Card
//!
//! Loads the page through the relay on mount and whenever "Try again" is
//! pressed, then renders its paragraphs.

use leptos::*;

use crate::api;
use crate::components::loading::ParagraphSkeleton;
use crate::content::{self, LoadState, RenderedBlock};
use crate::state::global::GlobalState;

/// Bound on one load attempt
pub const LOAD_TIMEOUT_MS: u32 = 15_000;

/// Page content with loading, error and empty states
#[component]
pub fn NotionContent() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let load_state = create_rw_signal(LoadState::Loading);
    let retry_count = create_rw_signal(0u32);

    // Re-runs whenever retry_count changes
    create_effect(move |_| {
        let attempt = retry_count.get();
        let state = state.clone();

        load_state.set(LoadState::Loading);
        state.clear_error();

        spawn_local(async move {
            let outcome = api::invoke_notion_page(LOAD_TIMEOUT_MS)
                .await
                .and_then(|reply| content::interpret(&reply));

            if !owns_card(retry_count, attempt) {
                return;
            }

            let next = match outcome {
                Ok(blocks) => {
                    let next = LoadState::from(blocks);
                    if matches!(next, LoadState::Loaded(_)) {
                        state.show_success("Content loaded successfully");
                    }
                    next
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Error fetching Notion content: {}", e).into(),
                    );
                    let message = e.user_message();
                    state.show_error(&message);
                    LoadState::Error(message)
                }
            };

            // Disposed if the card unmounted since the check above
            let _ = load_state.try_set(next);
        });
    });

    let retry = move |_| retry_count.update(|n| *n += 1);

    view! {
        {move || match load_state.get() {
            LoadState::Loading => view! { <ParagraphSkeleton /> }.into_view(),

            LoadState::Error(message) => view! {
                <div class="rounded-lg border border-red-200 bg-red-50 p-4" role="alert">
                    <h3 class="font-semibold text-red-800">"Error"</h3>
                    <p class="text-sm text-red-700 mt-1">{message}</p>
                    <button
                        class="mt-4 px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-lg text-sm font-medium transition-colors"
                        on:click=retry
                    >
                        "Try again"
                    </button>
                </div>
            }.into_view(),

            LoadState::Empty => view! {
                <p class="text-gray-500 text-center py-8">"No content found"</p>
            }.into_view(),

            LoadState::Loaded(blocks) => view! {
                <div class="prose prose-slate max-w-none">
                    {content::render_blocks(&blocks)
                        .into_iter()
                        .map(|rendered| view! { <BlockView rendered=rendered /> })
                        .collect_view()}
                </div>
            }.into_view(),
        }}
    }
}

/// Whether `attempt` may still write to the card.
///
/// False once a retry has started a newer attempt, or once the card has
/// unmounted (sign-out mid-load) and its signals are disposed.
fn owns_card(retry_count: RwSignal<u32>, attempt: u32) -> bool {
    retry_count.try_get_untracked() == Some(attempt)
}

#[component]
fn BlockView(rendered: RenderedBlock) -> impl IntoView {
    let class = if rendered.is_placeholder() {
        "mb-4 text-gray-400 italic"
    } else {
        "mb-4 text-gray-700"
    };

    view! { <p class=class>{rendered.text()}</p> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_attempt_owns_card() {
        let runtime = create_runtime();

        let retry_count = create_rw_signal(0u32);
        assert!(owns_card(retry_count, 0));

        runtime.dispose();
    }

    #[test]
    fn test_retry_supersedes_attempt() {
        let runtime = create_runtime();

        let retry_count = create_rw_signal(0u32);
        retry_count.update(|n| *n += 1);

        assert!(!owns_card(retry_count, 0));
        assert!(owns_card(retry_count, 1));

        runtime.dispose();
    }

    #[test]
    fn test_late_reply_after_unmount_is_dropped() {
        let runtime = create_runtime();

        let retry_count = create_rw_signal(0u32);
        let load_state = create_rw_signal(LoadState::Loading);
        retry_count.dispose();
        load_state.dispose();

        assert!(!owns_card(retry_count, 0));
        assert!(load_state.try_set(LoadState::Empty).is_some());

        runtime.dispose();
    }
}
