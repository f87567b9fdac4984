//! Global Application State
//!
//! Toast notifications shared by every component.

use leptos::*;

/// How long a success toast stays up
pub const SUCCESS_TOAST_MS: u32 = 3000;

/// How long an error toast stays up
pub const ERROR_TOAST_MS: u32 = 5000;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        let shown = message.to_string();
        gloo_timers::callback::Timeout::new(SUCCESS_TOAST_MS, move || {
            // A newer toast may have replaced this one
            if success_signal.get_untracked().as_deref() == Some(shown.as_str()) {
                success_signal.set(None);
            }
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        let shown = message.to_string();
        gloo_timers::callback::Timeout::new(ERROR_TOAST_MS, move || {
            if error_signal.get_untracked().as_deref() == Some(shown.as_str()) {
                error_signal.set(None);
            }
        })
        .forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}
