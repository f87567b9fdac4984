//! Session State
//!
//! The signed-in user lives in a context value with an explicit lifecycle:
//! populated from the auth provider when the app starts, replaced on sign-in,
//! cleared on sign-out.

use leptos::*;

use crate::api;

/// User as reported by the auth provider
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session provided to the component tree
#[derive(Clone, Copy)]
pub struct SessionState {
    /// Current user, `None` when signed out
    pub user: RwSignal<Option<User>>,
    /// Whether the startup check has finished
    pub ready: RwSignal<bool>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    /// Record a fresh sign-in
    pub fn populate(&self, user: User) {
        self.user.set(Some(user));
    }

    /// Sign out and drop the user
    pub fn clear(&self) {
        let user = self.user;
        spawn_local(async move {
            api::sign_out().await;
            user.set(None);
        });
    }
}

/// Create the session, provide it as context and start the startup check
pub fn provide_session() -> SessionState {
    let session = SessionState {
        user: create_rw_signal(None),
        ready: create_rw_signal(false),
    };
    provide_context(session);

    spawn_local(async move {
        match api::fetch_current_user().await {
            Ok(user) => session.user.set(user),
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to check session: {}", e).into());
            }
        }
        session.ready.set(true);
    });

    session
}

/// Session from context
pub fn use_session() -> SessionState {
    use_context::<SessionState>().expect("SessionState not found")
}
