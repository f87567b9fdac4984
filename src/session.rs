//! Session
//!
//! The signed-in user is held in an explicit [`Session`] value: populated once
//! at startup from an [`AuthProvider`], cleared at logout, and passed to
//! whoever needs to choose a view. There is no process-wide user state.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// The authenticated user as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Top-level view to show for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Signed in: the dashboard with page content
    Dashboard,
    /// Signed out: landing page with a login link
    Landing,
}

/// Current user, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// A session with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a session from the provider's current user
    pub async fn start(provider: &dyn AuthProvider) -> Result<Self, SessionError> {
        let user = provider.current_user().await?;
        match &user {
            Some(u) => tracing::info!(user_id = %u.id, "Session started"),
            None => tracing::info!("No signed-in user"),
        }
        Ok(Self { user })
    }

    /// Replace the current user
    pub fn populate(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Sign out locally
    pub fn clear(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "Session cleared");
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn view(&self) -> View {
        if self.is_authenticated() {
            View::Dashboard
        } else {
            View::Landing
        }
    }
}

/// "Get current user" query of an auth provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `Ok(None)` when nobody is signed in or the token is no longer valid
    async fn current_user(&self) -> Result<Option<User>, SessionError>;
}

/// Supabase-style auth provider (`GET {url}/auth/v1/user`)
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: Option<String>,
    access_token: Option<String>,
}

impl SupabaseAuth {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SessionError> {
        let client = Client::builder()
            .user_agent(concat!("Folio/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            anon_key: None,
            access_token: None,
        })
    }

    pub fn with_anon_key(mut self, anon_key: Option<String>) -> Self {
        self.anon_key = anon_key;
        self
    }

    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn current_user(&self) -> Result<Option<User>, SessionError> {
        let Some(token) = &self.access_token else {
            return Ok(None);
        };

        let mut request = self.client.get(self.user_url()).bearer_auth(token);
        if let Some(key) = &self.anon_key {
            request = request.header("apikey", key);
        }

        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<User>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("Access token rejected by auth provider");
                Ok(None)
            }
            status => Err(SessionError::Provider {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

/// Errors from the auth provider
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Auth request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Auth provider error {status}: {message}")]
    Provider { status: u16, message: String },
}
