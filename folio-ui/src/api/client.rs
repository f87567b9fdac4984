//! HTTP API Client
//!
//! Calls to the relay function and the auth provider.

use std::future::Future;

use futures_util::future::{select, Either};
use futures_util::pin_mut;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use web_sys::AbortController;

use crate::content::{LoadError, RelayReply};
use crate::state::session::User;

/// Default functions base URL
pub const DEFAULT_FUNCTIONS_BASE: &str = "http://localhost:8083/functions/v1";

/// Default auth provider URL
pub const DEFAULT_AUTH_BASE: &str = "http://localhost:54321";

/// Name of the relay function
pub const NOTION_FUNCTION: &str = "notion-page";

const FUNCTIONS_URL_KEY: &str = "folio_functions_url";
const AUTH_URL_KEY: &str = "folio_auth_url";
const ANON_KEY_KEY: &str = "folio_anon_key";
const ACCESS_TOKEN_KEY: &str = "folio_access_token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn stored(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

/// Get the functions base URL from local storage or use default
pub fn get_functions_base() -> String {
    stored(FUNCTIONS_URL_KEY)
        .unwrap_or_else(|| DEFAULT_FUNCTIONS_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Get the auth provider URL from local storage or use default
pub fn get_auth_base() -> String {
    stored(AUTH_URL_KEY)
        .unwrap_or_else(|| DEFAULT_AUTH_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

fn anon_key() -> Option<String> {
    stored(ANON_KEY_KEY)
}

/// Access token of the signed-in user
pub fn access_token() -> Option<String> {
    stored(ACCESS_TOKEN_KEY)
}

fn store_access_token(token: Option<&str>) {
    let Some(storage) = local_storage() else {
        return;
    };

    let result = match token {
        Some(token) => storage.set_item(ACCESS_TOKEN_KEY, token),
        None => storage.remove_item(ACCESS_TOKEN_KEY),
    };
    if let Err(e) = result {
        web_sys::console::warn_2(
            &JsValue::from_str("Failed to update stored access token:"),
            &e,
        );
    }
}

// ============ Relay ============

/// Invoke the relay function, racing it against `timeout_ms`.
///
/// When the timer wins, the request's abort controller is triggered so the
/// fetch is cancelled in the browser rather than left running.
pub async fn invoke_notion_page(timeout_ms: u32) -> Result<RelayReply, LoadError> {
    let controller = AbortController::new()
        .map_err(|_| LoadError::Internal("AbortController unavailable".to_string()))?;
    let signal = controller.signal();

    let url = format!("{}/{}", get_functions_base(), NOTION_FUNCTION);
    let key = anon_key();
    let bearer = access_token().or_else(|| key.clone());

    let request = async {
        let mut builder = Request::post(&url).header("x-client-info", "folio-ui/0.1.0");
        if let Some(key) = &key {
            builder = builder.header("apikey", key);
        }
        if let Some(token) = &bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let response = builder
            .abort_signal(Some(&signal))
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(RelayReply { status, body })
    };

    race_timeout(request, &controller, timeout_ms).await
}

/// Resolve `request` unless `timeout_ms` passes first, in which case
/// `controller` is aborted and the attempt fails with [`LoadError::Timeout`].
async fn race_timeout<F>(
    request: F,
    controller: &AbortController,
    timeout_ms: u32,
) -> Result<RelayReply, LoadError>
where
    F: Future<Output = Result<RelayReply, LoadError>>,
{
    let timer = TimeoutFuture::new(timeout_ms);

    pin_mut!(request);
    pin_mut!(timer);

    match select(request, timer).await {
        Either::Left((reply, _)) => reply,
        Either::Right(((), _)) => {
            controller.abort();
            Err(LoadError::Timeout(timeout_ms))
        }
    }
}

// ============ Auth ============

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    user: User,
}

#[derive(Debug, serde::Deserialize)]
struct AuthError {
    #[serde(default, alias = "error_description", alias = "msg")]
    message: Option<String>,
}

async fn auth_error(response: gloo_net::http::Response, fallback: &str) -> String {
    response
        .json::<AuthError>()
        .await
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| fallback.to_string())
}

/// Ask the auth provider who the stored token belongs to.
///
/// A missing or rejected token means nobody is signed in.
pub async fn fetch_current_user() -> Result<Option<User>, String> {
    let Some(token) = access_token() else {
        return Ok(None);
    };

    let mut builder = Request::get(&format!("{}/auth/v1/user", get_auth_base()))
        .header("Authorization", &format!("Bearer {}", token));
    if let Some(key) = anon_key() {
        builder = builder.header("apikey", &key);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    match response.status() {
        401 | 403 => {
            store_access_token(None);
            Ok(None)
        }
        _ if response.ok() => response
            .json::<User>()
            .await
            .map(Some)
            .map_err(|e| format!("Parse error: {}", e)),
        _ => Err(auth_error(response, "Unable to check session").await),
    }
}

/// Email/password sign-in. Stores the access token on success.
pub async fn sign_in(email: &str, password: &str) -> Result<User, String> {
    #[derive(serde::Serialize)]
    struct SignInRequest<'a> {
        email: &'a str,
        password: &'a str,
    }

    let mut builder = Request::post(&format!(
        "{}/auth/v1/token?grant_type=password",
        get_auth_base()
    ));
    if let Some(key) = anon_key() {
        builder = builder.header("apikey", &key);
    }

    let response = builder
        .json(&SignInRequest { email, password })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(auth_error(response, "Invalid login credentials").await);
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    store_access_token(Some(&token.access_token));
    Ok(token.user)
}

/// Forget the stored token and tell the provider, best effort
pub async fn sign_out() {
    if let Some(token) = access_token() {
        let mut builder = Request::post(&format!("{}/auth/v1/logout", get_auth_base()))
            .header("Authorization", &format!("Bearer {}", token));
        if let Some(key) = anon_key() {
            builder = builder.header("apikey", &key);
        }
        if let Err(e) = builder.send().await {
            web_sys::console::warn_1(&format!("Logout request failed: {}", e).into());
        }
    }
    store_access_token(None);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::content;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn ok_reply() -> Result<RelayReply, LoadError> {
        Ok(RelayReply {
            status: 200,
            body: r#"{"results":[]}"#.to_string(),
        })
    }

    #[wasm_bindgen_test]
    async fn test_silent_relay_times_out_and_aborts() {
        let controller = AbortController::new().unwrap();

        let result = race_timeout(
            futures_util::future::pending::<Result<RelayReply, LoadError>>(),
            &controller,
            20,
        )
        .await;

        assert_eq!(result, Err(LoadError::Timeout(20)));
        assert!(controller.signal().aborted());
        assert_eq!(
            result.unwrap_err().user_message(),
            "Failed to load content: Request timed out after 20 milliseconds"
        );
    }

    #[wasm_bindgen_test]
    async fn test_prompt_reply_wins_without_abort() {
        let controller = AbortController::new().unwrap();

        let result = race_timeout(async { ok_reply() }, &controller, 1_000).await;

        assert_eq!(result, ok_reply());
        assert!(!controller.signal().aborted());
    }

    #[wasm_bindgen_test]
    async fn test_retry_after_timeout_can_load() {
        let first = AbortController::new().unwrap();
        let failed = race_timeout(
            futures_util::future::pending::<Result<RelayReply, LoadError>>(),
            &first,
            10,
        )
        .await;
        assert!(matches!(failed, Err(LoadError::Timeout(10))));

        // A retry uses a fresh controller, unaffected by the aborted one
        let second = AbortController::new().unwrap();
        let reply = race_timeout(async { ok_reply() }, &second, 1_000)
            .await
            .unwrap();
        assert_eq!(
            content::LoadState::from(content::interpret(&reply).unwrap()),
            content::LoadState::Empty
        );
        assert!(!second.signal().aborted());
    }
}
