//! Folio Relay
//!
//! HTTP relay between the dashboard and the Notion API, built with Axum.
//! Holds the Notion secret so the browser never sees it.
//!
//! # Endpoints
//!
//! ## Function
//! - `OPTIONS /functions/v1/notion-page` - CORS pre-flight
//! - `POST /functions/v1/notion-page` - Child blocks of the configured page
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! Every response carries permissive CORS headers.
//!
//! # Example
//!
//! ```rust,ignore
//! use folio::config::Config;
//! use folio::notion::NotionClient;
//! use folio::relay::{serve, AppState, RelaySettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let client = NotionClient::new((&config.notion).into())?;
//!     let settings = RelaySettings::from_config(&config);
//!
//!     let state = AppState::new(Arc::new(client), settings.clone());
//!     serve(state, &settings).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{RelayError, RelayResult};
pub use state::{AppState, RelaySettings};

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue,
    },
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// `Access-Control-Allow-Headers` sent on every response
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// `Access-Control-Allow-Methods` sent on every response
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Build the relay router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let function_path = state.settings.function_path.clone();

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route(
            &function_path,
            post(routes::notion_page::invoke)
                .get(routes::notion_page::invoke)
                .options(routes::notion_page::preflight),
        )
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .with_state(shared_state)
}

/// Start the relay server
pub async fn serve(state: AppState, settings: &RelaySettings) -> Result<(), RelayError> {
    let router = build_router(state);

    let addr = settings.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        "Folio relay listening on {}{}",
        addr,
        settings.function_path
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RelayError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Folio relay shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::testing::StubSource;
    use crate::relay::dto::{ErrorEnvelope, HealthResponse};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    const PATH: &str = "/functions/v1/notion-page";

    fn create_test_app(source: Arc<StubSource>, token: Option<&str>) -> Router {
        let settings = RelaySettings::default().with_token(token.map(str::to_string));
        build_router(AppState::new(source, settings))
    }

    async fn send(app: Router, method: &str, uri: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], CORS_ALLOW_HEADERS);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], CORS_ALLOW_METHODS);
    }

    #[tokio::test]
    async fn test_preflight() {
        let source = Arc::new(StubSource::ok(serde_json::json!({"results": []})));
        let app = create_test_app(Arc::clone(&source), Some("secret"));

        let response = send(app, "OPTIONS", PATH).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_cors(&response);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_token_skips_upstream() {
        let source = Arc::new(StubSource::ok(serde_json::json!({"results": []})));
        let app = create_test_app(Arc::clone(&source), None);

        let response = send(app, "POST", PATH).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let envelope: ErrorEnvelope = body_json(response).await;
        assert_eq!(envelope.error, "Notion token is not configured");
        assert!(envelope.message.unwrap().contains("NOTION_TOKEN"));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_success_forwards_body_verbatim() {
        let upstream = serde_json::json!({
            "object": "list",
            "results": [
                {"type": "paragraph", "paragraph": {"rich_text": [{"plain_text": "Hello"}]}},
                {"type": "image", "image": {"caption": []}}
            ],
            "next_cursor": null,
            "has_more": false
        });
        let source = Arc::new(StubSource::ok(upstream.clone()));
        let app = create_test_app(Arc::clone(&source), Some("secret_abc"));

        let response = send(app, "POST", PATH).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body, upstream);

        assert_eq!(source.calls(), 1);
        let (token, page_id, page_size) = source.last_call().unwrap();
        assert_eq!(token, "secret_abc");
        assert_eq!(page_id, crate::config::DEFAULT_PAGE_ID);
        assert_eq!(page_size, Some(100));
    }

    #[tokio::test]
    async fn test_repeated_calls_hit_same_page() {
        let source = Arc::new(StubSource::ok(serde_json::json!({"results": []})));
        let app = create_test_app(Arc::clone(&source), Some("secret"));

        for _ in 0..3 {
            let response = send(app.clone(), "POST", PATH).await;
            assert_eq!(response.status(), StatusCode::OK);
            let (_, page_id, _) = source.last_call().unwrap();
            assert_eq!(page_id, crate::config::DEFAULT_PAGE_ID);
        }
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_upstream_error_is_normalized() {
        let source = Arc::new(StubSource::failing(401, "API token is invalid."));
        let app = create_test_app(Arc::clone(&source), Some("secret"));

        let response = send(app, "POST", PATH).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let envelope: ErrorEnvelope = body_json(response).await;
        assert!(envelope.error.contains("API token is invalid."));
        assert_eq!(
            envelope.message.as_deref(),
            Some("Failed to fetch content from Notion API")
        );
        assert!(envelope.time.is_some());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let source = Arc::new(StubSource::ok(serde_json::json!({"results": []})));
        let app = create_test_app(source, Some("secret"));

        let response = send(app, "POST", "/functions/v1/other").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_live() {
        let source = Arc::new(StubSource::ok(serde_json::json!({"results": []})));
        let app = create_test_app(source, None);

        let response = send(app, "GET", "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full_reports_missing_token() {
        let source = Arc::new(StubSource::ok(serde_json::json!({"results": []})));
        let app = create_test_app(source, None);

        let response = send(app, "GET", "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let health: HealthResponse = body_json(response).await;
        assert_eq!(health.status, "degraded");
        assert!(!health.notion_token_configured);
    }
}
