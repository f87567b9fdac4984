//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Status with configuration details

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::relay::dto::HealthResponse;
use crate::relay::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// The relay is "degraded" while the Notion secret is missing, since every
/// function call will fail.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let token_configured = state.settings.notion_token().is_some();

    Json(HealthResponse {
        status: if token_configured { "healthy" } else { "degraded" }.to_string(),
        notion_token_configured: token_configured,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
