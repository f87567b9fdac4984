//! Notion Page Function
//!
//! - OPTIONS /functions/v1/notion-page - CORS pre-flight
//! - POST /functions/v1/notion-page - Child blocks of the configured page

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::relay::error::{RelayError, RelayResult};
use crate::relay::state::AppState;

/// OPTIONS /functions/v1/notion-page
///
/// Empty success; the CORS headers are added by the router.
pub async fn preflight() -> StatusCode {
    tracing::debug!("Handling CORS preflight request");
    StatusCode::NO_CONTENT
}

/// POST /functions/v1/notion-page
///
/// Fetches the child blocks of the configured page and returns Notion's
/// response body as-is. No request body is read.
pub async fn invoke(State(state): State<Arc<AppState>>) -> RelayResult<Json<serde_json::Value>> {
    let settings = &state.settings;

    let token = settings.notion_token().ok_or_else(|| {
        tracing::error!("Notion token is not configured");
        RelayError::MissingToken
    })?;

    tracing::info!(page_id = %settings.page_id, "Fetching Notion blocks");

    let body = state
        .source
        .list_children(token, &settings.page_id, settings.page_size)
        .await?;

    let count = body
        .get("results")
        .and_then(|r| r.as_array())
        .map(Vec::len)
        .unwrap_or(0);
    tracing::info!(blocks = count, "Fetched blocks from Notion");

    Ok(Json(body))
}
