//! Relay Error Types
//!
//! Every failure leaves the relay as an HTTP 500 carrying an
//! [`ErrorEnvelope`]. Nothing propagates past the handler as a panic.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::config::NOTION_TOKEN_ENV;
use crate::notion::NotionError;
use crate::relay::dto::ErrorEnvelope;

/// Relay error types
#[derive(Error, Debug)]
pub enum RelayError {
    /// The Notion secret is not set
    #[error("Notion token is not configured")]
    MissingToken,

    /// Notion call failed
    #[error(transparent)]
    Upstream(#[from] NotionError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    fn code(&self) -> &'static str {
        match self {
            RelayError::MissingToken => "CONFIG_ERROR",
            RelayError::Upstream(_) => "UPSTREAM_ERROR",
            RelayError::Internal(_) => "INTERNAL_ERROR",
            RelayError::Io(_) => "IO_ERROR",
        }
    }

    /// Build the envelope sent back to the caller
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            RelayError::MissingToken => ErrorEnvelope {
                error: self.to_string(),
                message: Some(format!(
                    "Please set {} in the relay environment",
                    NOTION_TOKEN_ENV
                )),
                stack: None,
                time: None,
            },
            RelayError::Upstream(_) => ErrorEnvelope {
                error: self.to_string(),
                message: Some("Failed to fetch content from Notion API".to_string()),
                stack: Some(source_chain(self)),
                time: Some(chrono::Utc::now().to_rfc3339()),
            },
            _ => ErrorEnvelope {
                error: self.to_string(),
                message: None,
                stack: Some(source_chain(self)),
                time: Some(chrono::Utc::now().to_rfc3339()),
            },
        }
    }
}

/// Render an error and its sources, one per line
fn source_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str("\n  caused by: ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %self.code(),
            error_message = %self,
            "Relay error occurred"
        );

        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.envelope())).into_response()
    }
}

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_envelope_names_config() {
        let envelope = RelayError::MissingToken.envelope();
        assert_eq!(envelope.error, "Notion token is not configured");
        assert!(envelope.message.unwrap().contains("NOTION_TOKEN"));
        assert!(envelope.time.is_none());
    }

    #[test]
    fn test_upstream_envelope_has_diagnostics() {
        let err = RelayError::from(NotionError::ApiError {
            status: 404,
            code: "object_not_found".to_string(),
            message: "Could not find block".to_string(),
        });

        let envelope = err.envelope();
        assert_eq!(
            envelope.error,
            "API error 404 (object_not_found): Could not find block"
        );
        assert_eq!(
            envelope.message.as_deref(),
            Some("Failed to fetch content from Notion API")
        );
        assert!(envelope.stack.is_some());
        assert!(chrono::DateTime::parse_from_rfc3339(&envelope.time.unwrap()).is_ok());
    }

    #[test]
    fn test_envelope_skips_empty_fields() {
        let json = serde_json::to_value(RelayError::MissingToken.envelope()).unwrap();
        assert!(json.get("stack").is_none());
        assert!(json.get("time").is_none());
        assert!(json.get("error").is_some());
    }
}
