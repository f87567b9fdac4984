//! Data Transfer Objects
//!
//! Response types for the relay endpoints. Successful function calls return
//! the Notion body untouched, so only the error and health shapes live here.

use serde::{Deserialize, Serialize};

/// Error envelope returned with HTTP 500
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Short description of what failed
    pub error: String,
    /// Guidance for the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error source chain, outermost first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// RFC 3339 timestamp of the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Whether the Notion secret is present
    pub notion_token_configured: bool,
    pub uptime_seconds: u64,
    pub version: String,
}
