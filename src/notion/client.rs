//! Notion REST API Client
//!
//! HTTP client for the "list child blocks" operation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::error::NotionError;

/// Notion API version sent with every request
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Anything that can list the child blocks of a Notion block.
///
/// The relay only talks to Notion through this trait. The response body is
/// returned untouched so it can be forwarded verbatim.
#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn list_children(
        &self,
        token: &str,
        block_id: &str,
        page_size: Option<u32>,
    ) -> Result<serde_json::Value, NotionError>;
}

/// Notion REST API client
pub struct NotionClient {
    client: Client,
    config: NotionClientConfig,
}

/// Configuration for the Notion client
#[derive(Debug, Clone)]
pub struct NotionClientConfig {
    /// Base URL for the Notion API (e.g., "https://api.notion.com")
    pub base_url: String,
    /// Value of the `Notion-Version` header
    pub api_version: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for NotionClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.notion.com".to_string(),
            api_version: NOTION_API_VERSION.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl NotionClient {
    /// Create a new Notion client with the given configuration
    pub fn new(config: NotionClientConfig) -> Result<Self, NotionError> {
        let client = Client::builder()
            .user_agent(concat!("Folio/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &NotionClientConfig {
        &self.config
    }

    fn children_url(&self, block_id: &str) -> String {
        format!(
            "{}/v1/blocks/{}/children",
            self.config.base_url.trim_end_matches('/'),
            block_id
        )
    }
}

#[async_trait]
impl BlockSource for NotionClient {
    async fn list_children(
        &self,
        token: &str,
        block_id: &str,
        page_size: Option<u32>,
    ) -> Result<serde_json::Value, NotionError> {
        let mut request = self
            .client
            .get(self.children_url(block_id))
            .bearer_auth(token)
            .header("Notion-Version", &self.config.api_version);

        if let Some(size) = page_size {
            request = request.query(&[("page_size", size)]);
        }

        let response = request.send().await.map_err(NotionError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &text));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| NotionError::Parse(e.to_string()))
    }
}

/// Error body returned by Notion for non-2xx responses
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn api_error(status: u16, text: &str) -> NotionError {
    match serde_json::from_str::<NotionErrorBody>(text) {
        Ok(body) => NotionError::ApiError {
            status,
            code: body.code.unwrap_or_else(|| "unknown".to_string()),
            message: body.message.unwrap_or_else(|| text.to_string()),
        },
        Err(_) => NotionError::ApiError {
            status,
            code: "unknown".to_string(),
            message: text.to_string(),
        },
    }
}
