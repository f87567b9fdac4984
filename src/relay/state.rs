//! Application State
//!
//! Shared state accessible by all relay handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::notion::BlockSource;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where child blocks come from (the Notion client in production)
    pub source: Arc<dyn BlockSource>,
    /// Relay settings
    pub settings: Arc<RelaySettings>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(source: Arc<dyn BlockSource>, settings: RelaySettings) -> Self {
        Self {
            source,
            settings: Arc::new(settings),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Relay server settings
#[derive(Clone)]
pub struct RelaySettings {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Route the function is served on
    pub function_path: String,
    /// The one page whose children are served
    pub page_id: String,
    /// Optional bound on returned blocks
    pub page_size: Option<u32>,
    notion_token: Option<String>,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RelaySettings {
    /// Build settings from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.relay.host.clone(),
            port: config.relay.port,
            function_path: config.function_path(),
            page_id: config.notion.page_id.clone(),
            page_size: config.notion.page_size,
            notion_token: config.notion_token.clone(),
        }
    }

    /// Replace the Notion secret
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.notion_token = token;
        self
    }

    /// The Notion secret, if configured
    pub fn notion_token(&self) -> Option<&str> {
        self.notion_token.as_deref()
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelaySettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("function_path", &self.function_path)
            .field("page_id", &self.page_id)
            .field("page_size", &self.page_size)
            .field(
                "notion_token",
                &self.notion_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let settings = RelaySettings::default().with_token(Some("secret_abc".to_string()));
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("secret_abc"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_addr() {
        let settings = RelaySettings::default();
        assert_eq!(settings.addr(), "0.0.0.0:8083");
        assert_eq!(settings.function_path, "/functions/v1/notion-page");
    }
}
