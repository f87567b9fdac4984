//! Relay Transport
//!
//! The loader reaches the relay through [`RelayTransport`]. [`HttpRelay`] is
//! the reqwest implementation; it sends the same headers a browser client of
//! the function would (`apikey`, bearer token, `x-client-info`).

use async_trait::async_trait;
use reqwest::Client;

use super::error::LoadError;

/// Raw relay reply before validation
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReply {
    pub status: u16,
    pub body: String,
}

impl RelayReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One invocation of the content relay
#[async_trait]
pub trait RelayTransport: Send + Sync + 'static {
    async fn invoke(&self) -> Result<RelayReply, LoadError>;
}

/// HTTP transport to a running relay
pub struct HttpRelay {
    client: Client,
    url: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl HttpRelay {
    /// Create a transport for the function at `url`.
    ///
    /// No client-side timeout is set here: the loader bounds each attempt.
    pub fn new(url: impl Into<String>) -> Result<Self, LoadError> {
        let client = Client::builder()
            .user_agent(concat!("Folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LoadError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: None,
            access_token: None,
        })
    }

    /// Public API key sent as `apikey`
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// User access token; falls back to the API key as bearer when unset
    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RelayTransport for HttpRelay {
    async fn invoke(&self) -> Result<RelayReply, LoadError> {
        let mut request = self
            .client
            .post(&self.url)
            .header("x-client-info", concat!("folio/", env!("CARGO_PKG_VERSION")));

        if let Some(key) = &self.api_key {
            request = request.header("apikey", key);
        }
        if let Some(token) = self.access_token.as_ref().or(self.api_key.as_ref()) {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(RelayReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_success_range() {
        let reply = |status| RelayReply {
            status,
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(301).is_success());
        assert!(!reply(500).is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let relay = HttpRelay::new(format!("http://{}/functions/v1/notion-page", addr)).unwrap();
        let err = relay.invoke().await.unwrap_err();
        assert!(matches!(err, LoadError::Transport(_)));
    }
}
