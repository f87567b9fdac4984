//! Folio Relay Server
//!
//! Run with: cargo run --bin folio-relay
//!
//! # Configuration
//!
//! Read from `config.toml` in the usual locations (see `folio config`),
//! then overridden by the environment:
//! - `NOTION_TOKEN`: Notion integration secret (required to serve content)
//! - `FOLIO_RELAY_HOST`: Host to bind to (default: 0.0.0.0)
//! - `FOLIO_RELAY_PORT`: Port to listen on (default: 8083)
//! - `FOLIO_NOTION_PAGE_ID`: Page to serve
//! - `RUST_LOG`: Log filter (default: folio=info)

use folio::config::Config;
use folio::notion::NotionClient;
use folio::relay::{serve, AppState, RelaySettings};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    folio::logging::init(&config.logging);

    tracing::info!("Starting Folio relay v{}", env!("CARGO_PKG_VERSION"));

    let settings = RelaySettings::from_config(&config);
    if settings.notion_token().is_none() {
        tracing::warn!(
            "NOTION_TOKEN is not set; every function call will return a configuration error"
        );
    }
    tracing::info!("Serving page {}", settings.page_id);

    let client = NotionClient::new((&config.notion).into())?;
    let state = AppState::new(Arc::new(client), settings.clone());

    serve(state, &settings).await?;

    tracing::info!("Folio relay stopped");
    Ok(())
}
