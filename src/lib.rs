//! # Folio
//!
//! Shows one Notion page on a signed-in dashboard.
//!
//! ## Modules
//!
//! - [`relay`]: Axum service that holds the Notion secret and serves the
//!   page's child blocks to browsers
//! - [`notion`]: Notion block model and REST client
//! - [`loader`]: Fetch-render-retry cycle against the relay
//! - [`session`]: Explicit session value and auth provider
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use folio::loader::{ContentLoader, HttpRelay, LogNotifier, render_text};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let relay = HttpRelay::new("http://localhost:8083/functions/v1/notion-page")?;
//!     let mut loader = ContentLoader::new(Arc::new(relay), Arc::new(LogNotifier));
//!
//!     let state = loader.load().await;
//!     println!("{}", render_text(state.blocks()));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod loader;
pub mod logging;
pub mod notion;
pub mod relay;
pub mod session;

pub use config::{Config, ConfigError, LoaderConfig, LoggingConfig, NotionConfig, RelayConfig};

pub use notion::{Block, BlockSource, NotionClient, NotionClientConfig, NotionError};

pub use relay::{build_router, serve, AppState, RelayError, RelaySettings};

pub use loader::{ContentLoader, HttpRelay, LoadError, LoadState, RelayTransport};

pub use session::{AuthProvider, Session, SessionError, SupabaseAuth, User, View};
