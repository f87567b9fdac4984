//! Notion Integration
//!
//! Minimal client for the one Notion operation Folio needs: listing the
//! child blocks of a page.
//!
//! ## Architecture
//!
//! - **Types**: the block model shared by the relay and the loader
//! - **Client**: REST client for `GET /v1/blocks/{id}/children`
//! - **BlockSource**: the seam the relay calls, so tests can swap in doubles

mod client;
mod error;
mod types;

pub use client::{BlockSource, NotionClient, NotionClientConfig, NOTION_API_VERSION};
pub use error::NotionError;
pub use types::{Block, Paragraph, RichText, PARAGRAPH_TYPE};

#[cfg(test)]
pub(crate) mod testing;
