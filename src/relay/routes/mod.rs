//! Relay Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod notion_page;
