//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod loading;
pub mod nav;
pub mod notion_content;
pub mod toast;

pub use loading::{Loading, ParagraphSkeleton};
pub use nav::Nav;
pub use notion_content::NotionContent;
pub use toast::Toast;
