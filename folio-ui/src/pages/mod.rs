//! Pages

pub mod auth;
pub mod index;

pub use auth::Auth;
pub use index::Index;
