use thiserror::Error;

/// Errors that can occur when communicating with the Notion API
#[derive(Error, Debug)]
pub enum NotionError {
    #[error("Notion API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status} ({code}): {message}")]
    ApiError {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Invalid response: {0}")]
    Parse(String),
}

impl NotionError {
    /// Map a reqwest transport error onto the matching variant
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NotionError::Timeout
        } else if e.is_connect() {
            NotionError::Unavailable
        } else {
            NotionError::Request(e)
        }
    }
}
