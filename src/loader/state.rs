use crate::notion::Block;

/// Where a load cycle currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// A request is in flight
    Loading,
    /// The last attempt failed; carries the user-facing message
    Error(String),
    /// The relay answered with zero blocks
    Empty,
    /// The relay answered with at least one block, in relay order
    Loaded(Vec<Block>),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error(_))
    }

    /// Error message, if this is the error state
    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Loaded blocks; empty for every other state
    pub fn blocks(&self) -> &[Block] {
        match self {
            LoadState::Loaded(blocks) => blocks,
            _ => &[],
        }
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Error(_) => "error",
            LoadState::Empty => "empty",
            LoadState::Loaded(_) => "loaded",
        }
    }
}

impl From<Vec<Block>> for LoadState {
    fn from(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Loaded(blocks)
        }
    }
}
