//! Page Content
//!
//! Block model, relay envelope validation and rendering rules for the
//! Notion content card. Everything here is pure so it can be tested off
//! the browser.

use std::fmt;

/// Placeholder for a paragraph without any text
pub const EMPTY_PARAGRAPH: &str = "Empty paragraph";

/// Prefix of every user-facing load error
pub const ERROR_PREFIX: &str = "Failed to load content";

/// A Notion block; only paragraphs are decoded
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub paragraph: Option<Paragraph>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Paragraph {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// State of the content card
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Loading,
    Error(String),
    Empty,
    Loaded(Vec<Block>),
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

/// Raw reply from the relay function
#[derive(Clone, Debug, PartialEq)]
pub struct RelayReply {
    pub status: u16,
    pub body: String,
}

/// Why a load attempt failed
#[derive(Clone, Debug, PartialEq)]
pub enum LoadError {
    /// Timer won the race; carries the bound in milliseconds
    Timeout(u32),
    Transport(String),
    Status { status: u16, detail: String },
    Relay(String),
    Malformed(String),
    Internal(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Timeout(ms) if ms % 1000 == 0 => {
                write!(f, "Request timed out after {} seconds", ms / 1000)
            }
            LoadError::Timeout(ms) => write!(f, "Request timed out after {} milliseconds", ms),
            LoadError::Transport(e) => write!(f, "Network error: {}", e),
            LoadError::Status { status, detail } => {
                write!(f, "Relay returned {}: {}", status, detail)
            }
            LoadError::Relay(detail) => write!(f, "{}", detail),
            LoadError::Malformed(detail) => write!(f, "Invalid response format: {}", detail),
            LoadError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl LoadError {
    /// Message shown in the alert and the error toast
    pub fn user_message(&self) -> String {
        format!("{}: {}", ERROR_PREFIX, self)
    }
}

/// Validate a relay reply. Only a body with a `results` array succeeds,
/// whatever the HTTP status.
pub fn interpret(reply: &RelayReply) -> Result<Vec<Block>, LoadError> {
    let success = (200..300).contains(&reply.status);
    let parsed: Option<serde_json::Value> = serde_json::from_str(&reply.body).ok();

    if let Some(detail) = parsed.as_ref().and_then(error_detail) {
        return Err(if success {
            LoadError::Relay(detail)
        } else {
            LoadError::Status {
                status: reply.status,
                detail,
            }
        });
    }

    if !success {
        return Err(LoadError::Status {
            status: reply.status,
            detail: if reply.body.trim().is_empty() {
                "no response body".to_string()
            } else {
                reply.body.trim().to_string()
            },
        });
    }

    let results = parsed
        .as_ref()
        .and_then(|body| body.get("results"))
        .ok_or_else(|| LoadError::Malformed("missing `results` field".to_string()))?;

    if !results.is_array() {
        return Err(LoadError::Malformed("`results` is not an array".to_string()));
    }

    serde_json::from_value(results.clone())
        .map_err(|e| LoadError::Malformed(format!("invalid block: {}", e)))
}

fn error_detail(body: &serde_json::Value) -> Option<String> {
    let error = match body.get("error")? {
        serde_json::Value::Null => return None,
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| serde_json::Value::Object(obj.clone()).to_string()),
        other => other.to_string(),
    };

    match body.get("message").and_then(|m| m.as_str()) {
        Some(message) if !message.is_empty() && message != error => {
            Some(format!("{} ({})", error, message))
        }
        _ => Some(error),
    }
}

/// One rendered unit per block
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderedBlock {
    Paragraph(String),
    EmptyParagraph,
    Unsupported(String),
}

impl RenderedBlock {
    pub fn text(&self) -> String {
        match self {
            RenderedBlock::Paragraph(text) => text.clone(),
            RenderedBlock::EmptyParagraph => EMPTY_PARAGRAPH.to_string(),
            RenderedBlock::Unsupported(t) => format!("Unsupported block type: {}", t),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        !matches!(self, RenderedBlock::Paragraph(_))
    }
}

/// Render blocks in relay order
pub fn render_blocks(blocks: &[Block]) -> Vec<RenderedBlock> {
    blocks
        .iter()
        .map(|block| {
            if block.block_type != "paragraph" {
                return RenderedBlock::Unsupported(block.block_type.clone());
            }

            let text: String = block
                .paragraph
                .iter()
                .flat_map(|p| p.rich_text.iter())
                .map(|fragment| fragment.plain_text.as_str())
                .collect();

            if text.is_empty() {
                RenderedBlock::EmptyParagraph
            } else {
                RenderedBlock::Paragraph(text)
            }
        })
        .collect()
}
