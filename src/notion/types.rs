//! Notion Block Types
//!
//! Only the parts of the block model that Folio renders are decoded.
//! Everything else on the wire (ids, timestamps, annotations) is ignored.

use serde::{Deserialize, Serialize};

/// Discriminator value for paragraph blocks
pub const PARAGRAPH_TYPE: &str = "paragraph";

/// A single block as returned by the "list child blocks" endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Block {
    /// Block type discriminator ("paragraph", "image", "heading_1", ...)
    #[serde(rename = "type")]
    pub block_type: String,
    /// Paragraph payload, present when `block_type == "paragraph"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<Paragraph>,
}

/// Paragraph payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Paragraph {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

/// A span of text inside a paragraph
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

impl Block {
    /// Create a paragraph block from text fragments
    pub fn paragraph<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            block_type: PARAGRAPH_TYPE.to_string(),
            paragraph: Some(Paragraph {
                rich_text: fragments
                    .into_iter()
                    .map(|text| RichText {
                        plain_text: text.into(),
                    })
                    .collect(),
            }),
        }
    }

    /// Create a block of any other type with no decoded payload
    pub fn other(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            paragraph: None,
        }
    }

    /// Whether this block is a paragraph
    pub fn is_paragraph(&self) -> bool {
        self.block_type == PARAGRAPH_TYPE
    }

    /// Concatenated plain text of a paragraph, in fragment order.
    ///
    /// Returns `None` for non-paragraph blocks.
    pub fn plain_text(&self) -> Option<String> {
        if !self.is_paragraph() {
            return None;
        }

        let text = self
            .paragraph
            .as_ref()
            .map(|p| {
                p.rich_text
                    .iter()
                    .map(|fragment| fragment.plain_text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_paragraph() {
        let json = r#"{
            "object": "block",
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "type": "paragraph",
            "has_children": false,
            "paragraph": {
                "rich_text": [
                    {"type": "text", "plain_text": "Hello ", "annotations": {"bold": true}},
                    {"type": "text", "plain_text": "world"}
                ],
                "color": "default"
            }
        }"#;

        let block: Block = serde_json::from_str(json).unwrap();
        assert!(block.is_paragraph());
        assert_eq!(block.plain_text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_deserialize_other_type_ignores_payload() {
        let json = r#"{"type": "image", "image": {"type": "external", "external": {"url": "x"}}}"#;

        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.block_type, "image");
        assert!(block.paragraph.is_none());
        assert_eq!(block.plain_text(), None);
    }

    #[test]
    fn test_paragraph_without_payload_has_empty_text() {
        let block = Block {
            block_type: PARAGRAPH_TYPE.to_string(),
            paragraph: None,
        };
        assert_eq!(block.plain_text().as_deref(), Some(""));
    }
}
