//! Block Rendering
//!
//! Pure, order-preserving conversion of blocks into display units, with
//! plain-text and HTML output. Only paragraphs are rendered as content;
//! every other block type becomes a placeholder.

use crate::notion::Block;

/// Placeholder for a paragraph without any text
pub const EMPTY_PARAGRAPH: &str = "Empty paragraph";

/// One rendered unit, one per input block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBlock {
    /// Paragraph text, fragments concatenated in order
    Paragraph(String),
    /// Paragraph whose fragments carried no text
    EmptyParagraph,
    /// Any non-paragraph block, by type name
    Unsupported(String),
}

impl RenderedBlock {
    /// Render a single block
    pub fn from_block(block: &Block) -> Self {
        match block.plain_text() {
            Some(text) if text.is_empty() => RenderedBlock::EmptyParagraph,
            Some(text) => RenderedBlock::Paragraph(text),
            None => RenderedBlock::Unsupported(block.block_type.clone()),
        }
    }

    /// Text shown for this unit
    pub fn text(&self) -> String {
        match self {
            RenderedBlock::Paragraph(text) => text.clone(),
            RenderedBlock::EmptyParagraph => EMPTY_PARAGRAPH.to_string(),
            RenderedBlock::Unsupported(block_type) => {
                format!("Unsupported block type: {}", block_type)
            }
        }
    }

    /// Whether this unit is a placeholder rather than page content
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, RenderedBlock::Paragraph(_))
    }

    pub fn to_html(&self) -> String {
        let class = if self.is_placeholder() {
            "mb-4 text-gray-400 italic"
        } else {
            "mb-4 text-gray-700"
        };
        format!("<p class=\"{}\">{}</p>", class, escape_html(&self.text()))
    }
}

/// Render blocks in order
pub fn render_blocks(blocks: &[Block]) -> Vec<RenderedBlock> {
    blocks.iter().map(RenderedBlock::from_block).collect()
}

/// Render blocks as an HTML fragment
pub fn render_html(blocks: &[Block]) -> String {
    let mut html = String::from("<div class=\"prose prose-slate max-w-none\">\n");
    for rendered in render_blocks(blocks) {
        html.push_str("  ");
        html.push_str(&rendered.to_html());
        html.push('\n');
    }
    html.push_str("</div>\n");
    html
}

/// Render blocks as plain text, one unit per paragraph
pub fn render_text(blocks: &[Block]) -> String {
    render_blocks(blocks)
        .iter()
        .map(RenderedBlock::text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_concatenates_fragments() {
        let block = Block::paragraph(["Hello, ", "brave ", "world"]);
        assert_eq!(
            RenderedBlock::from_block(&block),
            RenderedBlock::Paragraph("Hello, brave world".to_string())
        );
    }

    #[test]
    fn test_empty_paragraph_placeholder() {
        let no_fragments = Block::paragraph(Vec::<String>::new());
        let blank_fragments = Block::paragraph(["", ""]);

        assert_eq!(RenderedBlock::from_block(&no_fragments), RenderedBlock::EmptyParagraph);
        assert_eq!(RenderedBlock::from_block(&blank_fragments), RenderedBlock::EmptyParagraph);
        assert_eq!(RenderedBlock::EmptyParagraph.text(), "Empty paragraph");
    }

    #[test]
    fn test_unsupported_placeholder() {
        let rendered = RenderedBlock::from_block(&Block::other("image"));
        assert_eq!(rendered.text(), "Unsupported block type: image");
        assert!(rendered.is_placeholder());
    }

    #[test]
    fn test_order_and_count_preserved() {
        let blocks = vec![
            Block::paragraph(["one"]),
            Block::other("divider"),
            Block::paragraph(["two"]),
            Block::paragraph(Vec::<String>::new()),
            Block::other("to_do"),
        ];

        let rendered = render_blocks(&blocks);
        assert_eq!(rendered.len(), blocks.len());
        assert_eq!(
            rendered.iter().map(RenderedBlock::text).collect::<Vec<_>>(),
            [
                "one",
                "Unsupported block type: divider",
                "two",
                "Empty paragraph",
                "Unsupported block type: to_do"
            ]
        );
    }

    #[test]
    fn test_html_escapes_text() {
        let html = RenderedBlock::Paragraph("<b>Tom & \"Jerry\"</b>".to_string()).to_html();
        assert_eq!(
            html,
            "<p class=\"mb-4 text-gray-700\">&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;</p>"
        );
    }

    #[test]
    fn test_render_html_wraps_blocks() {
        let html = render_html(&[Block::paragraph(["Hello"])]);
        assert!(html.starts_with("<div class=\"prose prose-slate max-w-none\">"));
        assert_eq!(html.matches("<p ").count(), 1);
        assert!(html.contains(">Hello</p>"));
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&[Block::paragraph(["a"]), Block::other("image")]);
        assert_eq!(text, "a\n\nUnsupported block type: image");
    }
}
