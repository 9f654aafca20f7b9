//! Document tree produced by the markdown renderer.
//!
//! The model is flat: a document is a list of blocks, and every block holds
//! fully resolved inline spans. Blocks never nest.

/// An inline span inside a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

impl Span {
    /// The human-readable text carried by the span.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(s) | Span::Bold(s) | Span::Italic(s) => s,
            Span::Link { text, .. } => text,
            Span::Image { alt, .. } => alt,
        }
    }
}

/// A sequence of inline spans in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    pub spans: Vec<Span>,
}

impl TextRun {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Concatenated text of every span, markup stripped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, content: TextRun },
    Paragraph(TextRun),
    UnorderedList(Vec<TextRun>),
    OrderedList(Vec<TextRun>),
    Blockquote(TextRun),
    Image { alt: String, url: String },
    /// Vertical space left by a blank source line.
    Spacer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks that carry content, skipping spacer markers.
    pub fn content_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| !matches!(b, Block::Spacer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_strips_markup() {
        let run = TextRun::new(vec![
            Span::Bold("Hello".into()),
            Span::Text(", ".into()),
            Span::Link {
                text: "world".into(),
                url: "https://example.com".into(),
            },
        ]);
        assert_eq!(run.plain_text(), "Hello, world");
    }

    #[test]
    fn content_blocks_skip_spacers() {
        let doc = Document {
            blocks: vec![
                Block::Spacer,
                Block::Paragraph(TextRun::new(vec![Span::Text("a".into())])),
                Block::Spacer,
            ],
        };
        assert_eq!(doc.content_blocks().count(), 1);
    }

    #[test]
    fn heading_levels_are_ordered() {
        assert!(HeadingLevel::H1 < HeadingLevel::H3);
        assert_eq!(HeadingLevel::H2.as_u8(), 2);
    }
}
