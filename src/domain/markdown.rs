//! Line-oriented markdown renderer.
//!
//! Single forward pass over the input lines. Consecutive list items of the same
//! kind accumulate into one list; any line that is not an item of the open list
//! flushes it first. Classification order per trimmed line:
//!
//! blank, `### `, `## `, `# `, `- `, `N. `, `> `, standalone image, paragraph.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::document::{Block, Document, HeadingLevel, TextRun};
use crate::domain::inline::parse_inline;

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").expect("ordered item pattern is valid"));
static STANDALONE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)$").expect("image line pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Classification of a single trimmed line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading(HeadingLevel, &'a str),
    Item(ListKind, &'a str),
    Quote(&'a str),
    Image { alt: &'a str, url: &'a str },
    Paragraph(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return Line::Heading(HeadingLevel::H3, rest);
    }
    // Each level guards against the next longer prefix.
    match line.strip_prefix("## ") {
        Some(rest) if !line.starts_with("### ") => {
            return Line::Heading(HeadingLevel::H2, rest);
        }
        _ => {}
    }
    match line.strip_prefix("# ") {
        Some(rest) if !line.starts_with("## ") => {
            return Line::Heading(HeadingLevel::H1, rest);
        }
        _ => {}
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return Line::Item(ListKind::Unordered, rest);
    }
    if let Some(m) = ORDERED_ITEM.find(line) {
        return Line::Item(ListKind::Ordered, &line[m.end()..]);
    }
    if let Some(rest) = line.strip_prefix("> ") {
        return Line::Quote(rest);
    }
    if let Some(caps) = STANDALONE_IMAGE.captures(line) {
        let alt = caps.get(1).map_or("", |m| m.as_str());
        let url = caps.get(2).map_or("", |m| m.as_str());
        return Line::Image { alt, url };
    }
    Line::Paragraph(line)
}

struct OpenList {
    kind: ListKind,
    items: Vec<TextRun>,
}

struct Renderer {
    blocks: Vec<Block>,
    open: Option<OpenList>,
}

impl Renderer {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            open: None,
        }
    }

    fn flush_list(&mut self) {
        if let Some(list) = self.open.take() {
            let block = match list.kind {
                ListKind::Unordered => Block::UnorderedList(list.items),
                ListKind::Ordered => Block::OrderedList(list.items),
            };
            self.blocks.push(block);
        }
    }

    fn push_item(&mut self, kind: ListKind, content: &str) {
        if self.open.as_ref().is_some_and(|l| l.kind != kind) {
            self.flush_list();
        }
        self.open
            .get_or_insert_with(|| OpenList {
                kind,
                items: Vec::new(),
            })
            .items
            .push(parse_inline(content));
    }

    fn push_block(&mut self, block: Block) {
        self.flush_list();
        self.blocks.push(block);
    }

    fn feed(&mut self, raw: &str) {
        match classify(raw.trim()) {
            Line::Blank => self.push_block(Block::Spacer),
            Line::Heading(level, rest) => self.push_block(Block::Heading {
                level,
                content: parse_inline(rest),
            }),
            Line::Item(kind, rest) => self.push_item(kind, rest),
            Line::Quote(rest) => self.push_block(Block::Blockquote(parse_inline(rest))),
            Line::Image { alt, url } => self.push_block(Block::Image {
                alt: alt.to_string(),
                url: url.to_string(),
            }),
            Line::Paragraph(text) => self.push_block(Block::Paragraph(parse_inline(text))),
        }
    }

    fn finish(mut self) -> Document {
        self.flush_list();
        Document {
            blocks: self.blocks,
        }
    }
}

/// Render marked-up text into a [`Document`].
///
/// Deterministic and total: every input produces a tree, unrecognised markup
/// falls through as literal text.
pub fn render(text: &str) -> Document {
    let mut renderer = Renderer::new();
    for line in text.split('\n') {
        renderer.feed(line);
    }
    renderer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Span;

    fn run(s: &str) -> TextRun {
        TextRun::new(vec![Span::Text(s.to_string())])
    }

    #[test]
    fn heading_levels_are_exclusive() {
        assert_eq!(classify("# A"), Line::Heading(HeadingLevel::H1, "A"));
        assert_eq!(classify("## A"), Line::Heading(HeadingLevel::H2, "A"));
        assert_eq!(classify("### A"), Line::Heading(HeadingLevel::H3, "A"));
    }

    #[test]
    fn deeper_hashes_are_paragraphs() {
        assert_eq!(classify("#### A"), Line::Paragraph("#### A"));
        assert_eq!(classify("#A"), Line::Paragraph("#A"));
    }

    #[test]
    fn ordered_item_strips_number() {
        assert_eq!(classify("12. twelve"), Line::Item(ListKind::Ordered, "twelve"));
        assert_eq!(classify("1."), Line::Paragraph("1."));
    }

    #[test]
    fn ordered_item_needs_ascii_digits() {
        assert_eq!(classify("١. item"), Line::Paragraph("١. item"));
        assert_eq!(classify("３. item"), Line::Paragraph("３. item"));
    }

    #[test]
    fn standalone_image_needs_whole_line() {
        assert_eq!(
            classify("![chart](/c.png)"),
            Line::Image {
                alt: "chart",
                url: "/c.png"
            }
        );
        assert_eq!(
            classify("![chart](/c.png) caption"),
            Line::Paragraph("![chart](/c.png) caption")
        );
    }

    #[test]
    fn switching_list_kind_flushes() {
        let doc = render("- a\n- b\n1. c");
        assert_eq!(
            doc.blocks,
            vec![
                Block::UnorderedList(vec![run("a"), run("b")]),
                Block::OrderedList(vec![run("c")]),
            ]
        );
    }

    #[test]
    fn paragraph_flushes_open_list() {
        let doc = render("1. one\n2. two\nafter");
        assert_eq!(
            doc.blocks,
            vec![
                Block::OrderedList(vec![run("one"), run("two")]),
                Block::Paragraph(run("after")),
            ]
        );
    }

    #[test]
    fn blank_line_flushes_and_emits_spacer() {
        let doc = render("- a\n\n- b");
        assert_eq!(
            doc.blocks,
            vec![
                Block::UnorderedList(vec![run("a")]),
                Block::Spacer,
                Block::UnorderedList(vec![run("b")]),
            ]
        );
    }

    #[test]
    fn list_open_at_end_is_flushed() {
        let doc = render("intro\n- last");
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[1], Block::UnorderedList(vec![run("last")]));
    }

    #[test]
    fn blockquote_and_heading_parse_inline() {
        let doc = render("> **note** here\n## Title _x_");
        assert_eq!(
            doc.blocks[0],
            Block::Blockquote(TextRun::new(vec![
                Span::Bold("note".into()),
                Span::Text(" here".into()),
            ]))
        );
        assert_eq!(
            doc.blocks[1],
            Block::Heading {
                level: HeadingLevel::H2,
                content: TextRun::new(vec![
                    Span::Text("Title ".into()),
                    Span::Italic("x".into()),
                ]),
            }
        );
    }

    #[test]
    fn lines_are_trimmed_before_classification() {
        let doc = render("   # Indented\r\n\t- item  ");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: HeadingLevel::H1,
                    content: run("Indented"),
                },
                Block::UnorderedList(vec![run("item")]),
            ]
        );
    }

    #[test]
    fn empty_input_is_single_spacer() {
        assert_eq!(render("").blocks, vec![Block::Spacer]);
    }
}
