//! Plain-text output adapter implementing DocumentPort.

use crate::domain::document::{Block, Document, HeadingLevel, Span, TextRun};
use crate::ports::document_port::DocumentPort;

fn run_text(run: &TextRun) -> String {
    run.spans
        .iter()
        .map(|span| match span {
            Span::Link { text, url } => format!("{text} <{url}>"),
            Span::Image { alt, .. } => format!("[image: {alt}]"),
            other => other.text().to_string(),
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct TextDocumentAdapter;

impl TextDocumentAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentPort for TextDocumentAdapter {
    fn format_name(&self) -> &'static str {
        "text"
    }

    fn render(&self, document: &Document) -> String {
        let mut out = String::new();
        for block in &document.blocks {
            match block {
                Block::Heading { level, content } => {
                    let title = run_text(content);
                    let width = title.chars().count();
                    out.push_str(&title);
                    out.push('\n');
                    match level {
                        HeadingLevel::H1 => out.push_str(&"=".repeat(width)),
                        HeadingLevel::H2 => out.push_str(&"-".repeat(width)),
                        HeadingLevel::H3 => out.push_str(&"~".repeat(width)),
                    }
                    out.push('\n');
                }
                Block::Paragraph(run) => {
                    out.push_str(&run_text(run));
                    out.push('\n');
                }
                Block::UnorderedList(items) => {
                    for item in items {
                        out.push_str(&format!("  * {}\n", run_text(item)));
                    }
                }
                Block::OrderedList(items) => {
                    for (i, item) in items.iter().enumerate() {
                        out.push_str(&format!("  {}. {}\n", i + 1, run_text(item)));
                    }
                }
                Block::Blockquote(run) => {
                    out.push_str(&format!("> {}\n", run_text(run)));
                }
                Block::Image { alt, .. } => {
                    out.push_str(&format!("[image: {alt}]\n"));
                }
                Block::Spacer => out.push('\n'),
            }
        }
        out
    }
}
