//! HTML output adapter implementing DocumentPort.

use crate::domain::document::{Block, Document, Span, TextRun};
use crate::ports::document_port::DocumentPort;

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_span(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => out.push_str(&escape_html(text)),
        Span::Bold(text) => {
            out.push_str("<strong>");
            out.push_str(&escape_html(text));
            out.push_str("</strong>");
        }
        Span::Italic(text) => {
            out.push_str("<em>");
            out.push_str(&escape_html(text));
            out.push_str("</em>");
        }
        Span::Link { text, url } => {
            out.push_str(&format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(url),
                escape_html(text)
            ));
        }
        Span::Image { alt, url } => {
            out.push_str(&format!(
                r#"<img src="{}" alt="{}">"#,
                escape_html(url),
                escape_html(alt)
            ));
        }
    }
}

fn render_run(run: &TextRun) -> String {
    let mut out = String::new();
    for span in &run.spans {
        render_span(span, &mut out);
    }
    out
}

fn render_items(tag: &str, items: &[TextRun], out: &mut String) {
    out.push_str(&format!("<{tag}>\n"));
    for item in items {
        out.push_str(&format!("  <li>{}</li>\n", render_run(item)));
    }
    out.push_str(&format!("</{tag}>\n"));
}

#[derive(Debug, Default)]
pub struct HtmlDocumentAdapter;

impl HtmlDocumentAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentPort for HtmlDocumentAdapter {
    fn format_name(&self) -> &'static str {
        "html"
    }

    fn render(&self, document: &Document) -> String {
        let mut out = String::new();
        for block in &document.blocks {
            match block {
                Block::Heading { level, content } => {
                    let n = level.as_u8();
                    out.push_str(&format!("<h{n}>{}</h{n}>\n", render_run(content)));
                }
                Block::Paragraph(run) => {
                    out.push_str(&format!("<p>{}</p>\n", render_run(run)));
                }
                Block::UnorderedList(items) => render_items("ul", items, &mut out),
                Block::OrderedList(items) => render_items("ol", items, &mut out),
                Block::Blockquote(run) => {
                    out.push_str(&format!("<blockquote>{}</blockquote>\n", render_run(run)));
                }
                Block::Image { alt, url } => {
                    out.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\">\n",
                        escape_html(url),
                        escape_html(alt)
                    ));
                }
                Block::Spacer => out.push_str("<br>\n"),
            }
        }
        out
    }
}
