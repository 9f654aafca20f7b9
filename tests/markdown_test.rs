//! Renderer integration tests.
//!
//! Tests cover:
//! - Block classification (heading levels, lists, quotes, images)
//! - List flushing across kinds and blank lines
//! - Inline span ordering and literal fallback
//! - Totality and determinism over arbitrary input

mod common;

use common::*;
use portaldesk::adapters::html_document_adapter::HtmlDocumentAdapter;
use portaldesk::domain::document::{Block, HeadingLevel, Span, TextRun};
use portaldesk::domain::markdown::render;
use portaldesk::ports::document_port::DocumentPort;
use proptest::prelude::*;

mod blocks {
    use super::*;

    #[test]
    fn each_heading_prefix_yields_one_level() {
        for (line, level) in [("# A", 1u8), ("## A", 2), ("### A", 3)] {
            let doc = render(line);
            assert_eq!(doc.blocks.len(), 1, "{line}");
            assert_eq!(headings(&doc), vec![(level, "A".to_string())]);
        }
    }

    #[test]
    fn list_kind_switch_produces_two_lists() {
        let doc = render("- a\n- b\n1. c");
        assert_eq!(
            doc.blocks,
            vec![
                Block::UnorderedList(vec![text_run("a"), text_run("b")]),
                Block::OrderedList(vec![text_run("c")]),
            ]
        );
    }

    #[test]
    fn newsletter_document() {
        let source = "\
# Newsletter
Welcome to the **monthly** update.

## Highlights
- New _benefits_ portal
- [HR tickets](https://portal.test/hr)
1. Submit evaluation
2. Book training

> Deadline is Friday
![team](/img/team.jpg)
";
        let doc = render(source);
        let kinds: Vec<&str> = doc
            .blocks
            .iter()
            .map(|b| match b {
                Block::Heading { .. } => "heading",
                Block::Paragraph(_) => "paragraph",
                Block::UnorderedList(_) => "ul",
                Block::OrderedList(_) => "ol",
                Block::Blockquote(_) => "quote",
                Block::Image { .. } => "image",
                Block::Spacer => "spacer",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "heading", "paragraph", "spacer", "heading", "ul", "ol", "spacer", "quote",
                "image", "spacer"
            ]
        );
        assert_eq!(
            headings(&doc),
            vec![(1, "Newsletter".into()), (2, "Highlights".into())]
        );
        match &doc.blocks[4] {
            Block::UnorderedList(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(
                    items[1].spans,
                    vec![Span::Link {
                        text: "HR tickets".into(),
                        url: "https://portal.test/hr".into()
                    }]
                );
            }
            other => panic!("expected unordered list, got {other:?}"),
        }
    }

    #[test]
    fn heading_content_is_inline_parsed() {
        let doc = render("### **Q3** results");
        assert_eq!(
            doc.blocks,
            vec![Block::Heading {
                level: HeadingLevel::H3,
                content: TextRun::new(vec![
                    Span::Bold("Q3".into()),
                    Span::Text(" results".into())
                ]),
            }]
        );
    }
}

mod inline {
    use super::*;

    #[test]
    fn spans_in_source_order() {
        let doc = render("**bold** and _italic_ and [text](url)");
        let Block::Paragraph(run) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            run.spans,
            vec![
                Span::Bold("bold".into()),
                Span::Text(" and ".into()),
                Span::Italic("italic".into()),
                Span::Text(" and ".into()),
                Span::Link {
                    text: "text".into(),
                    url: "url".into()
                },
            ]
        );
    }

    #[test]
    fn truncated_markup_is_literal() {
        let doc = render("see [the doc](https://x");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph(text_run("see [the doc](https://x"))]
        );
    }
}

mod html_output {
    use super::*;

    #[test]
    fn renders_full_document() {
        let html = HtmlDocumentAdapter::new().render(&render("# Hi\n- **a**\n> q"));
        assert_eq!(
            html,
            "<h1>Hi</h1>\n<ul>\n  <li><strong>a</strong></li>\n</ul>\n<blockquote>q</blockquote>\n"
        );
    }
}

proptest! {
    #[test]
    fn render_is_total_and_deterministic(text in "\\PC{0,200}") {
        let first = render(&text);
        let second = render(&text);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn markup_heavy_input_never_panics(text in "[#>\\-*_!\\[\\]()0-9. a-z\n]{0,120}") {
        let doc = render(&text);
        for block in &doc.blocks {
            if let Block::UnorderedList(items) | Block::OrderedList(items) = block {
                prop_assert!(!items.is_empty());
            }
        }
    }

    #[test]
    fn plain_words_round_trip_as_text(words in "[a-z]{1,10}( [a-z]{1,10}){0,8}") {
        let doc = render(&words);
        prop_assert_eq!(doc.blocks, vec![Block::Paragraph(text_run(&words))]);
    }
}
