//! Inline span parsing for text runs.
//!
//! Four patterns (bold, italic, image, link) are scanned independently over the
//! whole run. Their matches are merged by start offset and the run is walked
//! once, emitting literal text between matches. A match that starts inside an
//! earlier one is dropped, so nested markup stays literal inside its span.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::document::{Span, TextRun};

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.+?)_").expect("italic pattern is valid"));
static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern is valid")
});
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid")
});

struct InlineMatch {
    start: usize,
    end: usize,
    span: Span,
}

fn collect<F>(pattern: &Regex, text: &str, build: F, out: &mut Vec<InlineMatch>)
where
    F: Fn(&Captures<'_>) -> Span,
{
    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push(InlineMatch {
            start: whole.start(),
            end: whole.end(),
            span: build(&caps),
        });
    }
}

fn group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Parse a run of inline markup into spans, in source order.
///
/// Never fails: unclosed markers and broken link syntax come back as
/// [`Span::Text`].
pub fn parse_inline(text: &str) -> TextRun {
    let mut matches = Vec::new();
    collect(&BOLD, text, |c| Span::Bold(group(c, 1)), &mut matches);
    collect(&ITALIC, text, |c| Span::Italic(group(c, 1)), &mut matches);
    collect(
        &IMAGE,
        text,
        |c| Span::Image {
            alt: group(c, 1),
            url: group(c, 2),
        },
        &mut matches,
    );
    collect(
        &LINK,
        text,
        |c| Span::Link {
            text: group(c, 1),
            url: group(c, 2),
        },
        &mut matches,
    );

    // Ties on start go to the longer match.
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut spans = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0;
    for m in matches {
        if m.start < cursor {
            continue;
        }
        if m.start > cursor {
            spans.push(Span::Text(text[cursor..m.start].to_string()));
        }
        spans.push(m.span);
        cursor = m.end;
    }
    if cursor < text.len() {
        spans.push(Span::Text(text[cursor..].to_string()));
    }

    TextRun::new(spans)
}
