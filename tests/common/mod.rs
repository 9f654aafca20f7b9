#![allow(dead_code)]

use portaldesk::domain::document::{Block, Document, Span, TextRun};
use portaldesk::domain::risk::{PayoffMode, RiskInput};
use std::io::Write;

pub fn text_run(s: &str) -> TextRun {
    TextRun::new(vec![Span::Text(s.to_string())])
}

pub fn headings(doc: &Document) -> Vec<(u8, String)> {
    doc.blocks
        .iter()
        .filter_map(|b| match b {
            Block::Heading { level, content } => Some((level.as_u8(), content.plain_text())),
            _ => None,
        })
        .collect()
}

pub fn risk_input(payoff: PayoffMode) -> RiskInput {
    RiskInput {
        capital: 2000.0,
        win_rate: 0.55,
        months: 2.0,
        weeks_per_month: 4.0,
        days_per_week: 5.0,
        operations_per_day: 3.0,
        payoff,
    }
}

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// `ExitCode` has no `PartialEq`; compare through its debug form.
pub fn same_exit_code(a: std::process::ExitCode, b: std::process::ExitCode) -> bool {
    format!("{a:?}") == format!("{b:?}")
}
