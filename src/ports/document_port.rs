//! Document output port trait.

use crate::domain::document::Document;

/// Walks a rendered [`Document`] into a presentation format.
pub trait DocumentPort {
    /// Short name of the output format, e.g. `html`.
    fn format_name(&self) -> &'static str;

    fn render(&self, document: &Document) -> String;
}
