//! Concrete adapter implementations for ports, plus output formatting.

pub mod chart_svg;
pub mod csv_series_adapter;
pub mod display;
pub mod file_config_adapter;
pub mod html_document_adapter;
pub mod text_document_adapter;
