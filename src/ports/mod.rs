//! Port traits implemented by [`crate::adapters`].

pub mod config_port;
pub mod document_port;
