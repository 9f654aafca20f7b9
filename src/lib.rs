//! portaldesk — markdown rendering and trading calculators for the company portal.
//!
//! Hexagonal architecture: pure logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
