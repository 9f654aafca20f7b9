//! Core domain types and logic.

pub mod document;
pub mod inline;
pub mod markdown;
pub mod numeric;
pub mod compound;
pub mod risk;
pub mod lots;
pub mod error;
