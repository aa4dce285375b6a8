//! Report module - Summary derivation and paginated rendering
//!
//! Provides:
//! - summary: derived statistics and top-10 rankings
//! - layout: page-break state machine and line truncation
//! - render: the paginated report document and its atomic writer

pub mod layout;
pub mod render;
pub mod summary;
