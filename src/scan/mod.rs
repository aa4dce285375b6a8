//! Scan module - Filesystem traversal and capture
//!
//! Provides:
//! - ignore: fixed rule set excluding entries from traversal
//! - classify: text/binary classification and content capture
//! - walker: recursive traversal producing the ScanResult

pub mod classify;
pub mod ignore;
pub mod walker;

pub use walker::{scan_tree, ScanError};
