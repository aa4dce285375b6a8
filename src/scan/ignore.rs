//! Ignore filter
//!
//! A fixed, declared rule set deciding which filesystem entries are excluded
//! from a scan. Matching is by base name only, case-sensitive, and identical
//! for files and directories; a matching directory prunes its whole subtree.

use glob::Pattern;
use once_cell::sync::Lazy;

/// Default file name for the structured snapshot artifact
pub const DEFAULT_SNAPSHOT_NAME: &str = "codebase-snapshot.json";

/// Default file name for the rendered report artifact
pub const DEFAULT_REPORT_NAME: &str = "codebase-report.txt";

/// Exact entry names that are always excluded.
///
/// Includes the artifacts this tool writes into the scanned root, so
/// repeated runs never re-ingest their own prior output.
const IGNORED_NAMES: &[&str] = &[
    "node_modules",
    ".git",
    ".vscode",
    "dist",
    "build",
    ".env",
    ".DS_Store",
    "Thumbs.db",
    "package-lock.json",
    "README.md",
    DEFAULT_SNAPSHOT_NAME,
    DEFAULT_REPORT_NAME,
];

/// Wildcard rules matched against the base name (single '*' matching any
/// substring).
const IGNORED_PATTERNS: &[&str] = &["*.log"];

static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    IGNORED_PATTERNS
        .iter()
        .map(|p| Pattern::new(p).expect("ignore pattern constants are valid"))
        .collect()
});

/// Whether an entry with this base name is excluded from traversal and from
/// the result entirely
pub fn is_ignored(name: &str) -> bool {
    IGNORED_NAMES.contains(&name) || PATTERNS.iter().any(|p| p.matches(name))
}
