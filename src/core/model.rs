//! Scan data model
//!
//! A scan produces a single `ScanResult` owning every record captured from
//! the tree. Records are immutable once the scan completes; the aggregator
//! and renderer only read. Serialized field names are camelCase to match the
//! snapshot document consumed by the downstream pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::paths::base_name;

/// Sentinel key used in the extension map for files without an extension
pub const NO_EXTENSION_LABEL: &str = "(no extension)";

/// A single captured file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Path relative to the scan root, '/' separated, unique within a scan
    pub relative_path: String,

    /// Absolute path on disk
    pub absolute_path: PathBuf,

    /// Base name
    pub name: String,

    /// Lower-cased extension including the leading dot; empty if none
    pub extension: String,

    /// Size in bytes
    pub size: u64,

    /// Creation time (not available on every platform)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Last modification time
    pub modified: DateTime<Utc>,

    /// Raw text content, or a marker/diagnostic string for binary and
    /// unreadable files
    pub content: String,

    /// Segments of `content` split on '\n'; an empty file counts as 1
    pub line_count: usize,

    /// Whether the extension is on the text allow-list. Independent of
    /// whether the content read succeeded.
    pub is_text: bool,
}

/// A captured directory. The scan root itself is never recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRecord {
    /// Path relative to the scan root, '/' separated
    pub relative_path: String,

    /// Absolute path on disk
    pub absolute_path: PathBuf,

    /// Base name
    pub name: String,
}

/// A recoverable failure encountered during a scan.
///
/// Diagnostics let an operator distinguish "excluded by design" from
/// "failed to read".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanDiagnostic {
    /// Path the failure relates to
    pub path: String,

    /// Human-readable description of the failure
    pub detail: String,
}

impl ScanDiagnostic {
    pub fn new(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

/// Global counters accumulated over one scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCounters {
    /// Number of file records
    pub total_files: u64,

    /// Number of directory records
    pub total_directories: u64,

    /// Sum of all file sizes in bytes
    pub total_size: u64,

    /// File count per extension (every file counted once, text or not)
    pub by_extension: BTreeMap<String, u64>,
}

impl SummaryCounters {
    fn record_file(&mut self, record: &FileRecord) {
        self.total_files += 1;
        self.total_size += record.size;
        let key = if record.extension.is_empty() {
            NO_EXTENSION_LABEL.to_string()
        } else {
            record.extension.clone()
        };
        *self.by_extension.entry(key).or_insert(0) += 1;
    }

    fn record_directory(&mut self) {
        self.total_directories += 1;
    }
}

/// The complete, sorted snapshot of one scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// The scanned root directory
    pub root: PathBuf,

    /// When the scan started
    pub scanned_at: DateTime<Utc>,

    /// File records, sorted ascending by relative path
    pub files: Vec<FileRecord>,

    /// Directory records, sorted ascending by relative path
    pub directories: Vec<DirectoryRecord>,

    /// Global counters
    pub counters: SummaryCounters,

    /// Recoverable failures encountered during the scan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl ScanResult {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            scanned_at: Utc::now(),
            files: Vec::new(),
            directories: Vec::new(),
            counters: SummaryCounters::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Append a file record, updating the counters
    pub fn push_file(&mut self, record: FileRecord) {
        self.counters.record_file(&record);
        self.files.push(record);
    }

    /// Append a directory record, updating the counters
    pub fn push_directory(&mut self, record: DirectoryRecord) {
        self.counters.record_directory();
        self.directories.push(record);
    }

    /// Record a recoverable failure
    pub fn push_diagnostic(&mut self, diagnostic: ScanDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Sort both record sequences ascending by relative path.
    ///
    /// Idempotent; traversal order is never part of the contract.
    pub fn sort(&mut self) {
        self.files
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        self.directories
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    }

    /// Project name: the root directory's base name
    pub fn project_name(&self) -> String {
        let name = base_name(&self.root);
        if name.is_empty() {
            self.root.to_string_lossy().into_owned()
        } else {
            name
        }
    }
}
