//! Summary aggregation
//!
//! Derives a read-only `SummaryReport` from a `ScanResult`. Ranking sorts
//! operate on copies; the scan's own path-sorted sequences are never touched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::model::ScanResult;

/// Maximum entries kept in each ranking list
pub const RANKING_LIMIT: usize = 10;

/// One entry of a ranking list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedFile {
    pub relative_path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Derived statistics and rankings for one scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    /// The scanned root directory's base name
    pub project_name: String,

    pub total_files: u64,
    pub total_directories: u64,
    pub total_size: u64,

    /// File count per extension
    pub by_extension: BTreeMap<String, u64>,

    /// Up to 10 largest files, size descending; ties keep path order
    pub largest_files: Vec<RankedFile>,

    /// Up to 10 most recently modified files, mtime descending; ties keep
    /// path order
    pub recent_files: Vec<RankedFile>,
}

impl SummaryReport {
    /// Build the summary from a completed scan
    pub fn from_scan(scan: &ScanResult) -> Self {
        let entries: Vec<RankedFile> = scan
            .files
            .iter()
            .map(|f| RankedFile {
                relative_path: f.relative_path.clone(),
                size: f.size,
                modified: f.modified,
            })
            .collect();

        // stable sorts over path-ordered copies keep the tie-break rule
        let mut largest_files = entries.clone();
        largest_files.sort_by(|a, b| b.size.cmp(&a.size));
        largest_files.truncate(RANKING_LIMIT);

        let mut recent_files = entries;
        recent_files.sort_by(|a, b| b.modified.cmp(&a.modified));
        recent_files.truncate(RANKING_LIMIT);

        Self {
            project_name: scan.project_name(),
            total_files: scan.counters.total_files,
            total_directories: scan.counters.total_directories,
            total_size: scan.counters.total_size,
            by_extension: scan.counters.by_extension.clone(),
            largest_files,
            recent_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::FileRecord;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn record(rel: &str, size: u64, modified_secs: i64) -> FileRecord {
        FileRecord {
            relative_path: rel.to_string(),
            absolute_path: PathBuf::from("/p").join(rel),
            name: rel.to_string(),
            extension: ".txt".to_string(),
            size,
            created: None,
            modified: Utc.timestamp_opt(modified_secs, 0).unwrap(),
            content: String::new(),
            line_count: 1,
            is_text: true,
        }
    }

    fn scan_with(records: Vec<FileRecord>) -> ScanResult {
        let mut scan = ScanResult::new(PathBuf::from("/p"));
        for r in records {
            scan.push_file(r);
        }
        scan.sort();
        scan
    }

    #[test]
    fn test_totals_copied_from_counters() {
        let scan = scan_with(vec![record("a.txt", 5, 10), record("b.txt", 7, 20)]);
        let summary = SummaryReport::from_scan(&scan);

        assert_eq!(summary.project_name, "p");
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.total_size, 12);
        assert_eq!(summary.by_extension.get(".txt"), Some(&2));
    }

    #[test]
    fn test_largest_files_descending() {
        let scan = scan_with(vec![
            record("small.txt", 1, 0),
            record("big.txt", 100, 0),
            record("mid.txt", 50, 0),
        ]);
        let summary = SummaryReport::from_scan(&scan);

        let paths: Vec<_> = summary
            .largest_files
            .iter()
            .map(|f| f.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["big.txt", "mid.txt", "small.txt"]);
    }

    #[test]
    fn test_equal_sizes_keep_path_order() {
        let scan = scan_with(vec![
            record("c.txt", 5, 0),
            record("a.txt", 5, 0),
            record("b.txt", 5, 0),
        ]);
        let summary = SummaryReport::from_scan(&scan);

        let paths: Vec<_> = summary
            .largest_files
            .iter()
            .map(|f| f.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_recent_files_by_mtime_descending() {
        let scan = scan_with(vec![
            record("old.txt", 1, 100),
            record("new.txt", 1, 300),
            record("mid.txt", 1, 200),
        ]);
        let summary = SummaryReport::from_scan(&scan);

        let paths: Vec<_> = summary
            .recent_files
            .iter()
            .map(|f| f.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["new.txt", "mid.txt", "old.txt"]);
    }

    #[test]
    fn test_rankings_capped_at_limit() {
        let records = (0..15)
            .map(|i| record(&format!("f{:02}.txt", i), i, i as i64))
            .collect();
        let scan = scan_with(records);
        let summary = SummaryReport::from_scan(&scan);

        assert_eq!(summary.largest_files.len(), RANKING_LIMIT);
        assert_eq!(summary.recent_files.len(), RANKING_LIMIT);
    }

    #[test]
    fn test_rankings_not_padded() {
        let scan = scan_with(vec![record("only.txt", 1, 1)]);
        let summary = SummaryReport::from_scan(&scan);

        assert_eq!(summary.largest_files.len(), 1);
        assert_eq!(summary.recent_files.len(), 1);
    }

    #[test]
    fn test_scan_order_unaffected() {
        let scan = scan_with(vec![
            record("b.txt", 100, 0),
            record("a.txt", 1, 0),
        ]);
        let _ = SummaryReport::from_scan(&scan);

        let paths: Vec<_> = scan.files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["a.txt", "b.txt"]);
    }
}
