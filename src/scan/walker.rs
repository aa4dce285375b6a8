//! Tree walker
//!
//! Recursive pre-order traversal of the scan root producing the full
//! `ScanResult`. The ignore filter prunes whole subtrees; files are handed
//! to the classifier; record sequences are sorted after traversal, so
//! traversal order is never observable.

use log::{debug, warn};
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::model::{DirectoryRecord, ScanDiagnostic, ScanResult};
use crate::core::paths::{base_name, make_relative};
use crate::scan::classify::{classify_file, Classified};
use crate::scan::ignore::is_ignored;

/// Fatal scan failures. Everything else is recoverable and surfaces as a
/// `ScanDiagnostic`.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root does not exist or is not a directory: {0}")]
    RootNotFound(std::path::PathBuf),
}

/// A file entry collected during traversal, awaiting classification
struct PendingFile {
    absolute: std::path::PathBuf,
    relative: String,
    metadata: std::fs::Metadata,
}

/// Scan a directory tree and produce the complete, sorted result.
///
/// The root must exist; a missing root fails before any traversal work. An
/// unreadable subdirectory drops its subtree with a diagnostic and the scan
/// continues; a failed stat drops that single entry silently.
pub fn scan_tree(root: &Path) -> Result<ScanResult, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let mut result = ScanResult::new(root.to_path_buf());
    let mut pending = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_ignored(&e.file_name().to_string_lossy()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| make_relative(p, root).unwrap_or_else(|| p.display().to_string()))
                    .unwrap_or_default();
                warn!("skipping unreadable subtree {}: {}", path, err);
                result.push_diagnostic(ScanDiagnostic::new(path, format!("unreadable: {}", err)));
                continue;
            }
        };

        let relative = match make_relative(entry.path(), root) {
            Some(r) => r,
            None => continue,
        };

        if entry.file_type().is_dir() {
            result.push_directory(DirectoryRecord {
                relative_path: relative,
                absolute_path: entry.path().to_path_buf(),
                name: base_name(entry.path()),
            });
        } else if entry.file_type().is_file() {
            match entry.metadata() {
                Ok(metadata) => pending.push(PendingFile {
                    absolute: entry.path().to_path_buf(),
                    relative,
                    metadata,
                }),
                Err(e) => debug!("dropping {}: stat failed: {}", relative, e),
            }
        }
        // other entry kinds (symlinks, sockets) are not captured
    }

    for classified in classify_pending(pending) {
        if let Some(diagnostic) = classified.diagnostic {
            result.push_diagnostic(diagnostic);
        }
        result.push_file(classified.record);
    }

    result.sort();
    Ok(result)
}

#[cfg(not(feature = "parallel"))]
fn classify_pending(pending: Vec<PendingFile>) -> Vec<Classified> {
    pending
        .iter()
        .filter_map(|p| classify_file(&p.absolute, &p.relative, &p.metadata))
        .collect()
}

/// With the parallel feature, content capture fans out over a worker pool.
/// The post-traversal sort keeps the result deterministic either way.
#[cfg(feature = "parallel")]
fn classify_pending(pending: Vec<PendingFile>) -> Vec<Classified> {
    pending
        .par_iter()
        .filter_map(|p| classify_file(&p.absolute, &p.relative, &p.metadata))
        .collect()
}

/// Run the scan command: scan the root and print the derived summary
pub fn run_scan(root: &Path, format: &str, pretty: bool) -> anyhow::Result<()> {
    use colored::Colorize;

    use crate::core::util::format_size;
    use crate::report::summary::SummaryReport;

    let scan = scan_tree(root)?;
    let summary = SummaryReport::from_scan(&scan);

    if format == "json" {
        let json = if pretty {
            serde_json::to_string_pretty(&summary)?
        } else {
            serde_json::to_string(&summary)?
        };
        println!("{}", json);
        return Ok(());
    }

    println!("{}", format!("Project: {}", summary.project_name).bold());
    println!(
        "{} files, {} directories, {} total",
        summary.total_files,
        summary.total_directories,
        format_size(summary.total_size)
    );
    println!();

    println!("{}", "Files by extension".bold());
    for (extension, count) in &summary.by_extension {
        println!("  {}: {}", extension, count);
    }
    println!();

    println!("{}", "Largest files".bold());
    for entry in &summary.largest_files {
        println!("  {} ({})", entry.relative_path, format_size(entry.size));
    }
    println!();

    println!("{}", "Most recently modified".bold());
    for entry in &summary.recent_files {
        println!(
            "  {} ({})",
            entry.relative_path,
            entry.modified.format("%Y-%m-%d %H:%M")
        );
    }

    if !scan.diagnostics.is_empty() {
        println!();
        println!(
            "{}",
            format!("{} entries could not be fully read", scan.diagnostics.len()).yellow()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_root_is_fatal() {
        let err = scan_tree(Path::new("/nonexistent/project")).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
    }

    #[test]
    fn test_scan_scenario() {
        // a.txt ("hello"), ignored node_modules/x.js, empty dir b/
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "hello").unwrap();
        fs::create_dir(temp.path().join("node_modules")).unwrap();
        fs::write(temp.path().join("node_modules/x.js"), "x").unwrap();
        fs::create_dir(temp.path().join("b")).unwrap();

        let result = scan_tree(temp.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].relative_path, "a.txt");
        assert_eq!(result.files[0].size, 5);
        assert_eq!(result.counters.total_size, 5);
        assert_eq!(result.counters.by_extension.get(".txt"), Some(&1));

        // the empty directory still gets a record; the ignored one does not
        let dirs: Vec<_> = result
            .directories
            .iter()
            .map(|d| d.relative_path.as_str())
            .collect();
        assert_eq!(dirs, vec!["b"]);
    }

    #[test]
    fn test_ignored_subtree_leaves_no_records() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("node_modules/pkg/deep")).unwrap();
        fs::write(temp.path().join("node_modules/pkg/deep/index.js"), "x").unwrap();
        fs::write(temp.path().join("kept.js"), "y").unwrap();

        let result = scan_tree(temp.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].relative_path, "kept.js");
        assert!(result.directories.is_empty());
    }

    #[test]
    fn test_records_sorted_by_relative_path() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("z.txt"), "z").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/m.txt"), "m").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let result = scan_tree(temp.path()).unwrap();

        let paths: Vec<_> = result
            .files
            .iter()
            .map(|f| f.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["a.txt", "sub/m.txt", "z.txt"]);
    }

    #[test]
    fn test_totals_match_records() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.rs"), "abc").unwrap();
        fs::write(temp.path().join("b.rs"), "defgh").unwrap();
        fs::create_dir_all(temp.path().join("x/y")).unwrap();
        fs::write(temp.path().join("x/y/c.png"), [0u8; 7]).unwrap();

        let result = scan_tree(temp.path()).unwrap();

        assert_eq!(result.counters.total_files as usize, result.files.len());
        assert_eq!(
            result.counters.total_directories as usize,
            result.directories.len()
        );
        let sum: u64 = result.files.iter().map(|f| f.size).sum();
        assert_eq!(result.counters.total_size, sum);
        assert_eq!(result.counters.total_size, 15);
    }

    #[test]
    fn test_root_itself_is_not_recorded() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("f.txt"), "f").unwrap();

        let result = scan_tree(temp.path()).unwrap();

        assert!(result
            .directories
            .iter()
            .all(|d| !d.relative_path.is_empty()));
        assert_eq!(result.counters.total_directories, 0);
    }

    #[test]
    fn test_log_files_excluded_everywhere() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("logs")).unwrap();
        fs::write(temp.path().join("logs/app.log"), "x").unwrap();
        fs::write(temp.path().join("trace.log"), "y").unwrap();
        fs::write(temp.path().join("notes.txt"), "z").unwrap();

        let result = scan_tree(temp.path()).unwrap();

        let paths: Vec<_> = result
            .files
            .iter()
            .map(|f| f.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["notes.txt"]);
    }
}
