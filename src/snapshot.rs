//! Snapshot writer
//!
//! Serializes a complete `ScanResult` (records with inlined content,
//! counters, diagnostics) as a single JSON document. The write is atomic: a
//! failed write leaves no file at the destination.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::model::ScanResult;
use crate::core::util::atomic_write;
use crate::scan::ignore::DEFAULT_SNAPSHOT_NAME;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write snapshot to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Serialize the scan result and persist it atomically
pub fn write_snapshot(scan: &ScanResult, dest: &Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(scan)?;
    atomic_write(dest, &json).map_err(|source| SnapshotError::Write {
        path: dest.to_path_buf(),
        source,
    })
}

/// Run the snapshot command
pub fn run_snapshot(root: &Path, output: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    let scan = crate::scan::scan_tree(root)?;

    let dest = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(DEFAULT_SNAPSHOT_NAME));
    write_snapshot(&scan, &dest)?;

    if !quiet {
        println!(
            "Snapshot written to {} ({} files, {} directories)",
            dest.display(),
            scan.counters.total_files,
            scan.counters.total_directories
        );
    }
    Ok(())
}
