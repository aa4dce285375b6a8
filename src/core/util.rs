//! Common utilities

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

/// Convert a filesystem timestamp to a UTC datetime
pub fn to_utc_datetime(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

/// Format a byte count as a human-readable size (B/KB/MB/GB)
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= GB {
        format!("{:.2} GB", bytes_f / GB)
    } else if bytes_f >= MB {
        format!("{:.2} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.2} KB", bytes_f / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Write contents to a destination atomically.
///
/// The data is written to a temporary file in the destination's directory and
/// renamed into place, so a failed write never leaves a partial file behind.
pub fn atomic_write(dest: &Path, contents: &str) -> std::io::Result<()> {
    let dir = dest.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new_in(".")?,
    };
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_to_utc_datetime_epoch() {
        let dt = to_utc_datetime(SystemTime::UNIX_EPOCH);
        assert_eq!(dt.timestamp(), 0);
    }

    #[test]
    fn test_atomic_write_creates_file() {
        let temp = tempdir().unwrap();
        let dest = temp.path().join("out.txt");
        atomic_write(&dest, "hello").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "hello");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp = tempdir().unwrap();
        let dest = temp.path().join("out.txt");
        fs::write(&dest, "old").unwrap();
        atomic_write(&dest, "new").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_atomic_write_missing_dir_leaves_nothing() {
        let temp = tempdir().unwrap();
        let dest = temp.path().join("missing").join("out.txt");
        assert!(atomic_write(&dest, "data").is_err());
        assert!(!dest.exists());
    }
}
