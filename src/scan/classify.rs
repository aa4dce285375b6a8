//! File classification and content capture
//!
//! Text/binary status is a static lookup against a fixed allow-list of
//! extensions; it never depends on whether the content read succeeded. A
//! text-classified file whose read fails keeps `is_text = true` and carries a
//! diagnostic string as content.

use log::warn;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs::{self, Metadata};
use std::path::Path;

use crate::core::model::{FileRecord, ScanDiagnostic};
use crate::core::paths::base_name;
use crate::core::util::to_utc_datetime;

/// Content marker stored for files that are not text-classified
pub const BINARY_CONTENT_MARKER: &str = "[binary content not captured]";

/// Extensions treated as text: common source, markup, config, and script
/// files. Dotted and lower-case.
static TEXT_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // source
        ".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs", ".py", ".java", ".c", ".cc", ".cpp", ".h",
        ".hpp", ".cs", ".go", ".rs", ".rb", ".php", ".swift", ".kt", ".kts", ".sql", ".vue",
        ".svelte",
        // markup
        ".html", ".htm", ".css", ".scss", ".sass", ".less", ".md", ".markdown", ".txt", ".xml",
        ".svg", ".graphql", ".proto",
        // config
        ".json", ".yml", ".yaml", ".toml", ".ini", ".cfg", ".conf", ".properties",
        // scripts
        ".sh", ".bash", ".zsh", ".bat", ".cmd", ".ps1",
    ]
    .into_iter()
    .collect()
});

/// Lower-cased extension of a base name, including the leading dot.
/// Empty when the name has no extension (dotfiles count as extension-less).
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Whether an extension is on the text allow-list
pub fn is_text_extension(extension: &str) -> bool {
    TEXT_EXTENSIONS.contains(extension)
}

/// A classified file plus any recoverable failure met while capturing it
#[derive(Debug)]
pub struct Classified {
    pub record: FileRecord,
    pub diagnostic: Option<ScanDiagnostic>,
}

/// Produce a `FileRecord` for a file, capturing content and metadata.
///
/// Returns `None` when the modification time is unavailable (the entry is
/// dropped, matching the stat-failure policy).
pub fn classify_file(absolute: &Path, relative: &str, metadata: &Metadata) -> Option<Classified> {
    let modified = to_utc_datetime(metadata.modified().ok()?);
    let created = metadata.created().ok().map(to_utc_datetime);

    let name = base_name(absolute);
    let extension = extension_of(&name);
    let is_text = is_text_extension(&extension);

    let mut diagnostic = None;
    let content = if is_text {
        match fs::read_to_string(absolute) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read {}: {}", relative, e);
                diagnostic = Some(ScanDiagnostic::new(relative, format!("read failed: {}", e)));
                format!("[unable to read file: {}]", e)
            }
        }
    } else {
        BINARY_CONTENT_MARKER.to_string()
    };

    let line_count = content.split('\n').count();

    Some(Classified {
        record: FileRecord {
            relative_path: relative.to_string(),
            absolute_path: absolute.to_path_buf(),
            name,
            extension,
            size: metadata.len(),
            created,
            modified,
            content,
            line_count,
            is_text,
        },
        diagnostic,
    })
}
