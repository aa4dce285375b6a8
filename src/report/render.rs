//! Paginated report renderer
//!
//! Lays out the summary header and the source-code listing across fixed-size
//! pages. Rendering never fails per-file; writing the finished document to
//! disk is atomic and is the only fallible step.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::model::{FileRecord, ScanResult};
use crate::core::util::{atomic_write, format_size};
use crate::report::layout::{truncate_line, LineStyle, Page, PageBuilder};
use crate::report::summary::SummaryReport;

/// Files larger than this are omitted from the source listing (they remain
/// counted in the summary)
pub const MAX_LISTING_BYTES: u64 = 500_000;

/// Width of the horizontal rule drawn for divider lines
const DIVIDER_WIDTH: usize = 100;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The rendered, paginated document
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub pages: Vec<Page>,
}

impl ReportDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Plain-text projection: page lines joined by newlines, pages separated
    /// by a form feed
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                page.lines
                    .iter()
                    .map(|line| match line.style {
                        LineStyle::Divider => "-".repeat(DIVIDER_WIDTH),
                        _ => line.text.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\u{000C}\n")
    }
}

/// Whether a file appears in the source listing
fn is_listed(file: &FileRecord) -> bool {
    file.is_text && file.size <= MAX_LISTING_BYTES
}

/// Render the summary header and the per-file source listing
pub fn render_report(scan: &ScanResult, summary: &SummaryReport) -> ReportDocument {
    let mut builder = PageBuilder::new();

    render_header(&mut builder, scan, summary);

    for file in scan.files.iter().filter(|f| is_listed(f)) {
        render_file_block(&mut builder, file);
    }

    ReportDocument {
        pages: builder.finish(),
    }
}

fn render_header(builder: &mut PageBuilder, scan: &ScanResult, summary: &SummaryReport) {
    builder.push(
        LineStyle::Title,
        format!("Codebase Report: {}", summary.project_name),
    );
    builder.push(
        LineStyle::Meta,
        format!(
            "Generated: {}",
            scan.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    );
    builder.push(LineStyle::Text, "");

    builder.push(LineStyle::Heading, "Summary");
    builder.push(
        LineStyle::Text,
        format!("Total files: {}", summary.total_files),
    );
    builder.push(
        LineStyle::Text,
        format!("Total directories: {}", summary.total_directories),
    );
    builder.push(
        LineStyle::Text,
        format!("Total size: {}", format_size(summary.total_size)),
    );
    builder.push(LineStyle::Text, "");

    builder.push(LineStyle::Heading, "Files by extension");
    for (extension, count) in &summary.by_extension {
        builder.push(LineStyle::Text, format!("{}: {}", extension, count));
    }
    builder.push(LineStyle::Text, "");

    builder.push(LineStyle::Heading, "Largest files");
    for entry in &summary.largest_files {
        builder.push(
            LineStyle::Text,
            format!("{} ({})", entry.relative_path, format_size(entry.size)),
        );
    }
    builder.push(LineStyle::Text, "");

    builder.push(LineStyle::Heading, "Most recently modified");
    for entry in &summary.recent_files {
        builder.push(
            LineStyle::Text,
            format!(
                "{} ({})",
                entry.relative_path,
                entry.modified.format("%Y-%m-%d %H:%M")
            ),
        );
    }
    builder.push(LineStyle::Text, "");

    builder.push(LineStyle::Heading, "Source listing");
    builder.push(LineStyle::Text, "");
}

/// One listing block: bold path header, metadata line, numbered content.
/// Long content simply continues across page breaks; numbering never resets.
fn render_file_block(builder: &mut PageBuilder, file: &FileRecord) {
    builder.push(LineStyle::FileHeader, file.relative_path.clone());
    builder.push(
        LineStyle::Meta,
        format!(
            "{} | {} lines | modified {}",
            format_size(file.size),
            file.line_count,
            file.modified.format("%Y-%m-%d %H:%M")
        ),
    );

    for (index, line) in file.content.split('\n').enumerate() {
        builder.push(
            LineStyle::Code,
            format!("{:>4}  {}", index + 1, truncate_line(line)),
        );
    }

    builder.block_break();
}

/// Persist the document atomically; an unwritable destination is fatal and
/// leaves no partial file behind
pub fn write_report(document: &ReportDocument, dest: &Path) -> Result<(), ReportError> {
    atomic_write(dest, &document.to_text()).map_err(|source| ReportError::Write {
        path: dest.to_path_buf(),
        source,
    })
}

/// Run the report command
pub fn run_report(root: &Path, output: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    let scan = crate::scan::scan_tree(root)?;
    let summary = SummaryReport::from_scan(&scan);
    let document = render_report(&scan, &summary);

    let dest = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(crate::scan::ignore::DEFAULT_REPORT_NAME));
    write_report(&document, &dest)?;

    if !quiet {
        println!(
            "Report written to {} ({} pages, {} files listed)",
            dest.display(),
            document.page_count(),
            scan.files.iter().filter(|f| is_listed(f)).count()
        );
    }
    Ok(())
}
