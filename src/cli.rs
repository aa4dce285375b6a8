//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// scandoc - extract a codebase snapshot and render a paginated source report.
#[derive(Parser, Debug)]
#[command(name = "scandoc")]
#[command(
    author,
    version,
    about,
    long_about = r#"scandoc walks a project directory, captures per-file metadata and content,
and derives summary statistics from the result.

Artifacts:
- snapshot: a single JSON document with every record and counter
- report: a paginated plain-text document (summary header plus a
  line-numbered source listing)
- generate: feeds the report to an external prose generator and writes the
  returned text

A fixed ignore rule set (node_modules, .git, build output, the tool's own
artifacts, ...) prunes entries before any capture happens.

Examples:
    scandoc scan
    scandoc scan --format json --pretty
    scandoc snapshot -o snapshot.json
    scandoc report
    scandoc generate --generator readme-gen
"#
)]
pub struct Cli {
    /// Root directory to scan.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to scan (defaults to the current directory).\n\n\
The root must exist; a missing root fails before any traversal work begins.\n\
All paths in artifacts are relative to this root."
    )]
    pub root: PathBuf,

    /// Quiet mode (minimal output).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Reduce non-essential output. Machine-readable results are still printed\n\
to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable more detailed diagnostics on stderr, including per-entry skip\n\
reasons."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the tree and print the summary.
    #[command(
        long_about = "Scan the tree under ROOT and print the derived summary: totals, the\n\
per-extension breakdown, and the top-10 largest and most recently modified\n\
files.\n\n\
Examples:\n\
  scandoc scan\n\
  scandoc scan --format json --pretty\n"
    )]
    Scan {
        /// Output format (text/json).
        #[arg(
            long,
            default_value = "text",
            value_parser = ["text", "json"],
            value_name = "FORMAT",
            long_help = "Select the summary output format.\n\n\
Supported values:\n\
- text (default): human-friendly terminal output\n\
- json: the summary as a JSON object"
        )]
        format: String,

        /// Pretty-print JSON output with indentation.
        #[arg(long, long_help = "Pretty-print JSON output. Has no effect on text format.")]
        pretty: bool,
    },

    /// Write the structured snapshot (a single JSON document).
    #[command(
        long_about = "Scan the tree and write the complete structured snapshot: root path,\n\
timestamp, file records with inlined content, directory records, counters,\n\
and diagnostics.\n\n\
Example:\n\
  scandoc snapshot -o snapshot.json\n"
    )]
    Snapshot {
        /// Destination path for the snapshot.
        #[arg(
            short,
            long,
            value_name = "FILE",
            long_help = "Destination path for the snapshot.\n\n\
Defaults to codebase-snapshot.json under ROOT. The write is atomic: a failed\n\
write leaves no file behind."
        )]
        output: Option<PathBuf>,
    },

    /// Write the rendered paginated report.
    #[command(
        long_about = "Scan the tree, derive the summary, and write the paginated report:\n\
a summary header followed by a line-numbered source listing of every\n\
text-classified file up to the size cap.\n\n\
Example:\n\
  scandoc report -o report.txt\n"
    )]
    Report {
        /// Destination path for the report.
        #[arg(
            short,
            long,
            value_name = "FILE",
            long_help = "Destination path for the report.\n\n\
Defaults to codebase-report.txt under ROOT. The write is atomic."
        )]
        output: Option<PathBuf>,
    },

    /// Render the report and feed it to the prose generator.
    #[command(
        long_about = "Scan the tree, render the report into a staging directory, submit it to\n\
the configured prose generator, and write the returned text.\n\n\
The generator is any executable that accepts a document path plus --json and\n\
prints either {\"success\": ..., \"content\": ..., \"message\": ...} or the\n\
generated text directly.\n\n\
Example:\n\
  scandoc generate --generator readme-gen -o README.md\n"
    )]
    Generate {
        /// Destination path for the generated text.
        #[arg(
            short,
            long,
            value_name = "FILE",
            long_help = "Destination path for the generated text.\n\n\
Defaults to README.md under ROOT."
        )]
        output: Option<PathBuf>,

        /// Generator executable to spawn.
        #[arg(
            long,
            env = "SCANDOC_GENERATOR",
            value_name = "PROGRAM",
            long_help = "Generator executable to spawn.\n\n\
May also be set through the SCANDOC_GENERATOR environment variable. Which\n\
executable implements the generator is configuration; scandoc never probes\n\
or retries alternatives."
        )]
        generator: Option<PathBuf>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    match cli.command {
        Commands::Scan { format, pretty } => crate::scan::walker::run_scan(&root, &format, pretty),

        Commands::Snapshot { output } => {
            crate::snapshot::run_snapshot(&root, output.as_deref(), cli.quiet)
        }

        Commands::Report { output } => {
            crate::report::render::run_report(&root, output.as_deref(), cli.quiet)
        }

        Commands::Generate { output, generator } => crate::pipeline::run_generate(
            &root,
            output.as_deref(),
            generator.as_deref(),
            cli.quiet,
        ),
    }
}
