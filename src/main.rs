//! scandoc - A codebase extractor and paginated report generator
//!
//! scandoc provides:
//! - Filesystem scanning with a fixed ignore rule set
//! - Text/binary classification and full content capture
//! - Summary statistics and top-10 rankings
//! - A paginated, line-numbered source report
//! - A typed boundary to an external prose-generation pipeline

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

mod cli;
mod core;
mod pipeline;
mod report;
mod scan;
mod snapshot;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    cli::run(cli)
}
