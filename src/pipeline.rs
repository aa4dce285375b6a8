//! Prose-generation pipeline boundary
//!
//! The downstream document-to-prose generator is an external collaborator:
//! it accepts a rendered report document and returns narrative text. The
//! core only depends on this typed interface; which executable implements it
//! is configuration, resolved once, never retried.

use log::debug;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to launch generator {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("generator exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("generator reported failure: {0}")]
    Rejected(String),

    #[error("generator returned no content")]
    Empty,
}

/// The collaborator interface: accepts a document, returns generated text
pub trait ProseGenerator {
    fn submit(&self, document: &Path) -> Result<String, PipelineError>;
}

/// Configuration for the command-backed generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Executable to spawn
    pub program: PathBuf,

    /// Arguments passed before the document path
    pub args: Vec<String>,
}

impl GeneratorConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }
}

/// Shape of the generator's JSON stdout
#[derive(Debug, Deserialize)]
struct GeneratorResponse {
    success: bool,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Spawns a configured executable with the document path and `--json`,
/// parsing its stdout. Non-JSON stdout is treated as the generated text
/// itself.
pub struct CommandGenerator {
    config: GeneratorConfig,
}

impl CommandGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }
}

impl ProseGenerator for CommandGenerator {
    fn submit(&self, document: &Path) -> Result<String, PipelineError> {
        let program = self.config.program.to_string_lossy().into_owned();
        debug!("submitting {} to generator {}", document.display(), program);

        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(document)
            .arg("--json")
            .output()
            .map_err(|source| PipelineError::Launch {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PipelineError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match serde_json::from_str::<GeneratorResponse>(stdout.trim()) {
            Ok(response) if response.success => response
                .content
                .filter(|c| !c.trim().is_empty())
                .ok_or(PipelineError::Empty),
            Ok(response) => Err(PipelineError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "no failure message provided".to_string()),
            )),
            // not JSON: the generator wrote the prose directly
            Err(_) => {
                let text = stdout.trim();
                if text.is_empty() {
                    Err(PipelineError::Empty)
                } else {
                    Ok(text.to_string())
                }
            }
        }
    }
}

/// Run the generate command: scan, render the report, submit it to the
/// generator, and write the returned text
pub fn run_generate(
    root: &Path,
    output: Option<&Path>,
    generator: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    use crate::report::render::{render_report, write_report};
    use crate::report::summary::SummaryReport;

    let program = generator.ok_or_else(|| {
        anyhow::anyhow!("no generator configured; pass --generator or set SCANDOC_GENERATOR")
    })?;

    let scan = crate::scan::scan_tree(root)?;
    let summary = SummaryReport::from_scan(&scan);
    let document = render_report(&scan, &summary);

    // the collaborator reads the report from disk; keep it out of the root
    // so it is never re-scanned
    let staging = tempfile::tempdir()?;
    let report_path = staging.path().join("report.txt");
    write_report(&document, &report_path)?;

    let generator = CommandGenerator::new(GeneratorConfig::new(program));
    let prose = generator.submit(&report_path)?;

    let dest = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join("README.md"));
    crate::core::util::atomic_write(&dest, &prose)?;

    if !quiet {
        println!("Generated text written to {}", dest.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_generator(script: &str) -> CommandGenerator {
        let mut config = GeneratorConfig::new("sh");
        config.args = vec!["-c".to_string(), script.to_string()];
        CommandGenerator::new(config)
    }

    #[test]
    fn test_submit_parses_json_success() {
        let generator = shell_generator(
            r##"echo '{"success": true, "content": "# Generated", "message": "ok"}'"##,
        );
        let text = generator.submit(Path::new("/dev/null")).unwrap();
        assert_eq!(text, "# Generated");
    }

    #[test]
    fn test_submit_rejected_reports_message() {
        let generator =
            shell_generator(r#"echo '{"success": false, "content": null, "message": "bad key"}'"#);
        let err = generator.submit(Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, PipelineError::Rejected(ref m) if m == "bad key"));
    }

    #[test]
    fn test_submit_falls_back_to_raw_text() {
        let generator = shell_generator("echo 'plain prose output'");
        let text = generator.submit(Path::new("/dev/null")).unwrap();
        assert_eq!(text, "plain prose output");
    }

    #[test]
    fn test_submit_empty_stdout_is_error() {
        let generator = shell_generator("true");
        let err = generator.submit(Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, PipelineError::Empty));
    }

    #[test]
    fn test_submit_nonzero_exit_is_error() {
        let generator = shell_generator("echo 'boom' >&2; exit 3");
        let err = generator.submit(Path::new("/dev/null")).unwrap_err();
        match err {
            PipelineError::Failed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_missing_program_is_launch_error() {
        let generator = CommandGenerator::new(GeneratorConfig::new("/nonexistent/generator"));
        let err = generator.submit(Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, PipelineError::Launch { .. }));
    }

    #[test]
    fn test_submit_json_success_without_content_is_empty() {
        let generator = shell_generator(r#"echo '{"success": true, "content": ""}'"#);
        let err = generator.submit(Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, PipelineError::Empty));
    }
}
