//! Diagnostic sources
//!
//! Diagnostics are read from stdin, from a file, or by running the compiler
//! and capturing its output. The compiler exiting non-zero is expected when
//! it reports errors and is not treated as a failure.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

use super::parser::{parse_json, parse_tsc_output};
use super::Diagnostic;
use crate::error::SourceError;
use crate::utils::command::execute_command;

/// Format of the diagnostic input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Plain compiler output (`tsc --pretty false`)
    #[default]
    Tsc,
    /// JSON array of diagnostic records
    Json,
}

/// Where diagnostics come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticInput {
    /// Read from standard input
    Stdin,
    /// Read from a file
    File(PathBuf),
    /// Run a command (program followed by its arguments)
    Command(Vec<String>),
}

impl DiagnosticInput {
    /// Build an input from CLI values: a command wins over a file, `-` or no
    /// file means stdin.
    pub fn from_args(input: Option<PathBuf>, command: Vec<String>) -> Self {
        if !command.is_empty() {
            return Self::Command(command);
        }
        match input {
            Some(path) if path.as_os_str() != "-" => Self::File(path),
            _ => Self::Stdin,
        }
    }

    /// Read all diagnostics, in the order the source produced them.
    ///
    /// Relative file paths are resolved against `base_dir`, which is also
    /// where commands run.
    pub async fn read(
        &self,
        format: InputFormat,
        base_dir: &Path,
    ) -> Result<Vec<Diagnostic>, SourceError> {
        let text = match self {
            Self::Stdin => {
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .map_err(|e| SourceError::Read {
                        path: "<stdin>".to_string(),
                        source: e,
                    })?;
                text
            }
            Self::File(path) => {
                let path = base_dir.join(path);
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| SourceError::Read {
                        path: path.display().to_string(),
                        source: e,
                    })?
            }
            Self::Command(argv) => run_compiler(argv, base_dir).await?,
        };

        let diagnostics = match format {
            InputFormat::Tsc => parse_tsc_output(&text, base_dir),
            InputFormat::Json => parse_json(&text, base_dir)?,
        };

        info!(count = diagnostics.len(), "Collected diagnostics");
        Ok(diagnostics)
    }
}

async fn run_compiler(argv: &[String], base_dir: &Path) -> Result<String, SourceError> {
    let Some((program, args)) = argv.split_first() else {
        return Ok(String::new());
    };

    debug!(program = %program, args = ?args, "Running compiler");
    let result = execute_command(program, args, Some(base_dir))
        .await
        .map_err(|e| SourceError::Spawn {
            command: program.clone(),
            source: e,
        })?;

    if !result.success() {
        debug!(exit_code = result.exit_code, "Compiler reported problems");
    }
    if !result.stderr.is_empty() {
        warn!(stderr = %result.stderr, "Compiler wrote to stderr");
    }

    Ok(result.stdout)
}
