//! Configuration module

pub mod loader;

pub use loader::{Config, CONFIG_FILENAME};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::diagnostics::source::InputFormat;

fn default_true() -> bool {
    true
}

/// Which summary to print after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// No summary
    #[default]
    None,
    /// One line per file plus totals
    Terse,
    /// Every raised, ignored and stale code per file
    Detailed,
    /// Machine-readable summary on stdout
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print surviving diagnostics the way the compiler does
    #[serde(default = "default_true")]
    pub diagnostic_logging: bool,

    /// Summary to print after filtering
    #[serde(default)]
    pub summary: SummaryMode,

    /// Always exit with code 0
    #[serde(default)]
    pub exit_code_zero: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            diagnostic_logging: true,
            summary: SummaryMode::None,
            exit_code_zero: false,
        }
    }
}

/// Compiler configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Command to run when no input is given, e.g.
    /// `["npx", "tsc", "--noEmit", "--pretty", "false"]`
    #[serde(default)]
    pub command: Vec<String>,

    /// Format of the compiler's output
    #[serde(default)]
    pub format: InputFormat,

    /// TypeScript's `diagnosticMessages.json`, for summarizing codes that
    /// did not occur in the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<PathBuf>,
}

fn default_patterns() -> Vec<String> {
    ["*.ts", "*.tsx", "*.mts", "*.cts"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Source discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Ask git for the project's source files so that files without
    /// diagnostics are summarized too
    #[serde(default = "default_true")]
    pub discover: bool,

    /// Pathspecs handed to `git ls-files`
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            discover: true,
            patterns: default_patterns(),
        }
    }
}
