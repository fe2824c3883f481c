//! CLI commands module

pub mod check;
pub mod init;
pub mod rules;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, SummaryMode};
use crate::diagnostics::source::InputFormat;

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Compiler output to read (`-` for stdin, the default)
    #[arg(short, long, value_name = "FILE", conflicts_with = "command")]
    pub input: Option<PathBuf>,

    /// Format of the compiler output
    #[arg(long, value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    /// Attribute prefix for rules (overrides the configuration)
    #[arg(long, value_name = "PREFIX")]
    pub attr_prefix: Option<String>,

    /// Do not print the diagnostics that survive filtering
    #[arg(long)]
    pub no_diagnostic_logging: bool,

    /// Always exit with code 0
    #[arg(long = "exit-code0")]
    pub exit_code0: bool,

    /// Print a one-line-per-file summary
    #[arg(long, conflicts_with_all = ["detailed_summary", "json_summary"])]
    pub summary: bool,

    /// Print every raised, ignored and stale code per file
    #[arg(long, conflicts_with = "json_summary")]
    pub detailed_summary: bool,

    /// Print the summary as JSON (implies --no-diagnostic-logging)
    #[arg(long)]
    pub json_summary: bool,

    /// TypeScript's diagnosticMessages.json, for messages of codes not seen
    #[arg(long, value_name = "FILE")]
    pub messages: Option<PathBuf>,

    /// Only summarize files that produced diagnostics
    #[arg(long)]
    pub no_discover: bool,

    /// Compiler command to run instead of reading input
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl CheckArgs {
    /// Summary mode: flags win over the configuration
    pub fn summary_mode(&self, config: &Config) -> SummaryMode {
        if self.json_summary {
            SummaryMode::Json
        } else if self.detailed_summary {
            SummaryMode::Detailed
        } else if self.summary {
            SummaryMode::Terse
        } else {
            config.output.summary
        }
    }

    pub fn diagnostic_logging(&self, config: &Config) -> bool {
        !self.no_diagnostic_logging
            && self.summary_mode(config) != SummaryMode::Json
            && config.output.diagnostic_logging
    }

    pub fn exit_code_zero(&self, config: &Config) -> bool {
        self.exit_code0 || config.output.exit_code_zero
    }

    pub fn attr_prefix<'a>(&'a self, config: &'a Config) -> &'a str {
        self.attr_prefix.as_deref().unwrap_or(&config.attr_prefix)
    }

    pub fn messages<'a>(&'a self, config: &'a Config) -> Option<&'a PathBuf> {
        self.messages.as_ref().or(config.compiler.messages.as_ref())
    }

    pub fn discover(&self, config: &Config) -> bool {
        !self.no_discover && config.sources.discover
    }
}

/// Arguments for the rules command
#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    /// Files to show rules for
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<String>,

    /// Output format (terminal, json)
    #[arg(short, long, default_value = "terminal")]
    pub format: RulesFormat,

    /// Attribute prefix for rules (overrides the configuration)
    #[arg(long, value_name = "PREFIX")]
    pub attr_prefix: Option<String>,
}

/// Output format for the rules command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RulesFormat {
    Terminal,
    Json,
}

/// Arguments for the init command
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}
