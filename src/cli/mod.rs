//! # CLI Module
//!
//! This module defines the command-line interface for diagsieve using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Filter compiler diagnostics through gitattributes rules |
//! | `rules` | Show the rules that apply to files |
//! | `init` | Write a default configuration file |
//!
//! ## Submodules
//!
//! - [`commands`] - Command implementations
//! - [`exit_codes`] - Standardized exit codes
//! - [`output`] - Diagnostic and summary formatters (Terminal, JSON)
//!
//! ## Global Options
//!
//! All commands support these global options:
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//! - `-C, --directory <DIR>` - Working directory (defaults to current directory)
//!
//! ## Examples
//!
//! ```bash
//! # Filter saved compiler output
//! tsc --noEmit --pretty false > tsc.txt
//! diagsieve check --input tsc.txt --detailed-summary
//!
//! # Run the compiler directly
//! diagsieve check -- npx tsc --noEmit --pretty false
//!
//! # Inspect the rules for a file
//! diagsieve rules src/legacy/api.ts
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{ConfigError, SieveError};
use commands::{CheckArgs, InitArgs, RulesArgs};

/// diagsieve - Reclassify TypeScript diagnostics with per-file gitattributes rules
#[derive(Parser, Debug)]
#[command(name = "diagsieve")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter compiler diagnostics through gitattributes rules
    Check(CheckArgs),

    /// Show the rules that apply to files
    Rules(RulesArgs),

    /// Write a default configuration file
    Init(InitArgs),
}

impl Cli {
    /// Absolute working directory.
    ///
    /// Canonicalized so that paths line up with what git reports.
    pub fn working_dir(&self) -> Result<PathBuf, SieveError> {
        let dir = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|e| ConfigError::FileRead {
                path: ".".to_string(),
                source: e,
            })?,
        };

        dir.canonicalize().map_err(|e| {
            ConfigError::FileRead {
                path: dir.display().to_string(),
                source: e,
            }
            .into()
        })
    }

    /// Configuration from `--config`, or `.diagsieve.toml` in `working_dir`
    pub fn load_config(&self, working_dir: &std::path::Path) -> Result<Config, SieveError> {
        match &self.config {
            Some(path) => Config::load_from_file(&working_dir.join(path)),
            None => Config::load_or_default(working_dir),
        }
    }

    /// Whether failures should still exit with code 0
    pub fn forces_success(&self) -> bool {
        matches!(&self.command, Commands::Check(args) if args.exit_code0)
    }
}
