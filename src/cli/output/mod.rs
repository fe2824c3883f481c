//! Output formatting module for CLI

pub mod json;
mod terminal;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use std::collections::BTreeSet;

use crate::error::SieveError;
use crate::filters::{ProjectFilters, Summary};

/// Trait for rendering the end-of-run summary
pub trait SummaryRenderer {
    /// Render `summary`. `known_files` lists every file the run knew about;
    /// files are only printed when the summary has something to say.
    fn render_summary(
        &self,
        summary: &Summary,
        known_files: &BTreeSet<String>,
    ) -> Result<String, SieveError>;
}

/// Trait for rendering resolved rules
pub trait RulesRenderer {
    fn render_rules(
        &self,
        filters: &ProjectFilters,
        queried: &BTreeSet<String>,
    ) -> Result<String, SieveError>;
}

/// Paths to print, in order: known files plus anything the summary saw.
fn report_order<'a>(summary: &'a Summary, known_files: &'a BTreeSet<String>) -> Vec<&'a String> {
    let mut paths: BTreeSet<&String> = known_files.iter().collect();
    paths.extend(summary.files.keys());
    paths
        .into_iter()
        .filter(|path| summary.get(path).is_some_and(|file| file.is_reportable()))
        .collect()
}
