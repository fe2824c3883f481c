//! JSON output formatting

use crate::error::SieveError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::{report_order, RulesRenderer, SummaryRenderer};
use crate::filters::{FileFilters, FileSummary, ProjectFilters, Summary};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    version: &'static str,
    totals: Totals,
    files: BTreeMap<&'a str, &'a FileSummary>,
}

#[derive(Serialize)]
struct Totals {
    files: usize,
    raised: usize,
    ignored: usize,
    unnecessary_rules: usize,
}

#[derive(Serialize)]
struct RulesOutput<'a> {
    version: &'static str,
    files: BTreeMap<&'a str, Option<&'a FileFilters>>,
}

impl SummaryRenderer for JsonOutput {
    fn render_summary(
        &self,
        summary: &Summary,
        known_files: &BTreeSet<String>,
    ) -> Result<String, SieveError> {
        let files: BTreeMap<&str, &FileSummary> = report_order(summary, known_files)
            .into_iter()
            .filter_map(|path| summary.get(path).map(|file| (path.as_str(), file)))
            .collect();

        let output = SummaryOutput {
            version: env!("CARGO_PKG_VERSION"),
            totals: Totals {
                files: files.len(),
                raised: summary.total_raised(),
                ignored: summary.total_ignored(),
                unnecessary_rules: summary.total_stale_rules(),
            },
            files,
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

impl RulesRenderer for JsonOutput {
    fn render_rules(
        &self,
        filters: &ProjectFilters,
        queried: &BTreeSet<String>,
    ) -> Result<String, SieveError> {
        let output = RulesOutput {
            version: env!("CARGO_PKG_VERSION"),
            files: queried
                .iter()
                .map(|path| (path.as_str(), filters.get(path)))
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}
