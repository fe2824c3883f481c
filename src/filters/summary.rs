//! Per-file filtering statistics
//!
//! A [`Summary`] records, per file, how often each code was raised or
//! ignored, and which ignore rules never fired. Entries are created on first
//! reference through [`Summary::file_mut`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Statistics for a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    /// Code -> times it survived filtering
    pub raised_codes: BTreeMap<u32, usize>,
    /// Code -> times it was dropped
    pub ignored_codes: BTreeMap<u32, usize>,
    /// Codes with an `Ignore` rule that never dropped anything
    pub unnecessarily_filtered_codes: BTreeSet<u32>,
    /// The file ignores everything by default, yet nothing was ignored
    pub unnecessary_catchall_filter: bool,
}

impl FileSummary {
    pub fn record_raised(&mut self, code: u32) {
        *self.raised_codes.entry(code).or_insert(0) += 1;
    }

    pub fn record_ignored(&mut self, code: u32) {
        *self.ignored_codes.entry(code).or_insert(0) += 1;
    }

    pub fn raised_total(&self) -> usize {
        self.raised_codes.values().sum()
    }

    pub fn ignored_total(&self) -> usize {
        self.ignored_codes.values().sum()
    }

    /// Number of rules that never fired
    pub fn stale_rule_count(&self) -> usize {
        self.unnecessarily_filtered_codes.len() + usize::from(self.unnecessary_catchall_filter)
    }

    pub fn has_stale_rules(&self) -> bool {
        self.stale_rule_count() > 0
    }

    /// Whether a reporter has anything to say about this file
    pub fn is_reportable(&self) -> bool {
        !self.ignored_codes.is_empty() || !self.raised_codes.is_empty() || self.has_stale_rules()
    }
}

/// Statistics for the whole run, keyed by absolute file path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub files: BTreeMap<String, FileSummary>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `path`, created empty on first access
    pub fn file_mut(&mut self, path: &str) -> &mut FileSummary {
        self.files.entry(path.to_string()).or_default()
    }

    pub fn get(&self, path: &str) -> Option<&FileSummary> {
        self.files.get(path)
    }

    /// Files a reporter should print, in path order
    pub fn reportable(&self) -> impl Iterator<Item = (&String, &FileSummary)> {
        self.files.iter().filter(|(_, file)| file.is_reportable())
    }

    pub fn total_raised(&self) -> usize {
        self.files.values().map(FileSummary::raised_total).sum()
    }

    pub fn total_ignored(&self) -> usize {
        self.files.values().map(FileSummary::ignored_total).sum()
    }

    pub fn total_stale_rules(&self) -> usize {
        self.files.values().map(FileSummary::stale_rule_count).sum()
    }
}

/// Codes ordered for display: most frequent first, ties by ascending code.
pub fn ranked(codes: &BTreeMap<u32, usize>) -> Vec<(u32, usize)> {
    let mut entries: Vec<(u32, usize)> = codes.iter().map(|(c, n)| (*c, *n)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries
}
