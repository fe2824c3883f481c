//! # Providers Module
//!
//! Rule providers turn an external attribute store into [`ProjectFilters`].
//!
//! ## gitattributes
//!
//! The [`gitattributes`] provider asks `git check-attr` for every attribute
//! of the files under consideration and interprets those named after the
//! configured prefix:
//!
//! ```text
//! # .gitattributes
//! legacy/**      -ts
//! src/api.ts     ts=onlyerrors
//! src/shim.ts    -ts2307 ts7016=warn
//! ```
//!
//! ## Prerequisites
//!
//! 1. `git` installed and in PATH
//! 2. The working directory inside a git work tree
//!
//! ## Examples
//!
//! ```rust,no_run
//! use diagsieve::providers::{gitattributes::GitAttributesSource, RuleSource};
//! use std::collections::BTreeSet;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<(), diagsieve::SieveError> {
//! let source = GitAttributesSource::new(PathBuf::from("."));
//! let files = BTreeSet::from(["/repo/src/api.ts".to_string()]);
//! let filters = source.query(&files, "ts").await?;
//! println!("{} files with rules", filters.len());
//! # Ok(())
//! # }
//! ```

pub mod gitattributes;

use std::collections::BTreeSet;

use crate::error::SieveError;
use crate::filters::ProjectFilters;

/// Trait for rule providers
#[async_trait::async_trait]
pub trait RuleSource: Send + Sync {
    /// Provider name, for logs
    fn name(&self) -> &'static str;

    /// Resolve the rules for `files`, reading attributes named `prefix*`.
    async fn query(
        &self,
        files: &BTreeSet<String>,
        prefix: &str,
    ) -> Result<ProjectFilters, SieveError>;
}

/// Provider serving a prebuilt set of filters.
///
/// Only files that were asked about are returned, mirroring what an
/// attribute store would answer.
#[derive(Debug, Clone, Default)]
pub struct StaticRuleSource {
    filters: ProjectFilters,
}

impl StaticRuleSource {
    pub fn new(filters: ProjectFilters) -> Self {
        Self { filters }
    }
}

#[async_trait::async_trait]
impl RuleSource for StaticRuleSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn query(
        &self,
        files: &BTreeSet<String>,
        _prefix: &str,
    ) -> Result<ProjectFilters, SieveError> {
        Ok(self
            .filters
            .iter()
            .filter(|(path, _)| files.contains(*path))
            .map(|(path, filters)| (path.clone(), filters.clone()))
            .collect())
    }
}
