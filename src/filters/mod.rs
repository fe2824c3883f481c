//! Filters module - Per-file rules, classification and summaries

pub mod classify;
pub mod filterer;
pub mod rules;
pub mod summary;

pub use classify::{classify, classify_in};
pub use filterer::{sieve, Filterer};
pub use rules::{AttributeMap, CodeRule, DefaultRule, FileFilters, ProjectFilters};
pub use summary::{FileSummary, Summary};
