//! Filtering session
//!
//! A [`Filterer`] owns the project's rules for one run, classifies each
//! diagnostic as it arrives and keeps the running [`Summary`].
//!
//! Call [`Filterer::filter`] for every diagnostic, then [`Filterer::summary`]
//! once the stream is exhausted. Asking for the summary earlier is allowed
//! and returns a consistent snapshot of what has been seen so far.

use tracing::{debug, trace};

use super::classify::classify_in;
use super::rules::{DefaultRule, ProjectFilters};
use super::summary::Summary;
use crate::diagnostics::{Diagnostic, ReclassifiedCategory};

/// Stateful filtering session for one run
#[derive(Debug)]
pub struct Filterer {
    filters: ProjectFilters,
    summary: Summary,
}

impl Filterer {
    /// Start a session. Every file with rules gets a summary entry up front.
    pub fn new(filters: ProjectFilters) -> Self {
        let mut summary = Summary::new();
        for path in filters.paths() {
            summary.file_mut(path);
        }
        debug!(files = filters.len(), "Filterer ready");
        Self { filters, summary }
    }

    /// Classify one diagnostic and record the outcome.
    pub fn filter(&mut self, diagnostic: &Diagnostic) -> ReclassifiedCategory {
        let outcome = classify_in(diagnostic, &self.filters);

        let Some(path) = diagnostic.file.as_deref() else {
            return outcome;
        };

        if outcome != ReclassifiedCategory::from(diagnostic.category) {
            trace!(
                file = path,
                code = diagnostic.code,
                from = %diagnostic.category,
                to = ?outcome,
                "Reclassifying diagnostic"
            );
        }

        let file = self.summary.file_mut(path);
        if outcome.is_ignored() {
            file.record_ignored(diagnostic.code);
        } else {
            file.record_raised(diagnostic.code);
        }

        outcome
    }

    /// Finalize and return the summary.
    ///
    /// Walks every file with rules, including files that never produced a
    /// diagnostic, and flags ignore rules that never fired.
    pub fn summary(&mut self) -> &Summary {
        for (path, filters) in self.filters.iter() {
            let file = self.summary.file_mut(path);

            file.unnecessary_catchall_filter =
                filters.default_rule == DefaultRule::Ignore && file.ignored_codes.is_empty();

            file.unnecessarily_filtered_codes = filters
                .ignored_codes()
                .filter(|code| !file.ignored_codes.contains_key(code))
                .collect();
        }

        debug!(
            raised = self.summary.total_raised(),
            ignored = self.summary.total_ignored(),
            stale_rules = self.summary.total_stale_rules(),
            "Summary finalized"
        );
        &self.summary
    }

    /// Finalize and take ownership of the summary
    pub fn into_summary(mut self) -> Summary {
        self.summary();
        self.summary
    }
}

/// Run diagnostics through a chain of filterers, keeping arrival order.
///
/// A diagnostic dropped by one filterer is not shown to the next; otherwise
/// each filterer sees the category chosen by the previous one.
pub fn sieve(filterers: &mut [Filterer], diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let total = diagnostics.len();

    let kept: Vec<Diagnostic> = diagnostics
        .into_iter()
        .filter_map(|mut diagnostic| {
            for filterer in filterers.iter_mut() {
                let outcome = filterer.filter(&diagnostic);
                if !diagnostic.reclassify(outcome) {
                    return None;
                }
            }
            Some(diagnostic)
        })
        .collect();

    debug!(total, kept = kept.len(), "Sieve complete");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCategory;
    use crate::filters::rules::{CodeRule, FileFilters};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn diag(file: &str, code: u32, category: DiagnosticCategory) -> Diagnostic {
        Diagnostic::new(code, category, "test").with_file(file)
    }

    fn project(entries: Vec<(&str, FileFilters)>) -> ProjectFilters {
        entries
            .into_iter()
            .map(|(path, filters)| (path.to_string(), filters))
            .collect()
    }

    #[test]
    fn test_as_warnings_scenario() {
        let mut filterer = Filterer::new(project(vec![(
            "a.ts",
            FileFilters::new().with_default(DefaultRule::AsWarnings),
        )]));

        let outcome = filterer.filter(&diag("a.ts", 2322, DiagnosticCategory::Error));
        assert_eq!(outcome, ReclassifiedCategory::Warning);

        let summary = filterer.summary();
        let file = summary.get("a.ts").unwrap();
        assert_eq!(file.raised_codes, BTreeMap::from([(2322, 1)]));
        assert!(file.ignored_codes.is_empty());
    }

    #[test]
    fn test_code_ignore_scenario() {
        let mut filterer = Filterer::new(project(vec![(
            "b.ts",
            FileFilters::new().with_code(7, CodeRule::Ignore),
        )]));

        for _ in 0..2 {
            assert_eq!(
                filterer.filter(&diag("b.ts", 7, DiagnosticCategory::Error)),
                ReclassifiedCategory::Ignore
            );
        }

        let summary = filterer.summary();
        let file = summary.get("b.ts").unwrap();
        assert_eq!(file.ignored_codes, BTreeMap::from([(7, 2)]));
        assert!(file.unnecessarily_filtered_codes.is_empty());
        assert!(!file.unnecessary_catchall_filter);
    }

    #[test]
    fn test_no_rules_scenario() {
        let mut filterer = Filterer::new(ProjectFilters::new());

        assert_eq!(
            filterer.filter(&diag("c.ts", 2345, DiagnosticCategory::Error)),
            ReclassifiedCategory::Error
        );

        let summary = filterer.summary();
        assert_eq!(
            summary.get("c.ts").unwrap().raised_codes,
            BTreeMap::from([(2345, 1)])
        );
    }

    #[test]
    fn test_unused_code_rule_is_flagged() {
        let mut filterer = Filterer::new(project(vec![(
            "d.ts",
            FileFilters::new()
                .with_code(5, CodeRule::Ignore)
                .with_code(6, CodeRule::AsError),
        )]));
        filterer.filter(&diag("d.ts", 6, DiagnosticCategory::Warning));

        let summary = filterer.summary();
        let file = summary.get("d.ts").unwrap();
        assert_eq!(file.unnecessarily_filtered_codes.iter().copied().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_code_rule_seen_but_not_ignored_is_still_stale() {
        let mut filterer = Filterer::new(project(vec![(
            "d.ts",
            FileFilters::new().with_code(5, CodeRule::Ignore),
        )]));
        // Suggestions are never filtered, so code 5 is raised, not ignored.
        filterer.filter(&diag("d.ts", 5, DiagnosticCategory::Suggestion));

        let summary = filterer.summary();
        let file = summary.get("d.ts").unwrap();
        assert!(file.unnecessarily_filtered_codes.contains(&5));
        assert_eq!(file.raised_codes.get(&5), Some(&1));
    }

    #[test]
    fn test_unused_catchall_on_file_without_diagnostics() {
        let mut filterer = Filterer::new(project(vec![(
            "e.ts",
            FileFilters::new().with_default(DefaultRule::Ignore),
        )]));

        let summary = filterer.summary();
        assert!(summary.get("e.ts").unwrap().unnecessary_catchall_filter);
    }

    #[test]
    fn test_used_catchall_is_not_flagged() {
        let mut filterer = Filterer::new(project(vec![(
            "e.ts",
            FileFilters::new().with_default(DefaultRule::Ignore),
        )]));
        filterer.filter(&diag("e.ts", 1, DiagnosticCategory::Warning));

        assert!(!filterer.summary().get("e.ts").unwrap().unnecessary_catchall_filter);
    }

    #[test]
    fn test_diagnostic_without_file_updates_nothing() {
        let mut filterer = Filterer::new(ProjectFilters::new());
        let global = Diagnostic::new(5023, DiagnosticCategory::Error, "bad option");

        assert_eq!(filterer.filter(&global), ReclassifiedCategory::Error);
        assert!(filterer.summary().files.is_empty());
    }

    #[test]
    fn test_rule_files_get_summary_entries_up_front() {
        let filterer = Filterer::new(project(vec![("f.ts", FileFilters::new())]));
        let summary = filterer.into_summary();
        assert!(summary.get("f.ts").is_some());
        assert!(!summary.get("f.ts").unwrap().is_reportable());
    }

    #[test]
    fn test_summary_is_idempotent() {
        let mut filterer = Filterer::new(project(vec![(
            "g.ts",
            FileFilters::new()
                .with_default(DefaultRule::Ignore)
                .with_code(9, CodeRule::Ignore),
        )]));
        let first = filterer.summary().clone();
        let second = filterer.summary().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_mid_stream_is_recomputed() {
        let mut filterer = Filterer::new(project(vec![(
            "g.ts",
            FileFilters::new()
                .with_default(DefaultRule::Ignore)
                .with_code(9, CodeRule::Ignore),
        )]));
        assert!(filterer.summary().get("g.ts").unwrap().has_stale_rules());

        filterer.filter(&Diagnostic::new(9, DiagnosticCategory::Error, "x").with_file("g.ts"));
        let file = filterer.summary().get("g.ts").unwrap();
        assert!(!file.unnecessary_catchall_filter);
        assert!(file.unnecessarily_filtered_codes.is_empty());
    }

    #[test]
    fn test_sieve_preserves_order_and_rewrites_category() {
        let mut filterers = vec![Filterer::new(project(vec![(
            "a.ts",
            FileFilters::new()
                .with_default(DefaultRule::AsWarnings)
                .with_code(1, CodeRule::Ignore),
        )]))];

        let kept = sieve(
            &mut filterers,
            vec![
                diag("a.ts", 3, DiagnosticCategory::Error),
                diag("a.ts", 1, DiagnosticCategory::Error),
                diag("b.ts", 2, DiagnosticCategory::Error),
                diag("a.ts", 4, DiagnosticCategory::Message),
            ],
        );

        let seen: Vec<(u32, DiagnosticCategory)> =
            kept.iter().map(|d| (d.code, d.category)).collect();
        assert_eq!(
            seen,
            vec![
                (3, DiagnosticCategory::Warning),
                (2, DiagnosticCategory::Error),
                (4, DiagnosticCategory::Message),
            ]
        );
    }

    #[test]
    fn test_sieve_chain_stops_after_ignore() {
        let mut filterers = vec![
            Filterer::new(project(vec![(
                "a.ts",
                FileFilters::new().with_code(1, CodeRule::Ignore),
            )])),
            Filterer::new(project(vec![(
                "a.ts",
                FileFilters::new().with_code(2, CodeRule::AsError),
            )])),
        ];

        let kept = sieve(
            &mut filterers,
            vec![
                diag("a.ts", 1, DiagnosticCategory::Error),
                diag("a.ts", 2, DiagnosticCategory::Warning),
            ],
        );

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].category, DiagnosticCategory::Error);

        let second = filterers.pop().unwrap().into_summary();
        let file = second.get("a.ts").unwrap();
        assert!(!file.raised_codes.contains_key(&1));
        assert_eq!(file.raised_codes.get(&2), Some(&1));
    }
}
