//! Tests for rule providers feeding a filtering session

use diagsieve::diagnostics::{Diagnostic, DiagnosticCategory};
use diagsieve::filters::{sieve, DefaultRule, FileFilters, Filterer, ProjectFilters};
use diagsieve::providers::gitattributes::{git_available, GitAttributesSource};
use diagsieve::providers::{RuleSource, StaticRuleSource};
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::process::Command as StdCommand;
use tempfile::TempDir;

fn error(file: &str, code: u32) -> Diagnostic {
    Diagnostic::new(code, DiagnosticCategory::Error, format!("TS{code}")).with_file(file)
}

#[tokio::test]
async fn test_gitattributes_drive_the_sieve() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().canonicalize().unwrap();
    if !git_available(&root).await {
        return;
    }
    let status = StdCommand::new("git")
        .args(["init", "-q"])
        .current_dir(&root)
        .status()
        .unwrap();
    assert!(status.success());
    fs::write(
        root.join(".gitattributes"),
        "a.ts ts=aswarnings\nb.ts -ts7\nunused.ts -ts5\n",
    )
    .unwrap();

    let path = |name: &str| root.join(name).display().to_string();
    let files: BTreeSet<String> = ["a.ts", "b.ts", "c.ts", "unused.ts"]
        .iter()
        .map(|name| path(name))
        .collect();

    let filters = GitAttributesSource::new(root.clone())
        .query(&files, "ts")
        .await
        .unwrap();

    let mut filterers = vec![Filterer::new(filters)];
    let kept = sieve(
        &mut filterers,
        vec![
            error(&path("a.ts"), 2322),
            error(&path("b.ts"), 7),
            error(&path("b.ts"), 7),
            error(&path("c.ts"), 1005),
        ],
    );

    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].category, DiagnosticCategory::Warning);
    assert_eq!(kept[1].category, DiagnosticCategory::Error);

    let summary = filterers.pop().unwrap().into_summary();
    let a = summary.get(&path("a.ts")).unwrap();
    assert_eq!(a.raised_codes, BTreeMap::from([(2322, 1)]));
    assert!(a.ignored_codes.is_empty());

    let b = summary.get(&path("b.ts")).unwrap();
    assert_eq!(b.ignored_codes, BTreeMap::from([(7, 2)]));
    assert!(b.unnecessarily_filtered_codes.is_empty());

    let c = summary.get(&path("c.ts")).unwrap();
    assert_eq!(c.raised_codes, BTreeMap::from([(1005, 1)]));

    let unused = summary.get(&path("unused.ts")).unwrap();
    assert_eq!(unused.unnecessarily_filtered_codes, BTreeSet::from([5]));
}

#[tokio::test]
async fn test_static_source_matches_gitattributes_semantics() {
    let mut filters = ProjectFilters::new();
    filters.insert("/p/legacy.ts", FileFilters::new().with_default(DefaultRule::Ignore));
    let source = StaticRuleSource::new(filters);

    let files = BTreeSet::from(["/p/legacy.ts".to_string(), "/p/new.ts".to_string()]);
    let resolved = source.query(&files, "ts").await.unwrap();

    let mut filterers = vec![Filterer::new(resolved)];
    let kept = sieve(
        &mut filterers,
        vec![
            Diagnostic::new(2322, DiagnosticCategory::Error, "x").with_file("/p/legacy.ts"),
            Diagnostic::new(2322, DiagnosticCategory::Error, "x").with_file("/p/new.ts"),
        ],
    );

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].file.as_deref(), Some("/p/new.ts"));

    let summary = filterers.pop().unwrap().into_summary();
    assert!(!summary.get("/p/legacy.ts").unwrap().unnecessary_catchall_filter);
}
