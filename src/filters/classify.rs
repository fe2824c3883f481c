//! Diagnostic classification
//!
//! [`classify`] is a pure function: the same diagnostic and filters always
//! produce the same outcome. First match wins:
//!
//! 1. Suggestions and messages keep their category
//! 2. A code rule for the diagnostic's code
//! 3. The file's default rule
//! 4. The native category

use super::rules::{CodeRule, DefaultRule, FileFilters, ProjectFilters};
use crate::diagnostics::{Diagnostic, DiagnosticCategory, ReclassifiedCategory};

/// Classify a diagnostic against one file's filters.
pub fn classify(diagnostic: &Diagnostic, filters: &FileFilters) -> ReclassifiedCategory {
    let category = diagnostic.category;
    if category.is_informational() {
        return category.into();
    }

    if let Some(rule) = filters.code_rules.get(&diagnostic.code) {
        return match rule {
            CodeRule::Ignore => ReclassifiedCategory::Ignore,
            CodeRule::AsError => ReclassifiedCategory::Error,
            CodeRule::AsWarning => ReclassifiedCategory::Warning,
            CodeRule::Allow => category.into(),
        };
    }

    match filters.default_rule {
        DefaultRule::Ignore => ReclassifiedCategory::Ignore,
        DefaultRule::AsWarnings => ReclassifiedCategory::Warning,
        DefaultRule::OnlyErrors if category != DiagnosticCategory::Error => {
            ReclassifiedCategory::Ignore
        }
        DefaultRule::OnlyErrors | DefaultRule::All => category.into(),
    }
}

/// Classify a diagnostic against the whole project.
///
/// Diagnostics without a file, and files without rules, pass through with
/// their native category.
pub fn classify_in(diagnostic: &Diagnostic, project: &ProjectFilters) -> ReclassifiedCategory {
    match diagnostic.file.as_deref().and_then(|path| project.get(path)) {
        Some(filters) => classify(diagnostic, filters),
        None => diagnostic.category.into(),
    }
}
