//! # Diagnostics
//!
//! This module defines the compiler diagnostic records that flow through the
//! sieve, and the categories they can be reclassified into.
//!
//! ## Overview
//!
//! - [`DiagnosticCategory`] - Native severity reported by the compiler
//! - [`ReclassifiedCategory`] - Outcome of classification, including `Ignore`
//! - [`Diagnostic`] - A single compiler diagnostic
//! - [`MessageCatalog`] - Message text per diagnostic code, first seen or from a table
//!
//! ## Examples
//!
//! ```rust
//! use diagsieve::diagnostics::{Diagnostic, DiagnosticCategory, ReclassifiedCategory};
//!
//! let mut diagnostic = Diagnostic::new(2322, DiagnosticCategory::Error, "Type mismatch")
//!     .with_file("/repo/src/a.ts")
//!     .with_position(12, 5);
//!
//! assert!(diagnostic.reclassify(ReclassifiedCategory::Warning));
//! assert_eq!(diagnostic.category, DiagnosticCategory::Warning);
//! ```

pub mod messages;
pub mod parser;
pub mod source;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use messages::MessageTable;

/// Severity of a diagnostic as reported by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl DiagnosticCategory {
    /// Parse the category word used by the compiler's plain output.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "suggestion" => Some(Self::Suggestion),
            "message" => Some(Self::Message),
            _ => None,
        }
    }

    /// Word used when printing the diagnostic back out.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        }
    }

    /// Suggestions and messages are informational and never filtered.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::Suggestion | Self::Message)
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a diagnostic.
///
/// Same variants as [`DiagnosticCategory`] plus `Ignore`, which drops the
/// diagnostic entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReclassifiedCategory {
    Warning,
    Error,
    Suggestion,
    Message,
    Ignore,
}

impl ReclassifiedCategory {
    /// The category a surviving diagnostic should carry, or `None` when
    /// the diagnostic is dropped.
    pub fn category(self) -> Option<DiagnosticCategory> {
        match self {
            Self::Warning => Some(DiagnosticCategory::Warning),
            Self::Error => Some(DiagnosticCategory::Error),
            Self::Suggestion => Some(DiagnosticCategory::Suggestion),
            Self::Message => Some(DiagnosticCategory::Message),
            Self::Ignore => None,
        }
    }

    pub fn is_ignored(self) -> bool {
        self == Self::Ignore
    }
}

impl From<DiagnosticCategory> for ReclassifiedCategory {
    fn from(category: DiagnosticCategory) -> Self {
        match category {
            DiagnosticCategory::Warning => Self::Warning,
            DiagnosticCategory::Error => Self::Error,
            DiagnosticCategory::Suggestion => Self::Suggestion,
            DiagnosticCategory::Message => Self::Message,
        }
    }
}

/// A single compiler diagnostic.
///
/// `file` is an absolute path, or `None` for project-wide diagnostics such as
/// configuration errors. Only `category` is ever rewritten by the sieve; the
/// rest is carried through for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic that is not attached to any file
    pub fn new(code: u32, category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            file: None,
            line: None,
            column: None,
            code,
            category,
            message: message.into(),
        }
    }

    /// Attach the diagnostic to a file
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the 1-based line and column
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Apply a classification outcome in place.
    ///
    /// Returns `false` when the outcome is `Ignore`; the diagnostic is left
    /// untouched in that case and the caller is expected to drop it.
    pub fn reclassify(&mut self, outcome: ReclassifiedCategory) -> bool {
        match outcome.category() {
            Some(category) => {
                self.category = category;
                true
            }
            None => false,
        }
    }
}

/// Message text for each diagnostic code.
///
/// The summary only stores codes, so reporters look the text up here. The
/// first message seen in the run wins; codes never seen fall back to the
/// loaded table, then to the bundled one.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: BTreeMap<u32, String>,
    table: MessageTable,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a diagnostic stream
    pub fn from_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        let mut catalog = Self::new();
        for diagnostic in diagnostics {
            catalog.record(diagnostic);
        }
        catalog
    }

    /// Use `table` for codes that were not seen in the run
    pub fn with_table(mut self, table: MessageTable) -> Self {
        self.table = table;
        self
    }

    /// Remember the message for this code unless one is already known
    pub fn record(&mut self, diagnostic: &Diagnostic) {
        self.messages
            .entry(diagnostic.code)
            .or_insert_with(|| first_line(&diagnostic.message).to_string());
    }

    pub fn get(&self, code: u32) -> Option<&str> {
        self.messages
            .get(&code)
            .or_else(|| self.table.get(&code))
            .or_else(|| messages::bundled().get(&code))
            .map(String::as_str)
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_string() {
        assert_eq!(
            DiagnosticCategory::from_string("error"),
            Some(DiagnosticCategory::Error)
        );
        assert_eq!(
            DiagnosticCategory::from_string("Warning"),
            Some(DiagnosticCategory::Warning)
        );
        assert_eq!(
            DiagnosticCategory::from_string("suggestion"),
            Some(DiagnosticCategory::Suggestion)
        );
        assert_eq!(
            DiagnosticCategory::from_string("message"),
            Some(DiagnosticCategory::Message)
        );
        assert_eq!(DiagnosticCategory::from_string("fatal"), None);
    }

    #[test]
    fn test_informational_categories() {
        assert!(DiagnosticCategory::Suggestion.is_informational());
        assert!(DiagnosticCategory::Message.is_informational());
        assert!(!DiagnosticCategory::Error.is_informational());
        assert!(!DiagnosticCategory::Warning.is_informational());
    }

    #[test]
    fn test_reclassify_rewrites_category() {
        let mut diagnostic = Diagnostic::new(2322, DiagnosticCategory::Error, "msg");
        assert!(diagnostic.reclassify(ReclassifiedCategory::Warning));
        assert_eq!(diagnostic.category, DiagnosticCategory::Warning);
    }

    #[test]
    fn test_reclassify_ignore_leaves_diagnostic_alone() {
        let mut diagnostic = Diagnostic::new(2322, DiagnosticCategory::Error, "msg");
        assert!(!diagnostic.reclassify(ReclassifiedCategory::Ignore));
        assert_eq!(diagnostic.category, DiagnosticCategory::Error);
    }

    #[test]
    fn test_reclassified_from_category() {
        assert_eq!(
            ReclassifiedCategory::from(DiagnosticCategory::Message),
            ReclassifiedCategory::Message
        );
        assert!(ReclassifiedCategory::Ignore.is_ignored());
        assert_eq!(ReclassifiedCategory::Ignore.category(), None);
    }

    #[test]
    fn test_message_catalog_keeps_first_message() {
        let diagnostics = vec![
            Diagnostic::new(2322, DiagnosticCategory::Error, "first\n  detail"),
            Diagnostic::new(2322, DiagnosticCategory::Error, "second"),
            Diagnostic::new(7006, DiagnosticCategory::Error, "implicit any"),
        ];
        let catalog = MessageCatalog::from_diagnostics(&diagnostics);

        assert_eq!(catalog.get(2322), Some("first"));
        assert_eq!(catalog.get(7006), Some("implicit any"));
        assert_eq!(catalog.get(1), None);
    }

    #[test]
    fn test_message_catalog_falls_back_to_tables() {
        let catalog = MessageCatalog::from_diagnostics(&[Diagnostic::new(
            2322,
            DiagnosticCategory::Error,
            "Type 'string' is not assignable to type 'number'.",
        )])
        .with_table(BTreeMap::from([(90001, "Loaded message.".to_string())]));

        assert_eq!(
            catalog.get(2322),
            Some("Type 'string' is not assignable to type 'number'.")
        );
        assert_eq!(catalog.get(90001), Some("Loaded message."));
        assert_eq!(
            catalog.get(7006),
            Some("Parameter '{0}' implicitly has an '{1}' type.")
        );
        assert_eq!(catalog.get(90002), None);
    }
}
