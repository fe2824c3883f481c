//! # Per-file filter rules
//!
//! Rules come in exactly two dimensions:
//!
//! - a [`DefaultRule`] that applies to every code in a file
//! - [`CodeRule`] overrides keyed by diagnostic code
//!
//! They are declared as attributes named `<prefix>` (default rule) or
//! `<prefix><code>` (code rule), for example in `.gitattributes`:
//!
//! ```text
//! legacy/**/*.ts   -ts
//! src/generated.ts ts=aswarnings ts2322=error
//! src/old.ts       ts=onlyerrors -ts7006
//! ```
//!
//! [`ProjectFilters::from_attributes`] turns the raw attribute map into
//! typed rules and rejects values it does not recognize.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::error::RuleError;

/// Behavior applied to any code without an explicit [`CodeRule`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultRule {
    /// Pass everything through unchanged
    #[default]
    All,
    /// Drop everything that is not an error
    OnlyErrors,
    /// Report everything as a warning, errors included
    AsWarnings,
    /// Drop everything
    Ignore,
}

impl DefaultRule {
    /// Parse the value of a `<prefix>` attribute.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "unset" | "ignore" | "none" => Some(Self::Ignore),
            "onlyerrors" => Some(Self::OnlyErrors),
            "aswarnings" => Some(Self::AsWarnings),
            "all" | "set" => Some(Self::All),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::OnlyErrors => "onlyerrors",
            Self::AsWarnings => "aswarnings",
            Self::Ignore => "ignore",
        }
    }
}

/// Override for a single diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeRule {
    /// Keep the native category
    Allow,
    /// Report as an error
    AsError,
    /// Report as a warning
    AsWarning,
    /// Drop
    Ignore,
}

impl CodeRule {
    /// Parse the value of a `<prefix><code>` attribute.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "unset" | "ignore" | "none" => Some(Self::Ignore),
            "error" | "err" => Some(Self::AsError),
            "warn" | "warning" => Some(Self::AsWarning),
            "set" => Some(Self::Allow),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::AsError => "error",
            Self::AsWarning => "warning",
            Self::Ignore => "ignore",
        }
    }
}

/// Filters for a single file.
///
/// An empty value (`FileFilters::default()`) passes everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilters {
    pub default_rule: DefaultRule,
    pub code_rules: BTreeMap<u32, CodeRule>,
}

impl FileFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default rule
    pub fn with_default(mut self, rule: DefaultRule) -> Self {
        self.default_rule = rule;
        self
    }

    /// Add a code override
    pub fn with_code(mut self, code: u32, rule: CodeRule) -> Self {
        self.code_rules.insert(code, rule);
        self
    }

    /// Codes with an explicit `Ignore` override
    pub fn ignored_codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.code_rules
            .iter()
            .filter(|(_, rule)| **rule == CodeRule::Ignore)
            .map(|(code, _)| *code)
    }

    /// Whether this file declares nothing beyond the passthrough default
    pub fn is_passthrough(&self) -> bool {
        self.default_rule == DefaultRule::All && self.code_rules.is_empty()
    }
}

/// Attribute values per file: file path -> attribute name -> value.
pub type AttributeMap = BTreeMap<String, BTreeMap<String, String>>;

/// All filters for the project, keyed by absolute file path.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectFilters {
    files: BTreeMap<String, FileFilters>,
}

impl ProjectFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build filters from raw attributes.
    ///
    /// Every file in `attributes` gets an entry, even when none of its
    /// attributes carry `prefix`. Attributes whose suffix is neither empty
    /// nor numeric belong to someone else and are skipped.
    pub fn from_attributes(attributes: &AttributeMap, prefix: &str) -> Result<Self, RuleError> {
        let mut filters = Self::new();

        for (path, attrs) in attributes {
            let mut file = FileFilters::new();

            for (key, value) in attrs {
                let Some(suffix) = key.strip_prefix(prefix) else {
                    continue;
                };

                if suffix.is_empty() {
                    file.default_rule =
                        DefaultRule::from_attr(value).ok_or_else(|| unrecognized(key, value))?;
                } else if suffix.bytes().all(|b| b.is_ascii_digit()) {
                    let code: u32 = suffix
                        .parse()
                        .map_err(|_| RuleError::InvalidCode { key: key.clone() })?;
                    let rule = CodeRule::from_attr(value).ok_or_else(|| unrecognized(key, value))?;
                    file.code_rules.insert(code, rule);
                } else {
                    trace!(path = %path, attribute = %key, "Skipping unrelated attribute");
                }
            }

            filters.insert(path.clone(), file);
        }

        debug!(files = filters.len(), prefix, "Built project filters");
        Ok(filters)
    }

    pub fn insert(&mut self, path: impl Into<String>, filters: FileFilters) {
        self.files.insert(path.into(), filters);
    }

    pub fn get(&self, path: &str) -> Option<&FileFilters> {
        self.files.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileFilters)> {
        self.files.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.files.keys()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, FileFilters)> for ProjectFilters {
    fn from_iter<I: IntoIterator<Item = (String, FileFilters)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

fn unrecognized(key: &str, value: &str) -> RuleError {
    RuleError::UnrecognizedValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
