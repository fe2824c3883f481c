//! Parsers for compiler diagnostic output
//!
//! Two input formats are understood:
//!
//! - the compiler's plain output (`tsc --pretty false`), one diagnostic per
//!   line with indented continuation lines for message chains
//! - a JSON array of diagnostic records, for tools that already have
//!   structured diagnostics

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, trace, warn};

use super::{Diagnostic, DiagnosticCategory};
use crate::error::SourceError;
use crate::utils::paths::resolve;

lazy_static! {
    /// `src/a.ts(12,5): error TS2322: Type 'string' is not assignable ...`
    static ref FILE_DIAGNOSTIC: Regex = Regex::new(
        r"^(?P<file>.+?)\((?P<line>\d+),(?P<column>\d+)\): (?P<category>(?i:error|warning|suggestion|message)) TS(?P<code>\d+): (?P<message>.*)$"
    )
    .unwrap();

    /// `error TS5023: Unknown compiler option 'foo'.`
    static ref GLOBAL_DIAGNOSTIC: Regex = Regex::new(
        r"^(?P<category>(?i:error|warning|suggestion|message)) TS(?P<code>\d+): (?P<message>.*)$"
    )
    .unwrap();
}

/// Parse plain compiler output.
///
/// Relative file paths are resolved against `base_dir`. Lines that are not
/// diagnostics (build banners, `Found 3 errors.`) are skipped.
pub fn parse_tsc_output(text: &str, base_dir: &Path) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            if let Some(last) = diagnostics.last_mut() {
                last.message.push('\n');
                last.message.push_str(line.trim_end());
            } else {
                trace!(line, "Continuation line without a diagnostic");
            }
            continue;
        }

        if let Some(caps) = FILE_DIAGNOSTIC.captures(line) {
            let Some(mut diagnostic) = build(&caps["category"], &caps["code"], &caps["message"])
            else {
                continue;
            };
            let file = resolve(base_dir, &caps["file"]);
            diagnostic.file = Some(file);
            diagnostic.line = caps["line"].parse().ok();
            diagnostic.column = caps["column"].parse().ok();
            diagnostics.push(diagnostic);
        } else if let Some(caps) = GLOBAL_DIAGNOSTIC.captures(line) {
            if let Some(diagnostic) = build(&caps["category"], &caps["code"], &caps["message"]) {
                diagnostics.push(diagnostic);
            }
        } else {
            trace!(line, "Skipping non-diagnostic line");
        }
    }

    debug!(count = diagnostics.len(), "Parsed compiler output");
    diagnostics
}

fn build(category: &str, code: &str, message: &str) -> Option<Diagnostic> {
    let category = DiagnosticCategory::from_string(category)?;
    match code.parse::<u32>() {
        Ok(code) => Some(Diagnostic::new(code, category, message)),
        Err(_) => {
            warn!(code, "Diagnostic code out of range, skipping");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonDiagnostic {
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    column: Option<u32>,
    code: u32,
    category: String,
    #[serde(default)]
    message: String,
}

/// Parse a JSON array of diagnostic records.
pub fn parse_json(text: &str, base_dir: &Path) -> Result<Vec<Diagnostic>, SourceError> {
    let records: Vec<JsonDiagnostic> = serde_json::from_str(text).map_err(SourceError::Json)?;

    records
        .into_iter()
        .map(|record| {
            let category = DiagnosticCategory::from_string(&record.category)
                .ok_or_else(|| SourceError::UnknownCategory(record.category.clone()))?;
            Ok(Diagnostic {
                file: record.file.map(|file| resolve(base_dir, &file)),
                line: record.line,
                column: record.column,
                code: record.code,
                category,
                message: record.message,
            })
        })
        .collect()
}
