//! Terminal output formatting with colors

use colored::{ColoredString, Colorize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use super::{report_order, RulesRenderer, SummaryRenderer};
use crate::diagnostics::{Diagnostic, DiagnosticCategory, MessageCatalog};
use crate::error::SieveError;
use crate::filters::summary::ranked;
use crate::filters::{FileSummary, ProjectFilters, Summary};
use crate::utils::paths::display_relative;

const INDENT: &str = "    ";
const UNKNOWN_MESSAGE: &str = "<no diagnostic seen for this code>";

pub struct TerminalOutput {
    base_dir: PathBuf,
    catalog: MessageCatalog,
    detailed: bool,
}

impl TerminalOutput {
    /// Paths are printed relative to `base_dir`
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            catalog: MessageCatalog::new(),
            detailed: true,
        }
    }

    /// Messages to print next to codes in the summary
    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Print one line per file instead of every code
    pub fn terse(mut self) -> Self {
        self.detailed = false;
        self
    }

    fn relative(&self, path: &str) -> String {
        display_relative(path, &self.base_dir)
    }

    fn colored_category(category: DiagnosticCategory) -> ColoredString {
        match category {
            DiagnosticCategory::Error => category.as_str().red().bold(),
            DiagnosticCategory::Warning => category.as_str().yellow().bold(),
            DiagnosticCategory::Suggestion => category.as_str().green(),
            DiagnosticCategory::Message => category.as_str().blue(),
        }
    }

    /// Print diagnostics the way the compiler does, followed by counts
    pub fn format_diagnostics(&self, diagnostics: &[Diagnostic]) -> String {
        let mut output = String::new();

        for diagnostic in diagnostics {
            output.push_str(&self.format_diagnostic(diagnostic));
            output.push('\n');
        }

        let errors = count(diagnostics, DiagnosticCategory::Error);
        let warnings = count(diagnostics, DiagnosticCategory::Warning);
        output.push_str(&format!(
            "\nFound {} error(s), {} warning(s).\n",
            errors.to_string().red().bold(),
            warnings.to_string().yellow().bold()
        ));

        output
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let location = match (&diagnostic.file, diagnostic.line, diagnostic.column) {
            (Some(file), Some(line), Some(column)) => {
                format!("{}({},{}): ", self.relative(file).cyan(), line, column)
            }
            (Some(file), _, _) => format!("{}: ", self.relative(file).cyan()),
            _ => String::new(),
        };

        format!(
            "{}{} {}: {}",
            location,
            Self::colored_category(diagnostic.category),
            format!("TS{}", diagnostic.code).dimmed(),
            diagnostic.message
        )
    }

    fn format_banner(&self) -> String {
        format!(
            "{}\n{}\n{}\n\n",
            "-------".green(),
            "Summary".green(),
            "-------".green()
        )
    }

    fn format_code_group(&self, header: &str, codes: &BTreeMap<u32, usize>) -> String {
        if codes.is_empty() {
            return String::new();
        }

        let mut output = format!("{INDENT}{header}\n");
        for (code, quantity) in ranked(codes) {
            output.push_str(&format!(
                "{INDENT}{INDENT}{}{} {}\n",
                format!("{:>4}", format!("{quantity}x")).yellow(),
                format!("{:>8}:", format!("TS{code}")).dimmed(),
                self.catalog.get(code).unwrap_or(UNKNOWN_MESSAGE)
            ));
        }
        output
    }

    fn format_stale_rules(&self, file: &FileSummary) -> String {
        if !file.has_stale_rules() {
            return String::new();
        }

        let mut output = format!("{INDENT}Unnecessary ignore rules:\n");
        if file.unnecessary_catchall_filter {
            output.push_str(&format!(
                "{INDENT}{INDENT}All {}\n",
                "(all diagnostics are ignored, but none were raised by this file)".dimmed()
            ));
        }
        for code in &file.unnecessarily_filtered_codes {
            output.push_str(&format!(
                "{INDENT}{INDENT}{} {}\n",
                format!("{:>8}:", format!("TS{code}")).dimmed(),
                self.catalog.get(*code).unwrap_or(UNKNOWN_MESSAGE)
            ));
        }
        output
    }

    fn format_file(&self, path: &str, file: &FileSummary) -> String {
        let mut output = format!("{}\n", self.relative(path).bright_cyan());
        output.push_str(&self.format_code_group("Raised diagnostics:", &file.raised_codes));
        output.push_str(&self.format_code_group("Ignored diagnostics:", &file.ignored_codes));
        output.push_str(&self.format_stale_rules(file));
        output.push('\n');
        output
    }

    fn format_file_terse(&self, path: &str, file: &FileSummary) -> String {
        format!(
            "{}  raised {}  ignored {}  stale rules {}\n",
            self.relative(path).bright_cyan(),
            file.raised_total().to_string().yellow(),
            file.ignored_total().to_string().dimmed(),
            if file.has_stale_rules() {
                file.stale_rule_count().to_string().red().bold()
            } else {
                "0".normal()
            }
        )
    }

    fn format_totals(&self, summary: &Summary) -> String {
        format!(
            "Raised: {} │ Ignored: {} │ Unnecessary rules: {}\n",
            summary.total_raised().to_string().yellow().bold(),
            summary.total_ignored().to_string().bold(),
            summary.total_stale_rules().to_string().red().bold()
        )
    }
}

fn count(diagnostics: &[Diagnostic], category: DiagnosticCategory) -> usize {
    diagnostics.iter().filter(|d| d.category == category).count()
}

impl SummaryRenderer for TerminalOutput {
    fn render_summary(
        &self,
        summary: &Summary,
        known_files: &BTreeSet<String>,
    ) -> Result<String, SieveError> {
        let mut output = self.format_banner();

        for path in report_order(summary, known_files) {
            let Some(file) = summary.get(path) else {
                continue;
            };
            if self.detailed {
                output.push_str(&self.format_file(path, file));
            } else {
                output.push_str(&self.format_file_terse(path, file));
            }
        }

        if !self.detailed {
            output.push('\n');
        }
        output.push_str(&self.format_totals(summary));

        Ok(output)
    }
}

impl RulesRenderer for TerminalOutput {
    fn render_rules(
        &self,
        filters: &ProjectFilters,
        queried: &BTreeSet<String>,
    ) -> Result<String, SieveError> {
        let mut output = String::new();

        for path in queried {
            output.push_str(&format!("{}\n", self.relative(path).bright_cyan()));

            let Some(rules) = filters.get(path).filter(|rules| !rules.is_passthrough()) else {
                output.push_str(&format!("{INDENT}{}\n", "no rules".dimmed()));
                continue;
            };

            output.push_str(&format!(
                "{INDENT}default: {}\n",
                rules.default_rule.name().yellow()
            ));
            for (code, rule) in &rules.code_rules {
                output.push_str(&format!(
                    "{INDENT}{} {} {}\n",
                    format!("{:>8}", format!("TS{code}")).dimmed(),
                    "→".dimmed(),
                    rule.name().yellow()
                ));
            }
        }

        Ok(output)
    }
}
